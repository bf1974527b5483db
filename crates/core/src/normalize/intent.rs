#![forbid(unsafe_code)]

use super::value::{f64_at, list_at, optional_string_list_at, str_at, string_list_at};
use crate::model::{CustomerIntent, Theme};
use crate::vocab::normalize_theme_name;
use serde_json::{Map, Value};

pub(super) fn extract(container: &Map<String, Value>) -> CustomerIntent {
    CustomerIntent {
        themes: extract_themes(container),
        source_reviews: optional_string_list_at(
            container,
            &["source_reviews", "reviews", "review_corpus"],
        ),
    }
}

fn extract_themes(container: &Map<String, Value>) -> Vec<Theme> {
    let Some(items) = list_at(container, &["themes", "intent_themes", "theme_list"]) else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let obj = item.as_object()?;
            let name = str_at(obj, &["name", "theme", "label"])?;
            Some(Theme {
                id: str_at(obj, &["id", "theme_id"])
                    .unwrap_or_else(|| format!("theme-{}", index + 1)),
                name: normalize_theme_name(&name),
                score: f64_at(obj, &["score", "relevance", "weight"]),
                quotes: string_list_at(obj, &["quotes", "customer_quotes", "evidence"]),
            })
        })
        .collect()
}
