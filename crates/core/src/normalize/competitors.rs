#![forbid(unsafe_code)]

use super::value::{f64_at, list_at, str_at, string_list_at, value_str};
use crate::model::{Competitor, CompetitorDiscovery};
use serde_json::{Map, Value};

pub(super) fn extract(container: &Map<String, Value>) -> CompetitorDiscovery {
    CompetitorDiscovery {
        search_terms: string_list_at(
            container,
            &["search_terms", "searchTerms", "queries"],
        ),
        raw_list: competitor_list(
            container,
            &["raw_list", "rawList", "raw_competitors", "all_competitors"],
        ),
        trimmed_list: competitor_list(
            container,
            &["trimmed_list", "trimmedList", "shortlist", "trimmed_competitors"],
        ),
        final_list: competitor_list(
            container,
            &["final_list", "finalList", "final_competitors", "selected_competitors"],
        ),
    }
}

/// Items may be bare ASIN strings or `{asin, relevance_score}` objects.
fn competitor_list(container: &Map<String, Value>, keys: &[&str]) -> Vec<Competitor> {
    let Some(items) = list_at(container, keys) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(obj) => {
                let asin = str_at(obj, &["asin", "ASIN", "id"])?;
                Some(Competitor {
                    asin,
                    relevance_score: f64_at(obj, &["relevance_score", "relevance", "score"]),
                })
            }
            other => value_str(other).map(|asin| Competitor {
                asin,
                relevance_score: None,
            }),
        })
        .collect()
}
