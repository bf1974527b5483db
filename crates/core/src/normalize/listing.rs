#![forbid(unsafe_code)]

use super::value::{f64_at, list_at, str_at, string_list_at, value_str};
use crate::model::ListingCreation;
use serde_json::{Map, Value};

pub(super) fn extract(container: &Map<String, Value>) -> ListingCreation {
    ListingCreation {
        title: str_at(container, &["title", "product_title", "listing_title"]),
        bullets: string_list_at(
            container,
            &["bullets", "bullet_points", "bulletPoints"],
        ),
        description: str_at(container, &["description", "product_description"]),
        backend_terms: str_at(
            container,
            &["backend_terms", "backend_keywords", "generic_keywords"],
        ),
        primary_keywords: string_list_at(
            container,
            &["primary_keywords", "primaryKeywords", "main_keywords"],
        ),
        primary_usps: extract_primary_usps(container),
        quality_score: f64_at(container, &["quality_score", "qualityScore"]),
    }
}

/// Primary USPs arrive either as statement strings or `{statement}` objects.
fn extract_primary_usps(container: &Map<String, Value>) -> Vec<String> {
    let Some(items) = list_at(
        container,
        &["primary_usps", "primaryUsps", "main_usps"],
    ) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(obj) => str_at(obj, &["statement", "text", "claim"]),
            other => value_str(other),
        })
        .collect()
}
