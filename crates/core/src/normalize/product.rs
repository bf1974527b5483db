#![forbid(unsafe_code)]

use super::value::{first_present, list_at, obj_at, str_at, string_list_at, string_map_at};
use crate::model::{Fact, ProductContext, TruthSet};
use serde_json::{Map, Value};

/// External marketplace attribute sub-documents used to backfill the truth
/// set when the primary profile is missing brand/name.
const MARKETPLACE_KEYS: &[&str] = &[
    "external_marketplace_attributes",
    "marketplace_attributes",
    "amazon_attributes",
];

pub(super) fn extract(container: &Map<String, Value>) -> ProductContext {
    let profile = first_present(container, &["product_profile", "profile"])
        .and_then(Value::as_object);
    let lookup = profile.unwrap_or(container);

    let key_attributes = string_list_at(
        container,
        &["key_attributes", "keyAttributes", "attributes", "key_features"],
    );

    ProductContext {
        product_type: str_at(lookup, &["product_type", "productType", "type"]),
        category_path: str_at(
            lookup,
            &["category_path", "categoryPath", "category", "browse_path"],
        ),
        initial_keywords: string_list_at(
            container,
            &["initial_keywords", "initialKeywords", "seed_keywords"],
        ),
        truth_set: extract_truth_set(container, &key_attributes),
        facts: extract_facts(container),
        key_attributes,
    }
}

fn extract_truth_set(container: &Map<String, Value>, key_attributes: &[String]) -> TruthSet {
    let truth = obj_at(container, &["truth_set", "truthSet", "ground_truth"]);
    let marketplace = obj_at(container, MARKETPLACE_KEYS);

    let field = |keys: &[&str]| -> Option<String> {
        truth
            .and_then(|t| str_at(t, keys))
            .or_else(|| marketplace.and_then(|m| str_at(m, keys)))
    };

    let mut features = truth
        .map(|t| string_list_at(t, &["features", "feature_list"]))
        .unwrap_or_default();
    if features.is_empty() {
        // No dedicated feature list: the general attribute list stands in.
        features = key_attributes.to_vec();
    }

    TruthSet {
        brand: field(&["brand", "brand_name"]),
        product_name: field(&["product_name", "name", "title"]),
        features,
        specifications: truth
            .map(|t| string_map_at(t, &["specifications", "specs"]))
            .unwrap_or_default(),
    }
}

fn extract_facts(container: &Map<String, Value>) -> Vec<Fact> {
    let Some(items) = list_at(container, &["facts", "fact_list", "verified_facts"]) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let claim = str_at(obj, &["claim", "statement", "text"])?;
            Some(Fact {
                claim,
                source_ref: str_at(obj, &["source_ref", "source", "reference"]),
            })
        })
        .collect()
}
