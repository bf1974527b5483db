#![forbid(unsafe_code)]

//! Tolerant normalizer: arbitrary raw report JSON -> [`CanonicalInput`].
//!
//! Reports have accumulated several container/field spellings over time
//! (title-cased module containers, snake_case rewrites, assorted legacy
//! names). Each canonical field is resolved through a small ordered alias
//! list, first match wins. Normalization is total: a malformed or partial
//! document yields absent fields, never an error.

mod competitors;
mod intent;
mod keywords;
mod listing;
mod product;
mod usp;
mod value;

#[cfg(test)]
mod tests;

use crate::model::CanonicalInput;
use serde_json::Value;
use value::{as_obj, first_present, str_at};

/// Identifier used when no ASIN can be recovered from the document or the
/// caller-supplied fallback. Callers must treat it as an error signal, not a
/// valid product id.
pub const UNKNOWN_ASIN: &str = "UNKNOWN";

const PRODUCT_CONTEXT_KEYS: &[&str] = &[
    "product_context",
    "Module1_ProductContext",
    "module_1_product_context",
    "productContext",
];
const COMPETITOR_DISCOVERY_KEYS: &[&str] = &[
    "competitor_discovery",
    "Module2_CompetitorDiscovery",
    "module_2_competitor_discovery",
    "competitorDiscovery",
];
const CUSTOMER_INTENT_KEYS: &[&str] = &[
    "customer_intent",
    "Module5_CustomerIntent",
    "module_5_customer_intent",
    "intent_themes",
];
const USP_EVALUATION_KEYS: &[&str] = &[
    "usp_evaluation",
    "Module6_UspEvaluation",
    "module_6_usp_evaluation",
    "usp_assessment",
];
const KEYWORD_INTELLIGENCE_KEYS: &[&str] = &[
    "keyword_intelligence",
    "Module3_KeywordIntelligence",
    "module_3_keyword_intelligence",
    "keyword_analysis",
];
const LISTING_CREATION_KEYS: &[&str] = &[
    "listing_creation",
    "Module4_ListingCreation",
    "module_4_listing_creation",
    "listing_copy",
];

/// Map an arbitrary raw report document onto the canonical input model.
///
/// `fallback_identifier` is typically derived from the source filename and is
/// used when the document itself carries no ASIN.
pub fn normalize(raw: &Value, fallback_identifier: &str) -> CanonicalInput {
    let Some(root) = as_obj(raw) else {
        return CanonicalInput {
            asin: fallback_or_unknown(fallback_identifier),
            ..CanonicalInput::default()
        };
    };

    let product_context = first_present(root, PRODUCT_CONTEXT_KEYS)
        .and_then(as_obj)
        .map(product::extract);
    let competitor_discovery = first_present(root, COMPETITOR_DISCOVERY_KEYS)
        .and_then(as_obj)
        .map(competitors::extract);
    let customer_intent = first_present(root, CUSTOMER_INTENT_KEYS)
        .and_then(as_obj)
        .map(intent::extract);
    let usp_evaluation = first_present(root, USP_EVALUATION_KEYS)
        .and_then(as_obj)
        .map(usp::extract);
    let keyword_intelligence = first_present(root, KEYWORD_INTELLIGENCE_KEYS)
        .and_then(as_obj)
        .map(keywords::extract);
    let listing_creation = first_present(root, LISTING_CREATION_KEYS)
        .and_then(as_obj)
        .map(listing::extract);

    CanonicalInput {
        asin: extract_asin(raw, fallback_identifier),
        product_name: extract_product_name(raw, product_context.as_ref()),
        product_context,
        competitor_discovery,
        customer_intent,
        usp_evaluation,
        keyword_intelligence,
        listing_creation,
    }
}

fn fallback_or_unknown(fallback: &str) -> String {
    let trimmed = fallback.trim();
    if trimmed.is_empty() {
        UNKNOWN_ASIN.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Identity resolution order: top-level `asin`, top-level `ASIN`, nested
/// profile field, caller fallback, literal UNKNOWN.
fn extract_asin(raw: &Value, fallback: &str) -> String {
    let Some(root) = as_obj(raw) else {
        return fallback_or_unknown(fallback);
    };
    if let Some(asin) = str_at(root, &["asin", "ASIN"]) {
        return asin;
    }
    let nested = first_present(root, PRODUCT_CONTEXT_KEYS)
        .and_then(as_obj)
        .and_then(|ctx| first_present(ctx, &["product_profile", "profile"]))
        .and_then(as_obj)
        .and_then(|profile| str_at(profile, &["asin", "ASIN"]));
    if let Some(asin) = nested {
        return asin;
    }
    fallback_or_unknown(fallback)
}

fn extract_product_name(
    raw: &Value,
    product_context: Option<&crate::model::ProductContext>,
) -> Option<String> {
    if let Some(ctx) = product_context
        && ctx.truth_set.product_name.is_some()
    {
        return ctx.truth_set.product_name.clone();
    }
    let root = as_obj(raw)?;
    str_at(root, &["product_name", "productName", "name"]).or_else(|| {
        first_present(root, PRODUCT_CONTEXT_KEYS)
            .and_then(as_obj)
            .and_then(|ctx| first_present(ctx, &["product_profile", "profile"]))
            .and_then(as_obj)
            .and_then(|profile| str_at(profile, &["product_name", "name", "title"]))
    })
}
