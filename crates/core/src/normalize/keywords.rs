#![forbid(unsafe_code)]

use super::value::{f64_at, list_at, obj_at, str_at, string_list_at, value_str};
use crate::model::{Keyword, KeywordIntelligence, ScoreComponents, UspBundle};
use crate::vocab::{KeywordTier, normalize_tier, tier_from_notes};
use serde_json::{Map, Value};

pub(super) fn extract(container: &Map<String, Value>) -> KeywordIntelligence {
    KeywordIntelligence {
        keywords: extract_keywords(container),
        usp_bundles: extract_bundles(container),
        approved_usps: extract_approved(container),
    }
}

fn extract_keywords(container: &Map<String, Value>) -> Vec<Keyword> {
    let Some(items) = list_at(
        container,
        &["keywords", "keyword_list", "scored_keywords"],
    ) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let keyword = str_at(obj, &["keyword", "term", "text"])?;
            Some(Keyword {
                keyword,
                keyword_canonical: str_at(
                    obj,
                    &["keyword_canonical", "canonical", "normalized"],
                ),
                score: f64_at(obj, &["score", "final_score", "total_score"]),
                tier: extract_tier(obj),
                components: extract_components(obj),
                usp_bonus: f64_at(obj, &["usp_bonus", "uspBonus", "bonus"]).unwrap_or(0.0),
                risk_flag: str_at(obj, &["risk_flag", "riskFlag", "risk"]),
                linked_usp: str_at(obj, &["linked_usp", "linkedUsp", "usp_id"]),
            })
        })
        .collect()
}

/// Structured tier field first; failing that, infer from a free-text note;
/// failing both, Secondary.
fn extract_tier(obj: &Map<String, Value>) -> String {
    let tier = if let Some(raw) = str_at(obj, &["tier", "priority_tier", "keyword_tier"]) {
        normalize_tier(&raw)
    } else if let Some(notes) = str_at(obj, &["tier_notes", "notes", "comment"]) {
        tier_from_notes(&notes)
    } else {
        KeywordTier::Secondary
    };
    tier.as_str().to_string()
}

fn extract_components(obj: &Map<String, Value>) -> Option<ScoreComponents> {
    let components = obj_at(obj, &["components", "score_components", "breakdown"])?;
    Some(ScoreComponents {
        product_intent_relevance: f64_at(
            components,
            &["product_intent_relevance", "intent_relevance", "pir"],
        ),
        competitor_alignment_score: f64_at(
            components,
            &["competitor_alignment_score", "competitor_alignment", "cas"],
        ),
        search_demand_score: f64_at(
            components,
            &["search_demand_score", "search_demand", "sds"],
        ),
    })
}

fn extract_bundles(container: &Map<String, Value>) -> Vec<UspBundle> {
    let Some(items) = list_at(
        container,
        &["usp_bundles", "bundles", "usp_keyword_bundles"],
    ) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let usp_id = str_at(obj, &["usp_id", "id", "usp"])?;
            Some(UspBundle {
                usp_id,
                keywords: string_list_at(obj, &["keywords", "keyword_list", "terms"]),
            })
        })
        .collect()
}

/// Approved USPs arrive either as id strings or `{id}` objects.
fn extract_approved(container: &Map<String, Value>) -> Vec<String> {
    let Some(items) = list_at(container, &["approved_usps", "approvedUsps", "approved"]) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(obj) => str_at(obj, &["id", "usp_id"]),
            other => value_str(other),
        })
        .collect()
}
