#![forbid(unsafe_code)]

use super::value::{f64_at, list_at, obj_at, optional_string_list_at, str_at, string_list_at};
use crate::model::{Usp, UspEvaluation, UspScores};
use crate::vocab::{UspPriority, normalize_priority};
use serde_json::{Map, Value};

pub(super) fn extract(container: &Map<String, Value>) -> UspEvaluation {
    UspEvaluation {
        usps: extract_usps(container),
        truth_set_facts: optional_string_list_at(
            container,
            &["truth_set_facts", "fact_list", "verified_facts"],
        ),
    }
}

fn extract_usps(container: &Map<String, Value>) -> Vec<Usp> {
    let Some(items) = list_at(container, &["usps", "usp_list", "unique_selling_points"]) else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let obj = item.as_object()?;
            let statement = str_at(obj, &["statement", "text", "claim"])?;
            Some(Usp {
                id: str_at(obj, &["id", "usp_id"])
                    .unwrap_or_else(|| format!("usp-{}", index + 1)),
                statement,
                tags: string_list_at(obj, &["tags", "labels"]),
                proof_points: string_list_at(
                    obj,
                    &["proof_points", "proofPoints", "proofs", "evidence"],
                ),
                scores: extract_scores(obj),
                total_score: f64_at(obj, &["total_score", "totalScore", "score"]),
                priority: str_at(obj, &["priority", "priority_tier", "rank"])
                    .map(|raw| normalize_priority(&raw))
                    .unwrap_or(UspPriority::Secondary)
                    .as_str()
                    .to_string(),
            })
        })
        .collect()
}

fn extract_scores(obj: &Map<String, Value>) -> Option<UspScores> {
    let scores = obj_at(obj, &["scores", "score_breakdown", "scoring"])?;
    Some(UspScores {
        customer_relevance: f64_at(
            scores,
            &["customer_relevance", "customerRelevance", "relevance"],
        ),
        competitive_uniqueness: f64_at(
            scores,
            &["competitive_uniqueness", "competitiveUniqueness", "uniqueness"],
        ),
        market_impact: f64_at(scores, &["market_impact", "marketImpact", "impact"]),
    })
}
