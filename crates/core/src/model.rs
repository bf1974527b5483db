#![forbid(unsafe_code)]

//! Canonical input model: the shapes the check library consumes.
//!
//! One optional sub-record per pipeline module. Absence of a sub-record is
//! meaningful (the module is reported BLOCKED), so every module field stays
//! `Option` and the normalizer never invents an empty record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalInput {
    pub asin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_context: Option<ProductContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor_discovery: Option<CompetitorDiscovery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_intent: Option<CustomerIntent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usp_evaluation: Option<UspEvaluation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_intelligence: Option<KeywordIntelligence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_creation: Option<ListingCreation>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductContext {
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub category_path: Option<String>,
    #[serde(default)]
    pub key_attributes: Vec<String>,
    #[serde(default)]
    pub initial_keywords: Vec<String>,
    #[serde(default)]
    pub truth_set: TruthSet,
    #[serde(default)]
    pub facts: Vec<Fact>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TruthSet {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub claim: String,
    #[serde(default)]
    pub source_ref: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitorDiscovery {
    #[serde(default)]
    pub search_terms: Vec<String>,
    #[serde(default)]
    pub raw_list: Vec<Competitor>,
    #[serde(default)]
    pub trimmed_list: Vec<Competitor>,
    #[serde(default)]
    pub final_list: Vec<Competitor>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub asin: String,
    #[serde(default)]
    pub relevance_score: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerIntent {
    #[serde(default)]
    pub themes: Vec<Theme>,
    #[serde(default)]
    pub source_reviews: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub quotes: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UspEvaluation {
    #[serde(default)]
    pub usps: Vec<Usp>,
    #[serde(default)]
    pub truth_set_facts: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Usp {
    pub id: String,
    pub statement: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub proof_points: Vec<String>,
    #[serde(default)]
    pub scores: Option<UspScores>,
    #[serde(default)]
    pub total_score: Option<f64>,
    /// One of [`crate::vocab::VALID_PRIORITIES`] after normalization. Kept as
    /// a string so the priority-vocabulary check can judge inputs that did
    /// not come through the normalizer.
    #[serde(default)]
    pub priority: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UspScores {
    #[serde(default)]
    pub customer_relevance: Option<f64>,
    #[serde(default)]
    pub competitive_uniqueness: Option<f64>,
    #[serde(default)]
    pub market_impact: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordIntelligence {
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(default)]
    pub usp_bundles: Vec<UspBundle>,
    #[serde(default)]
    pub approved_usps: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub keyword: String,
    #[serde(default)]
    pub keyword_canonical: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    /// One of [`crate::vocab::VALID_TIERS`] after normalization; see the
    /// note on [`Usp::priority`].
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub components: Option<ScoreComponents>,
    #[serde(default)]
    pub usp_bonus: f64,
    #[serde(default)]
    pub risk_flag: Option<String>,
    #[serde(default)]
    pub linked_usp: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    #[serde(default)]
    pub product_intent_relevance: Option<f64>,
    #[serde(default)]
    pub competitor_alignment_score: Option<f64>,
    #[serde(default)]
    pub search_demand_score: Option<f64>,
}

impl ScoreComponents {
    /// True when no component carries a value, so the score formula has
    /// nothing to work with.
    pub fn is_empty(&self) -> bool {
        self.product_intent_relevance.is_none()
            && self.competitor_alignment_score.is_none()
            && self.search_demand_score.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UspBundle {
    pub usp_id: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingCreation {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub backend_terms: Option<String>,
    #[serde(default)]
    pub primary_keywords: Vec<String>,
    #[serde(default)]
    pub primary_usps: Vec<String>,
    #[serde(default)]
    pub quality_score: Option<f64>,
}
