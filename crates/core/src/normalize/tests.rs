#![forbid(unsafe_code)]

use super::*;
use serde_json::json;

#[test]
fn non_object_document_degrades_to_fallback_identity() {
    let input = normalize(&json!([1, 2, 3]), "B00FALLBACK");
    assert_eq!(input.asin, "B00FALLBACK");
    assert!(input.product_context.is_none());
    assert!(input.listing_creation.is_none());

    let input = normalize(&json!("nonsense"), "  ");
    assert_eq!(input.asin, UNKNOWN_ASIN);
}

#[test]
fn identity_resolution_order() {
    let raw = json!({"asin": "B0TOPLEVEL", "ASIN": "B0SHOUTING"});
    assert_eq!(normalize(&raw, "fb").asin, "B0TOPLEVEL");

    let raw = json!({"ASIN": "B0SHOUTING"});
    assert_eq!(normalize(&raw, "fb").asin, "B0SHOUTING");

    let raw = json!({
        "product_context": {"product_profile": {"asin": "B0NESTED00"}}
    });
    assert_eq!(normalize(&raw, "fb").asin, "B0NESTED00");

    let raw = json!({"product_context": {}});
    assert_eq!(normalize(&raw, "report-17").asin, "report-17");
    assert_eq!(normalize(&raw, "").asin, UNKNOWN_ASIN);
}

#[test]
fn module_container_aliases() {
    let snake = normalize(
        &json!({"competitor_discovery": {"search_terms": ["a"]}}),
        "fb",
    );
    let titled = normalize(
        &json!({"Module2_CompetitorDiscovery": {"search_terms": ["a"]}}),
        "fb",
    );
    assert_eq!(snake.competitor_discovery, titled.competitor_discovery);
    assert!(snake.competitor_discovery.is_some());
}

#[test]
fn absent_module_stays_absent_even_when_others_present() {
    let input = normalize(&json!({"listing_creation": {"title": "T"}}), "fb");
    assert!(input.listing_creation.is_some());
    assert!(input.product_context.is_none());
    assert!(input.usp_evaluation.is_none());
}

#[test]
fn product_profile_and_field_aliases() {
    let input = normalize(
        &json!({
            "product_context": {
                "product_profile": {
                    "asin": "B0PROFILE1",
                    "productType": "stand mixer",
                    "category": "Home > Kitchen > Mixers"
                },
                "keyAttributes": ["500W motor", "5qt bowl", "tilt head"],
                "seed_keywords": ["stand mixer", "dough mixer", "kitchen mixer"]
            }
        }),
        "fb",
    );
    let ctx = input.product_context.expect("product context");
    assert_eq!(ctx.product_type.as_deref(), Some("stand mixer"));
    assert_eq!(ctx.category_path.as_deref(), Some("Home > Kitchen > Mixers"));
    assert_eq!(ctx.key_attributes.len(), 3);
    assert_eq!(ctx.initial_keywords.len(), 3);
}

#[test]
fn truth_set_backfills_from_marketplace_attributes() {
    let input = normalize(
        &json!({
            "product_context": {
                "truth_set": {"features": ["feature one"]},
                "external_marketplace_attributes": {
                    "brand": "KitchenPro",
                    "product_name": "KitchenPro Stand Mixer"
                }
            }
        }),
        "fb",
    );
    let truth = input.product_context.expect("product context").truth_set;
    assert_eq!(truth.brand.as_deref(), Some("KitchenPro"));
    assert_eq!(truth.product_name.as_deref(), Some("KitchenPro Stand Mixer"));
    assert_eq!(truth.features, vec!["feature one"]);
}

#[test]
fn truth_set_features_fall_back_to_key_attributes() {
    let input = normalize(
        &json!({
            "product_context": {
                "key_attributes": ["a", "b"],
                "truth_set": {"brand": "X"}
            }
        }),
        "fb",
    );
    let ctx = input.product_context.expect("product context");
    assert_eq!(ctx.truth_set.features, vec!["a", "b"]);
}

#[test]
fn competitor_items_accept_strings_and_objects() {
    let input = normalize(
        &json!({
            "competitor_discovery": {
                "final_list": [
                    "B0AAAAAAA1",
                    {"asin": "B0AAAAAAA2", "relevance_score": 91.5},
                    {"no_asin": true}
                ]
            }
        }),
        "fb",
    );
    let discovery = input.competitor_discovery.expect("competitors");
    assert_eq!(discovery.final_list.len(), 2);
    assert_eq!(discovery.final_list[0].asin, "B0AAAAAAA1");
    assert_eq!(discovery.final_list[1].relevance_score, Some(91.5));
}

#[test]
fn theme_names_pass_through_the_synonym_table() {
    let input = normalize(
        &json!({
            "customer_intent": {
                "themes": [
                    {"name": "Usage", "quotes": ["q1"]},
                    {"name": "value", "quotes": []},
                    {"name": "something weird", "quotes": []}
                ]
            }
        }),
        "fb",
    );
    let intent = input.customer_intent.expect("intent");
    assert_eq!(intent.themes[0].name, "ease of use");
    assert_eq!(intent.themes[0].id, "theme-1");
    assert_eq!(intent.themes[1].name, "value for money");
    assert_eq!(intent.themes[2].name, "something weird");
    assert!(intent.source_reviews.is_none());
}

#[test]
fn source_reviews_present_but_empty_is_not_absent() {
    let input = normalize(
        &json!({"customer_intent": {"themes": [], "source_reviews": []}}),
        "fb",
    );
    let intent = input.customer_intent.expect("intent");
    assert_eq!(intent.source_reviews, Some(vec![]));
}

#[test]
fn usp_priority_normalization_and_defaults() {
    let input = normalize(
        &json!({
            "usp_evaluation": {
                "usps": [
                    {"statement": "a", "priority": "high priority"},
                    {"statement": "b", "priority": "tier 3"},
                    {"statement": "c"}
                ]
            }
        }),
        "fb",
    );
    let usps = input.usp_evaluation.expect("usps").usps;
    assert_eq!(usps[0].priority, "Primary");
    assert_eq!(usps[1].priority, "Tertiary");
    assert_eq!(usps[2].priority, "Secondary");
    assert_eq!(usps[2].id, "usp-3");
}

#[test]
fn keyword_tier_from_structured_field_wins_over_notes() {
    let input = normalize(
        &json!({
            "keyword_intelligence": {
                "keywords": [
                    {"keyword": "a", "tier": "long tail", "tier_notes": "core keyword"}
                ]
            }
        }),
        "fb",
    );
    let keywords = input.keyword_intelligence.expect("keywords").keywords;
    assert_eq!(keywords[0].tier, "Long-tail");
}

#[test]
fn keyword_tier_inferred_from_prose_notes() {
    let input = normalize(
        &json!({
            "keyword_intelligence": {
                "keywords": [
                    {"keyword": "a", "tier_notes": "core keyword, tier 1"},
                    {"keyword": "b", "tier_notes": "too niche"},
                    {"keyword": "c"}
                ]
            }
        }),
        "fb",
    );
    let keywords = input.keyword_intelligence.expect("keywords").keywords;
    assert_eq!(keywords[0].tier, "Primary");
    assert_eq!(keywords[1].tier, "Long-tail");
    assert_eq!(keywords[2].tier, "Secondary");
}

#[test]
fn keyword_components_and_bonus() {
    let input = normalize(
        &json!({
            "keyword_intelligence": {
                "keywords": [{
                    "keyword": "stand mixer",
                    "score": "82",
                    "components": {
                        "product_intent_relevance": 80,
                        "competitor_alignment_score": 85,
                        "search_demand_score": 85
                    },
                    "usp_bonus": 2,
                    "linked_usp": "usp-1"
                }],
                "approved_usps": [{"id": "usp-1"}, "usp-2"]
            }
        }),
        "fb",
    );
    let ki = input.keyword_intelligence.expect("keywords");
    let kw = &ki.keywords[0];
    assert_eq!(kw.score, Some(82.0));
    assert_eq!(kw.usp_bonus, 2.0);
    let components = kw.components.expect("components");
    assert_eq!(components.product_intent_relevance, Some(80.0));
    assert_eq!(ki.approved_usps, vec!["usp-1", "usp-2"]);
}

#[test]
fn listing_fields_and_primary_usp_shapes() {
    let input = normalize(
        &json!({
            "Module4_ListingCreation": {
                "product_title": "KitchenPro Stand Mixer",
                "bullet_points": ["b1", "b2"],
                "backend_keywords": "mixer dough bread",
                "primary_usps": ["plain statement", {"statement": "object statement"}]
            }
        }),
        "fb",
    );
    let listing = input.listing_creation.expect("listing");
    assert_eq!(listing.title.as_deref(), Some("KitchenPro Stand Mixer"));
    assert_eq!(listing.bullets.len(), 2);
    assert_eq!(listing.backend_terms.as_deref(), Some("mixer dough bread"));
    assert_eq!(
        listing.primary_usps,
        vec!["plain statement", "object statement"]
    );
}
