#![forbid(unsafe_code)]

use crate::model::{Keyword, KeywordIntelligence};
use crate::registry::KEYWORD_INTELLIGENCE_CHECKS as DEFS;
use crate::result::{CheckResult, Issue};
use crate::vocab::is_valid_tier;
use std::collections::HashSet;

const MIN_PRIMARY_KEYWORDS: usize = 5;
const MIN_BUNDLE_KEYWORDS: usize = 3;

/// Weights of the composite keyword score.
const INTENT_WEIGHT: f64 = 0.60;
const ALIGNMENT_WEIGHT: f64 = 0.20;
const DEMAND_WEIGHT: f64 = 0.20;
const SCORE_TOLERANCE: f64 = 1.0;

pub fn verify_keyword_intelligence(input: &KeywordIntelligence) -> Vec<CheckResult> {
    let mut out = Vec::with_capacity(DEFS.len());

    // M3-01
    out.push(if input.keywords.is_empty() {
        CheckResult::fail(
            DEFS[0].id,
            DEFS[0].name,
            "keyword list is empty",
            Issue {
                item: "keywords".to_string(),
                expected: "a non-empty scored keyword list".to_string(),
                actual: "0 keywords".to_string(),
                reason: "nothing for listing creation to draw from".to_string(),
            },
            &["re-run keyword scoring for this product"],
        )
    } else {
        CheckResult::pass(
            DEFS[0].id,
            DEFS[0].name,
            format!("{} scored keywords", input.keywords.len()),
        )
    });

    // M3-02
    out.push(tier_vocabulary_check(input));

    // M3-03
    out.push(score_formula_check(input));

    // M3-04
    let primary = input
        .keywords
        .iter()
        .filter(|k| k.tier == "Primary")
        .count();
    out.push(if primary >= MIN_PRIMARY_KEYWORDS {
        CheckResult::pass(
            DEFS[3].id,
            DEFS[3].name,
            format!("{primary} Primary-tier keywords"),
        )
    } else {
        CheckResult::fail(
            DEFS[3].id,
            DEFS[3].name,
            format!("{primary} Primary-tier keywords"),
            Issue {
                item: "keywords".to_string(),
                expected: format!("at least {MIN_PRIMARY_KEYWORDS} Primary-tier keywords"),
                actual: primary.to_string(),
                reason: "too few head terms to build the title and bullets around".to_string(),
            },
            &["promote more high-scoring keywords into the Primary tier"],
        )
    });

    // M3-05
    out.push(bundle_depth_check(input));

    // M3-06
    out.push(bundle_linkage_check(input));

    // M3-07
    out.push(keyword_linkage_check(input));

    out
}

fn tier_vocabulary_check(input: &KeywordIntelligence) -> CheckResult {
    let def = &DEFS[1];
    let invalid: Vec<&Keyword> = input
        .keywords
        .iter()
        .filter(|k| !is_valid_tier(&k.tier))
        .collect();
    if invalid.is_empty() {
        CheckResult::pass(def.id, def.name, "all tiers in the recognized set")
    } else {
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} keywords carry unrecognized tiers", invalid.len()),
            Issue {
                item: invalid[0].keyword.clone(),
                expected: "one of Primary, Secondary, Long-tail, Excluded".to_string(),
                actual: invalid[0].tier.clone(),
                reason: "tier values outside the vocabulary break tier-based exports".to_string(),
            },
            &["map stray tier values onto the four-tier vocabulary"],
        )
    }
}

fn score_formula_check(input: &KeywordIntelligence) -> CheckResult {
    let def = &DEFS[2];
    let mut judged = 0usize;
    let mut mismatch: Option<(&Keyword, f64, f64)> = None;
    for keyword in &input.keywords {
        let Some(components) = &keyword.components else {
            continue;
        };
        let (Some(pir), Some(cas), Some(sds), Some(declared)) = (
            components.product_intent_relevance,
            components.competitor_alignment_score,
            components.search_demand_score,
            keyword.score,
        ) else {
            continue;
        };
        judged += 1;
        let computed =
            INTENT_WEIGHT * pir + ALIGNMENT_WEIGHT * cas + DEMAND_WEIGHT * sds + keyword.usp_bonus;
        if (declared - computed).abs() > SCORE_TOLERANCE && mismatch.is_none() {
            mismatch = Some((keyword, declared, computed));
        }
    }
    if judged == 0 {
        return CheckResult::review(
            def.id,
            def.name,
            "no keyword carries both a score and its components; formula not judged",
        );
    }
    match mismatch {
        None => CheckResult::pass(
            def.id,
            def.name,
            format!("{judged} keyword scores match the formula within ±{SCORE_TOLERANCE}"),
        ),
        Some((keyword, declared, computed)) => CheckResult::fail(
            def.id,
            def.name,
            format!("declared score {declared} diverges from computed {computed:.1}"),
            Issue {
                item: keyword.keyword.clone(),
                expected: format!("{computed:.1} ± {SCORE_TOLERANCE}"),
                actual: declared.to_string(),
                reason: "score does not follow the 0.60/0.20/0.20 + bonus formula".to_string(),
            },
            &["recompute keyword scores from their components"],
        ),
    }
}

fn bundle_depth_check(input: &KeywordIntelligence) -> CheckResult {
    let def = &DEFS[4];
    if input.usp_bundles.is_empty() {
        return CheckResult::review(def.id, def.name, "no USP bundles declared; depth not judged");
    }
    let shallow: Vec<_> = input
        .usp_bundles
        .iter()
        .filter(|b| b.keywords.len() < MIN_BUNDLE_KEYWORDS)
        .collect();
    if shallow.is_empty() {
        CheckResult::pass(
            def.id,
            def.name,
            format!("{} bundles, all with ≥{MIN_BUNDLE_KEYWORDS} keywords", input.usp_bundles.len()),
        )
    } else {
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} bundles below the keyword floor", shallow.len()),
            Issue {
                item: shallow[0].usp_id.clone(),
                expected: format!("at least {MIN_BUNDLE_KEYWORDS} keywords per bundle"),
                actual: format!("{} keywords", shallow[0].keywords.len()),
                reason: "a USP with too few keywords cannot be reinforced in copy".to_string(),
            },
            &["add supporting keywords to the shallow bundles"],
        )
    }
}

fn bundle_linkage_check(input: &KeywordIntelligence) -> CheckResult {
    let def = &DEFS[5];
    if input.approved_usps.is_empty() {
        return CheckResult::review(
            def.id,
            def.name,
            "no approved USP list supplied; linkage not judged",
        );
    }
    let approved: HashSet<&str> = input.approved_usps.iter().map(String::as_str).collect();
    let strays: Vec<&str> = input
        .usp_bundles
        .iter()
        .map(|b| b.usp_id.as_str())
        .filter(|id| !approved.contains(id))
        .collect();
    if strays.is_empty() {
        CheckResult::pass(def.id, def.name, "every bundle references an approved USP")
    } else {
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} bundles reference unapproved USPs", strays.len()),
            Issue {
                item: strays[0].to_string(),
                expected: "bundle usp_id among approved USP ids".to_string(),
                actual: format!("{} stray bundle ids", strays.len()),
                reason: "bundles must only amplify USPs that survived evaluation".to_string(),
            },
            &["drop bundles for unapproved USPs or update the approved list"],
        )
    }
}

fn keyword_linkage_check(input: &KeywordIntelligence) -> CheckResult {
    let def = &DEFS[6];
    if input.approved_usps.is_empty() {
        return CheckResult::review(
            def.id,
            def.name,
            "no approved USP list supplied; keyword links not judged",
        );
    }
    let linked: Vec<&Keyword> = input
        .keywords
        .iter()
        .filter(|k| k.linked_usp.is_some())
        .collect();
    if linked.is_empty() {
        return CheckResult::review(def.id, def.name, "no keyword declares a USP link");
    }
    let approved: HashSet<&str> = input.approved_usps.iter().map(String::as_str).collect();
    let strays: Vec<&Keyword> = linked
        .into_iter()
        .filter(|k| {
            k.linked_usp
                .as_deref()
                .is_some_and(|id| !approved.contains(id))
        })
        .collect();
    if strays.is_empty() {
        CheckResult::pass(def.id, def.name, "all keyword USP links are approved")
    } else {
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} keywords link to unapproved USPs", strays.len()),
            Issue {
                item: strays[0].keyword.clone(),
                expected: "linked_usp among approved USP ids".to_string(),
                actual: strays[0].linked_usp.clone().unwrap_or_default(),
                reason: "keyword-to-USP links must point at approved USPs".to_string(),
            },
            &["relink the keywords or update the approved USP list"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ScoreComponents, UspBundle};
    use crate::result::CheckStatus;

    fn keyword(term: &str, tier: &str, score: f64) -> Keyword {
        Keyword {
            keyword: term.to_string(),
            keyword_canonical: None,
            score: Some(score),
            tier: tier.to_string(),
            components: Some(ScoreComponents {
                product_intent_relevance: Some(score),
                competitor_alignment_score: Some(score),
                search_demand_score: Some(score),
            }),
            usp_bonus: 0.0,
            risk_flag: None,
            linked_usp: Some("usp-1".to_string()),
        }
    }

    fn complete_intelligence() -> KeywordIntelligence {
        KeywordIntelligence {
            keywords: (0..6)
                .map(|n| keyword(&format!("kw {n}"), "Primary", 80.0))
                .collect(),
            usp_bundles: vec![UspBundle {
                usp_id: "usp-1".to_string(),
                keywords: vec!["a".into(), "b".into(), "c".into()],
            }],
            approved_usps: vec!["usp-1".to_string()],
        }
    }

    #[test]
    fn complete_intelligence_passes() {
        let results = verify_keyword_intelligence(&complete_intelligence());
        assert_eq!(results.len(), DEFS.len());
        assert!(results.iter().all(|r| r.status == CheckStatus::Pass));
    }

    #[test]
    fn score_formula_tolerance_boundaries() {
        // components (80,80,80), bonus 0 -> computed 80
        let mut ki = complete_intelligence();
        ki.keywords[0].score = Some(80.0);
        let results = verify_keyword_intelligence(&ki);
        assert_eq!(results[2].status, CheckStatus::Pass);
        assert_eq!(results[2].id, "M3-03");

        ki.keywords[0].score = Some(85.0);
        let results = verify_keyword_intelligence(&ki);
        assert_eq!(results[2].status, CheckStatus::Fail);
        let issue = results[2].issue.as_ref().expect("issue");
        assert_eq!(issue.actual, "85");
    }

    #[test]
    fn usp_bonus_feeds_the_formula() {
        let mut ki = complete_intelligence();
        ki.keywords[0].usp_bonus = 5.0;
        ki.keywords[0].score = Some(85.0);
        let results = verify_keyword_intelligence(&ki);
        assert_eq!(results[2].status, CheckStatus::Pass);
    }

    #[test]
    fn formula_without_any_components_is_review() {
        let mut ki = complete_intelligence();
        for keyword in &mut ki.keywords {
            keyword.components = None;
        }
        let results = verify_keyword_intelligence(&ki);
        assert_eq!(results[2].status, CheckStatus::Review);
    }

    #[test]
    fn unrecognized_tier_fails_vocabulary_check() {
        let mut ki = complete_intelligence();
        ki.keywords[1].tier = "tier 9".to_string();
        let results = verify_keyword_intelligence(&ki);
        assert_eq!(results[1].status, CheckStatus::Fail);
        assert_eq!(results[1].issue.as_ref().expect("issue").actual, "tier 9");
    }

    #[test]
    fn primary_tier_floor() {
        let mut ki = complete_intelligence();
        for keyword in ki.keywords.iter_mut().skip(2) {
            keyword.tier = "Secondary".to_string();
        }
        let results = verify_keyword_intelligence(&ki);
        assert_eq!(results[3].status, CheckStatus::Fail);
    }

    #[test]
    fn shallow_bundle_fails_and_no_bundles_is_review() {
        let mut ki = complete_intelligence();
        ki.usp_bundles[0].keywords.truncate(2);
        let results = verify_keyword_intelligence(&ki);
        assert_eq!(results[4].status, CheckStatus::Fail);

        ki.usp_bundles.clear();
        let results = verify_keyword_intelligence(&ki);
        assert_eq!(results[4].status, CheckStatus::Review);
    }

    #[test]
    fn unapproved_linkage_fails_and_missing_approved_list_is_review() {
        let mut ki = complete_intelligence();
        ki.usp_bundles[0].usp_id = "usp-9".to_string();
        let results = verify_keyword_intelligence(&ki);
        assert_eq!(results[5].status, CheckStatus::Fail);

        ki.approved_usps.clear();
        let results = verify_keyword_intelligence(&ki);
        assert_eq!(results[5].status, CheckStatus::Review);
        assert_eq!(results[6].status, CheckStatus::Review);
    }

    #[test]
    fn stray_keyword_link_fails() {
        let mut ki = complete_intelligence();
        ki.keywords[2].linked_usp = Some("usp-404".to_string());
        let results = verify_keyword_intelligence(&ki);
        assert_eq!(results[6].status, CheckStatus::Fail);
    }

    #[test]
    fn empty_keyword_list_fails() {
        let mut ki = complete_intelligence();
        ki.keywords.clear();
        let results = verify_keyword_intelligence(&ki);
        assert_eq!(results[0].status, CheckStatus::Fail);
    }
}
