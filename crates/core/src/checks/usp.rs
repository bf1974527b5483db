#![forbid(unsafe_code)]

use crate::model::{Usp, UspEvaluation};
use crate::registry::USP_EVALUATION_CHECKS as DEFS;
use crate::result::{CheckResult, Issue};
use crate::vocab::is_valid_priority;

const MIN_USPS: usize = 3;
const MIN_PRIMARY_USPS: usize = 2;

/// Weights of the composite USP score.
const RELEVANCE_WEIGHT: f64 = 0.45;
const UNIQUENESS_WEIGHT: f64 = 0.25;
const IMPACT_WEIGHT: f64 = 0.30;
const SCORE_TOLERANCE: f64 = 2.0;

pub fn verify_usp_evaluation(input: &UspEvaluation) -> Vec<CheckResult> {
    let mut out = Vec::with_capacity(DEFS.len());

    // M6-01
    let count = input.usps.len();
    out.push(if count >= MIN_USPS {
        CheckResult::pass(DEFS[0].id, DEFS[0].name, format!("{count} USPs"))
    } else {
        CheckResult::fail(
            DEFS[0].id,
            DEFS[0].name,
            format!("{count} USPs"),
            Issue {
                item: "usps".to_string(),
                expected: format!("at least {MIN_USPS}"),
                actual: count.to_string(),
                reason: "too few selling points to differentiate the product".to_string(),
            },
            &["derive more USPs from themes and competitor gaps"],
        )
    });

    // M6-02
    out.push(priority_vocabulary_check(input));

    // M6-03
    out.push(score_formula_check(input));

    // M6-04
    let primary = input
        .usps
        .iter()
        .filter(|u| u.priority == "Primary")
        .count();
    out.push(if primary >= MIN_PRIMARY_USPS {
        CheckResult::pass(
            DEFS[3].id,
            DEFS[3].name,
            format!("{primary} Primary-priority USPs"),
        )
    } else {
        CheckResult::fail(
            DEFS[3].id,
            DEFS[3].name,
            format!("{primary} Primary-priority USPs"),
            Issue {
                item: "usps".to_string(),
                expected: format!("at least {MIN_PRIMARY_USPS} Primary-priority USPs"),
                actual: primary.to_string(),
                reason: "the listing needs at least two lead selling points".to_string(),
            },
            &["promote the strongest USPs to Primary priority"],
        )
    });

    // M6-05
    out.push(proof_point_check(input));

    // M6-06
    out.push(component_range_check(input));

    out
}

fn priority_vocabulary_check(input: &UspEvaluation) -> CheckResult {
    let def = &DEFS[1];
    let invalid: Vec<&Usp> = input
        .usps
        .iter()
        .filter(|u| !is_valid_priority(&u.priority))
        .collect();
    if invalid.is_empty() {
        CheckResult::pass(def.id, def.name, "all priorities in the recognized set")
    } else {
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} USPs carry unrecognized priorities", invalid.len()),
            Issue {
                item: invalid[0].id.clone(),
                expected: "one of Primary, Secondary, Tertiary".to_string(),
                actual: invalid[0].priority.clone(),
                reason: "priority values outside the vocabulary break ranking".to_string(),
            },
            &["map stray priorities onto the three-level vocabulary"],
        )
    }
}

fn score_formula_check(input: &UspEvaluation) -> CheckResult {
    let def = &DEFS[2];
    let mut judged = 0usize;
    let mut mismatch: Option<(&Usp, f64, f64)> = None;
    for usp in &input.usps {
        let Some(scores) = &usp.scores else {
            continue;
        };
        let (Some(relevance), Some(uniqueness), Some(impact), Some(declared)) = (
            scores.customer_relevance,
            scores.competitive_uniqueness,
            scores.market_impact,
            usp.total_score,
        ) else {
            continue;
        };
        judged += 1;
        let computed = RELEVANCE_WEIGHT * relevance
            + UNIQUENESS_WEIGHT * uniqueness
            + IMPACT_WEIGHT * impact;
        if (declared - computed).abs() > SCORE_TOLERANCE && mismatch.is_none() {
            mismatch = Some((usp, declared, computed));
        }
    }
    if judged == 0 {
        return CheckResult::review(
            def.id,
            def.name,
            "no USP carries both a total score and its components; formula not judged",
        );
    }
    match mismatch {
        None => CheckResult::pass(
            def.id,
            def.name,
            format!("{judged} USP scores match the formula within ±{SCORE_TOLERANCE}"),
        ),
        Some((usp, declared, computed)) => CheckResult::fail(
            def.id,
            def.name,
            format!("declared total {declared} diverges from computed {computed:.1}"),
            Issue {
                item: usp.id.clone(),
                expected: format!("{computed:.1} ± {SCORE_TOLERANCE}"),
                actual: declared.to_string(),
                reason: "total does not follow the 0.45/0.25/0.30 formula".to_string(),
            },
            &["recompute USP totals from their component scores"],
        ),
    }
}

fn proof_point_check(input: &UspEvaluation) -> CheckResult {
    let def = &DEFS[4];
    let Some(facts) = &input.truth_set_facts else {
        return CheckResult::review(
            def.id,
            def.name,
            "no fact list supplied; proof points not traced",
        );
    };
    let mut untraced: Option<(&Usp, &str)> = None;
    let mut untraced_count = 0usize;
    for usp in &input.usps {
        for proof in &usp.proof_points {
            let proof = proof.trim();
            if proof.is_empty() {
                continue;
            }
            if !facts.iter().any(|fact| fact.contains(proof)) {
                untraced_count += 1;
                if untraced.is_none() {
                    untraced = Some((usp, proof));
                }
            }
        }
    }
    match untraced {
        None => CheckResult::pass(def.id, def.name, "every proof point traces to a fact"),
        Some((usp, proof)) => CheckResult::fail(
            def.id,
            def.name,
            format!("{untraced_count} proof points not found in the fact list"),
            Issue {
                item: proof.to_string(),
                expected: "proof point appears verbatim in the fact list".to_string(),
                actual: format!("{untraced_count} untraced proof points (first on {})", usp.id),
                reason: "claims without grounding facts cannot be published".to_string(),
            },
            &["back each proof point with a verified fact or drop it"],
        ),
    }
}

fn component_range_check(input: &UspEvaluation) -> CheckResult {
    let def = &DEFS[5];
    let mut judged = 0usize;
    let mut offender: Option<(&Usp, f64)> = None;
    let mut offender_count = 0usize;
    for usp in &input.usps {
        let Some(scores) = &usp.scores else {
            continue;
        };
        for component in [
            scores.customer_relevance,
            scores.competitive_uniqueness,
            scores.market_impact,
        ]
        .into_iter()
        .flatten()
        {
            judged += 1;
            if !(0.0..=100.0).contains(&component) {
                offender_count += 1;
                if offender.is_none() {
                    offender = Some((usp, component));
                }
            }
        }
    }
    if judged == 0 {
        return CheckResult::review(def.id, def.name, "no component scores; range not judged");
    }
    match offender {
        None => CheckResult::pass(
            def.id,
            def.name,
            format!("{judged} component scores within 0-100"),
        ),
        Some((usp, component)) => CheckResult::fail(
            def.id,
            def.name,
            format!("{offender_count} component scores out of range"),
            Issue {
                item: usp.id.clone(),
                expected: "0 <= component <= 100".to_string(),
                actual: format!("{component}"),
                reason: "scores outside the scale suggest a scoring bug upstream".to_string(),
            },
            &["re-score the USP components on the 0-100 scale"],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UspScores;
    use crate::result::CheckStatus;

    fn usp(id: &str, priority: &str) -> Usp {
        Usp {
            id: id.to_string(),
            statement: format!("statement for {id}"),
            tags: vec!["differentiator".to_string()],
            proof_points: vec![format!("proof for {id}")],
            scores: Some(UspScores {
                customer_relevance: Some(80.0),
                competitive_uniqueness: Some(60.0),
                market_impact: Some(70.0),
            }),
            // 0.45*80 + 0.25*60 + 0.30*70 = 72
            total_score: Some(72.0),
            priority: priority.to_string(),
        }
    }

    fn complete_evaluation() -> UspEvaluation {
        let usps = vec![
            usp("usp-1", "Primary"),
            usp("usp-2", "Primary"),
            usp("usp-3", "Secondary"),
        ];
        let facts = usps
            .iter()
            .flat_map(|u| u.proof_points.iter().cloned())
            .collect();
        UspEvaluation {
            usps,
            truth_set_facts: Some(facts),
        }
    }

    #[test]
    fn complete_evaluation_passes() {
        let results = verify_usp_evaluation(&complete_evaluation());
        assert_eq!(results.len(), DEFS.len());
        assert!(results.iter().all(|r| r.status == CheckStatus::Pass));
    }

    #[test]
    fn too_few_usps_fails() {
        let mut eval = complete_evaluation();
        eval.usps.truncate(2);
        let results = verify_usp_evaluation(&eval);
        assert_eq!(results[0].status, CheckStatus::Fail);
    }

    #[test]
    fn unrecognized_priority_fails_vocabulary_check() {
        let mut eval = complete_evaluation();
        eval.usps[1].priority = "very important".to_string();
        let results = verify_usp_evaluation(&eval);
        assert_eq!(results[1].status, CheckStatus::Fail);
        assert_eq!(
            results[1].issue.as_ref().expect("issue").actual,
            "very important"
        );
    }

    #[test]
    fn total_score_tolerance() {
        let mut eval = complete_evaluation();
        // computed 72; ±2 keeps 74 in, 74.5 out
        eval.usps[0].total_score = Some(74.0);
        let results = verify_usp_evaluation(&eval);
        assert_eq!(results[2].status, CheckStatus::Pass);

        eval.usps[0].total_score = Some(74.5);
        let results = verify_usp_evaluation(&eval);
        assert_eq!(results[2].status, CheckStatus::Fail);
    }

    #[test]
    fn formula_without_components_is_review() {
        let mut eval = complete_evaluation();
        for usp in &mut eval.usps {
            usp.scores = None;
        }
        let results = verify_usp_evaluation(&eval);
        assert_eq!(results[2].status, CheckStatus::Review);
        assert_eq!(results[5].status, CheckStatus::Review);
    }

    #[test]
    fn primary_floor_requires_two() {
        let mut eval = complete_evaluation();
        eval.usps[1].priority = "Secondary".to_string();
        let results = verify_usp_evaluation(&eval);
        assert_eq!(results[3].status, CheckStatus::Fail);
    }

    #[test]
    fn proof_points_trace_against_the_fact_list() {
        let mut eval = complete_evaluation();
        eval.usps[0].proof_points.push("unbacked claim".to_string());
        let results = verify_usp_evaluation(&eval);
        assert_eq!(results[4].status, CheckStatus::Fail);
        assert_eq!(
            results[4].issue.as_ref().expect("issue").item,
            "unbacked claim"
        );

        eval.truth_set_facts = None;
        let results = verify_usp_evaluation(&eval);
        assert_eq!(results[4].status, CheckStatus::Review);
    }

    #[test]
    fn component_out_of_range_fails() {
        let mut eval = complete_evaluation();
        eval.usps[2].scores = Some(UspScores {
            customer_relevance: Some(120.0),
            competitive_uniqueness: Some(60.0),
            market_impact: Some(70.0),
        });
        let results = verify_usp_evaluation(&eval);
        assert_eq!(results[5].status, CheckStatus::Fail);
        assert_eq!(results[5].issue.as_ref().expect("issue").actual, "120");
    }
}
