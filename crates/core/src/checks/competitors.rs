#![forbid(unsafe_code)]

use super::text::is_valid_asin;
use crate::model::CompetitorDiscovery;
use crate::registry::COMPETITOR_DISCOVERY_CHECKS as DEFS;
use crate::result::{CheckResult, Issue};
use std::collections::HashSet;

const SEARCH_TERM_COUNT: usize = 5;
const TRIMMED_MIN: usize = 15;
const TRIMMED_MAX: usize = 20;
const FINAL_MIN: usize = 5;
const FINAL_MAX: usize = 10;

pub fn verify_competitor_discovery(input: &CompetitorDiscovery) -> Vec<CheckResult> {
    let mut out = Vec::with_capacity(DEFS.len());

    // M2-01
    let terms = input.search_terms.len();
    out.push(if terms == SEARCH_TERM_COUNT {
        CheckResult::pass(DEFS[0].id, DEFS[0].name, format!("{terms} search terms"))
    } else {
        CheckResult::fail(
            DEFS[0].id,
            DEFS[0].name,
            format!("{terms} search terms"),
            Issue {
                item: "search_terms".to_string(),
                expected: format!("exactly {SEARCH_TERM_COUNT}"),
                actual: terms.to_string(),
                reason: "the discovery stage is calibrated for five queries".to_string(),
            },
            &["adjust the search term set to exactly five queries"],
        )
    });

    // M2-02
    out.push(range_check(
        1,
        "trimmed_list",
        input.trimmed_list.len(),
        TRIMMED_MIN,
        TRIMMED_MAX,
    ));

    // M2-03
    out.push(range_check(
        2,
        "final_list",
        input.final_list.len(),
        FINAL_MIN,
        FINAL_MAX,
    ));

    // M2-04
    out.push(subset_check(input));

    // M2-05
    out.push(asin_format_check(input));

    // M2-06
    out.push(relevance_check(input));

    out
}

fn range_check(index: usize, field: &str, actual: usize, min: usize, max: usize) -> CheckResult {
    let def = &DEFS[index];
    if (min..=max).contains(&actual) {
        CheckResult::pass(def.id, def.name, format!("{actual} competitors in {field}"))
    } else {
        CheckResult::fail(
            def.id,
            def.name,
            format!("{actual} competitors in {field}"),
            Issue {
                item: field.to_string(),
                expected: format!("between {min} and {max}"),
                actual: actual.to_string(),
                reason: format!("{field} is outside the calibrated size window"),
            },
            &["re-run competitor selection to hit the target window"],
        )
    }
}

fn subset_check(input: &CompetitorDiscovery) -> CheckResult {
    let def = &DEFS[3];
    let trimmed: HashSet<&str> = input.trimmed_list.iter().map(|c| c.asin.as_str()).collect();
    let strays: Vec<&str> = input
        .final_list
        .iter()
        .map(|c| c.asin.as_str())
        .filter(|asin| !trimmed.contains(asin))
        .collect();
    if strays.is_empty() {
        CheckResult::pass(
            def.id,
            def.name,
            "every final competitor came from the trimmed list",
        )
    } else {
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} final competitors missing from the trimmed list", strays.len()),
            Issue {
                item: strays[0].to_string(),
                expected: "final_list is a subset of trimmed_list".to_string(),
                actual: format!("{} stray ASINs", strays.len()),
                reason: "final selection must come from the vetted shortlist".to_string(),
            },
            &["rebuild the final list from trimmed-list entries only"],
        )
    }
}

fn asin_format_check(input: &CompetitorDiscovery) -> CheckResult {
    let def = &DEFS[4];
    let invalid: Vec<&str> = input
        .raw_list
        .iter()
        .chain(&input.trimmed_list)
        .chain(&input.final_list)
        .map(|c| c.asin.as_str())
        .filter(|asin| !is_valid_asin(asin))
        .collect();
    if invalid.is_empty() {
        CheckResult::pass(def.id, def.name, "all competitor ASINs are well-formed")
    } else {
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} malformed ASINs", invalid.len()),
            Issue {
                item: invalid[0].to_string(),
                expected: "10 uppercase alphanumeric characters".to_string(),
                actual: format!("{} malformed entries", invalid.len()),
                reason: "malformed identifiers cannot be resolved on the marketplace".to_string(),
            },
            &["drop or correct the malformed ASINs"],
        )
    }
}

fn relevance_check(input: &CompetitorDiscovery) -> CheckResult {
    let def = &DEFS[5];
    let scores: Vec<(&str, f64)> = input
        .final_list
        .iter()
        .filter_map(|c| c.relevance_score.map(|s| (c.asin.as_str(), s)))
        .collect();
    if scores.is_empty() {
        return CheckResult::review(
            def.id,
            def.name,
            "no relevance scores on the final list; range not judged",
        );
    }
    let out_of_range: Vec<&(&str, f64)> = scores
        .iter()
        .filter(|(_, score)| !(0.0..=100.0).contains(score))
        .collect();
    if out_of_range.is_empty() {
        CheckResult::pass(
            def.id,
            def.name,
            format!("{} relevance scores within 0-100", scores.len()),
        )
    } else {
        let (asin, score) = *out_of_range[0];
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} relevance scores out of range", out_of_range.len()),
            Issue {
                item: asin.to_string(),
                expected: "0 <= relevance_score <= 100".to_string(),
                actual: format!("{score}"),
                reason: "scores outside the scale suggest a scoring bug upstream".to_string(),
            },
            &["re-score the final list on the 0-100 scale"],
        )
    }
}
