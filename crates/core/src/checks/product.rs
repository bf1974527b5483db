#![forbid(unsafe_code)]

use crate::model::ProductContext;
use crate::registry::PRODUCT_CONTEXT_CHECKS as DEFS;
use crate::result::{CheckResult, Issue};

const MIN_KEY_ATTRIBUTES: usize = 3;
const MIN_INITIAL_KEYWORDS: usize = 3;
const CATEGORY_SEPARATOR: &str = ">";

pub fn verify_product_context(input: &ProductContext) -> Vec<CheckResult> {
    let mut out = Vec::with_capacity(DEFS.len());

    // M1-01
    out.push(match &input.product_type {
        Some(product_type) => CheckResult::pass(
            DEFS[0].id,
            DEFS[0].name,
            format!("product type: {product_type}"),
        ),
        None => CheckResult::fail(
            DEFS[0].id,
            DEFS[0].name,
            "no product type in the profile",
            Issue {
                item: "product_type".to_string(),
                expected: "a non-empty product type".to_string(),
                actual: "missing".to_string(),
                reason: "the profile does not state what kind of product this is".to_string(),
            },
            &["add a product_type to the product profile"],
        ),
    });

    // M1-02
    out.push(match &input.category_path {
        Some(path) if path.contains(CATEGORY_SEPARATOR) => CheckResult::pass(
            DEFS[1].id,
            DEFS[1].name,
            format!("category path: {path}"),
        ),
        Some(path) => CheckResult::fail(
            DEFS[1].id,
            DEFS[1].name,
            "category path has no hierarchy",
            Issue {
                item: "category_path".to_string(),
                expected: format!("a path with '{CATEGORY_SEPARATOR}' separators"),
                actual: path.clone(),
                reason: "a single flat category cannot anchor keyword research".to_string(),
            },
            &["replace the category with a full browse-node path"],
        ),
        None => CheckResult::fail(
            DEFS[1].id,
            DEFS[1].name,
            "no category path in the profile",
            Issue {
                item: "category_path".to_string(),
                expected: format!("a path with '{CATEGORY_SEPARATOR}' separators"),
                actual: "missing".to_string(),
                reason: "the profile does not place the product in a category".to_string(),
            },
            &["add a category_path to the product profile"],
        ),
    });

    // M1-03
    out.push(min_count_check(
        2,
        "key_attributes",
        input.key_attributes.len(),
        MIN_KEY_ATTRIBUTES,
        "list the product's main attributes (material, capacity, dimensions, ...)",
    ));

    // M1-04
    out.push(min_count_check(
        3,
        "initial_keywords",
        input.initial_keywords.len(),
        MIN_INITIAL_KEYWORDS,
        "seed at least three starting keywords for downstream research",
    ));

    // M1-05
    out.push(truth_field_check(4, "brand", input.truth_set.brand.as_deref()));

    // M1-06
    out.push(truth_field_check(
        5,
        "product_name",
        input.truth_set.product_name.as_deref(),
    ));

    // M1-07
    out.push(if input.truth_set.features.is_empty() {
        CheckResult::fail(
            DEFS[6].id,
            DEFS[6].name,
            "truth set has no features",
            Issue {
                item: "truth_set.features".to_string(),
                expected: "at least one verified feature".to_string(),
                actual: "empty".to_string(),
                reason: "downstream claim checks have no ground truth to compare against"
                    .to_string(),
            },
            &["populate the truth set feature list from verified sources"],
        )
    } else {
        CheckResult::pass(
            DEFS[6].id,
            DEFS[6].name,
            format!("{} verified features", input.truth_set.features.len()),
        )
    });

    // M1-08
    out.push(facts_check(input));

    out
}

fn min_count_check(
    index: usize,
    field: &str,
    actual: usize,
    min: usize,
    action: &str,
) -> CheckResult {
    let def = &DEFS[index];
    if actual >= min {
        CheckResult::pass(def.id, def.name, format!("{actual} {field} entries"))
    } else {
        CheckResult::fail(
            def.id,
            def.name,
            format!("only {actual} {field} entries"),
            Issue {
                item: field.to_string(),
                expected: format!("at least {min}"),
                actual: actual.to_string(),
                reason: format!("{field} is too thin to drive the later stages"),
            },
            &[action],
        )
    }
}

fn truth_field_check(index: usize, field: &str, value: Option<&str>) -> CheckResult {
    let def = &DEFS[index];
    match value {
        Some(value) => CheckResult::pass(def.id, def.name, format!("{field}: {value}")),
        None => CheckResult::fail(
            def.id,
            def.name,
            format!("truth set has no {field}"),
            Issue {
                item: format!("truth_set.{field}"),
                expected: format!("a non-empty {field}"),
                actual: "missing".to_string(),
                reason: format!("{field} cannot be verified in listing copy without ground truth"),
            },
            &["backfill the truth set from marketplace attributes or the product profile"],
        ),
    }
}

fn facts_check(input: &ProductContext) -> CheckResult {
    let def = &DEFS[7];
    if input.facts.is_empty() {
        return CheckResult::review(def.id, def.name, "no facts declared; nothing to trace");
    }
    let unsourced: Vec<&str> = input
        .facts
        .iter()
        .filter(|fact| fact.source_ref.as_deref().is_none_or(|s| s.trim().is_empty()))
        .map(|fact| fact.claim.as_str())
        .collect();
    if unsourced.is_empty() {
        CheckResult::pass(
            def.id,
            def.name,
            format!("all {} facts carry a source reference", input.facts.len()),
        )
    } else {
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} of {} facts lack a source reference", unsourced.len(), input.facts.len()),
            Issue {
                item: unsourced[0].to_string(),
                expected: "every fact cites a source_ref".to_string(),
                actual: format!("{} unsourced facts", unsourced.len()),
                reason: "unsourced facts cannot back USP proof points".to_string(),
            },
            &["attach a source reference to every declared fact"],
        )
    }
}
