#![forbid(unsafe_code)]

use super::text::{contains_term, distinguishing_words, uppercase_violations};
use crate::model::ListingCreation;
use crate::registry::LISTING_CREATION_CHECKS as DEFS;
use crate::result::{CheckResult, Issue};

const TITLE_MAX_CHARS: usize = 200;
const BULLET_COUNT: usize = 5;
const BULLET_MAX_CHARS: usize = 500;
const DESCRIPTION_MAX_CHARS: usize = 2000;
/// Marketplace limit on the backend search-term field, in UTF-8 bytes.
const BACKEND_MAX_BYTES: usize = 249;
const KEYWORD_COVERAGE_FLOOR: f64 = 0.80;

pub fn verify_listing_creation(input: &ListingCreation, banned_terms: &[String]) -> Vec<CheckResult> {
    let mut out = Vec::with_capacity(DEFS.len());

    // M4-01
    out.push(char_budget_check(
        0,
        "title",
        input.title.as_deref(),
        TITLE_MAX_CHARS,
    ));

    // M4-02
    let bullets = input.bullets.len();
    out.push(if bullets == BULLET_COUNT {
        CheckResult::pass(DEFS[1].id, DEFS[1].name, format!("{bullets} bullets"))
    } else {
        CheckResult::fail(
            DEFS[1].id,
            DEFS[1].name,
            format!("{bullets} bullets"),
            Issue {
                item: "bullets".to_string(),
                expected: format!("exactly {BULLET_COUNT}"),
                actual: bullets.to_string(),
                reason: "the listing template expects five bullet points".to_string(),
            },
            &["rewrite the bullet section to exactly five points"],
        )
    });

    // M4-03
    out.push(bullet_length_check(input));

    // M4-04
    out.push(char_budget_check(
        3,
        "description",
        input.description.as_deref(),
        DESCRIPTION_MAX_CHARS,
    ));

    // M4-05
    out.push(backend_bytes_check(input));

    // M4-06
    out.push(banned_terms_check(input, banned_terms));

    // M4-07
    out.push(uppercase_check(input));

    // M4-08
    out.push(keyword_coverage_check(input));

    // M4-09
    out.push(usp_coverage_check(input));

    out
}

fn char_budget_check(
    index: usize,
    field: &str,
    value: Option<&str>,
    max_chars: usize,
) -> CheckResult {
    let def = &DEFS[index];
    match value {
        None => CheckResult::fail(
            def.id,
            def.name,
            format!("no {field} in the listing"),
            Issue {
                item: field.to_string(),
                expected: format!("a {field} of at most {max_chars} characters"),
                actual: "missing".to_string(),
                reason: format!("a listing cannot publish without a {field}"),
            },
            &[format!("write a {field} for the listing").as_str()],
        ),
        Some(text) => {
            let chars = text.chars().count();
            if chars <= max_chars {
                CheckResult::pass(def.id, def.name, format!("{field} is {chars} characters"))
            } else {
                CheckResult::fail(
                    def.id,
                    def.name,
                    format!("{field} is {chars} characters"),
                    Issue {
                        item: field.to_string(),
                        expected: format!("at most {max_chars} characters"),
                        actual: chars.to_string(),
                        reason: format!("the marketplace truncates over-length {field}s"),
                    },
                    &[format!("shorten the {field} below the character limit").as_str()],
                )
            }
        }
    }
}

fn bullet_length_check(input: &ListingCreation) -> CheckResult {
    let def = &DEFS[2];
    let over: Vec<(usize, usize)> = input
        .bullets
        .iter()
        .enumerate()
        .map(|(i, b)| (i, b.chars().count()))
        .filter(|(_, chars)| *chars > BULLET_MAX_CHARS)
        .collect();
    if over.is_empty() {
        CheckResult::pass(
            def.id,
            def.name,
            format!("all bullets within {BULLET_MAX_CHARS} characters"),
        )
    } else {
        let (index, chars) = over[0];
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} bullets over the character limit", over.len()),
            Issue {
                item: format!("bullet {}", index + 1),
                expected: format!("at most {BULLET_MAX_CHARS} characters"),
                actual: chars.to_string(),
                reason: "over-length bullets get cut off on the product page".to_string(),
            },
            &["tighten the over-length bullets"],
        )
    }
}

fn backend_bytes_check(input: &ListingCreation) -> CheckResult {
    let def = &DEFS[4];
    match input.backend_terms.as_deref() {
        None => CheckResult::fail(
            def.id,
            def.name,
            "no backend terms in the listing",
            Issue {
                item: "backend_terms".to_string(),
                expected: format!("a search-term field of at most {BACKEND_MAX_BYTES} bytes"),
                actual: "missing".to_string(),
                reason: "backend terms drive indexation beyond the visible copy".to_string(),
            },
            &["populate the backend search-term field"],
        ),
        Some(terms) => {
            // Byte length, not character count: the marketplace limit is
            // enforced on UTF-8 bytes.
            let bytes = terms.len();
            if bytes <= BACKEND_MAX_BYTES {
                CheckResult::pass(def.id, def.name, format!("backend terms use {bytes} bytes"))
            } else {
                CheckResult::fail(
                    def.id,
                    def.name,
                    format!("backend terms use {bytes} bytes"),
                    Issue {
                        item: "backend_terms".to_string(),
                        expected: format!("at most {BACKEND_MAX_BYTES} bytes"),
                        actual: bytes.to_string(),
                        reason: "fields over the byte budget are rejected on upload".to_string(),
                    },
                    &["trim the backend terms under the byte budget"],
                )
            }
        }
    }
}

fn copy_fields(input: &ListingCreation) -> String {
    let mut copy = String::new();
    if let Some(title) = &input.title {
        copy.push_str(title);
        copy.push('\n');
    }
    for bullet in &input.bullets {
        copy.push_str(bullet);
        copy.push('\n');
    }
    if let Some(description) = &input.description {
        copy.push_str(description);
        copy.push('\n');
    }
    if let Some(backend) = &input.backend_terms {
        copy.push_str(backend);
        copy.push('\n');
    }
    copy
}

fn banned_terms_check(input: &ListingCreation, banned_terms: &[String]) -> CheckResult {
    let def = &DEFS[5];
    let copy = copy_fields(input);
    let hits: Vec<&str> = banned_terms
        .iter()
        .map(String::as_str)
        .filter(|term| contains_term(&copy, term))
        .collect();
    if hits.is_empty() {
        CheckResult::pass(def.id, def.name, "no banned terms in the copy")
    } else {
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} banned terms found: {}", hits.len(), hits.join(", ")),
            Issue {
                item: hits[0].to_string(),
                expected: "no banned term in listing copy".to_string(),
                actual: format!("{} matches", hits.len()),
                reason: "banned terms risk listing suppression".to_string(),
            },
            &["remove or rephrase the flagged terms"],
        )
    }
}

fn uppercase_check(input: &ListingCreation) -> CheckResult {
    let def = &DEFS[6];
    let copy = copy_fields(input);
    let violations = uppercase_violations(&copy);
    if violations.is_empty() {
        CheckResult::pass(def.id, def.name, "no shouting outside allow-listed abbreviations")
    } else {
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} all-caps tokens: {}", violations.len(), violations.join(", ")),
            Issue {
                item: violations[0].clone(),
                expected: "uppercase runs only for allow-listed abbreviations".to_string(),
                actual: format!("{} all-caps tokens", violations.len()),
                reason: "all-caps copy violates the style guide".to_string(),
            },
            &["rewrite the all-caps tokens in sentence case"],
        )
    }
}

fn keyword_coverage_check(input: &ListingCreation) -> CheckResult {
    let def = &DEFS[7];
    if input.primary_keywords.is_empty() {
        return CheckResult::review(
            def.id,
            def.name,
            "no primary keywords declared; coverage not judged",
        );
    }
    let mut haystack = String::new();
    if let Some(title) = &input.title {
        haystack.push_str(title);
        haystack.push('\n');
    }
    for bullet in &input.bullets {
        haystack.push_str(bullet);
        haystack.push('\n');
    }
    let covered = input
        .primary_keywords
        .iter()
        .filter(|keyword| contains_term(&haystack, keyword))
        .count();
    let ratio = covered as f64 / input.primary_keywords.len() as f64;
    let percent = (ratio * 100.0).round();
    if ratio >= KEYWORD_COVERAGE_FLOOR {
        CheckResult::pass(
            def.id,
            def.name,
            format!("{covered}/{} primary keywords in title+bullets ({percent}%)",
                input.primary_keywords.len()),
        )
    } else {
        let missing: Vec<&str> = input
            .primary_keywords
            .iter()
            .map(String::as_str)
            .filter(|keyword| !contains_term(&haystack, keyword))
            .collect();
        CheckResult::fail(
            def.id,
            def.name,
            format!("only {covered}/{} primary keywords in title+bullets ({percent}%)",
                input.primary_keywords.len()),
            Issue {
                item: missing.first().copied().unwrap_or_default().to_string(),
                expected: format!("at least {}% coverage", (KEYWORD_COVERAGE_FLOOR * 100.0) as u32),
                actual: format!("{percent}%"),
                reason: "primary keywords missing from visible copy lose ranking weight"
                    .to_string(),
            },
            &["work the missing primary keywords into the title or bullets"],
        )
    }
}

fn usp_coverage_check(input: &ListingCreation) -> CheckResult {
    let def = &DEFS[8];
    if input.primary_usps.is_empty() {
        return CheckResult::review(
            def.id,
            def.name,
            "no primary USPs declared; coverage not judged",
        );
    }
    let bullets_text = input.bullets.join("\n");
    let uncovered: Vec<&str> = input
        .primary_usps
        .iter()
        .map(String::as_str)
        .filter(|statement| {
            let probes = distinguishing_words(statement);
            // A statement with no word longer than 4 characters has nothing
            // to probe for; count it as covered.
            !probes.is_empty() && !probes.iter().any(|word| contains_term(&bullets_text, word))
        })
        .collect();
    if uncovered.is_empty() {
        CheckResult::pass(def.id, def.name, "every primary USP echoes in the bullets")
    } else {
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} primary USPs absent from the bullets", uncovered.len()),
            Issue {
                item: uncovered[0].to_string(),
                expected: "each primary USP's distinguishing words appear in a bullet"
                    .to_string(),
                actual: format!("{} USPs unreferenced", uncovered.len()),
                reason: "a primary USP that never surfaces in copy does not sell".to_string(),
            },
            &["rewrite a bullet around each missing USP"],
        )
    }
}
