#![forbid(unsafe_code)]

use crate::model::{CustomerIntent, Theme};
use crate::registry::CUSTOMER_INTENT_CHECKS as DEFS;
use crate::result::{CheckResult, Issue};
use crate::vocab::{is_allowed_theme, is_forbidden_theme};

const THEME_MIN: usize = 5;
const THEME_MAX: usize = 10;
const QUOTES_MIN: usize = 3;
const QUOTES_MAX: usize = 10;

pub fn verify_customer_intent(input: &CustomerIntent) -> Vec<CheckResult> {
    let mut out = Vec::with_capacity(DEFS.len());

    // M5-01
    let count = input.themes.len();
    out.push(if (THEME_MIN..=THEME_MAX).contains(&count) {
        CheckResult::pass(DEFS[0].id, DEFS[0].name, format!("{count} themes"))
    } else {
        CheckResult::fail(
            DEFS[0].id,
            DEFS[0].name,
            format!("{count} themes"),
            Issue {
                item: "themes".to_string(),
                expected: format!("between {THEME_MIN} and {THEME_MAX}"),
                actual: count.to_string(),
                reason: "theme coverage outside the calibrated window".to_string(),
            },
            &["re-cluster customer reviews into five to ten themes"],
        )
    });

    // M5-02
    out.push(membership_check(
        1,
        input,
        |name| !is_allowed_theme(name),
        "a name from the allowed theme vocabulary",
        "name outside the allowed theme vocabulary",
        "map the stray theme onto an allowed name",
    ));

    // M5-03
    out.push(membership_check(
        2,
        input,
        is_forbidden_theme,
        "a name outside the forbidden subset",
        "name in the forbidden theme set",
        "replace the forbidden theme with a product-specific one",
    ));

    // M5-04
    out.push(quote_depth_check(input));

    // M5-05
    out.push(score_range_check(input));

    // M5-06
    out.push(quote_traceability_check(input));

    out
}

fn membership_check(
    index: usize,
    input: &CustomerIntent,
    offends: impl Fn(&str) -> bool,
    expected: &str,
    reason: &str,
    action: &str,
) -> CheckResult {
    let def = &DEFS[index];
    let offenders: Vec<&Theme> = input
        .themes
        .iter()
        .filter(|t| offends(&t.name.trim().to_ascii_lowercase()))
        .collect();
    if offenders.is_empty() {
        CheckResult::pass(def.id, def.name, "all theme names conform")
    } else {
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} offending themes", offenders.len()),
            Issue {
                item: offenders[0].name.clone(),
                expected: expected.to_string(),
                actual: format!("{} offending names", offenders.len()),
                reason: reason.to_string(),
            },
            &[action],
        )
    }
}

fn quote_depth_check(input: &CustomerIntent) -> CheckResult {
    let def = &DEFS[3];
    let off: Vec<(&Theme, usize)> = input
        .themes
        .iter()
        .map(|t| (t, t.quotes.len()))
        .filter(|(_, n)| !(QUOTES_MIN..=QUOTES_MAX).contains(n))
        .collect();
    if off.is_empty() {
        CheckResult::pass(
            def.id,
            def.name,
            format!("every theme carries {QUOTES_MIN}-{QUOTES_MAX} quotes"),
        )
    } else {
        let (theme, n) = off[0];
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} themes outside the quote window", off.len()),
            Issue {
                item: theme.name.clone(),
                expected: format!("between {QUOTES_MIN} and {QUOTES_MAX} quotes"),
                actual: n.to_string(),
                reason: "themes need enough verbatim evidence without padding".to_string(),
            },
            &["rebalance the quotes backing each theme"],
        )
    }
}

fn score_range_check(input: &CustomerIntent) -> CheckResult {
    let def = &DEFS[4];
    let scored: Vec<(&Theme, f64)> = input
        .themes
        .iter()
        .filter_map(|t| t.score.map(|s| (t, s)))
        .collect();
    if scored.is_empty() {
        return CheckResult::review(def.id, def.name, "no theme scores; range not judged");
    }
    let out_of_range: Vec<&(&Theme, f64)> = scored
        .iter()
        .filter(|(_, s)| !(0.0..=100.0).contains(s))
        .collect();
    if out_of_range.is_empty() {
        CheckResult::pass(
            def.id,
            def.name,
            format!("{} theme scores within 0-100", scored.len()),
        )
    } else {
        let (theme, score) = *out_of_range[0];
        CheckResult::fail(
            def.id,
            def.name,
            format!("{} theme scores out of range", out_of_range.len()),
            Issue {
                item: theme.name.clone(),
                expected: "0 <= score <= 100".to_string(),
                actual: format!("{score}"),
                reason: "scores outside the scale suggest a scoring bug upstream".to_string(),
            },
            &["re-score the themes on the 0-100 scale"],
        )
    }
}

fn quote_traceability_check(input: &CustomerIntent) -> CheckResult {
    let def = &DEFS[5];
    let Some(reviews) = &input.source_reviews else {
        return CheckResult::review(
            def.id,
            def.name,
            "no source reviews supplied; quotes not traced",
        );
    };
    let mut untraced: Option<(&Theme, &str)> = None;
    let mut untraced_count = 0usize;
    for theme in &input.themes {
        for quote in &theme.quotes {
            let quote = quote.trim();
            if quote.is_empty() {
                continue;
            }
            if !reviews.iter().any(|review| review.contains(quote)) {
                untraced_count += 1;
                if untraced.is_none() {
                    untraced = Some((theme, quote));
                }
            }
        }
    }
    match untraced {
        None => CheckResult::pass(def.id, def.name, "every quote traces to a source review"),
        Some((theme, quote)) => CheckResult::fail(
            def.id,
            def.name,
            format!("{untraced_count} quotes not found in any source review"),
            Issue {
                item: quote.to_string(),
                expected: "quote appears verbatim inside a source review".to_string(),
                actual: format!("{untraced_count} untraced quotes (first in '{}')", theme.name),
                reason: "quotes that cannot be traced may be fabricated".to_string(),
            },
            &["replace untraced quotes with verbatim review excerpts"],
        ),
    }
}
