#![forbid(unsafe_code)]

//! Text scanning helpers shared by the check modules.

use crate::vocab::is_allowed_abbreviation;

/// Case-insensitive word-boundary containment. A match counts only when the
/// characters on both sides of the matched span are non-alphanumeric (or the
/// span touches the text edge), so "cure" does not match "secure". Works for
/// multi-word terms too.
pub(crate) fn contains_term(text: &str, term: &str) -> bool {
    let haystack = text.to_lowercase();
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(&needle) {
        let begin = start + pos;
        let end = begin + needle.len();
        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        start = end;
    }
    false
}

/// Runs of 3+ consecutive uppercase ASCII letters that are not allow-listed
/// abbreviations. Deduplicated, first-seen order.
pub(crate) fn uppercase_violations(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut run = String::new();
    for ch in text.chars() {
        if ch.is_ascii_uppercase() {
            run.push(ch);
        } else {
            flush_run(&mut run, &mut out);
        }
    }
    flush_run(&mut run, &mut out);
    out
}

fn flush_run(run: &mut String, out: &mut Vec<String>) {
    if run.len() >= 3 && !is_allowed_abbreviation(run) && !out.iter().any(|t| t == run) {
        out.push(run.clone());
    }
    run.clear();
}

/// The first 3 words of a statement longer than 4 characters, used to probe
/// whether a USP's distinguishing language made it into the copy.
pub(crate) fn distinguishing_words(statement: &str) -> Vec<String> {
    statement
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 4)
        .take(3)
        .map(|w| w.to_string())
        .collect()
}

/// A 10-character uppercase-alphanumeric identifier.
pub(crate) fn is_valid_asin(asin: &str) -> bool {
    asin.len() == 10
        && asin
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_matching_respects_word_boundaries() {
        assert!(contains_term("A cure for everything", "cure"));
        assert!(contains_term("Cure-all tonic", "cure"));
        assert!(!contains_term("A secure latch", "cure"));
        assert!(!contains_term("procured parts", "cure"));
        assert!(contains_term("THE BEST SELLER here", "best seller"));
        assert!(!contains_term("anything", ""));
    }

    #[test]
    fn term_matching_is_case_insensitive() {
        assert!(contains_term("GUARANTEED results", "guaranteed"));
        assert!(contains_term("guaranteed", "GUARANTEED"));
    }

    #[test]
    fn uppercase_runs_outside_allowlist_are_flagged() {
        assert_eq!(
            uppercase_violations("AMAZING quality with USB and LED"),
            vec!["AMAZING"]
        );
        assert!(uppercase_violations("Standard copy with HDMI port").is_empty());
        assert_eq!(uppercase_violations("BUY NOW BUY"), vec!["BUY", "NOW"]);
        // Two letters never trip the scan.
        assert!(uppercase_violations("UV resistant, 5V input").is_empty());
    }

    #[test]
    fn distinguishing_words_skip_short_tokens() {
        assert_eq!(
            distinguishing_words("The quietest motor in its class"),
            vec!["quietest", "motor", "class"]
        );
        assert_eq!(
            distinguishing_words("Built to last through decades of daily kneading"),
            vec!["Built", "through", "decades"]
        );
    }

    #[test]
    fn asin_pattern() {
        assert!(is_valid_asin("B0ABCD1234"));
        assert!(!is_valid_asin("b0abcd1234"));
        assert!(!is_valid_asin("B0ABCD123"));
        assert!(!is_valid_asin("B0ABCD12345"));
        assert!(!is_valid_asin("B0ABCD-234"));
    }
}
