#![forbid(unsafe_code)]

//! Controlled vocabularies and synonym tables.
//!
//! These were free-floating literals scattered through the historical
//! verifier; they live here as explicit versioned tables so they can be
//! unit-tested and extended without touching control flow. Matching tables
//! are ordered: the first pattern that matches wins.

/// The four keyword tiers the pipeline recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeywordTier {
    Primary,
    Secondary,
    LongTail,
    Excluded,
}

impl KeywordTier {
    pub fn as_str(self) -> &'static str {
        match self {
            KeywordTier::Primary => "Primary",
            KeywordTier::Secondary => "Secondary",
            KeywordTier::LongTail => "Long-tail",
            KeywordTier::Excluded => "Excluded",
        }
    }
}

/// The three USP priority buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UspPriority {
    Primary,
    Secondary,
    Tertiary,
}

impl UspPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            UspPriority::Primary => "Primary",
            UspPriority::Secondary => "Secondary",
            UspPriority::Tertiary => "Tertiary",
        }
    }
}

/// Canonical tier strings as they appear in canonical input.
pub const VALID_TIERS: &[&str] = &["Primary", "Secondary", "Long-tail", "Excluded"];

/// Canonical priority strings as they appear in canonical input.
pub const VALID_PRIORITIES: &[&str] = &["Primary", "Secondary", "Tertiary"];

pub fn is_valid_tier(tier: &str) -> bool {
    VALID_TIERS.iter().any(|t| *t == tier)
}

pub fn is_valid_priority(priority: &str) -> bool {
    VALID_PRIORITIES.iter().any(|p| *p == priority)
}

/// Canonical customer-intent theme names. Includes two legacy names
/// ("price", "shipping") still accepted by old reports; those are also in
/// [`FORBIDDEN_THEMES`], so current reports fail on them.
pub const ALLOWED_THEMES: &[&str] = &[
    "durability",
    "ease of use",
    "value for money",
    "performance",
    "comfort",
    "design",
    "safety",
    "compatibility",
    "portability",
    "noise level",
    "battery life",
    "customer support",
    "price",
    "shipping",
];

/// Subset of [`ALLOWED_THEMES`] that current reports must not use.
pub const FORBIDDEN_THEMES: &[&str] = &["price", "shipping"];

/// Variant theme name -> canonical theme name.
pub const THEME_SYNONYMS: &[(&str, &str)] = &[
    ("usage", "ease of use"),
    ("usability", "ease of use"),
    ("value", "value for money"),
    ("build quality", "durability"),
    ("sturdiness", "durability"),
    ("looks", "design"),
    ("aesthetics", "design"),
    ("speed", "performance"),
    ("noise", "noise level"),
    ("quietness", "noise level"),
    ("battery", "battery life"),
    ("support", "customer support"),
    ("fit", "comfort"),
];

/// Ordered substring patterns for USP priority strings ("high priority",
/// "tier 1", bare numeric codes). Order matters: Primary and Tertiary
/// patterns are tried before the Secondary catch-alls.
const PRIORITY_PATTERNS: &[(&str, UspPriority)] = &[
    ("primary", UspPriority::Primary),
    ("high", UspPriority::Primary),
    ("top", UspPriority::Primary),
    ("core", UspPriority::Primary),
    ("1", UspPriority::Primary),
    ("tertiary", UspPriority::Tertiary),
    ("supporting", UspPriority::Tertiary),
    ("low", UspPriority::Tertiary),
    ("minor", UspPriority::Tertiary),
    ("3", UspPriority::Tertiary),
    ("secondary", UspPriority::Secondary),
    ("medium", UspPriority::Secondary),
    ("mid", UspPriority::Secondary),
    ("2", UspPriority::Secondary),
];

/// Ordered substring patterns for keyword tier strings. Long-tail and
/// Excluded spellings come first so they are not shadowed by the numeric
/// Primary patterns.
const TIER_PATTERNS: &[(&str, KeywordTier)] = &[
    ("long-tail", KeywordTier::LongTail),
    ("long tail", KeywordTier::LongTail),
    ("longtail", KeywordTier::LongTail),
    ("niche", KeywordTier::LongTail),
    ("exclude", KeywordTier::Excluded),
    ("banned", KeywordTier::Excluded),
    ("remove", KeywordTier::Excluded),
    ("primary", KeywordTier::Primary),
    ("main", KeywordTier::Primary),
    ("core", KeywordTier::Primary),
    ("top", KeywordTier::Primary),
    ("1", KeywordTier::Primary),
    ("secondary", KeywordTier::Secondary),
    ("support", KeywordTier::Secondary),
    ("2", KeywordTier::Secondary),
    ("3", KeywordTier::LongTail),
    ("4", KeywordTier::Excluded),
];

/// Ordered phrase patterns for inferring a tier from a free-text note when
/// the structured tier field is absent.
const TIER_NOTE_PATTERNS: &[(&str, KeywordTier)] = &[
    ("core keyword", KeywordTier::Primary),
    ("tier 1", KeywordTier::Primary),
    ("must rank", KeywordTier::Primary),
    ("primary", KeywordTier::Primary),
    ("long-tail", KeywordTier::LongTail),
    ("long tail", KeywordTier::LongTail),
    ("niche", KeywordTier::LongTail),
    ("tier 3", KeywordTier::LongTail),
    ("exclude", KeywordTier::Excluded),
    ("avoid", KeywordTier::Excluded),
    ("do not use", KeywordTier::Excluded),
    ("tier 4", KeywordTier::Excluded),
    ("tier 2", KeywordTier::Secondary),
    ("secondary", KeywordTier::Secondary),
];

/// Abbreviations allowed to appear as 3+ consecutive uppercase letters in
/// listing copy.
pub const UPPERCASE_ALLOWLIST: &[&str] = &[
    "USB", "LED", "LCD", "OLED", "HDMI", "GPS", "FDA", "BPA", "ABS", "PVC",
    "RGB", "TSA", "XXL", "USA", "AAA", "SUV", "IPX",
];

/// Denylist applied when the caller supplies none.
pub const DEFAULT_BANNED_TERMS: &[&str] = &[
    "guarantee",
    "guaranteed",
    "best seller",
    "bestseller",
    "top rated",
    "cheapest",
    "free shipping",
    "miracle",
    "cure",
    "clinically proven",
    "fda approved",
    "antiviral",
    "covid",
];

pub fn is_allowed_theme(name: &str) -> bool {
    ALLOWED_THEMES.iter().any(|t| *t == name)
}

pub fn is_forbidden_theme(name: &str) -> bool {
    FORBIDDEN_THEMES.iter().any(|t| *t == name)
}

pub fn is_allowed_abbreviation(token: &str) -> bool {
    UPPERCASE_ALLOWLIST.iter().any(|t| *t == token)
}

/// Exact allow-list passes through; synonyms map to their canonical name;
/// anything else passes through unchanged so a later check can fail it.
/// Narrowing, never hiding.
pub fn normalize_theme_name(raw: &str) -> String {
    let lowered = raw.trim().to_ascii_lowercase();
    if is_allowed_theme(&lowered) {
        return lowered;
    }
    for (variant, canonical) in THEME_SYNONYMS {
        if *variant == lowered {
            return (*canonical).to_string();
        }
    }
    lowered
}

/// Unrecognized values default to Secondary rather than an "undefined"
/// bucket, so malformed priorities degrade to valid-but-low data instead of
/// blocking downstream checks.
pub fn normalize_priority(raw: &str) -> UspPriority {
    let lowered = raw.trim().to_ascii_lowercase();
    for (pattern, priority) in PRIORITY_PATTERNS {
        if lowered.contains(pattern) {
            return *priority;
        }
    }
    UspPriority::Secondary
}

pub fn normalize_tier(raw: &str) -> KeywordTier {
    let lowered = raw.trim().to_ascii_lowercase();
    for (pattern, tier) in TIER_PATTERNS {
        if lowered.contains(pattern) {
            return *tier;
        }
    }
    KeywordTier::Secondary
}

/// Infer a tier from prose notes when no structured tier field exists.
pub fn tier_from_notes(notes: &str) -> KeywordTier {
    let lowered = notes.trim().to_ascii_lowercase();
    for (pattern, tier) in TIER_NOTE_PATTERNS {
        if lowered.contains(pattern) {
            return *tier;
        }
    }
    KeywordTier::Secondary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_themes_are_a_subset_of_allowed() {
        for theme in FORBIDDEN_THEMES {
            assert!(is_allowed_theme(theme), "{theme} missing from allow-list");
        }
    }

    #[test]
    fn theme_synonyms_map_to_allowed_names() {
        for (variant, canonical) in THEME_SYNONYMS {
            assert!(is_allowed_theme(canonical), "{variant} -> {canonical}");
        }
        assert_eq!(normalize_theme_name("Usage"), "ease of use");
        assert_eq!(normalize_theme_name("value"), "value for money");
        assert_eq!(normalize_theme_name(" Durability "), "durability");
    }

    #[test]
    fn unmapped_theme_names_pass_through() {
        assert_eq!(normalize_theme_name("Blender Horsepower"), "blender horsepower");
        assert!(!is_allowed_theme("blender horsepower"));
    }

    #[test]
    fn priority_substring_matching() {
        assert_eq!(normalize_priority("high priority"), UspPriority::Primary);
        assert_eq!(normalize_priority("Tier 1"), UspPriority::Primary);
        assert_eq!(normalize_priority("P1"), UspPriority::Primary);
        assert_eq!(normalize_priority("supporting claim"), UspPriority::Tertiary);
        assert_eq!(normalize_priority("low"), UspPriority::Tertiary);
        assert_eq!(normalize_priority("2"), UspPriority::Secondary);
        assert_eq!(normalize_priority("medium"), UspPriority::Secondary);
        assert_eq!(normalize_priority("whatever"), UspPriority::Secondary);
    }

    #[test]
    fn tier_substring_matching() {
        assert_eq!(normalize_tier("Primary"), KeywordTier::Primary);
        assert_eq!(normalize_tier("tier 1"), KeywordTier::Primary);
        assert_eq!(normalize_tier("Long-Tail"), KeywordTier::LongTail);
        assert_eq!(normalize_tier("tier 3"), KeywordTier::LongTail);
        assert_eq!(normalize_tier("niche"), KeywordTier::LongTail);
        assert_eq!(normalize_tier("excluded"), KeywordTier::Excluded);
        assert_eq!(normalize_tier("tier 4"), KeywordTier::Excluded);
        assert_eq!(normalize_tier("garbage"), KeywordTier::Secondary);
    }

    #[test]
    fn tier_from_notes_phrases() {
        assert_eq!(tier_from_notes("core keyword, tier 1"), KeywordTier::Primary);
        assert_eq!(tier_from_notes("too niche for launch"), KeywordTier::LongTail);
        assert_eq!(tier_from_notes("exclude: trademark risk"), KeywordTier::Excluded);
        assert_eq!(tier_from_notes("nothing useful here"), KeywordTier::Secondary);
    }

    #[test]
    fn enum_strings_match_the_valid_sets() {
        for tier in [
            KeywordTier::Primary,
            KeywordTier::Secondary,
            KeywordTier::LongTail,
            KeywordTier::Excluded,
        ] {
            assert!(is_valid_tier(tier.as_str()));
        }
        for priority in [
            UspPriority::Primary,
            UspPriority::Secondary,
            UspPriority::Tertiary,
        ] {
            assert!(is_valid_priority(priority.as_str()));
        }
        assert!(!is_valid_tier("tier 1"));
        assert!(!is_valid_priority(""));
    }

    #[test]
    fn abbreviation_allowlist() {
        assert!(is_allowed_abbreviation("USB"));
        assert!(is_allowed_abbreviation("LED"));
        assert!(!is_allowed_abbreviation("AMAZING"));
    }
}
