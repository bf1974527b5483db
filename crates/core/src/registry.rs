#![forbid(unsafe_code)]

//! Module registry: execution order, display metadata, dependency edges, and
//! the fixed check catalog.
//!
//! Check-id prefixes keep the numbering of the historical report format and
//! are deliberately decoupled from execution order (keyword intelligence runs
//! fifth but has always reported as `M3`). Dashboards and exports key on these
//! ids, so the catalog order is frozen: append-only, never reshuffled.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModuleId {
    ProductContext,
    CompetitorDiscovery,
    CustomerIntent,
    UspEvaluation,
    KeywordIntelligence,
    ListingCreation,
}

/// Fixed orchestration order. Every module with input present is evaluated,
/// regardless of what happened upstream.
pub const EXECUTION_ORDER: [ModuleId; 6] = [
    ModuleId::ProductContext,
    ModuleId::CompetitorDiscovery,
    ModuleId::CustomerIntent,
    ModuleId::UspEvaluation,
    ModuleId::KeywordIntelligence,
    ModuleId::ListingCreation,
];

impl ModuleId {
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleId::ProductContext => "product_context",
            ModuleId::CompetitorDiscovery => "competitor_discovery",
            ModuleId::CustomerIntent => "customer_intent",
            ModuleId::UspEvaluation => "usp_evaluation",
            ModuleId::KeywordIntelligence => "keyword_intelligence",
            ModuleId::ListingCreation => "listing_creation",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ModuleId::ProductContext => "Product Context",
            ModuleId::CompetitorDiscovery => "Competitor Discovery",
            ModuleId::CustomerIntent => "Customer Intent",
            ModuleId::UspEvaluation => "USP Evaluation",
            ModuleId::KeywordIntelligence => "Keyword Intelligence",
            ModuleId::ListingCreation => "Listing Creation",
        }
    }

    pub fn check_prefix(self) -> &'static str {
        match self {
            ModuleId::ProductContext => "M1",
            ModuleId::CompetitorDiscovery => "M2",
            ModuleId::KeywordIntelligence => "M3",
            ModuleId::ListingCreation => "M4",
            ModuleId::CustomerIntent => "M5",
            ModuleId::UspEvaluation => "M6",
        }
    }

    /// Declared upstream stages. UI/documentation metadata only; the
    /// orchestrator never consults these at runtime.
    pub fn dependencies(self) -> &'static [ModuleId] {
        match self {
            ModuleId::ProductContext => &[],
            ModuleId::CompetitorDiscovery => &[ModuleId::ProductContext],
            ModuleId::CustomerIntent => &[ModuleId::CompetitorDiscovery],
            ModuleId::UspEvaluation => &[ModuleId::CustomerIntent],
            ModuleId::KeywordIntelligence => {
                &[ModuleId::ProductContext, ModuleId::UspEvaluation]
            }
            ModuleId::ListingCreation => {
                &[ModuleId::KeywordIntelligence, ModuleId::UspEvaluation]
            }
        }
    }

    pub fn check_defs(self) -> &'static [CheckDef] {
        match self {
            ModuleId::ProductContext => PRODUCT_CONTEXT_CHECKS,
            ModuleId::CompetitorDiscovery => COMPETITOR_DISCOVERY_CHECKS,
            ModuleId::CustomerIntent => CUSTOMER_INTENT_CHECKS,
            ModuleId::UspEvaluation => USP_EVALUATION_CHECKS,
            ModuleId::KeywordIntelligence => KEYWORD_INTELLIGENCE_CHECKS,
            ModuleId::ListingCreation => LISTING_CREATION_CHECKS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckDef {
    pub id: &'static str,
    pub name: &'static str,
}

pub const PRODUCT_CONTEXT_CHECKS: &[CheckDef] = &[
    CheckDef { id: "M1-01", name: "Product type defined" },
    CheckDef { id: "M1-02", name: "Category path defined" },
    CheckDef { id: "M1-03", name: "Key attribute coverage" },
    CheckDef { id: "M1-04", name: "Initial keyword coverage" },
    CheckDef { id: "M1-05", name: "Truth set brand present" },
    CheckDef { id: "M1-06", name: "Truth set product name present" },
    CheckDef { id: "M1-07", name: "Truth set features present" },
    CheckDef { id: "M1-08", name: "Facts carry source references" },
];

pub const COMPETITOR_DISCOVERY_CHECKS: &[CheckDef] = &[
    CheckDef { id: "M2-01", name: "Search term count" },
    CheckDef { id: "M2-02", name: "Trimmed list size" },
    CheckDef { id: "M2-03", name: "Final list size" },
    CheckDef { id: "M2-04", name: "Final list drawn from trimmed list" },
    CheckDef { id: "M2-05", name: "ASIN format" },
    CheckDef { id: "M2-06", name: "Relevance scores in range" },
];

pub const KEYWORD_INTELLIGENCE_CHECKS: &[CheckDef] = &[
    CheckDef { id: "M3-01", name: "Keyword list present" },
    CheckDef { id: "M3-02", name: "Keyword tiers valid" },
    CheckDef { id: "M3-03", name: "Keyword score formula" },
    CheckDef { id: "M3-04", name: "Primary tier depth" },
    CheckDef { id: "M3-05", name: "Bundle keyword depth" },
    CheckDef { id: "M3-06", name: "Bundles reference approved USPs" },
    CheckDef { id: "M3-07", name: "Keyword USP links approved" },
];

pub const LISTING_CREATION_CHECKS: &[CheckDef] = &[
    CheckDef { id: "M4-01", name: "Title length" },
    CheckDef { id: "M4-02", name: "Bullet count" },
    CheckDef { id: "M4-03", name: "Bullet length" },
    CheckDef { id: "M4-04", name: "Description length" },
    CheckDef { id: "M4-05", name: "Backend terms byte budget" },
    CheckDef { id: "M4-06", name: "Banned terms absent" },
    CheckDef { id: "M4-07", name: "Uppercase discipline" },
    CheckDef { id: "M4-08", name: "Primary keyword coverage" },
    CheckDef { id: "M4-09", name: "Primary USP coverage" },
];

pub const CUSTOMER_INTENT_CHECKS: &[CheckDef] = &[
    CheckDef { id: "M5-01", name: "Theme count" },
    CheckDef { id: "M5-02", name: "Theme names allowed" },
    CheckDef { id: "M5-03", name: "Theme names not forbidden" },
    CheckDef { id: "M5-04", name: "Quote depth per theme" },
    CheckDef { id: "M5-05", name: "Theme scores in range" },
    CheckDef { id: "M5-06", name: "Quote traceability" },
];

pub const USP_EVALUATION_CHECKS: &[CheckDef] = &[
    CheckDef { id: "M6-01", name: "USP count" },
    CheckDef { id: "M6-02", name: "USP priorities valid" },
    CheckDef { id: "M6-03", name: "USP score formula" },
    CheckDef { id: "M6-04", name: "Primary USP depth" },
    CheckDef { id: "M6-05", name: "Proof point traceability" },
    CheckDef { id: "M6-06", name: "Component scores in range" },
];
