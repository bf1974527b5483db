#![forbid(unsafe_code)]

//! Verification orchestrator.
//!
//! Per module: no input -> a BLOCKED placeholder for every check in the
//! catalog; input present -> run the module's checks and fold. Modules run in
//! the fixed order of [`EXECUTION_ORDER`]; declared dependency edges are
//! never consulted, so a downstream module with input present is evaluated
//! even when everything upstream failed or was blocked. One upstream defect
//! must not hide downstream defects.

use crate::checks;
use crate::model::CanonicalInput;
use crate::registry::{EXECUTION_ORDER, ModuleId};
use crate::result::{CheckResult, ModuleResult, ProductRef, VerificationResult};
use crate::vocab::DEFAULT_BANNED_TERMS;
use sha2::Digest as _;
use std::fmt::Write as _;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Evaluate every module of a canonical input and assemble the full
/// verification result. Pure over its arguments except for the generated
/// `run_id` and `timestamp`.
pub fn verify(input: &CanonicalInput, banned_terms: Option<&[String]>) -> VerificationResult {
    let default_banned: Vec<String>;
    let banned: &[String] = match banned_terms {
        Some(terms) => terms,
        None => {
            default_banned = DEFAULT_BANNED_TERMS.iter().map(|t| t.to_string()).collect();
            &default_banned
        }
    };

    let mut modules = Vec::with_capacity(EXECUTION_ORDER.len());
    for module in EXECUTION_ORDER {
        let checks = module_checks(module, input, banned)
            .unwrap_or_else(|| blocked_placeholders(module));
        modules.push(ModuleResult::from_checks(
            module.as_str(),
            module.display_name(),
            checks,
        ));
    }

    let status = VerificationResult::fold_status(&modules);
    let summary = VerificationResult::summarize(&modules);
    let timestamp = now_rfc3339();

    VerificationResult {
        run_id: run_id(&input.asin, &timestamp),
        timestamp,
        product: ProductRef {
            asin: input.asin.clone(),
            name: input.product_name.clone(),
        },
        status,
        modules,
        summary,
    }
}

fn module_checks(
    module: ModuleId,
    input: &CanonicalInput,
    banned: &[String],
) -> Option<Vec<CheckResult>> {
    match module {
        ModuleId::ProductContext => input
            .product_context
            .as_ref()
            .map(checks::verify_product_context),
        ModuleId::CompetitorDiscovery => input
            .competitor_discovery
            .as_ref()
            .map(checks::verify_competitor_discovery),
        ModuleId::CustomerIntent => input
            .customer_intent
            .as_ref()
            .map(checks::verify_customer_intent),
        ModuleId::UspEvaluation => input
            .usp_evaluation
            .as_ref()
            .map(checks::verify_usp_evaluation),
        ModuleId::KeywordIntelligence => input
            .keyword_intelligence
            .as_ref()
            .map(checks::verify_keyword_intelligence),
        ModuleId::ListingCreation => input
            .listing_creation
            .as_ref()
            .map(|listing| checks::verify_listing_creation(listing, banned)),
    }
}

fn blocked_placeholders(module: ModuleId) -> Vec<CheckResult> {
    module
        .check_defs()
        .iter()
        .map(|def| CheckResult::blocked(def.id, def.name, module.display_name()))
        .collect()
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

fn run_id(asin: &str, timestamp: &str) -> String {
    let mut hasher = sha2::Sha256::new();
    hasher.update(asin.as_bytes());
    hasher.update(timestamp.as_bytes());
    hasher.update(
        OffsetDateTime::now_utc()
            .unix_timestamp_nanos()
            .to_be_bytes(),
    );
    let digest = hasher.finalize();
    let mut out = String::with_capacity(16);
    out.push_str("run_");
    for b in digest.iter().take(6) {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
