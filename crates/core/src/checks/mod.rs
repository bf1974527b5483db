#![forbid(unsafe_code)]

//! The check library: one set of pure check functions per pipeline module.
//!
//! Every function takes canonical module input and returns its results in the
//! fixed catalog order from [`crate::registry`]. Shared failure semantics:
//!
//! - rule violated: FAIL with a structured issue and remediation actions
//! - data needed to judge the rule entirely absent (module present): REVIEW
//! - whole module absent: handled by the orchestrator, never seen here
//!
//! Check functions never panic and never reorder their results.

mod competitors;
mod intent;
mod keywords;
mod listing;
mod product;
mod text;
mod usp;

pub use competitors::verify_competitor_discovery;
pub use intent::verify_customer_intent;
pub use keywords::verify_keyword_intelligence;
pub use listing::verify_listing_creation;
pub use product::verify_product_context;
pub use usp::verify_usp_evaluation;
