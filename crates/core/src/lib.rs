#![forbid(unsafe_code)]

//! Normalization and verification core for listing-optimization reports.
//!
//! The pipeline is three pure stages over plain values: [`normalize`] turns a
//! tolerant JSON report into the canonical model, [`verify`] runs the check
//! library over it, and [`aggregate`] folds a batch of results into stats.

pub mod checks;
pub mod model;
pub mod normalize;
pub mod registry;
pub mod result;
pub mod stats;
pub mod verify;
pub mod vocab;

pub use normalize::normalize;
pub use stats::aggregate;
pub use verify::verify;
