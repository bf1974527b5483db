#![forbid(unsafe_code)]

//! Cross-run aggregation for trend and failure analysis.
//!
//! A pure single pass over a batch of verification results: per-module
//! counters, a top-failures table with sample reasons, and per-report
//! summaries. Inputs are never mutated; the output is a snapshot value.

use crate::registry::EXECUTION_ORDER;
use crate::result::{CheckStatus, ModuleStatus, VerificationResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of distinct sample failure reasons retained per check id.
const MAX_SAMPLE_REASONS: usize = 3;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedStats {
    pub total_runs: usize,
    pub total_checks: usize,
    pub passed: usize,
    pub failed: usize,
    pub review: usize,
    pub blocked: usize,
    pub modules: Vec<ModuleStats>,
    pub top_failures: Vec<FailingCheck>,
    pub reports: Vec<ReportSummary>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleStats {
    pub id: String,
    pub name: String,
    pub runs: usize,
    pub passed: usize,
    pub failed: usize,
    pub review: usize,
    pub blocked: usize,
    /// Share of runs in which the module status was PASS; 0 when unseen.
    pub pass_rate: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailingCheck {
    pub check_id: String,
    pub name: String,
    pub fail_count: usize,
    pub sample_reasons: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub asin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub status: ModuleStatus,
    pub checks_total: usize,
    pub checks_failed: usize,
    pub pass_rate: f64,
}

/// The date-keyed blob the historical-tracking collaborator persists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    /// UTC day, `YYYY-MM-DD`.
    pub date: String,
    pub stats: AggregatedStats,
}

pub fn aggregate(results: &[VerificationResult]) -> AggregatedStats {
    let mut stats = AggregatedStats {
        total_runs: results.len(),
        ..AggregatedStats::default()
    };
    let mut module_index: BTreeMap<&str, usize> = BTreeMap::new();
    for module in EXECUTION_ORDER {
        module_index.insert(module.as_str(), stats.modules.len());
        stats.modules.push(ModuleStats {
            id: module.as_str().to_string(),
            name: module.display_name().to_string(),
            ..ModuleStats::default()
        });
    }
    let mut failures: BTreeMap<&str, FailingCheck> = BTreeMap::new();

    for result in results {
        let mut report_passed = 0usize;
        let mut report_failed = 0usize;
        let mut report_review = 0usize;
        let mut report_total = 0usize;

        for module in &result.modules {
            if let Some(&index) = module_index.get(module.id.as_str()) {
                let entry = &mut stats.modules[index];
                entry.runs += 1;
                match module.status {
                    ModuleStatus::Pass => entry.passed += 1,
                    ModuleStatus::Fail => entry.failed += 1,
                    ModuleStatus::ReviewNeeded => entry.review += 1,
                    ModuleStatus::Blocked => entry.blocked += 1,
                    ModuleStatus::Pending => {}
                }
            }

            for check in &module.checks {
                report_total += 1;
                stats.total_checks += 1;
                match check.status {
                    CheckStatus::Pass => {
                        stats.passed += 1;
                        report_passed += 1;
                    }
                    CheckStatus::Review => {
                        stats.review += 1;
                        report_review += 1;
                    }
                    CheckStatus::Blocked => stats.blocked += 1,
                    CheckStatus::Fail => {
                        stats.failed += 1;
                        report_failed += 1;
                        let entry =
                            failures
                                .entry(check.id.as_str())
                                .or_insert_with(|| FailingCheck {
                                    check_id: check.id.clone(),
                                    name: check.name.clone(),
                                    fail_count: 0,
                                    sample_reasons: Vec::new(),
                                });
                        entry.fail_count += 1;
                        let reason = check
                            .issue
                            .as_ref()
                            .map(|i| i.reason.clone())
                            .unwrap_or_else(|| check.detail.clone());
                        if entry.sample_reasons.len() < MAX_SAMPLE_REASONS
                            && !entry.sample_reasons.contains(&reason)
                        {
                            entry.sample_reasons.push(reason);
                        }
                    }
                }
            }
        }

        let status = if report_failed > 0 {
            ModuleStatus::Fail
        } else if report_review > 0 {
            ModuleStatus::ReviewNeeded
        } else {
            ModuleStatus::Pass
        };
        stats.reports.push(ReportSummary {
            asin: result.product.asin.clone(),
            name: result.product.name.clone(),
            status,
            checks_total: report_total,
            checks_failed: report_failed,
            pass_rate: ratio(report_passed, report_total),
        });
    }

    for module in &mut stats.modules {
        module.pass_rate = ratio(module.passed, module.runs);
    }

    let mut top_failures: Vec<FailingCheck> = failures.into_values().collect();
    // Count descending; the BTreeMap already yields id-ascending for ties.
    top_failures.sort_by(|a, b| b.fail_count.cmp(&a.fail_count));
    stats.top_failures = top_failures;

    stats
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
