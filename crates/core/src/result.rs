#![forbid(unsafe_code)]

//! Verification result model and the status fold rules.
//!
//! Module status is a deterministic fold over its checks, run status a fold
//! over modules. Results are built once per `verify` call and never mutated.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
    Review,
    Blocked,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub item: String,
    pub expected: String,
    pub actual: String,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub id: String,
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<Issue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
}

impl CheckResult {
    pub fn pass(id: &str, name: &str, detail: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status: CheckStatus::Pass,
            detail: detail.into(),
            issue: None,
            actions: Vec::new(),
        }
    }

    pub fn fail(
        id: &str,
        name: &str,
        detail: impl Into<String>,
        issue: Issue,
        actions: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status: CheckStatus::Fail,
            detail: detail.into(),
            issue: Some(issue),
            actions: actions.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Insufficient data to judge the rule while the module itself is
    /// present. Distinct from FAIL (judged and non-conforming) and from
    /// BLOCKED (whole module absent).
    pub fn review(id: &str, name: &str, detail: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status: CheckStatus::Review,
            detail: detail.into(),
            issue: None,
            actions: Vec::new(),
        }
    }

    pub fn blocked(id: &str, name: &str, module_name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status: CheckStatus::Blocked,
            detail: format!("{module_name} output is missing; check not evaluated"),
            issue: Some(Issue {
                item: module_name.to_string(),
                expected: "module output present".to_string(),
                actual: "missing".to_string(),
                reason: format!("no {module_name} data found in the report"),
            }),
            actions: vec![format!("re-run the {module_name} stage for this product")],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModuleStatus {
    Pass,
    Fail,
    ReviewNeeded,
    Blocked,
    /// Not produced by `verify`; reserved for dashboards that render a module
    /// before its report has been evaluated.
    Pending,
}

impl ModuleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::ReviewNeeded => "REVIEW_NEEDED",
            Self::Blocked => "BLOCKED",
            Self::Pending => "PENDING",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResult {
    pub id: String,
    pub name: String,
    pub status: ModuleStatus,
    pub checks_total: usize,
    pub checks_passed: usize,
    pub checks_failed: usize,
    pub checks: Vec<CheckResult>,
}

impl ModuleResult {
    /// Fold a module's check results into a module result. BLOCKED wins over
    /// FAIL, FAIL over REVIEW_NEEDED, anything over PASS.
    pub fn from_checks(id: &str, name: &str, checks: Vec<CheckResult>) -> Self {
        let mut passed = 0usize;
        let mut failed = 0usize;
        let mut review = 0usize;
        let mut blocked = 0usize;
        for check in &checks {
            match check.status {
                CheckStatus::Pass => passed += 1,
                CheckStatus::Fail => failed += 1,
                CheckStatus::Review => review += 1,
                CheckStatus::Blocked => blocked += 1,
            }
        }
        let status = if blocked > 0 {
            ModuleStatus::Blocked
        } else if failed > 0 {
            ModuleStatus::Fail
        } else if review > 0 {
            ModuleStatus::ReviewNeeded
        } else {
            ModuleStatus::Pass
        };
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status,
            checks_total: checks.len(),
            checks_passed: passed,
            checks_failed: failed,
            checks,
        }
    }

    pub fn has_blocked_check(&self) -> bool {
        self.checks
            .iter()
            .any(|c| c.status == CheckStatus::Blocked)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    Complete,
    Blocked,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    pub asin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_checks: usize,
    pub passed: usize,
    pub failed: usize,
    pub review: usize,
    pub blocked: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub run_id: String,
    pub timestamp: String,
    pub product: ProductRef,
    pub status: RunStatus,
    pub modules: Vec<ModuleResult>,
    pub summary: Summary,
}

impl VerificationResult {
    /// Run-level fold over module results. A blocked check anywhere wins;
    /// otherwise any failed check anywhere; otherwise COMPLETE (REVIEW does
    /// not demote a run).
    pub fn fold_status(modules: &[ModuleResult]) -> RunStatus {
        if modules.iter().any(|m| m.has_blocked_check()) {
            RunStatus::Blocked
        } else if modules.iter().any(|m| m.checks_failed > 0) {
            RunStatus::Failed
        } else {
            RunStatus::Complete
        }
    }

    pub fn summarize(modules: &[ModuleResult]) -> Summary {
        let mut summary = Summary::default();
        for module in modules {
            for check in &module.checks {
                summary.total_checks += 1;
                match check.status {
                    CheckStatus::Pass => summary.passed += 1,
                    CheckStatus::Fail => summary.failed += 1,
                    CheckStatus::Review => summary.review += 1,
                    CheckStatus::Blocked => summary.blocked += 1,
                }
            }
        }
        summary
    }
}
