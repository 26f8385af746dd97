//! Solve result: best schedule, month summary, and diagnostics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Diagnostic severity. Ordered most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    /// A hard requirement is unmet or the input is unusable.
    Danger,
    /// The plan is usable but a target cannot be met.
    Warning,
    /// Informational note.
    Info,
}

/// A message attached to a solve result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Short title.
    pub title: String,
    /// Detail text.
    pub detail: String,
}

impl Diagnostic {
    /// Creates a diagnostic.
    pub fn new(severity: Severity, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            detail: detail.into(),
        }
    }

    /// Creates a danger diagnostic.
    pub fn danger(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(Severity::Danger, title, detail)
    }

    /// Creates a warning diagnostic.
    pub fn warning(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title, detail)
    }

    /// Creates an info diagnostic.
    pub fn info(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(Severity::Info, title, detail)
    }
}

/// Month totals of one employee in the chosen schedule.
///
/// All hour values are rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    /// Employee identifier.
    pub employee_id: String,
    /// Balance-adjusted month target.
    pub target_hours: f64,
    /// Contractual month target.
    pub contract_target_hours: f64,
    /// Paid-leave and special-day credit.
    pub credit_hours: f64,
    /// Number of primary shifts.
    pub primary_count: u32,
    /// Number of secondary shifts.
    pub secondary_count: u32,
    /// Hours from shifts.
    pub worked_hours: f64,
    /// Worked plus credit hours.
    pub total_hours: f64,
    /// Balance before this month.
    pub balance_start: f64,
    /// Planned balance correction this month.
    pub balance_adjust: f64,
    /// Balance after this month.
    pub balance_end: f64,
    /// Total minus contract target.
    pub delta_contract: f64,
    /// Total minus adjusted target.
    pub delta_desired: f64,
}

/// Outcome of a completed solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResult {
    /// Month identifier.
    pub month_key: String,
    /// Primary assignee id per day.
    pub primary: Vec<Option<String>>,
    /// Secondary assignee id per day.
    pub secondary: Vec<Option<String>>,
    /// Forced rest days: employee id → per-day flags.
    pub forced_off: BTreeMap<String, Vec<bool>>,
    /// Days selected for a secondary shift.
    pub planned_secondary_days: Vec<usize>,
    /// Days not selected for a secondary shift.
    pub omitted_secondary_days: Vec<usize>,
    /// Per-employee month summary, in request order.
    pub summaries: Vec<EmployeeSummary>,
    /// Diagnostics, most severe first.
    pub diagnostics: Vec<Diagnostic>,
    /// Cost of the chosen schedule. `None` when nothing was planned.
    pub best_cost: Option<f64>,
    /// Number of trial schedules evaluated.
    pub trials_used: u64,
}

impl SolveResult {
    /// An empty result carrying a single danger diagnostic.
    pub fn rejected(month_key: impl Into<String>, days: usize, diagnostic: Diagnostic) -> Self {
        Self {
            month_key: month_key.into(),
            primary: vec![None; days],
            secondary: vec![None; days],
            forced_off: BTreeMap::new(),
            planned_secondary_days: Vec::new(),
            omitted_secondary_days: Vec::new(),
            summaries: Vec::new(),
            diagnostics: vec![diagnostic],
            best_cost: None,
            trials_used: 0,
        }
    }

    /// Whether any danger diagnostic is present.
    pub fn has_danger(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Danger)
    }
}
