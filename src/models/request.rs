//! Solve request: everything the core needs to plan one month.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Block, Day, Employee, SpecialDay, WeekSegment};

/// Default number of trial schedules.
pub const DEFAULT_TRIAL_COUNT: u64 = 10_000;

/// Solver settings carried with a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolveSettings {
    /// Number of randomized trial schedules to evaluate. Zero runs a
    /// single trial.
    pub trial_count: u64,
    /// Favor longer spacing between duties over hour balance.
    pub prefer_gaps: bool,
    /// Initial seed of the trial stream. `None` = random.
    pub seed: Option<u32>,
}

impl Default for SolveSettings {
    fn default() -> Self {
        Self {
            trial_count: DEFAULT_TRIAL_COUNT,
            prefer_gaps: false,
            seed: None,
        }
    }
}

/// Input of one solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    /// Month identifier (`YYYY-MM`).
    pub month_key: String,
    /// Days of the month in order.
    pub days: Vec<Day>,
    /// Calendar-week segments covering the days.
    pub week_segments: Vec<WeekSegment>,
    /// Employees to schedule.
    pub employees: Vec<Employee>,
    /// Blocks: employee id → day index → block.
    #[serde(default)]
    pub blocks: BTreeMap<String, BTreeMap<usize, Block>>,
    /// Externally mandated secondary shifts per day.
    #[serde(default)]
    pub secondary_mandate: Vec<bool>,
    /// Special-day markers per day.
    #[serde(default)]
    pub special_days: Vec<SpecialDay>,
    /// Solver settings.
    #[serde(default)]
    pub settings: SolveSettings,
}

impl SolveRequest {
    /// Creates a request from prepared days and segments.
    pub fn new(
        month_key: impl Into<String>,
        days: Vec<Day>,
        week_segments: Vec<WeekSegment>,
        employees: Vec<Employee>,
    ) -> Self {
        Self {
            month_key: month_key.into(),
            days,
            week_segments,
            employees,
            blocks: BTreeMap::new(),
            secondary_mandate: Vec::new(),
            special_days: Vec::new(),
            settings: SolveSettings::default(),
        }
    }

    /// Creates a request for a calendar month, building days and segments.
    pub fn for_month(year: i32, month: u32, employees: Vec<Employee>) -> Self {
        let days = Day::month_days(year, month);
        let segments = WeekSegment::from_days(&days);
        Self::new(format!("{year:04}-{month:02}"), days, segments, employees)
    }

    /// Sets a block for an employee on a day.
    pub fn with_block(mut self, employee_id: impl Into<String>, day: usize, block: Block) -> Self {
        self.blocks
            .entry(employee_id.into())
            .or_default()
            .insert(day, block);
        self
    }

    /// Mandates a secondary shift on a day.
    pub fn with_secondary_mandate(mut self, day: usize) -> Self {
        if self.secondary_mandate.len() < self.days.len() {
            self.secondary_mandate.resize(self.days.len(), false);
        }
        if let Some(flag) = self.secondary_mandate.get_mut(day) {
            *flag = true;
        }
        self
    }

    /// Marks a special day.
    pub fn with_special_day(mut self, day: usize, kind: SpecialDay) -> Self {
        if self.special_days.len() < self.days.len() {
            self.special_days.resize(self.days.len(), SpecialDay::None);
        }
        if let Some(slot) = self.special_days.get_mut(day) {
            *slot = kind;
        }
        self
    }

    /// Sets the trial count. Zero is treated as one.
    pub fn with_trial_count(mut self, trials: u64) -> Self {
        self.settings.trial_count = trials;
        self
    }

    /// Sets the initial seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.settings.seed = Some(seed);
        self
    }

    /// Sets the prefer-gaps policy.
    pub fn with_prefer_gaps(mut self, prefer_gaps: bool) -> Self {
        self.settings.prefer_gaps = prefer_gaps;
        self
    }

    /// Block of an employee on a day (`Block::None` when unset).
    pub fn block_for(&self, employee_id: &str, day: usize) -> Block {
        self.blocks
            .get(employee_id)
            .and_then(|by_day| by_day.get(&day))
            .copied()
            .unwrap_or_default()
    }
}
