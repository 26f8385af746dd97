//! Month context: derived, immutable scheduling attributes.
//!
//! Turns a [`SolveRequest`] into per-employee, per-day and per-segment
//! numbers that the generator and evaluator read in their hot loops.
//!
//! # Targets
//!
//! For each employee and segment `s`:
//!
//! ```text
//! contract[s] = weekly_hours * weekdays[s] / 5
//! adjust      = round1(clamp(-balance / 12, -20, +20))
//! desired     = round1(max(0, Σ contract + adjust))
//! desired[s]  = max(0, contract[s] + adjust * contract[s] / Σ contract)
//!               (last segment absorbs the rounding remainder)
//! required[s] = max(0, desired[s] - credit[s])
//! ```
//!
//! Paid leave credits `weekly_hours / 5` on weekdays only. Dividing the
//! balance by twelve spreads over/under-time across roughly a year.

use crate::models::{
    Block, Day, ForcedOff, Preference, Schedule, SolveRequest, SpecialDay, WeekSegment,
};

/// Largest balance correction applied in a single month (hours).
pub const MAX_MONTHLY_ADJUSTMENT: f64 = 20.0;

/// Months over which a balance is amortized.
const AMORTIZATION_MONTHS: f64 = 12.0;

/// Rounds to one decimal.
#[inline]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Monthly correction for a carry-over balance.
///
/// A positive balance (overtime) lowers this month's target.
pub fn balance_adjustment(balance_hours: f64) -> f64 {
    let adjust = -balance_hours / AMORTIZATION_MONTHS;
    round1(adjust.clamp(-MAX_MONTHLY_ADJUSTMENT, MAX_MONTHLY_ADJUSTMENT))
}

/// Derived attributes of one employee.
#[derive(Debug, Clone)]
pub struct EmployeeContext {
    /// Employee identifier.
    pub id: String,
    /// Contractual weekly hours.
    pub weekly_hours: f64,
    /// Sanitized preferences.
    pub prefs: Preference,
    /// Block per day.
    pub block_by_day: Vec<Block>,
    /// Paid-leave credit per day.
    pub credit_by_day: Vec<f64>,
    /// Day not banned by preference.
    pub allowed_by_day: Vec<bool>,
    /// Day is a preferred workday.
    pub preferred_by_day: Vec<bool>,
    /// Contract target per segment.
    pub segment_contract_target: Vec<f64>,
    /// Paid-leave credit per segment.
    pub segment_credit: Vec<f64>,
    /// Balance-adjusted target per segment.
    pub segment_desired_target: Vec<f64>,
    /// Hours still to be worked per segment.
    pub segment_required: Vec<f64>,
    /// Contract target for the month.
    pub month_contract_target: f64,
    /// Balance-adjusted target for the month.
    pub month_desired_target: f64,
    /// Paid-leave credit for the month.
    pub month_credit: f64,
    /// Balance before the month.
    pub balance_start: f64,
    /// Balance correction for the month.
    pub balance_adjust: f64,
    /// Hours to be worked in the month.
    pub month_required: f64,
}

impl EmployeeContext {
    /// Whether the employee is blocked on the day at the given stage.
    #[inline]
    pub fn block_allows(&self, day: usize, stage: u8) -> bool {
        self.block_by_day
            .get(day)
            .map(|b| b.allows_at(stage))
            .unwrap_or(false)
    }

    /// Block on a day.
    #[inline]
    pub fn block(&self, day: usize) -> Block {
        self.block_by_day.get(day).copied().unwrap_or_default()
    }
}

/// Immutable per-solve scheduling context.
#[derive(Debug, Clone)]
pub struct MonthContext {
    /// Month identifier.
    pub month_key: String,
    /// Days of the month.
    pub days: Vec<Day>,
    /// Week segments.
    pub segments: Vec<WeekSegment>,
    /// Per-employee attributes, in request order.
    pub employees: Vec<EmployeeContext>,
    /// Favor spacing over balance when scoring candidates.
    pub prefer_gaps: bool,
    /// Team-wide required hours per segment.
    pub segment_required_total: Vec<f64>,
    /// Mandated secondary shift per day.
    pub secondary_mandate: Vec<bool>,
    /// Special-day marker per day.
    pub special_days: Vec<SpecialDay>,
}

impl MonthContext {
    /// Builds the context from a request. Never fails; employees with
    /// zero weekly hours get zero targets.
    pub fn build(request: &SolveRequest) -> Self {
        let n = request.days.len();
        let segments = request.week_segments.clone();

        let employees: Vec<EmployeeContext> = request
            .employees
            .iter()
            .map(|emp| {
                let prefs = emp.preference.sanitized();
                let per_weekday = emp.hours_per_weekday();

                let block_by_day: Vec<Block> =
                    (0..n).map(|i| request.block_for(&emp.id, i)).collect();
                let credit_by_day: Vec<f64> = request
                    .days
                    .iter()
                    .zip(&block_by_day)
                    .map(|(day, &blk)| {
                        if day.is_weekday() && blk == Block::PaidLeave {
                            per_weekday
                        } else {
                            0.0
                        }
                    })
                    .collect();
                let allowed_by_day = request.days.iter().map(|d| !prefs.bans(d.weekday)).collect();
                let preferred_by_day =
                    request.days.iter().map(|d| prefs.prefers(d.weekday)).collect();

                let segment_contract_target: Vec<f64> = segments
                    .iter()
                    .map(|s| emp.weekly_hours * (s.weekday_count as f64 / 5.0))
                    .collect();
                let segment_credit: Vec<f64> = segments
                    .iter()
                    .map(|s| {
                        s.day_indices
                            .iter()
                            .map(|&i| credit_by_day.get(i).copied().unwrap_or(0.0))
                            .sum()
                    })
                    .collect();

                let month_contract: f64 = segment_contract_target.iter().sum();
                let month_credit: f64 = segment_credit.iter().sum();
                let adjust = balance_adjustment(emp.balance_hours);
                let month_desired = round1((month_contract + adjust).max(0.0));

                let segment_desired_target = spread_adjustment(
                    &segment_contract_target,
                    month_contract,
                    adjust,
                    month_desired,
                );

                let segment_required: Vec<f64> = segment_desired_target
                    .iter()
                    .zip(&segment_credit)
                    .map(|(target, credit)| (target - credit).max(0.0))
                    .collect();
                let month_required: f64 = segment_required.iter().sum();

                EmployeeContext {
                    id: emp.id.clone(),
                    weekly_hours: emp.weekly_hours,
                    prefs,
                    block_by_day,
                    credit_by_day,
                    allowed_by_day,
                    preferred_by_day,
                    segment_contract_target,
                    segment_credit,
                    segment_desired_target,
                    segment_required,
                    month_contract_target: round1(month_contract),
                    month_desired_target: month_desired,
                    month_credit: round1(month_credit),
                    balance_start: round1(emp.balance_hours),
                    balance_adjust: adjust,
                    month_required: round1(month_required),
                }
            })
            .collect();

        let segment_required_total = (0..segments.len())
            .map(|si| employees.iter().map(|e| e.segment_required[si]).sum())
            .collect();

        let mut secondary_mandate = request.secondary_mandate.clone();
        secondary_mandate.resize(n, false);
        let mut special_days = request.special_days.clone();
        special_days.resize(n, SpecialDay::None);

        Self {
            month_key: request.month_key.clone(),
            days: request.days.clone(),
            segments,
            employees,
            prefer_gaps: request.settings.prefer_gaps,
            segment_required_total,
            secondary_mandate,
            special_days,
        }
    }

    /// Number of days.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Number of employees.
    #[inline]
    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    /// Whether an employee may take a shift on a day at an escalation stage.
    ///
    /// Forced rest is never lifted.
    #[inline]
    pub fn is_available(
        &self,
        employee: usize,
        day: usize,
        forced_off: &ForcedOff,
        stage: u8,
    ) -> bool {
        let Some(ec) = self.employees.get(employee) else {
            return false;
        };
        !forced_off.is_off(employee, day) && ec.block_allows(day, stage)
    }

    /// Employees available at stage 0 on a day.
    pub fn available_count(&self, day: usize, forced_off: &ForcedOff) -> usize {
        (0..self.employees.len())
            .filter(|&e| self.is_available(e, day, forced_off, 0))
            .count()
    }

    /// Number of mandated secondary days among the given days.
    pub fn mandated_count(&self, days: &[usize]) -> usize {
        days.iter()
            .filter(|&&d| self.secondary_mandate.get(d).copied().unwrap_or(false))
            .count()
    }

    /// Special-day credit earned by an employee on a day.
    ///
    /// Only employees without a shift that day and not on paid leave earn it.
    pub fn special_credit(
        &self,
        employee: usize,
        day: usize,
        schedule: &Schedule,
        forced_off: &ForcedOff,
    ) -> f64 {
        let special = self.special_days.get(day).copied().unwrap_or_default();
        if !special.is_special() || schedule.works(employee, day) {
            return 0.0;
        }
        match self.employees.get(employee) {
            Some(ec) if ec.block(day) != Block::PaidLeave => {
                special.credit(forced_off.is_off(employee, day))
            }
            _ => 0.0,
        }
    }
}

/// Spreads the balance adjustment over segments by contract share.
fn spread_adjustment(
    contract: &[f64],
    month_contract: f64,
    adjust: f64,
    month_desired: f64,
) -> Vec<f64> {
    if month_contract <= 0.0 {
        return vec![0.0; contract.len()];
    }
    let mut desired: Vec<f64> = contract
        .iter()
        .map(|&c| (c + adjust * (c / month_contract)).max(0.0))
        .collect();

    let sum: f64 = desired.iter().sum();
    if let Some(last) = desired.last_mut() {
        *last = round1((*last + month_desired - sum).max(0.0));
    }
    desired
}
