//! Candidate scoring for one shift decision.
//!
//! Every eligible employee gets a weighted score; the highest score wins.
//! Primary and secondary shifts share one scoring structure and differ
//! only in their [`ShiftWeights`] table: the secondary table leans harder
//! on hour balance than on spacing and omits the look-ahead terms that
//! only make sense before a forced rest day.
//!
//! # Terms
//!
//! | Term | Effect |
//! |------|--------|
//! | Remaining need | linear bonus on week and month hours still open |
//! | Spacing | bonus per idle day (capped at 14), steep penalty at gap 1-2 |
//! | Primary gap | penalty per day short of the employee's minimum |
//! | Preferences | weekend bias, preferred weekdays, shift-type bias |
//! | Caps | large penalty once a weekly/monthly shift cap is reached |
//! | Next-day block | wasting a forced rest day on an already blocked day |
//! | Over-commitment | remaining need below zero |
//! | Perturbation | uniform noise for attempt-to-attempt diversity |

use rand::Rng;

use crate::context::{EmployeeContext, MonthContext};
use crate::models::{Block, ShiftKind};

/// Escalation stages tried in order until one yields a candidate.
pub const PRIMARY_STAGES: [u8; 4] = [0, 1, 2, 3];

/// Secondary shifts never break a block.
pub const SECONDARY_STAGES: [u8; 1] = [0];

/// Score subtracted per escalation stage used.
pub const STAGE_PENALTY: [f64; 4] = [0.0, 5_000.0, 10_000.0, 20_000.0];

/// Spacing bonus stops growing after this many idle days.
const MAX_GAP_BONUS_DAYS: i64 = 14;

/// Sentinel for "never worked yet".
pub(crate) const NEVER: i64 = -999;

/// Weight table for one shift kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftWeights {
    pub banned_weekday: f64,
    pub disallowed_shift: f64,
    pub need_week: f64,
    pub need_month: f64,
    pub gap_step: f64,
    pub gap_step_prefer_gaps: f64,
    pub gap_one: f64,
    pub gap_two: f64,
    pub primary_gap_shortfall: f64,
    pub double_primary_liked: f64,
    pub double_primary_disliked: f64,
    pub extra_rest: f64,
    pub weekend_bias: f64,
    pub preferred_day: f64,
    pub preferred_tomorrow: f64,
    pub week_cap: f64,
    pub month_cap: f64,
    /// Bonus when the employee's shift-type bias favors this kind.
    pub bias_toward: f64,
    /// Penalty when the bias favors the other kind.
    pub bias_away: f64,
    /// Per-shift weight of the running primary/secondary imbalance.
    pub imbalance_step: f64,
    pub next_day_paid_leave: f64,
    pub next_day_wish_free: f64,
    pub next_day_free: f64,
    pub overcommit_week_base: f64,
    pub overcommit_week_step: f64,
    pub overcommit_month_base: f64,
    pub overcommit_month_step: f64,
    /// Width of the uniform perturbation.
    pub jitter: f64,
}

/// Primary shift weights.
pub const PRIMARY_WEIGHTS: ShiftWeights = ShiftWeights {
    banned_weekday: 260.0,
    disallowed_shift: 900.0,
    need_week: 2.2,
    need_month: 1.6,
    gap_step: 10.0,
    gap_step_prefer_gaps: 18.0,
    gap_one: 500.0,
    gap_two: 120.0,
    primary_gap_shortfall: 260.0,
    double_primary_liked: 140.0,
    double_primary_disliked: 220.0,
    extra_rest: 420.0,
    weekend_bias: 70.0,
    preferred_day: 120.0,
    preferred_tomorrow: 90.0,
    week_cap: 700.0,
    month_cap: 900.0,
    bias_toward: 120.0,
    bias_away: 80.0,
    imbalance_step: 20.0,
    next_day_paid_leave: 800.0,
    next_day_wish_free: 500.0,
    next_day_free: 120.0,
    overcommit_week_base: 900.0,
    overcommit_week_step: 12.0,
    overcommit_month_base: 400.0,
    overcommit_month_step: 4.0,
    jitter: 40.0,
};

/// Secondary shift weights.
pub const SECONDARY_WEIGHTS: ShiftWeights = ShiftWeights {
    banned_weekday: 200.0,
    disallowed_shift: 750.0,
    need_week: 1.6,
    need_month: 1.2,
    gap_step: 6.0,
    gap_step_prefer_gaps: 10.0,
    gap_one: 260.0,
    gap_two: 70.0,
    primary_gap_shortfall: 0.0,
    double_primary_liked: 0.0,
    double_primary_disliked: 0.0,
    extra_rest: 250.0,
    weekend_bias: 50.0,
    preferred_day: 80.0,
    preferred_tomorrow: 0.0,
    week_cap: 450.0,
    month_cap: 650.0,
    bias_toward: 140.0,
    bias_away: 90.0,
    imbalance_step: 20.0,
    next_day_paid_leave: 0.0,
    next_day_wish_free: 0.0,
    next_day_free: 0.0,
    overcommit_week_base: 500.0,
    overcommit_week_step: 6.0,
    overcommit_month_base: 220.0,
    overcommit_month_step: 3.0,
    jitter: 30.0,
};

impl ShiftWeights {
    /// Weight table for a shift kind.
    pub fn for_kind(kind: ShiftKind) -> &'static ShiftWeights {
        match kind {
            ShiftKind::Primary => &PRIMARY_WEIGHTS,
            ShiftKind::Secondary => &SECONDARY_WEIGHTS,
        }
    }
}

/// Running per-employee state while one attempt is built.
#[derive(Debug, Clone)]
pub(crate) struct PlanningState {
    pub remaining_month: Vec<f64>,
    pub remaining_week: Vec<f64>,
    pub primary_count: Vec<u32>,
    pub secondary_count: Vec<u32>,
    pub week_primary: Vec<u32>,
    pub week_secondary: Vec<u32>,
    pub last_work: Vec<i64>,
    pub last_primary: Vec<i64>,
}

impl PlanningState {
    pub fn new(employees: usize) -> Self {
        Self {
            remaining_month: vec![0.0; employees],
            remaining_week: vec![0.0; employees],
            primary_count: vec![0; employees],
            secondary_count: vec![0; employees],
            week_primary: vec![0; employees],
            week_secondary: vec![0; employees],
            last_work: vec![NEVER; employees],
            last_primary: vec![NEVER; employees],
        }
    }

    /// Clears the per-week counters at a segment boundary.
    pub fn start_week(&mut self) {
        self.week_primary.fill(0);
        self.week_secondary.fill(0);
    }

    /// Books a shift for an employee.
    pub fn record(&mut self, kind: ShiftKind, employee: usize, day: usize) {
        let hours = kind.hours();
        self.remaining_week[employee] -= hours;
        self.remaining_month[employee] -= hours;
        self.last_work[employee] = day as i64;
        match kind {
            ShiftKind::Primary => {
                self.primary_count[employee] += 1;
                self.week_primary[employee] += 1;
                self.last_primary[employee] = day as i64;
            }
            ShiftKind::Secondary => {
                self.secondary_count[employee] += 1;
                self.week_secondary[employee] += 1;
            }
        }
    }
}

/// Scores one candidate for one shift. Higher is better.
pub(crate) fn score_candidate<R: Rng + ?Sized>(
    ctx: &MonthContext,
    kind: ShiftKind,
    employee: usize,
    day: usize,
    state: &PlanningState,
    rng: &mut R,
) -> f64 {
    let Some(ec) = ctx.employees.get(employee) else {
        return f64::NEG_INFINITY;
    };
    let w = ShiftWeights::for_kind(kind);
    let prefs = &ec.prefs;

    let rem_week = state.remaining_week[employee];
    let rem_month = state.remaining_month[employee];
    let gap = day as i64 - state.last_work[employee];
    let gap_primary = day as i64 - state.last_primary[employee];
    let primaries = state.primary_count[employee];
    let secondaries = state.secondary_count[employee];

    let mut score = 0.0;

    if !ec.allowed_by_day[day] {
        score -= w.banned_weekday;
    }
    let allowed = match kind {
        ShiftKind::Primary => prefs.allow_primary,
        ShiftKind::Secondary => prefs.allow_secondary,
    };
    if !allowed {
        score -= w.disallowed_shift;
    }

    score += rem_week * w.need_week + rem_month * w.need_month;

    let step = if ctx.prefer_gaps { w.gap_step_prefer_gaps } else { w.gap_step };
    score += gap.min(MAX_GAP_BONUS_DAYS) as f64 * step;
    if gap == 1 {
        score -= w.gap_one;
    }
    if gap == 2 {
        score -= w.gap_two;
    }

    let min_gap = prefs.primary_min_gap as i64;
    if gap_primary < min_gap {
        score -= w.primary_gap_shortfall * (min_gap - gap_primary) as f64;
    }
    if gap_primary == 2 {
        match prefs.double_primary {
            1 => score += w.double_primary_liked,
            -1 => score -= w.double_primary_disliked,
            _ => {}
        }
        if prefs.extra_rest_after_primary >= 1 {
            score -= w.extra_rest;
        }
    }

    if ctx.days[day].is_weekend() {
        score += w.weekend_bias * prefs.weekend_bias as f64;
    }

    if ec.preferred_by_day[day] {
        score += w.preferred_day;
    }
    // tomorrow will be forced off, so working today keeps it free
    if ec.preferred_by_day.get(day + 1).copied().unwrap_or(false) {
        score += w.preferred_tomorrow;
    }

    let (week_done, month_done, week_cap, month_cap) = match kind {
        ShiftKind::Primary => (
            state.week_primary[employee],
            primaries,
            prefs.max_primary_per_week,
            prefs.max_primary_per_month,
        ),
        ShiftKind::Secondary => (
            state.week_secondary[employee],
            secondaries,
            prefs.max_secondary_per_week,
            prefs.max_secondary_per_month,
        ),
    };
    if week_cap.is_some_and(|cap| week_done >= cap) {
        score -= w.week_cap;
    }
    if month_cap.is_some_and(|cap| month_done >= cap) {
        score -= w.month_cap;
    }

    score += bias_term(kind, prefs.secondary_bias, primaries, secondaries, w);
    score -= next_day_block_penalty(ec, day, w);

    if rem_week < 0.0 {
        score -= w.overcommit_week_base + rem_week.abs() * w.overcommit_week_step;
    }
    if rem_month < 0.0 {
        score -= w.overcommit_month_base + rem_month.abs() * w.overcommit_month_step;
    }

    score += (rng.random::<f64>() - 0.5) * w.jitter;
    score
}

/// Shift-type bias combined with the running primary/secondary imbalance.
fn bias_term(
    kind: ShiftKind,
    secondary_bias: i8,
    primaries: u32,
    secondaries: u32,
    w: &ShiftWeights,
) -> f64 {
    // positive = the employee leans toward this kind
    let lean = match kind {
        ShiftKind::Primary => -secondary_bias,
        ShiftKind::Secondary => secondary_bias,
    };
    let (this_kind, other_kind) = match kind {
        ShiftKind::Primary => (primaries, secondaries),
        ShiftKind::Secondary => (secondaries, primaries),
    };
    match lean {
        1 => w.bias_toward + other_kind.saturating_sub(this_kind) as f64 * w.imbalance_step,
        -1 => -(w.bias_away + this_kind.saturating_sub(other_kind) as f64 * w.imbalance_step),
        _ => 0.0,
    }
}

fn next_day_block_penalty(ec: &EmployeeContext, day: usize, w: &ShiftWeights) -> f64 {
    match ec.block_by_day.get(day + 1) {
        Some(Block::PaidLeave) => w.next_day_paid_leave,
        Some(Block::WishFree) => w.next_day_wish_free,
        Some(Block::FreeNoCredit) => w.next_day_free,
        _ => 0.0,
    }
}
