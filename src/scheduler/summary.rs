//! Month summary and diagnostics for a chosen attempt.
//!
//! Summaries report hours per employee against the contract and the
//! balance-adjusted target. Diagnostics flag weeks whose team requirement
//! cannot be met with the available shift hours and shifts the best
//! attempt left unfilled.

use std::collections::HashSet;

use crate::context::{round1, MonthContext};
use crate::models::{Attempt, Diagnostic, EmployeeSummary, ShiftKind, SolveResult};

/// Per-employee month totals of an attempt, in employee order.
///
/// Credit hours include paid leave and special-day credit.
pub fn month_summaries(ctx: &MonthContext, attempt: &Attempt) -> Vec<EmployeeSummary> {
    let schedule = &attempt.schedule;
    ctx.employees
        .iter()
        .enumerate()
        .map(|(e, ec)| {
            let mut primary_count = 0u32;
            let mut secondary_count = 0u32;
            let mut special = 0.0;
            for day in 0..ctx.day_count() {
                if schedule.assignee(ShiftKind::Primary, day) == Some(e) {
                    primary_count += 1;
                }
                if schedule.assignee(ShiftKind::Secondary, day) == Some(e) {
                    secondary_count += 1;
                }
                special += ctx.special_credit(e, day, schedule, &attempt.forced_off);
            }

            let worked = round1(
                primary_count as f64 * ShiftKind::Primary.hours()
                    + secondary_count as f64 * ShiftKind::Secondary.hours(),
            );
            let credit = round1(ec.month_credit + special);
            let total = round1(worked + credit);
            let delta_contract = round1(total - ec.month_contract_target);

            EmployeeSummary {
                employee_id: ec.id.clone(),
                target_hours: ec.month_desired_target,
                contract_target_hours: ec.month_contract_target,
                credit_hours: credit,
                primary_count,
                secondary_count,
                worked_hours: worked,
                total_hours: total,
                balance_start: ec.balance_start,
                balance_adjust: ec.balance_adjust,
                balance_end: round1(ec.balance_start + delta_contract),
                delta_contract,
                delta_desired: round1(total - ec.month_desired_target),
            }
        })
        .collect()
}

/// Warnings for weeks whose team requirement is out of reach.
///
/// Fewer required hours than the primary shifts alone bring means
/// overtime is unavoidable; more than primary plus a secondary shift
/// every day means undertime is.
pub fn feasibility_warnings(ctx: &MonthContext) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for (si, seg) in ctx.segments.iter().enumerate() {
        let (Some(first), Some(last)) = (seg.first(), seg.last()) else {
            continue;
        };
        let required = ctx.segment_required_total.get(si).copied().unwrap_or(0.0);
        let primary_hours = seg.len() as f64 * ShiftKind::Primary.hours();
        let max_hours = primary_hours + seg.len() as f64 * ShiftKind::Secondary.hours();
        let label = format!("{} to {}", ctx.days[first].label, ctx.days[last].label);

        if required < primary_hours {
            out.push(Diagnostic::warning(
                "Week has too few required hours",
                format!(
                    "{label}: required {}h < primary shift hours {primary_hours}h, \
                     overtime is unavoidable this week.",
                    round1(required)
                ),
            ));
        }
        if required > max_hours {
            out.push(Diagnostic::warning(
                "Week has too many required hours",
                format!(
                    "{label}: required {}h > maximum with secondary shifts {max_hours}h, \
                     undertime is unavoidable this week.",
                    round1(required)
                ),
            ));
        }
    }
    out
}

/// Diagnostics about the chosen attempt itself.
pub fn attempt_diagnostics(ctx: &MonthContext, attempt: &Attempt) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    let missing_primary = attempt.schedule.missing_primary_days();
    if !missing_primary.is_empty() {
        out.push(Diagnostic::danger(
            "Primary shift could not be filled",
            format!(
                "{} day(s) have no primary shift: too many blocks or forced rest \
                 after earlier primary shifts.",
                missing_primary.len()
            ),
        ));
    }

    let missing_mandated: Vec<&str> = (0..ctx.day_count())
        .filter(|&d| {
            ctx.secondary_mandate[d]
                && attempt.schedule.assignee(ShiftKind::Secondary, d).is_none()
        })
        .map(|d| ctx.days[d].label.as_str())
        .collect();
    if !missing_mandated.is_empty() {
        out.push(Diagnostic::danger(
            "Mandated secondary shift could not be filled",
            format!(
                "{} mandated day(s) could not be staffed ({}). \
                 Check blocks and leave on these days.",
                missing_mandated.len(),
                missing_mandated.join(", ")
            ),
        ));
    }

    if !attempt.omitted_secondary_days.is_empty() {
        let labels: Vec<&str> = attempt
            .omitted_secondary_days
            .iter()
            .filter_map(|&d| ctx.days.get(d).map(|day| day.label.as_str()))
            .collect();
        out.push(Diagnostic::info(
            "Days without secondary shift",
            labels.join(", "),
        ));
    }

    out
}

/// Removes duplicates and orders by severity, keeping insertion order
/// within a severity.
pub fn finalize_diagnostics(diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    let mut seen = HashSet::new();
    let mut out: Vec<Diagnostic> = diagnostics
        .into_iter()
        .filter(|d| seen.insert(d.clone()))
        .collect();
    out.sort_by_key(|d| d.severity);
    out
}

/// Assembles the public result for a chosen attempt.
pub fn build_result(
    ctx: &MonthContext,
    attempt: &Attempt,
    best_cost: f64,
    trials_used: u64,
    mut diagnostics: Vec<Diagnostic>,
) -> SolveResult {
    let id_of = |slot: &Option<usize>| {
        slot.and_then(|e| ctx.employees.get(e)).map(|ec| ec.id.clone())
    };

    diagnostics.extend(attempt_diagnostics(ctx, attempt));

    SolveResult {
        month_key: ctx.month_key.clone(),
        primary: attempt.schedule.primary.iter().map(id_of).collect(),
        secondary: attempt.schedule.secondary.iter().map(id_of).collect(),
        forced_off: ctx
            .employees
            .iter()
            .enumerate()
            .map(|(e, ec)| (ec.id.clone(), attempt.forced_off.row(e).to_vec()))
            .collect(),
        planned_secondary_days: attempt.planned_secondary_days.clone(),
        omitted_secondary_days: attempt.omitted_secondary_days.clone(),
        summaries: month_summaries(ctx, attempt),
        diagnostics: finalize_diagnostics(diagnostics),
        best_cost: Some(best_cost),
        trials_used,
    }
}
