//! Randomized greedy attempt generator.
//!
//! # Algorithm
//!
//! Week segments are processed in order, carrying a remaining month
//! requirement per employee:
//!
//! 1. Apportion a segment target from the team's remaining requirement,
//!    weighted by the segment's share of the remaining days.
//! 2. Pick the secondary shift count whose hours best close the gap left
//!    by the primary shifts, then choose the hosting days.
//! 3. Fill the primary shift of every day, escalating through block
//!    stages until a candidate exists.
//! 4. Fill the secondary shift of every hosting day (stage 0 only).
//!
//! Candidates are ranked by [`scoring`](super::scoring); the perturbation
//! term makes every attempt different.
//!
//! # Complexity
//! O(d * e) per attempt, d = days, e = employees.

use rand::Rng;

use super::scoring::{
    score_candidate, PlanningState, PRIMARY_STAGES, SECONDARY_STAGES, STAGE_PENALTY,
};
use crate::context::MonthContext;
use crate::models::{Attempt, ForcedOff, Schedule, ShiftKind};

/// Builds one randomized attempt per call.
#[derive(Debug, Clone, Copy)]
pub struct AttemptGenerator<'a> {
    ctx: &'a MonthContext,
}

impl<'a> AttemptGenerator<'a> {
    /// Creates a generator over a month context.
    pub fn new(ctx: &'a MonthContext) -> Self {
        Self { ctx }
    }

    /// Generates one attempt, drawing all randomness from `rng`.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Attempt {
        let ctx = self.ctx;
        let n_emp = ctx.employee_count();
        let n_days = ctx.day_count();
        let mut attempt = Attempt::empty(n_emp, n_days);
        let mut state = PlanningState::new(n_emp);

        for (e, ec) in ctx.employees.iter().enumerate() {
            state.remaining_month[e] = ec.segment_required.iter().sum();
        }

        for (si, seg) in ctx.segments.iter().enumerate() {
            let remaining_days: usize = ctx.segments[si..].iter().map(|s| s.len()).sum();
            let remaining_total: f64 = state.remaining_month.iter().map(|r| r.max(0.0)).sum();
            let segment_target = if remaining_days > 0 {
                remaining_total * (seg.len() as f64 / remaining_days as f64)
            } else {
                0.0
            };

            for (e, ec) in ctx.employees.iter().enumerate() {
                let required = ec.segment_required.get(si).copied().unwrap_or(0.0);
                state.remaining_week[e] = required.min(state.remaining_month[e]);
            }
            state.start_week();

            let primary_hours = seg.len() as f64 * ShiftKind::Primary.hours();
            let mandated = ctx.mandated_count(&seg.day_indices);
            let count = secondary_count(segment_target, primary_hours, seg.len())
                .max(mandated)
                .min(seg.len());
            let (planned, omitted) =
                select_secondary_days(ctx, &seg.day_indices, &attempt.forced_off, count);

            for &day in &seg.day_indices {
                let chosen = self
                    .choose(
                        ShiftKind::Primary,
                        day,
                        &attempt.schedule,
                        &attempt.forced_off,
                        &state,
                        rng,
                    )
                    .map(|(e, _)| e);
                attempt.schedule.assign(ShiftKind::Primary, day, chosen);
                if let Some(e) = chosen {
                    state.record(ShiftKind::Primary, e, day);
                    attempt.forced_off.mark(e, day + 1);
                }
            }

            for &day in &planned {
                let chosen = self
                    .choose(
                        ShiftKind::Secondary,
                        day,
                        &attempt.schedule,
                        &attempt.forced_off,
                        &state,
                        rng,
                    )
                    .map(|(e, _)| e);
                attempt.schedule.assign(ShiftKind::Secondary, day, chosen);
                if let Some(e) = chosen {
                    state.record(ShiftKind::Secondary, e, day);
                }
            }

            attempt.planned_secondary_days.extend(planned);
            attempt.omitted_secondary_days.extend(omitted);
        }

        attempt
    }

    /// Picks the best-scoring employee for one shift and its score, net of
    /// the stage penalty.
    ///
    /// The first stage with any eligible employee is used for the whole
    /// decision; later stages are never mixed in.
    fn choose<R: Rng + ?Sized>(
        &self,
        kind: ShiftKind,
        day: usize,
        schedule: &Schedule,
        forced_off: &ForcedOff,
        state: &PlanningState,
        rng: &mut R,
    ) -> Option<(usize, f64)> {
        if schedule.assignee(kind, day).is_some() {
            return None;
        }
        let stages: &[u8] = match kind {
            ShiftKind::Primary => &PRIMARY_STAGES,
            ShiftKind::Secondary => &SECONDARY_STAGES,
        };
        let primary_today = schedule.assignee(ShiftKind::Primary, day);

        for &stage in stages {
            let candidates: Vec<usize> = (0..self.ctx.employee_count())
                .filter(|&e| self.ctx.is_available(e, day, forced_off, stage))
                .filter(|&e| kind == ShiftKind::Primary || primary_today != Some(e))
                .collect();
            if candidates.is_empty() {
                continue;
            }

            let penalty = STAGE_PENALTY[stage as usize];
            let mut best: Option<(usize, f64)> = None;
            for e in candidates {
                let score = score_candidate(self.ctx, kind, e, day, state, rng) - penalty;
                if best.map_or(true, |(_, top)| score > top) {
                    best = Some((e, score));
                }
            }
            return best;
        }
        None
    }
}

/// Secondary shift count closest to `target` hours.
///
/// Minimizes `|target - (primary_hours + c * 10)|` over `c in 0..=max_days`,
/// ties toward fewer. Zero when the primary shifts already cover the target.
pub fn secondary_count(target: f64, primary_hours: f64, max_days: usize) -> usize {
    if target <= primary_hours {
        return 0;
    }
    let mut best = 0;
    let mut best_diff = f64::INFINITY;
    for c in 0..=max_days {
        let diff = (target - (primary_hours + c as f64 * ShiftKind::Secondary.hours())).abs();
        if diff < best_diff {
            best_diff = diff;
            best = c;
        }
    }
    best
}

/// Chooses `count` hosting days for the secondary shift.
///
/// Mandated days come first, then weekdays before weekend days, then days
/// with more available employees, then earlier days. Returns
/// `(planned, omitted)`, both sorted by day.
pub fn select_secondary_days(
    ctx: &MonthContext,
    day_indices: &[usize],
    forced_off: &ForcedOff,
    count: usize,
) -> (Vec<usize>, Vec<usize>) {
    let mandated = |d: usize| ctx.secondary_mandate.get(d).copied().unwrap_or(false);

    let mut ordered: Vec<usize> = day_indices.iter().copied().filter(|&d| mandated(d)).collect();

    let mut rest: Vec<(bool, usize, usize)> = day_indices
        .iter()
        .copied()
        .filter(|&d| !mandated(d))
        .map(|d| (ctx.days[d].is_weekend(), ctx.available_count(d, forced_off), d))
        .collect();
    rest.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)).then(a.2.cmp(&b.2)));
    ordered.extend(rest.into_iter().map(|(_, _, d)| d));

    let pick = count.min(ordered.len());
    let mut omitted = ordered.split_off(pick);
    ordered.sort_unstable();
    omitted.sort_unstable();
    (ordered, omitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::XorShift32;
    use crate::models::{Block, Day, Employee, SolveRequest, WeekSegment};

    fn week_request(employees: Vec<Employee>) -> SolveRequest {
        // 2024-07-01..07 is Mon..Sun
        let days: Vec<Day> = Day::month_days(2024, 7).into_iter().take(7).collect();
        let segs = WeekSegment::from_days(&days);
        SolveRequest::new("2024-07", days, segs, employees)
    }

    fn team(n: usize, hours: f64) -> Vec<Employee> {
        (0..n).map(|i| Employee::new(format!("E{i}"), hours)).collect()
    }

    #[test]
    fn test_secondary_count() {
        assert_eq!(secondary_count(100.0, 140.0, 7), 0);
        assert_eq!(secondary_count(140.0, 140.0, 7), 0);
        assert_eq!(secondary_count(160.0, 140.0, 7), 2);
        // 155 is equidistant from 150 and 160
        assert_eq!(secondary_count(155.0, 140.0, 7), 1);
        assert_eq!(secondary_count(1_000.0, 140.0, 7), 7);
    }

    #[test]
    fn test_select_secondary_days_order() {
        let req = week_request(team(2, 35.0)).with_secondary_mandate(6);
        let ctx = MonthContext::build(&req);
        let off = ForcedOff::new(2, 7);
        let all: Vec<usize> = (0..7).collect();

        let (planned, omitted) = select_secondary_days(&ctx, &all, &off, 3);
        // Sunday mandated, then Mon and Tue
        assert_eq!(planned, vec![0, 1, 6]);
        assert_eq!(omitted, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_select_prefers_available_days() {
        let req = week_request(team(2, 35.0)).with_block("E0", 0, Block::WishFree);
        let ctx = MonthContext::build(&req);
        let off = ForcedOff::new(2, 7);
        let (planned, _) = select_secondary_days(&ctx, &[0, 1, 2], &off, 1);
        assert_eq!(planned, vec![1]);
    }

    #[test]
    fn test_attempt_invariants() {
        let req = SolveRequest::for_month(2024, 7, team(4, 38.5)).with_secondary_mandate(10);
        let ctx = MonthContext::build(&req);
        let generator = AttemptGenerator::new(&ctx);
        let mut rng = XorShift32::new(42);

        for _ in 0..20 {
            let a = generator.generate(&mut rng);
            assert!(a.schedule.missing_primary_days().is_empty());
            for d in 0..ctx.day_count() {
                let p = a.schedule.assignee(ShiftKind::Primary, d);
                let s = a.schedule.assignee(ShiftKind::Secondary, d);
                assert!(p.is_none() || p != s);
                if let Some(e) = p {
                    if d + 1 < ctx.day_count() {
                        assert!(a.forced_off.is_off(e, d + 1));
                    }
                    assert!(!a.forced_off.is_off(e, d));
                }
            }
            assert!(a.schedule.assignee(ShiftKind::Secondary, 10).is_some());
            assert!(a.planned_secondary_days.contains(&10));
            let total = a.planned_secondary_days.len() + a.omitted_secondary_days.len();
            assert_eq!(total, ctx.day_count());
        }
    }

    #[test]
    fn test_block_respected_when_others_free() {
        let req = week_request(team(3, 35.0)).with_block("E0", 2, Block::PaidLeave);
        let ctx = MonthContext::build(&req);
        let generator = AttemptGenerator::new(&ctx);
        let mut rng = XorShift32::new(1);
        for _ in 0..50 {
            let a = generator.generate(&mut rng);
            assert_ne!(a.schedule.assignee(ShiftKind::Primary, 2), Some(0));
        }
    }

    #[test]
    fn test_escalation_uses_blocked_employee() {
        let req = week_request(team(1, 35.0)).with_block("E0", 2, Block::WishFree);
        let ctx = MonthContext::build(&req);
        let a = AttemptGenerator::new(&ctx).generate(&mut XorShift32::new(5));
        // single employee alternates: days 0, 2, 4, 6 are coverable
        assert_eq!(a.schedule.assignee(ShiftKind::Primary, 0), Some(0));
        assert_eq!(a.schedule.assignee(ShiftKind::Primary, 2), Some(0));
        assert_eq!(a.schedule.assignee(ShiftKind::Primary, 1), None);
    }

    #[test]
    fn test_stage_penalty_per_block() {
        let pick = |req: SolveRequest| {
            let ctx = MonthContext::build(&req);
            AttemptGenerator::new(&ctx).choose(
                ShiftKind::Primary,
                0,
                &Schedule::new(7),
                &ForcedOff::new(1, 7),
                &PlanningState::new(1),
                &mut XorShift32::new(4),
            )
        };

        let (e, free) = pick(week_request(team(1, 35.0))).unwrap();
        assert_eq!(e, 0);
        for (block, penalty) in [
            (Block::FreeNoCredit, 5_000.0),
            (Block::WishFree, 10_000.0),
            (Block::PaidLeave, 20_000.0),
        ] {
            let (e, score) = pick(week_request(team(1, 35.0)).with_block("E0", 0, block)).unwrap();
            assert_eq!(e, 0);
            assert!((free - score - penalty).abs() < 1e-6, "{block:?}");
        }
        assert_eq!(STAGE_PENALTY, [0.0, 5_000.0, 10_000.0, 20_000.0]);
    }

    #[test]
    fn test_secondary_never_escalates() {
        let req = week_request(team(2, 35.0))
            .with_secondary_mandate(3)
            .with_block("E0", 3, Block::FreeNoCredit)
            .with_block("E1", 3, Block::FreeNoCredit);
        let ctx = MonthContext::build(&req);
        let a = AttemptGenerator::new(&ctx).generate(&mut XorShift32::new(3));
        assert!(a.schedule.assignee(ShiftKind::Primary, 3).is_some());
        assert_eq!(a.schedule.assignee(ShiftKind::Secondary, 3), None);
    }

    #[test]
    fn test_same_seed_same_attempt() {
        let req = SolveRequest::for_month(2024, 2, team(5, 30.0));
        let ctx = MonthContext::build(&req);
        let generator = AttemptGenerator::new(&ctx);
        let a = generator.generate(&mut XorShift32::new(77));
        let b = generator.generate(&mut XorShift32::new(77));
        assert_eq!(a, b);
    }
}
