//! Best-of-N optimizer loop.
//!
//! Generates and evaluates attempts, keeping the first attempt with the
//! strictly lowest cost. The loop is single-threaded; parallelism and
//! fault isolation live in [`execution`](crate::execution).
//!
//! # Lifecycle
//!
//! | Outcome | When |
//! |---------|------|
//! | `Ok(LoopOutcome::Completed)` | every requested trial ran |
//! | `Ok(LoopOutcome::Cancelled)` | the token fired between two trials |
//! | `Err(SolverError::NoTrials)` | zero trials were requested |

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::debug;

use super::{AttemptGenerator, CostEvaluator};
use crate::context::MonthContext;
use crate::error::SolverError;
use crate::execution::{CancellationToken, Progress, ProgressThrottle};
use crate::models::Attempt;

/// Default minimum spacing of progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Spacing of cooperative yields.
pub const DEFAULT_YIELD_INTERVAL: Duration = Duration::from_millis(50);

/// Best attempt of a completed loop.
#[derive(Debug, Clone)]
pub struct OptimizerResult {
    /// Lowest-cost attempt.
    pub best: Attempt,
    /// Its cost.
    pub best_cost: f64,
    /// Trials evaluated.
    pub trials: u64,
}

/// How a loop ended.
#[derive(Debug, Clone)]
pub enum LoopOutcome {
    /// All trials ran.
    Completed(OptimizerResult),
    /// Stopped early; nothing is promoted.
    Cancelled,
}

/// Runs trial loops over one month context.
#[derive(Debug, Clone)]
pub struct Optimizer<'a> {
    generator: AttemptGenerator<'a>,
    evaluator: CostEvaluator<'a>,
    progress_interval: Duration,
}

impl<'a> Optimizer<'a> {
    /// Creates an optimizer with the default progress interval.
    pub fn new(ctx: &'a MonthContext) -> Self {
        Self {
            generator: AttemptGenerator::new(ctx),
            evaluator: CostEvaluator::new(ctx),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Sets the minimum spacing of progress reports.
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Runs `trials` attempts.
    ///
    /// Reports progress at start, at most once per progress interval while
    /// running, and once more after the last trial.
    pub fn run<R: Rng + ?Sized>(
        &self,
        trials: u64,
        rng: &mut R,
        cancel: &CancellationToken,
        on_progress: &mut dyn FnMut(Progress),
    ) -> Result<LoopOutcome, SolverError> {
        if trials == 0 {
            return Err(SolverError::NoTrials);
        }

        let start = Instant::now();
        let mut throttle = ProgressThrottle::new(self.progress_interval);
        let mut last_yield = start;
        let mut best: Option<(Attempt, f64)> = None;

        let report = |done: u64, best: &Option<(Attempt, f64)>| Progress {
            trials_done: done,
            trials_total: trials,
            best_cost: best.as_ref().map(|(_, c)| *c),
            elapsed: start.elapsed(),
        };

        throttle.ready();
        on_progress(report(0, &best));

        for done in 1..=trials {
            if cancel.is_cancelled() {
                debug!(done = done - 1, trials, "optimizer loop cancelled");
                return Ok(LoopOutcome::Cancelled);
            }

            let attempt = self.generator.generate(rng);
            let cost = self.evaluator.evaluate(&attempt);
            if best.as_ref().map_or(true, |(_, c)| cost < *c) {
                best = Some((attempt, cost));
            }

            if done == trials || throttle.ready() {
                on_progress(report(done, &best));
            }
            if last_yield.elapsed() >= DEFAULT_YIELD_INTERVAL {
                std::thread::yield_now();
                last_yield = Instant::now();
            }
        }

        let Some((best, best_cost)) = best else {
            return Err(SolverError::NoTrials);
        };
        debug!(
            trials,
            best_cost,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "optimizer loop completed"
        );
        Ok(LoopOutcome::Completed(OptimizerResult { best, best_cost, trials }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::XorShift32;
    use crate::models::{Employee, SolveRequest};

    fn ctx() -> MonthContext {
        let team: Vec<Employee> = (0..4).map(|i| Employee::new(format!("E{i}"), 38.5)).collect();
        MonthContext::build(&SolveRequest::for_month(2024, 7, team))
    }

    #[test]
    fn test_zero_trials_fails() {
        let ctx = ctx();
        let cancel = CancellationToken::new();
        let res = Optimizer::new(&ctx).run(0, &mut XorShift32::new(1), &cancel, &mut |_| {});
        assert!(matches!(res, Err(SolverError::NoTrials)));
    }

    #[test]
    fn test_best_is_minimum_of_stream() {
        let ctx = ctx();
        let opt = Optimizer::new(&ctx);
        let cancel = CancellationToken::new();
        let outcome = opt.run(30, &mut XorShift32::new(9), &cancel, &mut |_| {});
        let Ok(LoopOutcome::Completed(r)) = outcome else {
            panic!("expected completion");
        };
        assert_eq!(r.trials, 30);

        // replay the same stream
        let mut rng = XorShift32::new(9);
        let generator = AttemptGenerator::new(&ctx);
        let evaluator = CostEvaluator::new(&ctx);
        let min = (0..30)
            .map(|_| evaluator.evaluate(&generator.generate(&mut rng)))
            .fold(f64::INFINITY, f64::min);
        assert_eq!(r.best_cost, min);
        assert_eq!(evaluator.evaluate(&r.best), min);
    }

    #[test]
    fn test_cancelled_before_start() {
        let ctx = ctx();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let res = Optimizer::new(&ctx).run(10, &mut XorShift32::new(1), &cancel, &mut |_| {});
        assert!(matches!(res, Ok(LoopOutcome::Cancelled)));
    }

    #[test]
    fn test_cancel_from_progress_callback() {
        let ctx = ctx();
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let opt = Optimizer::new(&ctx).with_progress_interval(Duration::ZERO);
        let mut seen = 0;
        let res = opt.run(1_000, &mut XorShift32::new(1), &cancel, &mut |p| {
            seen = p.trials_done;
            if p.trials_done >= 3 {
                trigger.cancel();
            }
        });
        assert!(matches!(res, Ok(LoopOutcome::Cancelled)));
        assert_eq!(seen, 3);
    }

    #[test]
    fn test_progress_reports() {
        let ctx = ctx();
        let mut reports = Vec::new();
        let opt = Optimizer::new(&ctx).with_progress_interval(Duration::from_secs(3600));
        let res = opt.run(5, &mut XorShift32::new(2), &CancellationToken::new(), &mut |p| {
            reports.push(p)
        });
        assert!(res.is_ok());
        // start and final only
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].trials_done, 0);
        assert!(reports[0].best_cost.is_none());
        assert_eq!(reports[1].trials_done, 5);
        assert!(reports[1].best_cost.is_some());
    }
}
