//! Sliced, fault-tolerant execution of a large trial budget.
//!
//! The budget is cut into slices that run one at a time on isolated
//! [`ExecutionUnit`]s. Each slice starts from the generator state the
//! previous successful slice ended with, so a seeded run is reproducible
//! regardless of how it was sliced, provided no slice failed.
//!
//! # Slice sizing
//!
//! | Event | Effect |
//! |-------|--------|
//! | start | `initial_slice` trials |
//! | 3 successes in a row | size × 1.25, up to `max_slice` |
//! | failure | size ÷ 2, down to `min_slice` |
//! | 6 failures in a row | abort with [`SolverError::Orchestrator`] |
//!
//! A unit that stays silent for `watchdog_ms` is stopped and its slice
//! counts as failed. Failed slices consume no trials and their generator
//! state is discarded.
//!
//! Small budgets, and runs where no unit can be started at all, execute
//! synchronously on the caller's thread.

use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::unit::{ExecutionUnit, SliceOutput, SliceTask, ThreadUnit, UnitEvent, UnitHandle};
use super::{CancellationToken, Progress, ProgressThrottle, XorShift32};
use crate::context::MonthContext;
use crate::error::{SliceFault, SolverError};
use crate::models::Attempt;
use crate::scheduler::{LoopOutcome, Optimizer};

/// Upper bound on how long a cancellation can go unnoticed.
const CANCEL_POLL: Duration = Duration::from_millis(25);

/// Orchestrator tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrchestratorConfig {
    /// Trials in the first slice.
    pub initial_slice: u64,
    /// Smallest slice after failures.
    pub min_slice: u64,
    /// Largest slice after growth.
    pub max_slice: u64,
    /// Growth factor after a success streak.
    pub growth_factor: f64,
    /// Successes in a row needed to grow.
    pub growth_after: u32,
    /// Failures in a row that abort the run.
    pub max_consecutive_failures: u32,
    /// Silence after which a unit is abandoned (ms).
    pub watchdog_ms: u64,
    /// Minimum spacing of progress reports (ms). Slices report at no more
    /// than half the watchdog interval regardless.
    pub progress_interval_ms: u64,
    /// Budgets below this run synchronously.
    pub small_run_threshold: u64,
    /// Trial cap on the synchronous path.
    pub sync_max_trials: u64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            initial_slice: 250_000,
            min_slice: 10_000,
            max_slice: 1_000_000,
            growth_factor: 1.25,
            growth_after: 3,
            max_consecutive_failures: 6,
            watchdog_ms: 15_000,
            progress_interval_ms: 100,
            small_run_threshold: 20_000,
            sync_max_trials: 200_000,
        }
    }
}

impl OrchestratorConfig {
    /// Sets the slice size bounds.
    pub fn with_slices(mut self, initial: u64, min: u64, max: u64) -> Self {
        self.initial_slice = initial;
        self.min_slice = min;
        self.max_slice = max;
        self
    }

    /// Sets the watchdog interval.
    pub fn with_watchdog_ms(mut self, ms: u64) -> Self {
        self.watchdog_ms = ms;
        self
    }

    /// Sets the progress interval.
    pub fn with_progress_interval_ms(mut self, ms: u64) -> Self {
        self.progress_interval_ms = ms;
        self
    }

    /// Sets the synchronous-path threshold.
    pub fn with_small_run_threshold(mut self, trials: u64) -> Self {
        self.small_run_threshold = trials;
        self
    }

    /// Sets the synchronous-path trial cap.
    pub fn with_sync_max_trials(mut self, trials: u64) -> Self {
        self.sync_max_trials = trials;
        self
    }

    /// Sets the abort threshold.
    pub fn with_max_consecutive_failures(mut self, failures: u32) -> Self {
        self.max_consecutive_failures = failures;
        self
    }

    /// Watchdog interval.
    pub fn watchdog(&self) -> Duration {
        Duration::from_millis(self.watchdog_ms)
    }

    /// Progress interval.
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    /// Report spacing handed to execution units, kept under the watchdog.
    pub fn unit_progress_interval(&self) -> Duration {
        self.progress_interval().min(self.watchdog() / 2)
    }

    fn min_slice(&self) -> u64 {
        self.min_slice.max(1)
    }

    fn grown(&self, size: u64) -> u64 {
        ((size as f64 * self.growth_factor).ceil() as u64).min(self.max_slice.max(self.min_slice()))
    }

    fn shrunk(&self, size: u64) -> u64 {
        (size / 2).max(self.min_slice())
    }
}

/// What happened to one slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceRecord {
    /// Position in the run.
    pub index: usize,
    /// Trials requested.
    pub trials: u64,
    /// Best cost, for successful slices.
    pub best_cost: Option<f64>,
    /// Fault, for failed slices.
    pub fault: Option<SliceFault>,
    /// Wall time.
    pub elapsed: Duration,
}

impl SliceRecord {
    /// Whether the slice produced a result.
    pub fn succeeded(&self) -> bool {
        self.fault.is_none()
    }
}

/// Merged result of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Lowest-cost attempt across slices.
    pub best: Attempt,
    /// Its cost.
    pub best_cost: f64,
    /// Trials evaluated.
    pub trials: u64,
    /// Generator state after the last successful trial.
    pub rng_state: u32,
    /// Slice history; empty on the synchronous path.
    pub slices: Vec<SliceRecord>,
    /// Whether the run used the synchronous path.
    pub synchronous: bool,
    /// Wall time.
    pub elapsed: Duration,
}

impl RunSummary {
    /// Number of failed slices.
    pub fn failed_slices(&self) -> usize {
        self.slices.iter().filter(|s| !s.succeeded()).count()
    }
}

/// How a run ended.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// All trials ran.
    Completed(RunSummary),
    /// The caller cancelled.
    Cancelled,
}

enum SliceEnd {
    Done(Box<SliceOutput>),
    Failed(SliceFault),
    Cancelled,
}

/// Drives slices over an execution unit.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator<U: ExecutionUnit = ThreadUnit> {
    config: OrchestratorConfig,
    unit: U,
}

impl Orchestrator<ThreadUnit> {
    /// Creates an orchestrator that runs slices on threads.
    pub fn new(config: OrchestratorConfig) -> Self {
        Self::with_unit(config, ThreadUnit)
    }
}

impl<U: ExecutionUnit> Orchestrator<U> {
    /// Creates an orchestrator over a custom unit.
    pub fn with_unit(config: OrchestratorConfig, unit: U) -> Self {
        Self { config, unit }
    }

    /// Configuration.
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Runs `trials` trials seeded with `seed`.
    pub fn run(
        &self,
        ctx: Arc<MonthContext>,
        trials: u64,
        seed: u32,
        cancel: &CancellationToken,
        on_progress: &mut dyn FnMut(Progress),
    ) -> Result<RunOutcome, SolverError> {
        if trials < self.config.small_run_threshold {
            debug!(trials, "budget below slicing threshold, running synchronously");
            return self.run_sync(&ctx, trials, seed, cancel, on_progress);
        }

        let start = Instant::now();
        let mut throttle = ProgressThrottle::new(self.config.progress_interval());
        let mut slice_size = self.config.initial_slice.max(self.config.min_slice());
        let mut rng_state = seed;
        let mut done = 0u64;
        let mut successes = 0u32;
        let mut failures = 0u32;
        let mut best: Option<(Attempt, f64)> = None;
        let mut slices: Vec<SliceRecord> = Vec::new();

        info!(trials, seed, slice_size, "starting sliced run");

        while done < trials {
            if cancel.is_cancelled() {
                info!(done, "run cancelled");
                return Ok(RunOutcome::Cancelled);
            }

            let size = slice_size.min(trials - done);
            let index = slices.len();
            let slice_start = Instant::now();
            let task = SliceTask {
                slice_index: index,
                trials: size,
                rng_state,
                context: Arc::clone(&ctx),
                progress_interval: self.config.unit_progress_interval(),
            };

            let end = match self.unit.spawn(task) {
                Ok(handle) => {
                    let best_cost = best.as_ref().map(|(_, c)| *c);
                    let end = self.supervise(
                        &handle,
                        done,
                        trials,
                        best_cost,
                        start,
                        &mut throttle,
                        cancel,
                        on_progress,
                    );
                    if !matches!(end, SliceEnd::Done(_)) {
                        handle.stop();
                    }
                    end
                }
                Err(fault) if done == 0 && failures == 0 => {
                    warn!(%fault, "no execution unit available, running synchronously");
                    return self.run_sync(&ctx, trials, seed, cancel, on_progress);
                }
                Err(fault) => SliceEnd::Failed(fault),
            };

            match end {
                SliceEnd::Done(output) => {
                    debug!(
                        slice = index,
                        trials = output.trials,
                        best_cost = output.best_cost,
                        "slice done"
                    );
                    slices.push(SliceRecord {
                        index,
                        trials: size,
                        best_cost: Some(output.best_cost),
                        fault: None,
                        elapsed: slice_start.elapsed(),
                    });
                    done += size;
                    rng_state = output.rng_state;
                    // ties keep the earlier slice
                    if best.as_ref().map_or(true, |(_, c)| output.best_cost < *c) {
                        best = Some((output.best, output.best_cost));
                    }

                    failures = 0;
                    successes += 1;
                    if successes >= self.config.growth_after {
                        slice_size = self.config.grown(slice_size);
                        successes = 0;
                    }
                }
                SliceEnd::Failed(fault) => {
                    warn!(slice = index, %fault, "slice failed");
                    slices.push(SliceRecord {
                        index,
                        trials: size,
                        best_cost: None,
                        fault: Some(fault.clone()),
                        elapsed: slice_start.elapsed(),
                    });

                    successes = 0;
                    failures += 1;
                    slice_size = self.config.shrunk(slice_size);
                    if failures >= self.config.max_consecutive_failures {
                        warn!(failures, "giving up after consecutive slice failures");
                        return Err(SolverError::Orchestrator {
                            failures: failures as usize,
                            last: fault,
                        });
                    }
                }
                SliceEnd::Cancelled => {
                    info!(done, "run cancelled");
                    return Ok(RunOutcome::Cancelled);
                }
            }
        }

        let Some((best, best_cost)) = best else {
            return Err(SolverError::NoTrials);
        };
        on_progress(Progress {
            trials_done: done,
            trials_total: trials,
            best_cost: Some(best_cost),
            elapsed: start.elapsed(),
        });

        let summary = RunSummary {
            best,
            best_cost,
            trials: done,
            rng_state,
            slices,
            synchronous: false,
            elapsed: start.elapsed(),
        };
        info!(
            trials = summary.trials,
            best_cost,
            slices = summary.slices.len(),
            failed = summary.failed_slices(),
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "sliced run completed"
        );
        Ok(RunOutcome::Completed(summary))
    }

    /// Waits for one slice, forwarding progress and enforcing the watchdog.
    #[allow(clippy::too_many_arguments)]
    fn supervise(
        &self,
        handle: &UnitHandle,
        done_before: u64,
        trials_total: u64,
        best_before: Option<f64>,
        start: Instant,
        throttle: &mut ProgressThrottle,
        cancel: &CancellationToken,
        on_progress: &mut dyn FnMut(Progress),
    ) -> SliceEnd {
        let watchdog = self.config.watchdog();
        let poll = watchdog.min(CANCEL_POLL);
        let mut last_heard = Instant::now();

        loop {
            if cancel.is_cancelled() {
                return SliceEnd::Cancelled;
            }
            match handle.recv_timeout(poll) {
                Ok(UnitEvent::Progress { trials_done, best_cost }) => {
                    last_heard = Instant::now();
                    if throttle.ready() {
                        on_progress(Progress {
                            trials_done: done_before + trials_done,
                            trials_total,
                            best_cost: min_cost(best_before, best_cost),
                            elapsed: start.elapsed(),
                        });
                    }
                }
                Ok(UnitEvent::Done(output)) => return SliceEnd::Done(output),
                Ok(UnitEvent::Fault(message)) => {
                    return SliceEnd::Failed(SliceFault::Crashed(message))
                }
                Err(RecvTimeoutError::Timeout) => {
                    if last_heard.elapsed() >= watchdog {
                        return SliceEnd::Failed(SliceFault::Watchdog(watchdog));
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return SliceEnd::Failed(SliceFault::Disconnected)
                }
            }
        }
    }

    fn run_sync(
        &self,
        ctx: &MonthContext,
        trials: u64,
        seed: u32,
        cancel: &CancellationToken,
        on_progress: &mut dyn FnMut(Progress),
    ) -> Result<RunOutcome, SolverError> {
        let start = Instant::now();
        let trials = trials.clamp(1, self.config.sync_max_trials.max(1));
        let mut rng = XorShift32::new(seed);
        let optimizer = Optimizer::new(ctx).with_progress_interval(self.config.progress_interval());

        match optimizer.run(trials, &mut rng, cancel, on_progress)? {
            LoopOutcome::Completed(r) => {
                info!(trials = r.trials, best_cost = r.best_cost, "synchronous run completed");
                Ok(RunOutcome::Completed(RunSummary {
                    best: r.best,
                    best_cost: r.best_cost,
                    trials: r.trials,
                    rng_state: rng.state(),
                    slices: Vec::new(),
                    synchronous: true,
                    elapsed: start.elapsed(),
                }))
            }
            LoopOutcome::Cancelled => Ok(RunOutcome::Cancelled),
        }
    }
}

fn min_cost(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, SolveRequest};
    use std::collections::VecDeque;
    use std::sync::mpsc::{self, Sender};
    use std::sync::Mutex;

    /// Scripted behavior of one fake slice.
    #[derive(Debug, Clone)]
    enum Script {
        Succeed(f64),
        Fault,
        Silent,
        Disconnect,
        NoUnit,
    }

    /// Test double that follows a script and records the tasks it saw.
    #[derive(Default)]
    struct FakeUnit {
        script: Mutex<VecDeque<Script>>,
        seen: Mutex<Vec<(u64, u32)>>,
        parked: Mutex<Vec<Sender<UnitEvent>>>,
        stops: Mutex<Vec<CancellationToken>>,
    }

    impl FakeUnit {
        fn new(script: Vec<Script>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                ..Default::default()
            }
        }

        fn seen(&self) -> Vec<(u64, u32)> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl ExecutionUnit for &FakeUnit {
        fn spawn(&self, task: SliceTask) -> Result<UnitHandle, SliceFault> {
            let step = self.script.lock().unwrap().pop_front().unwrap_or(Script::Succeed(1_000.0));
            if matches!(step, Script::NoUnit) {
                return Err(SliceFault::Unavailable("no threads".into()));
            }
            self.seen.lock().unwrap().push((task.trials, task.rng_state));

            let (tx, rx) = mpsc::channel();
            let stop = CancellationToken::new();
            self.stops.lock().unwrap().push(stop.clone());

            match step {
                Script::Succeed(cost) => {
                    let mut best =
                        Attempt::empty(task.context.employee_count(), task.context.day_count());
                    // tag the attempt with its slice for merge checks
                    best.planned_secondary_days = vec![task.slice_index];
                    tx.send(UnitEvent::Progress {
                        trials_done: task.trials / 2,
                        best_cost: Some(cost),
                    })
                    .unwrap();
                    tx.send(UnitEvent::Done(Box::new(SliceOutput {
                        best,
                        best_cost: cost,
                        trials: task.trials,
                        rng_state: task.rng_state.wrapping_add(1),
                    })))
                    .unwrap();
                }
                Script::Fault => tx.send(UnitEvent::Fault("boom".into())).unwrap(),
                Script::Silent => self.parked.lock().unwrap().push(tx),
                Script::Disconnect | Script::NoUnit => drop(tx),
            }
            Ok(UnitHandle::new(rx, stop))
        }
    }

    fn ctx() -> Arc<MonthContext> {
        let team: Vec<Employee> = (0..3).map(|i| Employee::new(format!("E{i}"), 30.0)).collect();
        Arc::new(MonthContext::build(&SolveRequest::for_month(2024, 2, team)))
    }

    fn sliced() -> OrchestratorConfig {
        OrchestratorConfig::default()
            .with_slices(40_000, 10_000, 1_000_000)
            .with_small_run_threshold(0)
            .with_watchdog_ms(50)
    }

    fn completed(outcome: Result<RunOutcome, SolverError>) -> RunSummary {
        match outcome {
            Ok(RunOutcome::Completed(s)) => s,
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_keeps_lowest_and_earliest() {
        let fake = FakeUnit::new(vec![
            Script::Succeed(5.0),
            Script::Succeed(3.0),
            Script::Succeed(3.0),
        ]);
        let orch = Orchestrator::with_unit(sliced(), &fake);
        let s = completed(orch.run(ctx(), 120_000, 7, &CancellationToken::new(), &mut |_| {}));
        assert_eq!(s.best_cost, 3.0);
        assert_eq!(s.best.planned_secondary_days, vec![1]);
        assert_eq!(s.trials, 120_000);
        assert!(!s.synchronous);
    }

    #[test]
    fn test_failure_halves_and_discards_state() {
        let fake = FakeUnit::new(vec![Script::Fault]);
        let orch = Orchestrator::with_unit(sliced(), &fake);
        let s = completed(orch.run(ctx(), 100_000, 7, &CancellationToken::new(), &mut |_| {}));

        let seen = fake.seen();
        let sizes: Vec<u64> = seen.iter().map(|(t, _)| *t).collect();
        assert_eq!(sizes, vec![40_000, 20_000, 20_000, 20_000, 25_000, 15_000]);
        let states: Vec<u32> = seen.iter().map(|(_, r)| *r).collect();
        assert_eq!(states, vec![7, 7, 8, 9, 10, 11]);

        assert_eq!(s.trials, 100_000);
        assert_eq!(s.rng_state, 12);
        assert_eq!(s.failed_slices(), 1);
        assert_eq!(s.slices[0].fault, Some(SliceFault::Crashed("boom".into())));
    }

    #[test]
    fn test_abort_after_consecutive_failures() {
        let fake = FakeUnit::new(vec![Script::Fault; 6]);
        let orch = Orchestrator::with_unit(sliced(), &fake);
        let res = orch.run(ctx(), 100_000, 7, &CancellationToken::new(), &mut |_| {});
        match res {
            Err(SolverError::Orchestrator { failures, last }) => {
                assert_eq!(failures, 6);
                assert_eq!(last, SliceFault::Crashed("boom".into()));
            }
            other => panic!("expected abort, got {other:?}"),
        }
        let sizes: Vec<u64> = fake.seen().iter().map(|(t, _)| *t).collect();
        assert_eq!(sizes, vec![40_000, 20_000, 10_000, 10_000, 10_000, 10_000]);
    }

    #[test]
    fn test_success_resets_failure_count() {
        let mut script = vec![Script::Fault; 5];
        script.push(Script::Succeed(1.0));
        script.extend(vec![Script::Fault; 5]);
        let fake = FakeUnit::new(script);
        let orch = Orchestrator::with_unit(sliced(), &fake);
        let s = completed(orch.run(ctx(), 30_000, 1, &CancellationToken::new(), &mut |_| {}));
        assert_eq!(s.failed_slices(), 10);
        assert_eq!(s.trials, 30_000);
    }

    #[test]
    fn test_watchdog_abandons_silent_unit() {
        let fake = FakeUnit::new(vec![Script::Silent, Script::Disconnect]);
        let orch = Orchestrator::with_unit(sliced(), &fake);
        let s = completed(orch.run(ctx(), 10_000, 1, &CancellationToken::new(), &mut |_| {}));
        assert_eq!(s.slices[0].fault, Some(SliceFault::Watchdog(Duration::from_millis(50))));
        assert_eq!(s.slices[1].fault, Some(SliceFault::Disconnected));
        assert!(s.slices[2].succeeded());
        assert!(fake.stops.lock().unwrap()[0].is_cancelled());
    }

    #[test]
    fn test_cancel_stops_active_unit() {
        let fake = FakeUnit::new(vec![Script::Silent]);
        let orch = Orchestrator::with_unit(sliced().with_watchdog_ms(60_000), &fake);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let canceller = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(30));
            trigger.cancel();
        });
        let started = Instant::now();
        let res = orch.run(ctx(), 100_000, 1, &cancel, &mut |_| {});
        canceller.join().unwrap();

        assert!(matches!(res, Ok(RunOutcome::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(fake.stops.lock().unwrap()[0].is_cancelled());
    }

    #[test]
    fn test_small_run_is_synchronous() {
        let fake = FakeUnit::new(Vec::new());
        let orch = Orchestrator::with_unit(OrchestratorConfig::default(), &fake);
        let s = completed(orch.run(ctx(), 20, 3, &CancellationToken::new(), &mut |_| {}));
        assert!(s.synchronous);
        assert_eq!(s.trials, 20);
        assert!(fake.seen().is_empty());
    }

    #[test]
    fn test_no_unit_falls_back_to_sync() {
        let fake = FakeUnit::new(vec![Script::NoUnit]);
        let orch = Orchestrator::with_unit(sliced().with_sync_max_trials(25), &fake);
        let s = completed(orch.run(ctx(), 500_000, 3, &CancellationToken::new(), &mut |_| {}));
        assert!(s.synchronous);
        assert_eq!(s.trials, 25);
    }

    #[test]
    fn test_progress_is_global() {
        let fake = FakeUnit::new(vec![Script::Succeed(9.0), Script::Succeed(4.0)]);
        let orch = Orchestrator::with_unit(sliced().with_progress_interval_ms(0), &fake);
        let mut reports = Vec::new();
        completed(orch.run(ctx(), 80_000, 1, &CancellationToken::new(), &mut |p| reports.push(p)));

        let done: Vec<u64> = reports.iter().map(|p| p.trials_done).collect();
        assert_eq!(done, vec![20_000, 60_000, 80_000]);
        assert_eq!(reports[1].best_cost, Some(4.0));
        assert!(reports.iter().all(|p| p.trials_total == 80_000));
    }

    #[test]
    fn test_thread_unit_reproducible() {
        let config = OrchestratorConfig::default()
            .with_slices(40, 10, 100)
            .with_small_run_threshold(0);
        let orch = Orchestrator::new(config);
        let a = completed(orch.run(ctx(), 150, 99, &CancellationToken::new(), &mut |_| {}));
        let b = completed(orch.run(ctx(), 150, 99, &CancellationToken::new(), &mut |_| {}));
        assert_eq!(a.trials, 150);
        assert_eq!(a.best_cost, b.best_cost);
        assert_eq!(a.rng_state, b.rng_state);
        assert_eq!(a.failed_slices(), 0);
    }

    #[test]
    fn test_unit_progress_under_watchdog() {
        let c = OrchestratorConfig::default()
            .with_watchdog_ms(400)
            .with_progress_interval_ms(1_000);
        assert_eq!(c.unit_progress_interval(), Duration::from_millis(200));

        let c = c.with_progress_interval_ms(50);
        assert_eq!(c.unit_progress_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_config_json_defaults() {
        let c: OrchestratorConfig = serde_json::from_str(r#"{ "watchdogMs": 500 }"#).unwrap();
        assert_eq!(c.watchdog(), Duration::from_millis(500));
        assert_eq!(c.initial_slice, 250_000);
    }
}
