//! Execution units: isolated workers that run one slice of trials.
//!
//! A unit receives a [`SliceTask`] and answers with a stream of
//! [`UnitEvent`]s ending in `Done` or `Fault`. The orchestrator only sees
//! the event stream, so a unit may be a thread, a process, or a test
//! double.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::debug;

use super::{CancellationToken, XorShift32};
use crate::context::MonthContext;
use crate::error::{SliceFault, SolverError};
use crate::models::Attempt;
use crate::scheduler::{LoopOutcome, Optimizer};

/// Work order for one slice.
#[derive(Debug, Clone)]
pub struct SliceTask {
    /// Position of the slice in the run.
    pub slice_index: usize,
    /// Trials to run.
    pub trials: u64,
    /// Generator state to start from.
    pub rng_state: u32,
    /// Shared month context.
    pub context: Arc<MonthContext>,
    /// Minimum spacing of progress events.
    pub progress_interval: Duration,
}

/// Result of a finished slice.
#[derive(Debug, Clone)]
pub struct SliceOutput {
    /// Best attempt of the slice.
    pub best: Attempt,
    /// Its cost.
    pub best_cost: f64,
    /// Trials run.
    pub trials: u64,
    /// Generator state after the last trial.
    pub rng_state: u32,
}

/// Message from a unit to the orchestrator.
#[derive(Debug, Clone)]
pub enum UnitEvent {
    /// Slice-local progress.
    Progress {
        /// Trials finished in this slice.
        trials_done: u64,
        /// Best cost in this slice.
        best_cost: Option<f64>,
    },
    /// The slice finished.
    Done(Box<SliceOutput>),
    /// The slice failed.
    Fault(String),
}

/// Orchestrator side of a running unit.
#[derive(Debug)]
pub struct UnitHandle {
    events: Receiver<UnitEvent>,
    stop: CancellationToken,
}

impl UnitHandle {
    /// Wraps an event receiver and the unit's stop flag.
    pub fn new(events: Receiver<UnitEvent>, stop: CancellationToken) -> Self {
        Self { events, stop }
    }

    /// Waits up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<UnitEvent, RecvTimeoutError> {
        self.events.recv_timeout(timeout)
    }

    /// Tells the unit to stop. The unit may still be running afterwards;
    /// its further events are ignored.
    pub fn stop(&self) {
        self.stop.cancel();
    }
}

impl Drop for UnitHandle {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}

/// Something that can run a slice in isolation.
pub trait ExecutionUnit {
    /// Starts a slice. Fails only when no unit could be created.
    fn spawn(&self, task: SliceTask) -> Result<UnitHandle, SliceFault>;
}

/// Runs each slice on a fresh OS thread.
///
/// Threads are detached. Stopping or dropping the handle makes the slice
/// exit at its next trial boundary, so a slice stuck inside a single trial
/// keeps its thread alive until the process ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadUnit;

impl ExecutionUnit for ThreadUnit {
    fn spawn(&self, task: SliceTask) -> Result<UnitHandle, SliceFault> {
        let (tx, rx) = mpsc::channel();
        let stop = CancellationToken::new();
        let worker_stop = stop.clone();

        thread::Builder::new()
            .name(format!("roster-slice-{}", task.slice_index))
            .spawn(move || {
                let progress_tx = tx.clone();
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    run_slice(&task, &worker_stop, &mut |trials_done, best_cost| {
                        let _ = progress_tx.send(UnitEvent::Progress { trials_done, best_cost });
                    })
                }));
                let event = match outcome {
                    Ok(Ok(Some(output))) => UnitEvent::Done(Box::new(output)),
                    Ok(Ok(None)) => {
                        debug!(slice = task.slice_index, "slice stopped");
                        return;
                    }
                    Ok(Err(err)) => UnitEvent::Fault(err.to_string()),
                    Err(payload) => UnitEvent::Fault(panic_message(payload.as_ref())),
                };
                let _ = tx.send(event);
            })
            .map_err(|err| SliceFault::Unavailable(err.to_string()))?;

        Ok(UnitHandle::new(rx, stop))
    }
}

/// Runs one slice in the current thread.
///
/// Returns `Ok(None)` when `stop` fired before the last trial.
pub fn run_slice(
    task: &SliceTask,
    stop: &CancellationToken,
    on_progress: &mut dyn FnMut(u64, Option<f64>),
) -> Result<Option<SliceOutput>, SolverError> {
    let mut rng = XorShift32::new(task.rng_state);
    let optimizer = Optimizer::new(&task.context).with_progress_interval(task.progress_interval);

    let outcome = optimizer.run(task.trials, &mut rng, stop, &mut |p| {
        on_progress(p.trials_done, p.best_cost)
    })?;
    Ok(match outcome {
        LoopOutcome::Completed(r) => Some(SliceOutput {
            best: r.best,
            best_cost: r.best_cost,
            trials: r.trials,
            rng_state: rng.state(),
        }),
        LoopOutcome::Cancelled => None,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
