//! Error types.
//!
//! Only faults that abort a solve surface here. Infeasible plans are
//! reported through diagnostics, cancellation through
//! [`SolveOutcome::Cancelled`](crate::solver::SolveOutcome), and invalid
//! input through a rejected [`SolveResult`](crate::models::SolveResult).

use std::time::Duration;
use thiserror::Error;

/// Errors returned by the solver.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The optimizer was asked to run zero trials.
    #[error("optimizer needs at least one trial")]
    NoTrials,
    /// Slice retries exhausted.
    #[error("execution aborted after {failures} consecutive slice failures: {last}")]
    Orchestrator {
        /// Consecutive failures at abort time.
        failures: usize,
        /// The fault that triggered the abort.
        last: SliceFault,
    },
}

/// Why a single slice did not produce a result.
///
/// Absorbed by the orchestrator's retry loop unless retries run out.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliceFault {
    /// No execution unit could be started.
    #[error("execution unit unavailable: {0}")]
    Unavailable(String),
    /// The unit reported an error or panicked.
    #[error("execution unit failed: {0}")]
    Crashed(String),
    /// The unit stayed silent past the watchdog interval.
    #[error("execution unit silent for {0:?}")]
    Watchdog(Duration),
    /// The unit went away without reporting a result.
    #[error("execution unit disconnected")]
    Disconnected,
}
