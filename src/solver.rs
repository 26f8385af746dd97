//! Top-level solve entry point.
//!
//! [`Solver`] validates a [`SolveRequest`], builds the [`MonthContext`],
//! runs the trial budget through the [`Orchestrator`] and turns the best
//! attempt into a [`SolveResult`].
//!
//! # Outcomes
//!
//! | Input | Result |
//! |-------|--------|
//! | invalid request | `Ok(Completed)` with an empty schedule and one danger diagnostic |
//! | infeasible month | `Ok(Completed)` with a best-effort schedule and diagnostics |
//! | cancelled | `Ok(Cancelled)` |
//! | slice retries exhausted | `Err(SolverError::Orchestrator)` |
//!
//! # Example
//!
//! ```no_run
//! use u_roster::models::{Employee, SolveRequest};
//! use u_roster::solver::{SolveOutcome, Solver, SolverConfig};
//!
//! let request = SolveRequest::for_month(2024, 7, vec![
//!     Employee::new("anna", 38.5),
//!     Employee::new("ben", 38.5),
//! ])
//! .with_trial_count(5_000)
//! .with_seed(42);
//!
//! let outcome = Solver::new(SolverConfig::default()).solve(&request).unwrap();
//! if let SolveOutcome::Completed(result) = outcome {
//!     println!("{:?}", result.primary);
//! }
//! ```

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::context::MonthContext;
use crate::error::SolverError;
use crate::execution::{
    CancellationToken, Orchestrator, OrchestratorConfig, Progress, RunOutcome,
};
use crate::models::{Diagnostic, SolveRequest, SolveResult};
use crate::scheduler::{build_result, feasibility_warnings};
use crate::validation::validate_request;

/// Solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolverConfig {
    /// Slice sizing, retry and watchdog settings.
    pub orchestrator: OrchestratorConfig,
    /// Overrides the request's trial count.
    pub trial_count: Option<u64>,
    /// Overrides the request's seed.
    pub seed: Option<u32>,
}

impl SolverConfig {
    /// Sets the orchestrator configuration.
    pub fn with_orchestrator(mut self, orchestrator: OrchestratorConfig) -> Self {
        self.orchestrator = orchestrator;
        self
    }

    /// Overrides the trial count of every request. Zero runs a single trial.
    pub fn with_trial_count(mut self, trials: u64) -> Self {
        self.trial_count = Some(trials);
        self
    }

    /// Overrides the seed of every request.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// How a solve ended.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// A result is available, possibly rejected or with diagnostics.
    Completed(SolveResult),
    /// The caller cancelled before the run finished.
    Cancelled,
}

impl SolveOutcome {
    /// The result, if the solve completed.
    pub fn result(&self) -> Option<&SolveResult> {
        match self {
            Self::Completed(r) => Some(r),
            Self::Cancelled => None,
        }
    }
}

/// Monthly roster solver.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves without progress reporting or cancellation.
    pub fn solve(&self, request: &SolveRequest) -> Result<SolveOutcome, SolverError> {
        self.solve_with(request, &CancellationToken::new(), &mut |_| {})
    }

    /// Solves, reporting progress and honoring `cancel`.
    pub fn solve_with(
        &self,
        request: &SolveRequest,
        cancel: &CancellationToken,
        on_progress: &mut dyn FnMut(Progress),
    ) -> Result<SolveOutcome, SolverError> {
        if let Err(errors) = validate_request(request) {
            warn!(month = %request.month_key, errors = errors.len(), "request rejected");
            let detail = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Ok(SolveOutcome::Completed(SolveResult::rejected(
                request.month_key.clone(),
                request.days.len(),
                Diagnostic::danger("Invalid input", detail),
            )));
        }

        let start = Instant::now();
        let ctx = Arc::new(MonthContext::build(request));
        let trials = self
            .config
            .trial_count
            .unwrap_or(request.settings.trial_count)
            .max(1);
        let seed = self
            .config
            .seed
            .or(request.settings.seed)
            .unwrap_or_else(rand::random::<u32>);

        info!(
            month = %request.month_key,
            employees = ctx.employee_count(),
            days = ctx.day_count(),
            trials,
            seed,
            "solving"
        );

        let orchestrator = Orchestrator::new(self.config.orchestrator.clone());
        let summary = match orchestrator.run(Arc::clone(&ctx), trials, seed, cancel, on_progress)? {
            RunOutcome::Completed(summary) => summary,
            RunOutcome::Cancelled => return Ok(SolveOutcome::Cancelled),
        };

        let result = build_result(
            &ctx,
            &summary.best,
            summary.best_cost,
            summary.trials,
            feasibility_warnings(&ctx),
        );
        info!(
            month = %result.month_key,
            best_cost = summary.best_cost,
            trials = summary.trials,
            failed_slices = summary.failed_slices(),
            diagnostics = result.diagnostics.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "solved"
        );
        Ok(SolveOutcome::Completed(result))
    }
}
