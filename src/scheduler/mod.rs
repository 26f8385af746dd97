//! Trial-based roster construction.
//!
//! One trial builds a complete month with a randomized greedy heuristic
//! and scores it with a tiered cost function. The optimizer repeats this
//! and keeps the cheapest result.
//!
//! # Algorithm
//!
//! [`AttemptGenerator`] walks the month week by week, filling the primary
//! shift of every day and the secondary shift of a chosen subset of days.
//! Candidates are ranked by a weighted score with a random perturbation,
//! so no two trials are alike. It is not optimal; quality comes from
//! volume.
//!
//! # Cost
//!
//! [`CostEvaluator`] is lexicographic in practice: each tier's weight
//! dwarfs everything below it.
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"

mod cost;
mod generator;
mod optimizer;
mod scoring;
mod summary;

pub use cost::{CostBreakdown, CostEvaluator, HARD_VIOLATION};
pub use generator::{secondary_count, select_secondary_days, AttemptGenerator};
pub use optimizer::{
    LoopOutcome, Optimizer, OptimizerResult, DEFAULT_PROGRESS_INTERVAL, DEFAULT_YIELD_INTERVAL,
};
pub use scoring::{ShiftWeights, PRIMARY_WEIGHTS, SECONDARY_WEIGHTS, STAGE_PENALTY};
pub use summary::{
    attempt_diagnostics, build_result, feasibility_warnings, finalize_diagnostics, month_summaries,
};
