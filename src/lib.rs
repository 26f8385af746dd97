//! Monthly duty rostering.
//!
//! Assigns a 20-hour primary shift and a 10-hour secondary shift to a team
//! across a calendar month. Availability blocks are hard, preferences and
//! hour balance are soft. The best plan is picked from a large number of
//! randomized greedy trials.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Employee`, `Preference`, `Day`,
//!   `WeekSegment`, `Block`, `SolveRequest`, `SolveResult`
//! - **`validation`**: Input integrity checks (IDs, indices, segment coverage)
//! - **`context`**: `MonthContext`, the precomputed per-employee view of a month
//! - **`scheduler`**: Attempt generator, cost evaluator and optimizer loop
//! - **`execution`**: Seeded RNG, cancellation, sliced fault-tolerant execution
//! - **`solver`**: The `Solver` entry point
//!
//! # Architecture
//!
//! `Solver` → `Orchestrator` → `ExecutionUnit` (one per slice) →
//! `Optimizer` → `AttemptGenerator` + `CostEvaluator`, all reading one
//! shared `MonthContext`.
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Marsaglia (2003), "Xorshift RNGs"

pub mod context;
pub mod error;
pub mod execution;
pub mod models;
pub mod scheduler;
pub mod solver;
pub mod validation;

pub use error::{SliceFault, SolverError};
pub use solver::{SolveOutcome, Solver, SolverConfig};
