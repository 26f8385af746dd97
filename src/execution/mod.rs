//! Execution layer: turns a large trial budget into bounded, cancellable,
//! fault-tolerant work.
//!
//! - [`XorShift32`]: seeded generator whose state is carried between slices
//! - [`CancellationToken`], [`Progress`]: caller-facing control
//! - [`ExecutionUnit`], [`ThreadUnit`]: isolated slice runners
//! - [`Orchestrator`]: slicing, retry, watchdog and merging

mod control;
mod orchestrator;
mod rng;
mod unit;

pub use control::{CancellationToken, Progress, ProgressThrottle};
pub use orchestrator::{Orchestrator, OrchestratorConfig, RunOutcome, RunSummary, SliceRecord};
pub use rng::XorShift32;
pub use unit::{run_slice, ExecutionUnit, SliceOutput, SliceTask, ThreadUnit, UnitEvent, UnitHandle};
