//! Rostering domain models.
//!
//! Provides the data types for one month of duty planning: who can work
//! ([`Employee`], [`Preference`]), when ([`Day`], [`WeekSegment`],
//! [`Block`], [`SpecialDay`]), what gets planned ([`Schedule`],
//! [`ForcedOff`], [`Attempt`]), and the request/result envelopes.
//!
//! # Shift Kinds
//!
//! | Kind | Hours | Coverage |
//! |------|-------|----------|
//! | Primary | 20 | every day |
//! | Secondary | 10 | balancing, some days mandated |

mod block;
mod calendar;
mod employee;
mod request;
mod result;
mod schedule;

pub use block::{Block, SpecialDay};
pub use calendar::{Day, WeekSegment};
pub use employee::{DEFAULT_PRIMARY_MIN_GAP, Employee, Preference};
pub use request::{DEFAULT_TRIAL_COUNT, SolveRequest, SolveSettings};
pub use result::{Diagnostic, EmployeeSummary, Severity, SolveResult};
pub use schedule::{Attempt, ForcedOff, Schedule, ShiftKind};
