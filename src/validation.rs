//! Input validation for solve requests.
//!
//! Checks structural integrity of a request before any planning. Detects:
//! - Empty rosters and empty months
//! - Duplicate or empty employee IDs
//! - Non-finite or negative hour figures
//! - Day indices out of order
//! - Week segments that miss, repeat or overrun days, or are out of order
//! - Blocks referring to unknown employees or days
//! - Per-day lists longer than the month
//!
//! Soft problems (weeks that cannot meet their hour targets) are not
//! validation errors; they surface as diagnostics on the result.

use crate::models::SolveRequest;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No employees to schedule.
    NoEmployees,
    /// The month has no days.
    NoDays,
    /// Two employees share the same ID, or an ID is empty.
    DuplicateId,
    /// Weekly hours or balance is not a usable number.
    InvalidHours,
    /// A day's index does not match its position.
    DayIndexMismatch,
    /// A week segment references a day outside the month, or days are
    /// not covered exactly once.
    InvalidSegment,
    /// A block references an unknown employee or day.
    InvalidBlock,
    /// A per-day list is longer than the month.
    LengthMismatch,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a solve request.
///
/// Checks:
/// 1. At least one employee and one day
/// 2. Employee IDs are non-empty and unique
/// 3. Weekly hours are finite and non-negative, balances finite
/// 4. `days[i].index == i`
/// 5. Every day belongs to exactly one week segment, segments in day order
/// 6. Blocks reference known employees and days
/// 7. Mandate and special-day lists fit the month
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &SolveRequest) -> ValidationResult {
    let mut errors = Vec::new();
    let n = request.days.len();

    if request.employees.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoEmployees,
            "Add employees before planning",
        ));
    }
    if n == 0 {
        errors.push(ValidationError::new(ValidationErrorKind::NoDays, "The month has no days"));
    }

    let mut ids = HashSet::new();
    for emp in &request.employees {
        if emp.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                "Employee with empty ID",
            ));
        } else if !ids.insert(emp.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee ID: {}", emp.id),
            ));
        }

        if !emp.weekly_hours.is_finite() || emp.weekly_hours < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHours,
                format!("Employee '{}' has invalid weekly hours {}", emp.id, emp.weekly_hours),
            ));
        }
        if !emp.balance_hours.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHours,
                format!("Employee '{}' has invalid balance {}", emp.id, emp.balance_hours),
            ));
        }
    }

    for (i, day) in request.days.iter().enumerate() {
        if day.index != i {
            errors.push(ValidationError::new(
                ValidationErrorKind::DayIndexMismatch,
                format!("Day at position {i} has index {}", day.index),
            ));
        }
    }

    check_segments(request, &mut errors);

    for (emp_id, by_day) in &request.blocks {
        if !ids.contains(emp_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBlock,
                format!("Blocks reference unknown employee '{emp_id}'"),
            ));
        }
        if let Some(day) = by_day.keys().find(|&&day| day >= n) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBlock,
                format!("Block for '{emp_id}' on day {day} is outside the month"),
            ));
        }
    }

    if request.secondary_mandate.len() > n {
        errors.push(ValidationError::new(
            ValidationErrorKind::LengthMismatch,
            format!(
                "Secondary mandate covers {} days, month has {n}",
                request.secondary_mandate.len()
            ),
        ));
    }
    if request.special_days.len() > n {
        errors.push(ValidationError::new(
            ValidationErrorKind::LengthMismatch,
            format!("Special days cover {} days, month has {n}", request.special_days.len()),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Every day must sit in exactly one segment, and segments must be
/// non-empty, in range and chronological.
fn check_segments(request: &SolveRequest, errors: &mut Vec<ValidationError>) {
    let n = request.days.len();
    let mut seen = vec![0u32; n];
    let mut prev_last: Option<usize> = None;

    for (si, seg) in request.week_segments.iter().enumerate() {
        if seg.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSegment,
                format!("Week segment {si} is empty"),
            ));
        }
        let ascending = seg.day_indices.windows(2).all(|w| w[0] < w[1]);
        let after_prev = match (prev_last, seg.first()) {
            (Some(last), Some(first)) => first > last,
            _ => true,
        };
        if !ascending || !after_prev {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSegment,
                format!("Week segment {si} is out of day order"),
            ));
        }
        if let Some(last) = seg.last() {
            prev_last = Some(prev_last.map_or(last, |p| p.max(last)));
        }
        for &idx in &seg.day_indices {
            match seen.get_mut(idx) {
                Some(count) => *count += 1,
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidSegment,
                    format!("Week segment {si} references day {idx} outside the month"),
                )),
            }
        }
    }

    let uncovered = seen.iter().filter(|&&c| c == 0).count();
    if uncovered > 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSegment,
            format!("{uncovered} day(s) belong to no week segment"),
        ));
    }
    let repeated = seen.iter().filter(|&&c| c > 1).count();
    if repeated > 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSegment,
            format!("{repeated} day(s) belong to more than one week segment"),
        ));
    }
}
