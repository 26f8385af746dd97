//! Schedule (solution) model.
//!
//! A schedule assigns at most one employee per shift kind per day.
//! Employees are referenced by their position in the request's employee
//! list; the public result converts positions back to ids.

use serde::{Deserialize, Serialize};

/// The two duty kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShiftKind {
    /// Mandatory full-length duty covering every day.
    Primary,
    /// Optional shorter duty used to balance hours.
    Secondary,
}

impl ShiftKind {
    /// Duty length in hours.
    #[inline]
    pub fn hours(self) -> f64 {
        match self {
            ShiftKind::Primary => 20.0,
            ShiftKind::Secondary => 10.0,
        }
    }
}

/// Per-day primary and secondary assignees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Primary assignee per day (employee position).
    pub primary: Vec<Option<usize>>,
    /// Secondary assignee per day (employee position).
    pub secondary: Vec<Option<usize>>,
}

impl Schedule {
    /// Creates an empty schedule for `days` days.
    pub fn new(days: usize) -> Self {
        Self {
            primary: vec![None; days],
            secondary: vec![None; days],
        }
    }

    /// Number of days covered.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.primary.len()
    }

    /// Assignee of a shift on a day.
    #[inline]
    pub fn assignee(&self, kind: ShiftKind, day: usize) -> Option<usize> {
        match kind {
            ShiftKind::Primary => self.primary.get(day).copied().flatten(),
            ShiftKind::Secondary => self.secondary.get(day).copied().flatten(),
        }
    }

    /// Sets the assignee of a shift on a day.
    pub fn assign(&mut self, kind: ShiftKind, day: usize, employee: Option<usize>) {
        let slots = match kind {
            ShiftKind::Primary => &mut self.primary,
            ShiftKind::Secondary => &mut self.secondary,
        };
        if let Some(slot) = slots.get_mut(day) {
            *slot = employee;
        }
    }

    /// Whether the employee holds any shift on the day.
    #[inline]
    pub fn works(&self, employee: usize, day: usize) -> bool {
        self.assignee(ShiftKind::Primary, day) == Some(employee)
            || self.assignee(ShiftKind::Secondary, day) == Some(employee)
    }

    /// Days without a primary assignee.
    pub fn missing_primary_days(&self) -> Vec<usize> {
        self.primary
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Total number of filled shifts.
    pub fn assignment_count(&self) -> usize {
        self.primary.iter().flatten().count() + self.secondary.iter().flatten().count()
    }
}

/// Mandatory rest markers: the day after a primary shift.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForcedOff {
    flags: Vec<Vec<bool>>,
}

impl ForcedOff {
    /// Creates an all-false grid.
    pub fn new(employees: usize, days: usize) -> Self {
        Self {
            flags: vec![vec![false; days]; employees],
        }
    }

    /// Whether the employee is forced off on the day.
    #[inline]
    pub fn is_off(&self, employee: usize, day: usize) -> bool {
        self.flags
            .get(employee)
            .and_then(|row| row.get(day))
            .copied()
            .unwrap_or(false)
    }

    /// Marks a forced rest day. Out-of-range days are ignored.
    #[inline]
    pub fn mark(&mut self, employee: usize, day: usize) {
        if let Some(flag) = self.flags.get_mut(employee).and_then(|row| row.get_mut(day)) {
            *flag = true;
        }
    }

    /// Per-day flags of one employee.
    pub fn row(&self, employee: usize) -> &[bool] {
        self.flags.get(employee).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// One fully materialized candidate schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    /// Shift assignments.
    pub schedule: Schedule,
    /// Mandatory rest markers.
    pub forced_off: ForcedOff,
    /// Days selected to host a secondary shift.
    pub planned_secondary_days: Vec<usize>,
    /// Candidate days not selected for a secondary shift.
    pub omitted_secondary_days: Vec<usize>,
}

impl Attempt {
    /// Creates an empty attempt.
    pub fn empty(employees: usize, days: usize) -> Self {
        Self {
            schedule: Schedule::new(days),
            forced_off: ForcedOff::new(employees, days),
            planned_secondary_days: Vec::new(),
            omitted_secondary_days: Vec::new(),
        }
    }
}
