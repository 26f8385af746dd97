//! Employee and preference models.
//!
//! An employee carries a contractual weekly hour target, a signed
//! carry-over balance, and a normalized preference record. The core
//! consumes employees read-only; they are created and edited externally.

use serde::{Deserialize, Serialize};

/// An employee on the duty roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique employee identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Contractual target hours per week.
    pub weekly_hours: f64,
    /// Signed carry-over hours bank (positive = overtime already worked).
    #[serde(default)]
    pub balance_hours: f64,
    /// Scheduling preferences.
    #[serde(default)]
    pub preference: Preference,
}

impl Employee {
    /// Creates an employee with default preferences and no balance.
    pub fn new(id: impl Into<String>, weekly_hours: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            weekly_hours,
            balance_hours: 0.0,
            preference: Preference::default(),
        }
    }

    /// Sets the employee name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the carry-over balance (hours).
    pub fn with_balance(mut self, balance_hours: f64) -> Self {
        self.balance_hours = balance_hours;
        self
    }

    /// Sets the preference record.
    pub fn with_preference(mut self, preference: Preference) -> Self {
        self.preference = preference;
        self
    }

    /// Contract hours attributed to one weekday (Mon..Fri).
    #[inline]
    pub fn hours_per_weekday(&self) -> f64 {
        self.weekly_hours / 5.0
    }
}

/// Normalized preference record for one employee.
///
/// Tristate fields use `-1` (dislike), `0` (neutral), `+1` (like).
/// Weekday numbers follow `0 = Sunday .. 6 = Saturday`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preference {
    /// Whether the employee accepts primary shifts.
    pub allow_primary: bool,
    /// Whether the employee accepts secondary shifts.
    pub allow_secondary: bool,
    /// Shift-type bias: `+1` prefers secondary, `-1` prefers primary.
    pub secondary_bias: i8,
    /// Weekdays the employee does not want to work.
    pub banned_weekdays: Vec<u8>,
    /// Minimum spacing (days) between two primary shifts.
    pub primary_min_gap: u32,
    /// Preference for two primary shifts exactly two days apart.
    pub double_primary: i8,
    /// Extra rest days wanted after a primary shift (0..=2).
    pub extra_rest_after_primary: u8,
    /// Weekdays the employee would like to work.
    pub preferred_weekdays: Vec<u8>,
    /// Weekend bias: `+1` likes weekend duty, `-1` avoids it.
    pub weekend_bias: i8,
    /// Cap on primary shifts per week.
    pub max_primary_per_week: Option<u32>,
    /// Cap on secondary shifts per week.
    pub max_secondary_per_week: Option<u32>,
    /// Cap on primary shifts per month.
    pub max_primary_per_month: Option<u32>,
    /// Cap on secondary shifts per month.
    pub max_secondary_per_month: Option<u32>,
}

/// Default minimum gap between primary shifts (days).
pub const DEFAULT_PRIMARY_MIN_GAP: u32 = 4;

impl Default for Preference {
    fn default() -> Self {
        Self {
            allow_primary: true,
            allow_secondary: true,
            secondary_bias: 0,
            banned_weekdays: Vec::new(),
            primary_min_gap: DEFAULT_PRIMARY_MIN_GAP,
            double_primary: 0,
            extra_rest_after_primary: 0,
            preferred_weekdays: Vec::new(),
            weekend_bias: 0,
            max_primary_per_week: None,
            max_secondary_per_week: None,
            max_primary_per_month: None,
            max_secondary_per_month: None,
        }
    }
}

impl Preference {
    /// Bans a weekday (0 = Sunday .. 6 = Saturday).
    pub fn with_banned_weekday(mut self, weekday: u8) -> Self {
        self.banned_weekdays.push(weekday);
        self
    }

    /// Marks a weekday as preferred for work.
    pub fn with_preferred_weekday(mut self, weekday: u8) -> Self {
        self.preferred_weekdays.push(weekday);
        self
    }

    /// Sets the minimum gap between primary shifts.
    pub fn with_primary_min_gap(mut self, days: u32) -> Self {
        self.primary_min_gap = days;
        self
    }

    /// Sets the shift-type bias.
    pub fn with_secondary_bias(mut self, bias: i8) -> Self {
        self.secondary_bias = bias;
        self
    }

    /// Sets the weekend bias.
    pub fn with_weekend_bias(mut self, bias: i8) -> Self {
        self.weekend_bias = bias;
        self
    }

    /// Sets the double-primary preference.
    pub fn with_double_primary(mut self, pref: i8) -> Self {
        self.double_primary = pref;
        self
    }

    /// Sets the extra-rest request.
    pub fn with_extra_rest(mut self, days: u8) -> Self {
        self.extra_rest_after_primary = days;
        self
    }

    /// Restricts which shift types are acceptable.
    pub fn with_allowed_shifts(mut self, primary: bool, secondary: bool) -> Self {
        self.allow_primary = primary;
        self.allow_secondary = secondary;
        self
    }

    /// Sets per-week shift caps.
    pub fn with_week_caps(mut self, primary: Option<u32>, secondary: Option<u32>) -> Self {
        self.max_primary_per_week = primary;
        self.max_secondary_per_week = secondary;
        self
    }

    /// Sets per-month shift caps.
    pub fn with_month_caps(mut self, primary: Option<u32>, secondary: Option<u32>) -> Self {
        self.max_primary_per_month = primary;
        self.max_secondary_per_month = secondary;
        self
    }

    /// Returns a copy with every field forced into its valid range.
    ///
    /// Tristates outside `-1..=1` become neutral, weekday lists drop
    /// unknown numbers and duplicates, the primary gap is clamped to
    /// `2..=7`, extra rest to `0..=2`, and caps to `0..=31`.
    pub fn sanitized(&self) -> Self {
        Self {
            allow_primary: self.allow_primary,
            allow_secondary: self.allow_secondary,
            secondary_bias: tristate(self.secondary_bias),
            banned_weekdays: weekday_set(&self.banned_weekdays),
            primary_min_gap: self.primary_min_gap.clamp(2, 7),
            double_primary: tristate(self.double_primary),
            extra_rest_after_primary: self.extra_rest_after_primary.min(2),
            preferred_weekdays: weekday_set(&self.preferred_weekdays),
            weekend_bias: tristate(self.weekend_bias),
            max_primary_per_week: self.max_primary_per_week.map(cap),
            max_secondary_per_week: self.max_secondary_per_week.map(cap),
            max_primary_per_month: self.max_primary_per_month.map(cap),
            max_secondary_per_month: self.max_secondary_per_month.map(cap),
        }
    }

    /// Whether the weekday is banned.
    #[inline]
    pub fn bans(&self, weekday: u8) -> bool {
        self.banned_weekdays.contains(&weekday)
    }

    /// Whether the weekday is preferred.
    #[inline]
    pub fn prefers(&self, weekday: u8) -> bool {
        self.preferred_weekdays.contains(&weekday)
    }
}

fn tristate(value: i8) -> i8 {
    if (-1..=1).contains(&value) {
        value
    } else {
        0
    }
}

fn cap(value: u32) -> u32 {
    value.min(31)
}

fn weekday_set(days: &[u8]) -> Vec<u8> {
    let mut out: Vec<u8> = days.iter().copied().filter(|&d| d <= 6).collect();
    out.sort_unstable();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preference() {
        let p = Preference::default();
        assert!(p.allow_primary);
        assert!(p.allow_secondary);
        assert_eq!(p.primary_min_gap, 4);
        assert!(p.banned_weekdays.is_empty());
    }

    #[test]
    fn test_sanitize_clamps_ranges() {
        let p = Preference {
            secondary_bias: 5,
            weekend_bias: -3,
            double_primary: 1,
            primary_min_gap: 12,
            extra_rest_after_primary: 9,
            banned_weekdays: vec![3, 9, 3, 0],
            max_primary_per_week: Some(99),
            ..Default::default()
        };

        let s = p.sanitized();
        assert_eq!(s.secondary_bias, 0);
        assert_eq!(s.weekend_bias, 0);
        assert_eq!(s.double_primary, 1);
        assert_eq!(s.primary_min_gap, 7);
        assert_eq!(s.extra_rest_after_primary, 2);
        assert_eq!(s.banned_weekdays, vec![0, 3]);
        assert_eq!(s.max_primary_per_week, Some(31));
    }

    #[test]
    fn test_sanitize_min_gap_floor() {
        let p = Preference::default().with_primary_min_gap(0);
        assert_eq!(p.sanitized().primary_min_gap, 2);
    }

    #[test]
    fn test_employee_builder() {
        let e = Employee::new("E1", 35.0)
            .with_name("Ada")
            .with_balance(-12.0)
            .with_preference(Preference::default().with_banned_weekday(2));
        assert_eq!(e.name, "Ada");
        assert!((e.hours_per_weekday() - 7.0).abs() < 1e-10);
        assert!(e.preference.bans(2));
        assert!(!e.preference.bans(3));
    }

    #[test]
    fn test_preference_json_defaults() {
        let json = r#"{ "allowPrimary": false, "bannedWeekdays": [1] }"#;
        let p: Preference = serde_json::from_str(json).unwrap();
        assert!(!p.allow_primary);
        assert!(p.allow_secondary);
        assert_eq!(p.primary_min_gap, 4);
        assert_eq!(p.banned_weekdays, vec![1]);
    }
}
