//! Calendar models: days of the month and week segments.
//!
//! A month is a sequence of [`Day`]s indexed from zero. Days are grouped
//! into [`WeekSegment`]s, one per calendar week (Monday..Sunday) clipped
//! to the month, which form the unit of weekly hour balancing.
//!
//! # Weekday numbering
//! `0 = Sunday, 1 = Monday, .., 6 = Saturday`. Weekdays are `1..=5`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar day inside the planned month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Zero-based index within the month.
    pub index: usize,
    /// Calendar date.
    pub date: NaiveDate,
    /// Weekday number (0 = Sunday .. 6 = Saturday).
    pub weekday: u8,
    /// Display label (`dd.mm.`).
    #[serde(default)]
    pub label: String,
}

impl Day {
    /// Creates a day, deriving weekday and label from the date.
    pub fn new(index: usize, date: NaiveDate) -> Self {
        Self {
            index,
            date,
            weekday: date.weekday().num_days_from_sunday() as u8,
            label: date.format("%d.%m.").to_string(),
        }
    }

    /// Whether the day falls on Saturday or Sunday.
    #[inline]
    pub fn is_weekend(&self) -> bool {
        self.weekday == 0 || self.weekday == 6
    }

    /// Whether the day falls on Monday..Friday.
    #[inline]
    pub fn is_weekday(&self) -> bool {
        !self.is_weekend()
    }

    /// Builds all days of a month.
    ///
    /// Returns an empty list for an invalid year/month.
    pub fn month_days(year: i32, month: u32) -> Vec<Day> {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return Vec::new();
        };
        first
            .iter_days()
            .take_while(|d| d.month() == month)
            .enumerate()
            .map(|(i, date)| Day::new(i, date))
            .collect()
    }
}

/// One calendar week's slice of the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSegment {
    /// Day indices in chronological order.
    pub day_indices: Vec<usize>,
    /// Number of weekdays (Mon..Fri) in the segment.
    pub weekday_count: u32,
}

impl WeekSegment {
    /// Creates a segment.
    pub fn new(day_indices: Vec<usize>, weekday_count: u32) -> Self {
        Self {
            day_indices,
            weekday_count,
        }
    }

    /// Groups days by ISO calendar week.
    ///
    /// Days must be in chronological order; a new segment starts on every
    /// change of ISO week (i.e. each Monday).
    pub fn from_days(days: &[Day]) -> Vec<WeekSegment> {
        let mut segments: Vec<WeekSegment> = Vec::new();
        let mut current_week = None;

        for day in days {
            let week = day.date.iso_week();
            if current_week != Some(week) {
                segments.push(WeekSegment::new(Vec::new(), 0));
                current_week = Some(week);
            }
            if let Some(seg) = segments.last_mut() {
                seg.day_indices.push(day.index);
                if day.is_weekday() {
                    seg.weekday_count += 1;
                }
            }
        }
        segments
    }

    /// Number of days in the segment.
    #[inline]
    pub fn len(&self) -> usize {
        self.day_indices.len()
    }

    /// Whether the segment has no days.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.day_indices.is_empty()
    }

    /// First day index, if any.
    pub fn first(&self) -> Option<usize> {
        self.day_indices.first().copied()
    }

    /// Last day index, if any.
    pub fn last(&self) -> Option<usize> {
        self.day_indices.last().copied()
    }
}
