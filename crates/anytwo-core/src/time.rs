//! Time-of-day instants and closed intervals.
//!
//! Coding sheets only carry a wall-clock time, so instants are stored as
//! whole seconds since midnight. Widening an interval by the tolerance
//! window floors the start at `00:00:00` but lets the end run past
//! `24:00:00`, the way a date-carrying timestamp would roll into the next day.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};

use crate::types::CoreError;

/// Seconds in one day.
pub const SECONDS_PER_DAY: u32 = 86_400;

/// An instant measured in seconds since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Midnight at the start of the day.
    pub const MIDNIGHT: Self = Self(0);

    /// Creates an instant from seconds since midnight.
    #[must_use]
    pub const fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    /// Creates an instant from wall-clock components, or `None` on overflow.
    #[must_use]
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Option<Self> {
        hours
            .checked_mul(3600)?
            .checked_add(minutes.checked_mul(60)?)?
            .checked_add(seconds)
            .map(Self)
    }

    /// Seconds since midnight.
    #[must_use]
    pub const fn seconds(self) -> u32 {
        self.0
    }

    /// Parses an `HH:MM:SS` field.
    ///
    /// Shorter fields are padded with leading `00:` segments, so `"30"` is
    /// `00:00:30` and `"5:30"` is `00:05:30`.
    pub fn parse(field: &str) -> Result<Self, CoreError> {
        let malformed = || CoreError::MalformedTime {
            value: field.to_string(),
        };

        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Err(malformed());
        }

        let segments = trimmed.split(':').count();
        if segments > 3 {
            return Err(malformed());
        }
        let padded = format!("{}{trimmed}", "00:".repeat(3 - segments));

        let time = NaiveTime::parse_from_str(&padded, "%H:%M:%S").map_err(|_| malformed())?;
        // chrono reads a seconds field of 60 as a leap second
        if time.nanosecond() >= 1_000_000_000 {
            return Err(malformed());
        }
        Ok(Self(time.num_seconds_from_midnight()))
    }

    /// Moves the instant back, stopping at midnight.
    #[must_use]
    pub const fn saturating_sub(self, seconds: u32) -> Self {
        Self(self.0.saturating_sub(seconds))
    }

    /// Moves the instant forward with no upper bound at the end of the day.
    #[must_use]
    pub const fn saturating_add(self, seconds: u32) -> Self {
        Self(self.0.saturating_add(seconds))
    }

    /// Whether the instant lies past the end of its day.
    #[must_use]
    pub const fn is_next_day(self) -> bool {
        self.0 >= SECONDS_PER_DAY
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A closed range of instants, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Interval {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl Interval {
    /// Creates an interval, rejecting an end before the start.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, CoreError> {
        if end < start {
            return Err(CoreError::EndBeforeStart {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates the tolerance window around a raw `[start, end]` range.
    ///
    /// The start moves back by `threshold_secs` but never before midnight;
    /// the end moves forward by `threshold_secs` and may pass midnight.
    /// A raw end before the start is accepted as long as the widened window
    /// is not inverted.
    pub fn widened(
        start: TimeOfDay,
        end: TimeOfDay,
        threshold_secs: u32,
    ) -> Result<Self, CoreError> {
        let window = Self {
            start: start.saturating_sub(threshold_secs),
            end: end.saturating_add(threshold_secs),
        };
        if window.end < window.start {
            return Err(CoreError::EndBeforeStart {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(window)
    }

    #[must_use]
    pub const fn start(&self) -> TimeOfDay {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Inclusive containment on both ends.
    #[must_use]
    pub fn contains(&self, instant: TimeOfDay) -> bool {
        self.start <= instant && instant <= self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_full_time() {
        assert_eq!(
            TimeOfDay::parse("10:00:02").unwrap(),
            TimeOfDay::from_hms(10, 0, 2).unwrap()
        );
    }

    #[test]
    fn pads_short_fields() {
        assert_eq!(TimeOfDay::parse("30").unwrap(), TimeOfDay::from_seconds(30));
        assert_eq!(
            TimeOfDay::parse("5:30").unwrap(),
            TimeOfDay::from_hms(0, 5, 30).unwrap()
        );
        assert_eq!(
            TimeOfDay::parse(" 01:02 ").unwrap(),
            TimeOfDay::from_hms(0, 1, 2).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_fields() {
        let fields = [
            "", "  ", "aa:bb:cc", "1:2:3:4", "10:61:00", "10:00:60", "10:00:00.5", "25:00:00",
        ];
        for field in fields {
            let err = TimeOfDay::parse(field).unwrap_err();
            assert_eq!(
                err,
                CoreError::MalformedTime {
                    value: field.to_string()
                },
                "expected {field:?} to be malformed"
            );
        }
    }

    #[test]
    fn display_runs_past_midnight() {
        assert_eq!(TimeOfDay::from_hms(9, 59, 56).unwrap().to_string(), "09:59:56");
        let late = TimeOfDay::from_hms(23, 59, 58).unwrap().saturating_add(4);
        assert_eq!(late.to_string(), "24:00:02");
        assert!(late.is_next_day());
    }

    #[test]
    fn widened_applies_threshold_both_ways() {
        let ten = TimeOfDay::from_hms(10, 0, 0).unwrap();
        let interval = Interval::widened(ten, ten, 4).unwrap();
        assert_eq!(interval.start(), TimeOfDay::from_hms(9, 59, 56).unwrap());
        assert_eq!(interval.end(), TimeOfDay::from_hms(10, 0, 4).unwrap());
    }

    #[test]
    fn widened_floors_start_at_midnight() {
        let early = TimeOfDay::from_seconds(2);
        let interval = Interval::widened(early, early, 4).unwrap();
        assert_eq!(interval.start(), TimeOfDay::MIDNIGHT);
        assert_eq!(interval.end(), TimeOfDay::from_seconds(6));
    }

    #[test]
    fn rejects_end_before_start() {
        let err = Interval::new(TimeOfDay::from_seconds(10), TimeOfDay::from_seconds(5));
        assert!(matches!(err, Err(CoreError::EndBeforeStart { .. })));
    }

    #[test]
    fn widened_accepts_inversion_within_threshold() {
        let start = TimeOfDay::from_seconds(100);
        let end = TimeOfDay::from_seconds(97);
        let interval = Interval::widened(start, end, 4).unwrap();
        assert_eq!(interval.start(), TimeOfDay::from_seconds(96));
        assert_eq!(interval.end(), TimeOfDay::from_seconds(101));

        let err = Interval::widened(start, TimeOfDay::from_seconds(90), 4);
        assert!(matches!(err, Err(CoreError::EndBeforeStart { .. })));
    }

    #[test]
    fn from_hms_rejects_overflow() {
        assert_eq!(TimeOfDay::from_hms(1, 1, 1), Some(TimeOfDay::from_seconds(3661)));
        assert_eq!(TimeOfDay::from_hms(u32::MAX, 0, 0), None);
        assert_eq!(TimeOfDay::from_hms(0, u32::MAX, 0), None);
        assert_eq!(TimeOfDay::from_hms(0, 0, u32::MAX), Some(TimeOfDay::from_seconds(u32::MAX)));
        assert_eq!(TimeOfDay::from_hms(0, 1, u32::MAX), None);
    }

    #[test]
    fn contains_is_inclusive() {
        let interval =
            Interval::new(TimeOfDay::from_seconds(10), TimeOfDay::from_seconds(20)).unwrap();
        assert!(interval.contains(TimeOfDay::from_seconds(10)));
        assert!(interval.contains(TimeOfDay::from_seconds(15)));
        assert!(interval.contains(TimeOfDay::from_seconds(20)));
        assert!(!interval.contains(TimeOfDay::from_seconds(9)));
        assert!(!interval.contains(TimeOfDay::from_seconds(21)));
    }

    proptest! {
        /// Property: widening never moves the start before midnight.
        #[test]
        fn prop_widened_start_never_negative(
            start in 0u32..SECONDS_PER_DAY,
            length in 0u32..3600,
            threshold in 0u32..100_000,
        ) {
            let start = TimeOfDay::from_seconds(start);
            let end = start.saturating_add(length);
            let interval = Interval::widened(start, end, threshold).unwrap();
            prop_assert!(interval.start() >= TimeOfDay::MIDNIGHT);
            prop_assert!(interval.start() <= start);
            prop_assert!(interval.start() <= interval.end());
            prop_assert_eq!(interval.end().seconds(), end.seconds() + threshold);
        }
    }
}
