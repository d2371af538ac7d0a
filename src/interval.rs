// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-decomposed interval between two instants.
//!
//! [`CalendarInterval`] breaks the span between two date-time values into
//! years, months, days, hours, minutes, seconds, and milliseconds — a
//! mixed-radix decomposition where each field is the remainder after the
//! larger units have been subtracted.  Months and years have variable
//! lengths, so the decomposition cannot be read off a plain duration; it
//! is computed by calendar advance against the actual calendar:
//!
//! 1. `years` is the largest N such that advancing the earlier endpoint
//!    by N calendar years does not pass the later endpoint;
//! 2. after that advance, `months` is found the same way;
//! 3. the rest is a plain duration, split into days and sub-day fields.
//!
//! Calendar advance clamps the day-of-month to the last valid day of the
//! target month (Jan 31 + 1 month = Feb 28/29, Feb 29 + 1 year = Feb 28
//! in a non-leap year), so both searches are well-defined for every
//! start date.
//!
//! The result is always a magnitude: the endpoints are swapped as needed
//! and the operand order never affects the outcome.

use chrono::{Duration, Months, NaiveDateTime};
use std::fmt;

use crate::instant::ZonedInstant;
use crate::zones::TimezoneError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 86_400_000;
const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_SECOND: i64 = 1_000;

/// Absolute calendar-aware difference between two instants.
///
/// Each field holds the remainder after the larger units were taken out,
/// so `months` normally lands in `0..=11` (an outcome of the search, not
/// an enforced range — see the leap-day tests).  Whole weeks
/// within the `days` field are available via [`weeks`](Self::weeks) and
/// [`remainder_days`](Self::remainder_days).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use zonetime::CalendarInterval;
///
/// let a = NaiveDate::from_ymd_opt(2021, 9, 15)
///     .unwrap()
///     .and_hms_opt(12, 25, 12)
///     .unwrap();
/// let b = NaiveDate::from_ymd_opt(2024, 3, 10)
///     .unwrap()
///     .and_hms_opt(14, 30, 45)
///     .unwrap();
///
/// let interval = CalendarInterval::between(a, b);
/// assert_eq!(interval.years, 2);
/// assert_eq!(interval.months, 5);
/// assert_eq!(interval.duration_summary(), "2 years, 5 months");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarInterval {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
}

impl CalendarInterval {
    /// Compute the calendar difference between two date-time values in
    /// the same frame (both local in one zone, or both UTC).
    ///
    /// Operand order is irrelevant; equal inputs yield the all-zero
    /// interval.  Never fails for well-formed inputs.
    pub fn between(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };

        // Largest year count whose calendar advance does not overshoot.
        // Each probe advances from the original start so that a clamped
        // day-of-month (Feb 29) can resurface in a later leap year.
        let mut years: u32 = 0;
        let mut anchor = start;
        loop {
            match start.checked_add_months(Months::new((years + 1) * 12)) {
                Some(next) if next <= end => {
                    years += 1;
                    anchor = next;
                }
                _ => break,
            }
        }

        // Same search for months, advancing from the year-advanced point.
        let mut months: u32 = 0;
        let mut base = anchor;
        loop {
            match anchor.checked_add_months(Months::new(months + 1)) {
                Some(next) if next <= end => {
                    months += 1;
                    base = next;
                }
                _ => break,
            }
        }

        // The rest is a plain duration; split it into days and sub-day
        // fields (sub-millisecond precision is dropped).
        let rest_ms = (end - base).num_milliseconds();
        let days = rest_ms / MILLIS_PER_DAY;
        let mut rem = rest_ms % MILLIS_PER_DAY;
        let hours = rem / MILLIS_PER_HOUR;
        rem %= MILLIS_PER_HOUR;
        let minutes = rem / MILLIS_PER_MINUTE;
        rem %= MILLIS_PER_MINUTE;
        let seconds = rem / MILLIS_PER_SECOND;
        let milliseconds = rem % MILLIS_PER_SECOND;

        Self {
            years,
            months,
            days: days as u32,
            hours: hours as u32,
            minutes: minutes as u32,
            seconds: seconds as u32,
            milliseconds: milliseconds as u32,
        }
    }

    /// Calendar difference between two zoned instants, taken on the UTC
    /// axis so the operands' zones do not have to match.
    pub fn between_instants(a: &ZonedInstant, b: &ZonedInstant) -> Result<Self, TimezoneError> {
        Ok(Self::between(a.to_utc()?.naive_utc(), b.to_utc()?.naive_utc()))
    }

    /// Whole weeks within the `days` field.
    #[inline]
    pub fn weeks(&self) -> u32 {
        self.days / 7
    }

    /// Days left in the `days` field after the whole weeks are removed.
    #[inline]
    pub fn remainder_days(&self) -> u32 {
        self.days % 7
    }

    /// True when every field is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// The machine duration covered by the sub-month fields alone
    /// (days/hours/minutes/seconds/milliseconds); years and months have
    /// no fixed length and are not included.
    pub fn sub_month_duration(&self) -> Duration {
        Duration::milliseconds(
            i64::from(self.days) * MILLIS_PER_DAY
                + i64::from(self.hours) * MILLIS_PER_HOUR
                + i64::from(self.minutes) * MILLIS_PER_MINUTE
                + i64::from(self.seconds) * MILLIS_PER_SECOND
                + i64::from(self.milliseconds),
        )
    }

    /// Human-readable summary of the two most significant non-zero
    /// units, with pluralization.
    ///
    /// Years pair with months; months pair with weeks when the interval
    /// holds at least one whole week, otherwise with days; days pair
    /// with hours, hours with minutes, minutes with seconds; a sub-minute
    /// interval reports seconds alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use zonetime::CalendarInterval;
    ///
    /// let a = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let b = NaiveDate::from_ymd_opt(2024, 9, 15).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// assert_eq!(CalendarInterval::between(a, b).duration_summary(), "6 months, 0 days");
    /// ```
    pub fn duration_summary(&self) -> String {
        if self.years > 0 {
            format!("{}, {}", unit(self.years, "year"), unit(self.months, "month"))
        } else if self.months > 0 {
            if self.weeks() > 0 {
                format!("{}, {}", unit(self.months, "month"), unit(self.weeks(), "week"))
            } else {
                format!("{}, {}", unit(self.months, "month"), unit(self.days, "day"))
            }
        } else if self.days > 0 {
            format!("{}, {}", unit(self.days, "day"), unit(self.hours, "hour"))
        } else if self.hours > 0 {
            format!("{}, {}", unit(self.hours, "hour"), unit(self.minutes, "minute"))
        } else if self.minutes > 0 {
            format!(
                "{}, {}",
                unit(self.minutes, "minute"),
                unit(self.seconds, "second")
            )
        } else {
            unit(self.seconds, "second")
        }
    }
}

/// `"1 year"` / `"2 years"` style counted unit.
fn unit(count: u32, name: &str) -> String {
    if count == 1 {
        format!("1 {name}")
    } else {
        format!("{count} {name}s")
    }
}

impl fmt::Display for CalendarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.duration_summary())
    }
}
