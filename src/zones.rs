// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Timezone rule resolution and local↔UTC conversion.
//!
//! This module is the boundary to the platform timezone database
//! (IANA tzdata via `chrono-tz`).  Everything else in the crate treats
//! it as an opaque lookup-by-id service:
//!
//! 1. [`resolve`] maps a timezone identifier to its [`TimezoneRules`],
//!    caching the result process-wide.
//! 2. [`to_utc`] / [`from_utc`] project a wall-clock reading onto the
//!    UTC axis and back using those rules.
//! 3. [`convert`] re-expresses a wall-clock reading in another zone,
//!    preserving the absolute instant.
//!
//! # Resolution policy
//!
//! | Input | Result |
//! |-------|--------|
//! | Empty id | The UTC rules ([`UTC_ZONE_ID`]) |
//! | Unknown id | [`TimezoneError::TimezoneNotFound`] |
//! | Ambiguous local time (clocks fall back) | Earlier of the two offsets |
//! | Non-existent local time (clocks spring forward) | [`TimezoneError::InvalidLocalTime`] |

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};
use thiserror::Error;

/// Canonical identifier of the UTC zone.
pub const UTC_ZONE_ID: &str = "UTC";

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Failures reported by timezone-dependent operations.
///
/// Resolution failures are not transient; callers get no retry and no
/// silent fallback (the empty-id→UTC default is applied before lookup,
/// so it never reaches this error path).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimezoneError {
    /// The timezone database does not know the given identifier.
    #[error("unknown timezone id: {0}")]
    TimezoneNotFound(String),
    /// The wall-clock reading falls inside a DST spring-forward gap and
    /// does not exist in the given zone.
    #[error("local time {local} does not exist in timezone {zone_id}")]
    InvalidLocalTime {
        local: NaiveDateTime,
        zone_id: String,
    },
}

// ---------------------------------------------------------------------------
// TimezoneRules
// ---------------------------------------------------------------------------

/// Resolved offset/DST schedule for a single timezone identifier.
///
/// A cheap `Copy` handle over the backing tzdata entry.  Obtained via
/// [`resolve`]; rules never change within a process once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneRules {
    tz: Tz,
}

impl TimezoneRules {
    /// Canonical identifier of the zone these rules describe.
    #[inline]
    pub fn id(&self) -> &'static str {
        self.tz.name()
    }
}

// ---------------------------------------------------------------------------
// Process-wide rules cache
// ---------------------------------------------------------------------------

// Populated lazily, one entry per id, never invalidated.  Concurrent
// readers share the lock; a duplicate insert is idempotent.
static RULES_CACHE: OnceLock<RwLock<HashMap<String, TimezoneRules>>> = OnceLock::new();

fn rules_cache() -> &'static RwLock<HashMap<String, TimezoneRules>> {
    RULES_CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Resolve a timezone identifier to its rules.
///
/// An empty identifier is the documented default for UTC.  Unknown
/// identifiers fail with [`TimezoneError::TimezoneNotFound`].
///
/// # Examples
///
/// ```
/// use zonetime::zones;
///
/// let denver = zones::resolve("America/Denver").unwrap();
/// assert_eq!(denver.id(), "America/Denver");
///
/// let utc = zones::resolve("").unwrap();
/// assert_eq!(utc.id(), zones::UTC_ZONE_ID);
///
/// assert!(zones::resolve("Atlantis/Lost").is_err());
/// ```
pub fn resolve(zone_id: &str) -> Result<TimezoneRules, TimezoneError> {
    let key = if zone_id.is_empty() { UTC_ZONE_ID } else { zone_id };

    if let Some(rules) = rules_cache()
        .read()
        .expect("timezone rules cache poisoned")
        .get(key)
    {
        return Ok(*rules);
    }

    let tz: Tz = key
        .parse()
        .map_err(|_| TimezoneError::TimezoneNotFound(key.to_string()))?;
    let rules = TimezoneRules { tz };

    rules_cache()
        .write()
        .expect("timezone rules cache poisoned")
        .entry(key.to_string())
        .or_insert(rules);

    Ok(rules)
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Project a wall-clock reading in the zone described by `rules` onto the
/// UTC axis.
///
/// DST transitions follow the module resolution policy: ambiguous
/// readings take the earlier offset, readings inside a spring-forward gap
/// are rejected.
pub fn to_utc(local: NaiveDateTime, rules: &TimezoneRules) -> Result<DateTime<Utc>, TimezoneError> {
    match rules.tz.from_local_datetime(&local) {
        LocalResult::Single(datetime) => Ok(datetime.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(TimezoneError::InvalidLocalTime {
            local,
            zone_id: rules.id().to_string(),
        }),
    }
}

/// Express an absolute UTC instant as a wall-clock reading in the zone
/// described by `rules`.  Every instant has exactly one local reading, so
/// this direction never fails.
#[inline]
pub fn from_utc(instant: DateTime<Utc>, rules: &TimezoneRules) -> NaiveDateTime {
    instant.with_timezone(&rules.tz).naive_local()
}

/// Re-express a wall-clock reading from `source` rules in `target` rules.
///
/// Routes through the UTC axis, so the absolute instant is preserved and
/// only its local representation changes.
#[inline]
pub fn convert(
    local: NaiveDateTime,
    source: &TimezoneRules,
    target: &TimezoneRules,
) -> Result<NaiveDateTime, TimezoneError> {
    Ok(from_utc(to_utc(local, source)?, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn resolve_known_id() {
        let rules = resolve("America/New_York").unwrap();
        assert_eq!(rules.id(), "America/New_York");
    }

    #[test]
    fn resolve_empty_id_defaults_to_utc() {
        let rules = resolve("").unwrap();
        assert_eq!(rules.id(), UTC_ZONE_ID);
    }

    #[test]
    fn resolve_unknown_id_fails() {
        let err = resolve("Not/AZone").unwrap_err();
        assert_eq!(err, TimezoneError::TimezoneNotFound("Not/AZone".into()));
    }

    #[test]
    fn resolve_is_cached_and_idempotent() {
        let first = resolve("Europe/Madrid").unwrap();
        let second = resolve("Europe/Madrid").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn to_utc_applies_standard_offset() {
        let rules = resolve("America/Denver").unwrap();
        // January: MST, UTC-7.
        let utc = to_utc(local(2024, 1, 15, 12, 0, 0), &rules).unwrap();
        assert_eq!(utc.naive_utc(), local(2024, 1, 15, 19, 0, 0));
    }

    #[test]
    fn to_utc_applies_dst_offset() {
        let rules = resolve("America/Denver").unwrap();
        // July: MDT, UTC-6.
        let utc = to_utc(local(2024, 7, 15, 12, 0, 0), &rules).unwrap();
        assert_eq!(utc.naive_utc(), local(2024, 7, 15, 18, 0, 0));
    }

    #[test]
    fn to_utc_rejects_spring_forward_gap() {
        let rules = resolve("America/New_York").unwrap();
        // 2024-03-10 02:00–03:00 does not exist in this zone.
        let err = to_utc(local(2024, 3, 10, 2, 30, 0), &rules).unwrap_err();
        assert!(matches!(err, TimezoneError::InvalidLocalTime { .. }));
    }

    #[test]
    fn to_utc_ambiguous_takes_earlier_offset() {
        let rules = resolve("America/New_York").unwrap();
        // 2024-11-03 01:30 occurs twice; the earlier occurrence is EDT (UTC-4).
        let utc = to_utc(local(2024, 11, 3, 1, 30, 0), &rules).unwrap();
        assert_eq!(utc.naive_utc(), local(2024, 11, 3, 5, 30, 0));
    }

    #[test]
    fn from_utc_roundtrip() {
        let rules = resolve("Europe/Madrid").unwrap();
        let reading = local(2024, 5, 1, 9, 30, 0);
        let utc = to_utc(reading, &rules).unwrap();
        assert_eq!(from_utc(utc, &rules), reading);
    }

    #[test]
    fn convert_preserves_absolute_instant() {
        let denver = resolve("America/Denver").unwrap();
        let new_york = resolve("America/New_York").unwrap();
        // July: MDT (UTC-6) → EDT (UTC-4), a two-hour spread.
        let converted = convert(local(2024, 7, 4, 10, 0, 0), &denver, &new_york).unwrap();
        assert_eq!(converted, local(2024, 7, 4, 12, 0, 0));
    }
}
