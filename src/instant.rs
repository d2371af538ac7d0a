// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Timezone-qualified instant.
//!
//! [`ZonedInstant`] is the core type of the crate.  It pairs a frame-less
//! wall-clock reading ([`NaiveDateTime`]) with the identifier of the zone
//! that reading belongs to.  The UTC projection is derived on demand
//! through the [`zones`](crate::zones) service — it is never stored, so a
//! rule lookup always sees the current database.
//!
//! The type is immutable: every operation that looks like a mutation
//! (`add_days`, `convert_to_zone`, `round_to_nearest_minute`, …) returns
//! a new instance.
//!
//! # Comparison semantics
//!
//! [`ZonedInstant::compare`] has two paths and both are part of the
//! contract:
//!
//! * identical zone id — the local readings are compared directly,
//!   without touching the timezone database;
//! * differing zone ids — both operands are projected to UTC and the
//!   absolute instants are compared.
//!
//! `PartialEq`/`PartialOrd` derive entirely from `compare`; an operand
//! whose zone cannot be resolved simply has no ordering against a
//! differently-zoned operand (`partial_cmp` is `None`).

use crate::clock;
use crate::zones::{self, TimezoneError, UTC_ZONE_ID};
use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// A wall-clock reading qualified by the timezone it was read in.
///
/// Construction stores the reading and the id verbatim (an empty id is
/// the documented default for UTC) and never touches the timezone
/// database; only operations that need offset data can fail, and they
/// fail with [`TimezoneError`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use zonetime::ZonedInstant;
///
/// let reading = NaiveDate::from_ymd_opt(2024, 7, 4)
///     .unwrap()
///     .and_hms_opt(10, 0, 0)
///     .unwrap();
/// let denver = ZonedInstant::new(reading, "America/Denver");
/// let new_york = denver.convert_to_zone("America/New_York").unwrap();
///
/// // Same absolute instant, different local reading.
/// assert_eq!(denver, new_york);
/// assert_eq!(new_york.local().time().to_string(), "12:00:00");
/// ```
#[derive(Debug, Clone)]
pub struct ZonedInstant {
    local: NaiveDateTime,
    zone_id: String,
}

impl ZonedInstant {
    // ── constructors ──────────────────────────────────────────────────

    /// Pair a wall-clock reading with the zone it was read in.
    ///
    /// An empty id selects UTC.  The id is not resolved here; an unknown
    /// id only surfaces when a zone-dependent operation runs.
    pub fn new(local: NaiveDateTime, zone_id: impl Into<String>) -> Self {
        let zone_id = zone_id.into();
        let zone_id = if zone_id.is_empty() {
            UTC_ZONE_ID.to_string()
        } else {
            zone_id
        };
        Self { local, zone_id }
    }

    /// The current instant expressed as the true local clock reading in
    /// the given zone.
    pub fn now(zone_id: &str) -> Result<Self, TimezoneError> {
        let rules = zones::resolve(zone_id)?;
        let local = zones::from_utc(clock::now_utc(), &rules);
        Ok(Self::new(local, rules.id()))
    }

    /// The current instant with the zone fixed to UTC.
    pub fn utc_now() -> Self {
        Self::new(clock::now_utc().naive_utc(), UTC_ZONE_ID)
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The wall-clock reading, valid in [`zone_id`](Self::zone_id).
    #[inline]
    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    /// Identifier of the zone the reading belongs to.
    #[inline]
    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    // ── zone projection ───────────────────────────────────────────────

    /// Project the reading onto the UTC axis using the zone's current
    /// rules for this exact local value.
    pub fn to_utc(&self) -> Result<DateTime<Utc>, TimezoneError> {
        let rules = zones::resolve(&self.zone_id)?;
        zones::to_utc(self.local, &rules)
    }

    /// Re-express this instant in another zone.
    ///
    /// The absolute instant is unchanged, only the local representation
    /// changes.  Converting to the zone the instant is already in returns
    /// the same logical value without resolving anything.
    pub fn convert_to_zone(&self, target_zone_id: &str) -> Result<Self, TimezoneError> {
        let target_id = if target_zone_id.is_empty() {
            UTC_ZONE_ID
        } else {
            target_zone_id
        };
        if target_id == self.zone_id {
            return Ok(self.clone());
        }
        let source = zones::resolve(&self.zone_id)?;
        let target = zones::resolve(target_id)?;
        let local = zones::convert(self.local, &source, &target)?;
        Ok(Self::new(local, target_id))
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Add a fractional (possibly negative) number of days to the local
    /// reading, at millisecond resolution.  Zone unchanged.
    #[inline]
    pub fn add_days(&self, amount: f64) -> Self {
        self.add(fractional(amount, MILLIS_PER_DAY))
    }

    /// Add a fractional (possibly negative) number of hours to the local
    /// reading, at millisecond resolution.  Zone unchanged.
    #[inline]
    pub fn add_hours(&self, amount: f64) -> Self {
        self.add(fractional(amount, MILLIS_PER_HOUR))
    }

    /// Add a fractional (possibly negative) number of minutes to the
    /// local reading, at millisecond resolution.  Zone unchanged.
    #[inline]
    pub fn add_minutes(&self, amount: f64) -> Self {
        self.add(fractional(amount, MILLIS_PER_MINUTE))
    }

    /// Add a duration to the local reading.  Zone unchanged.
    pub fn add(&self, duration: Duration) -> Self {
        Self {
            local: self.local + duration,
            zone_id: self.zone_id.clone(),
        }
    }

    /// Drop seconds and sub-seconds, rounding the minute up when the
    /// seconds field is 30 or more.  Zone unchanged.
    pub fn round_to_nearest_minute(&self) -> Self {
        let sub_minute = Duration::seconds(i64::from(self.local.second()))
            + Duration::nanoseconds(i64::from(self.local.nanosecond()));
        let floored = self.local - sub_minute;
        let local = if self.local.second() >= 30 {
            floored + Duration::minutes(1)
        } else {
            floored
        };
        Self {
            local,
            zone_id: self.zone_id.clone(),
        }
    }

    /// Signed UTC-projected difference `self − other`, regardless of the
    /// operands' zones.
    pub fn subtract(&self, other: &Self) -> Result<Duration, TimezoneError> {
        Ok(self.to_utc()? - other.to_utc()?)
    }

    // ── ordering ──────────────────────────────────────────────────────

    /// Total ordering between two instants.
    ///
    /// Same zone id: the local readings are compared directly and the
    /// call cannot fail.  Differing ids: both operands are projected to
    /// UTC, which requires resolving both zones.
    pub fn compare(&self, other: &Self) -> Result<Ordering, TimezoneError> {
        if self.zone_id == other.zone_id {
            Ok(self.local.cmp(&other.local))
        } else {
            Ok(self.to_utc()?.cmp(&other.to_utc()?))
        }
    }
}

/// Convert a fractional unit count to a duration at millisecond resolution.
#[inline]
fn fractional(amount: f64, millis_per_unit: f64) -> Duration {
    Duration::milliseconds((amount * millis_per_unit).round() as i64)
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

// ── Ordering operators (derived from `compare`) ───────────────────────────

impl PartialEq for ZonedInstant {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.compare(other), Ok(Ordering::Equal))
    }
}

impl PartialOrd for ZonedInstant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl fmt::Display for ZonedInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DateTime: {}, TimeZoneId: {}", self.local, self.zone_id)
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────

impl Add<Duration> for ZonedInstant {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        ZonedInstant::add(&self, rhs)
    }
}

impl Sub<Duration> for ZonedInstant {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Duration) -> Self::Output {
        ZonedInstant::add(&self, -rhs)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for ZonedInstant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("ZonedInstant", 2)?;
        s.serialize_field("local_datetime", &self.local)?;
        s.serialize_field("timezone_id", &self.zone_id)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for ZonedInstant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            local_datetime: NaiveDateTime,
            timezone_id: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(ZonedInstant::new(raw.local_datetime, raw.timezone_id))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
