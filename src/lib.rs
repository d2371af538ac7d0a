// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-aware date/time value types.
//!
//! This crate provides timezone-qualified instants, calendar-decomposed
//! intervals, and the conversions between an absolute UTC instant and a
//! wall-clock reading in a named timezone.
//!
//! # Core types
//!
//! - [`ZonedInstant`] — an immutable pairing of a wall-clock reading with
//!   a timezone identifier; UTC projection, zone conversion, arithmetic,
//!   minute rounding, and a total ordering over the UTC axis.
//! - [`CalendarInterval`] — the signed-magnitude breakdown of the span
//!   between two instants into years/months/days/hours/minutes/seconds/
//!   milliseconds, with a human-readable two-unit summary.
//! - [`TimezoneRules`] — resolved offset/DST schedule for one timezone
//!   identifier, obtained through [`zones::resolve`].
//! - [`TimezoneError`] — failures raised by zone-dependent operations.
//!
//! # Services
//!
//! | Module | Role |
//! |--------|------|
//! | [`zones`] | Timezone database boundary: id resolution (cached process-wide), local↔UTC projection, zone-to-zone conversion |
//! | [`clock`] | Platform clock access: `now_utc` / `now_local` |
//!
//! # Comparison semantics
//!
//! Instants sharing a timezone id compare by their local readings;
//! instants in different zones compare by their UTC projections.  Two
//! instants are equal exactly when that comparison lands on
//! `Ordering::Equal`, so a reading and its [`ZonedInstant::convert_to_zone`]
//! image always compare equal.
//!
//! ```
//! use chrono::NaiveDate;
//! use zonetime::{CalendarInterval, ZonedInstant};
//!
//! let reading = NaiveDate::from_ymd_opt(2024, 7, 4)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//! let denver = ZonedInstant::new(reading, "America/Denver");
//! let eastern = denver.convert_to_zone("America/New_York")?;
//! assert_eq!(denver, eastern);
//!
//! let elapsed = CalendarInterval::between_instants(&denver, &ZonedInstant::utc_now())?;
//! println!("{}", elapsed.duration_summary());
//! # Ok::<(), zonetime::TimezoneError>(())
//! ```

pub mod clock;
pub(crate) mod instant;
pub(crate) mod interval;
pub mod zones;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use instant::ZonedInstant;
pub use interval::CalendarInterval;
pub use zones::{TimezoneError, TimezoneRules, UTC_ZONE_ID};
