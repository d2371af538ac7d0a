// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Process clock access.
//!
//! Thin wrappers over the platform clock so the rest of the crate has a
//! single place to read "now" from.

use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// Current instant on the UTC axis.
#[inline]
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Current wall-clock reading of the process-local clock.
///
/// Used only as a fallback when no explicit zone is requested; zone-aware
/// callers should go through [`crate::ZonedInstant::now`] instead.
#[inline]
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_utc_is_monotonic_enough() {
        let a = now_utc();
        let b = now_utc();
        assert!(b >= a);
    }

    #[test]
    fn now_local_is_utc_plus_whole_minute_offset() {
        // The local reading differs from UTC by a whole-minute offset;
        // allow a small slack for the time between the two clock reads.
        let local = now_local();
        let utc = now_utc().naive_utc();
        let offset_ms = (local - utc).num_milliseconds();
        let nearest_minute_ms = (offset_ms as f64 / 60_000.0).round() as i64 * 60_000;
        assert!(
            (offset_ms - nearest_minute_ms).abs() < 1_000,
            "offset was {offset_ms} ms"
        );
    }
}
