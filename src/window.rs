//! # Time Window
//! Resolves the inclusive publication-time range a news entry must fall into.
//!
//! All civil dates are expressed in a fixed UTC−3 offset (Brasília time, no DST).
//! - `days == 1` → the whole current civil day, 00:00:00.000000 ..= 23:59:59.999999
//! - otherwise  → trailing window `[now − days, now]`

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Offset, Utc};

/// Seconds west of UTC for the civil timezone.
pub const CIVIL_OFFSET_WEST_SECS: i32 = 3 * 3600;

/// Output format of `ResultItem::date`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// The fixed civil timezone (UTC−3).
pub fn civil_tz() -> FixedOffset {
    FixedOffset::west_opt(CIVIL_OFFSET_WEST_SECS).unwrap_or_else(|| Utc.fix())
}

/// Current instant in the civil timezone.
pub fn civil_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&civil_tz())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl TimeWindow {
    /// Resolve the window for `days` relative to `now`.
    /// Bounds on `days` are the caller's job (API validates `1..=max_days`).
    pub fn resolve(days: u32, now: DateTime<FixedOffset>) -> Self {
        if days == 1 {
            let since_midnight = now.time().signed_duration_since(NaiveTime::MIN);
            let start = now - since_midnight;
            let end = start + Duration::days(1) - Duration::microseconds(1);
            return Self { start, end };
        }
        Self {
            start: now - Duration::days(i64::from(days)),
            end: now,
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, at: &DateTime<FixedOffset>) -> bool {
        *at >= self.start && *at <= self.end
    }

    /// Timezone the window bounds are expressed in.
    pub fn tz(&self) -> FixedOffset {
        *self.end.offset()
    }

    /// Convert a UTC instant into the window's civil timezone.
    pub fn localize(&self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        at.with_timezone(&self.tz())
    }
}
