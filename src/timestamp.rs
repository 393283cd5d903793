//! Conversion of browser-native visit timestamps into UTC instants.
//!
//! Both converters return `None` instead of failing, so a broken timestamp
//! only costs the record its visit time. Instants outside years 1..=9999
//! count as broken: they have no four-digit RFC 3339 form.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, Duration, SecondsFormat, TimeZone, Utc};

const RENDERABLE_YEARS: RangeInclusive<i32> = 1..=9999;

/// Microseconds since 1601-01-01T00:00:00 UTC (Chrome, Edge).
pub fn chrome_time_to_utc(microseconds: i64) -> Option<DateTime<Utc>> {
    let epoch = Utc.with_ymd_and_hms(1601, 1, 1, 0, 0, 0).single()?;
    epoch
        .checked_add_signed(Duration::microseconds(microseconds))
        .filter(in_range)
}

/// Microseconds since 1970-01-01T00:00:00 UTC (Firefox).
pub fn unix_micro_to_utc(microseconds: i64) -> Option<DateTime<Utc>> {
    let secs = microseconds.div_euclid(1_000_000);
    let nsecs = (microseconds.rem_euclid(1_000_000) as u32) * 1000;
    DateTime::<Utc>::from_timestamp(secs, nsecs).filter(in_range)
}

fn in_range(dt: &DateTime<Utc>) -> bool {
    RENDERABLE_YEARS.contains(&dt.year())
}

/// ISO-8601 rendering with an explicit `+00:00` offset. Sub-second parts are
/// printed as six digits, and left out entirely on whole seconds.
pub fn to_iso8601(dt: &DateTime<Utc>) -> String {
    let format = if dt.timestamp_subsec_micros() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    dt.to_rfc3339_opts(format, false)
}
