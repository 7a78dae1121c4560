//! Display formats for timestamps shown in snapshots

use chrono::{DateTime, Local, SecondsFormat, TimeZone};
use chrono_tz::Tz;
use std::fmt::Display;
use std::sync::OnceLock;

/// `2024-03-01 18:04:05 EST`
const LAST_SEEN_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// `18:04:05 EST`
const CLOCK_FORMAT: &str = "%H:%M:%S %Z";

static LOCAL_ZONE: OnceLock<Tz> = OnceLock::new();

/// The host's named time zone, resolved once.
///
/// `%Z` only prints an abbreviation for a named zone; `chrono::Local`
/// renders a numeric offset instead. `TZ` wins over the system setting,
/// and UTC is used when neither names a known zone.
pub fn local_zone() -> Tz {
    *LOCAL_ZONE.get_or_init(|| {
        let from_env = std::env::var("TZ").ok().and_then(|name| parse_zone(&name));
        from_env
            .or_else(|| {
                iana_time_zone::get_timezone()
                    .ok()
                    .and_then(|name| parse_zone(&name))
            })
            .unwrap_or_else(|| {
                tracing::warn!("Cannot resolve local time zone, using UTC");
                Tz::UTC
            })
    })
}

/// Parses an IANA zone name, accepting the `:Area/City` form `TZ` allows
pub fn parse_zone(name: &str) -> Option<Tz> {
    let name = name.trim().trim_start_matches(':');
    if name.is_empty() {
        return None;
    }
    name.parse().ok()
}

/// Formats a unix timestamp in `tz`, or an empty string when out of range
pub fn format_last_seen<Z>(unix_secs: i64, tz: &Z) -> String
where
    Z: TimeZone,
    Z::Offset: Display,
{
    match DateTime::from_timestamp(unix_secs, 0) {
        Some(utc) => utc.with_timezone(tz).format(LAST_SEEN_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Wall-clock time of `at` in `tz`
pub fn format_clock<Z, Src>(at: &DateTime<Src>, tz: &Z) -> String
where
    Z: TimeZone,
    Z::Offset: Display,
    Src: TimeZone,
{
    at.with_timezone(tz).format(CLOCK_FORMAT).to_string()
}

/// Current local time as RFC 3339 with second precision
pub fn now_rfc3339() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}
