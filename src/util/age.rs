//! Human-readable ages ("5d", "3h", "now")

use chrono::{DateTime, Utc};

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60.0 * MS_PER_SECOND;
const MS_PER_HOUR: f64 = 60.0 * MS_PER_MINUTE;
const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;

/// Largest unit first; months and years use 30 and 365 days
const UNITS: [(&str, f64); 7] = [
    ("yr", 365.0 * MS_PER_DAY),
    ("mo", 30.0 * MS_PER_DAY),
    ("d", MS_PER_DAY),
    ("h", MS_PER_HOUR),
    ("m", MS_PER_MINUTE),
    ("s", MS_PER_SECOND),
    ("ms", 1.0),
];

/// Distance between two instants in its largest whole unit
///
/// The sign of the difference is ignored and the value is rounded, so 90
/// minutes reads as "2h". Equal instants read as "now".
pub fn format_age(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    if from == to {
        return "now".to_string();
    }

    let diff_ms = (to - from).num_milliseconds().unsigned_abs() as f64;
    for (suffix, size) in UNITS {
        let value = diff_ms / size;
        if value >= 1.0 {
            return format!("{}{}", value.round() as u64, suffix);
        }
    }

    "n/a".to_string()
}

/// Age of an RFC 3339 timestamp relative to `now`, "n/a" when unparsable
pub fn age_since(timestamp: Option<&str>, now: DateTime<Utc>) -> String {
    match timestamp.map(DateTime::parse_from_rfc3339) {
        Some(Ok(ts)) => format_age(ts.with_timezone(&Utc), now),
        Some(Err(e)) => {
            tracing::debug!("Unparsable timestamp {:?}: {}", timestamp, e);
            "n/a".to_string()
        }
        None => "n/a".to_string(),
    }
}
