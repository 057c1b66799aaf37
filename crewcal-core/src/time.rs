//! Timezone-aware resolution of the loose date/time strings found in a duty.
//!
//! Dates and times arrive as separate text fields (`yyyy-mm-dd`, `HH:mm`).
//! They are joined and parsed under one fixed format with no fallback, then
//! placed in an IANA timezone so the wall-clock hour is kept as written.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::constants::{DATETIME_FORMAT, DATETIME_FORMAT_HINT};
use crate::error::{CrewCalError, CrewCalResult};

/// Resolve a date and time in the named timezone.
pub fn resolve(date: &str, time: &str, timezone: &str) -> CrewCalResult<DateTime<Tz>> {
    let naive = parse_naive(&format!("{date} {time}"))?;
    let tz = parse_timezone(timezone)?;
    Ok(localize(naive, tz))
}

pub fn parse_timezone(name: &str) -> CrewCalResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| CrewCalError::UnknownTimezone(name.to_string()))
}

/// Parse `YYYY-MM-DD HH:mm`, requiring zero-padded fields.
pub fn parse_naive(value: &str) -> CrewCalResult<NaiveDateTime> {
    let parse_error = || CrewCalError::Parse {
        value: value.to_string(),
        expected: DATETIME_FORMAT_HINT,
    };

    // chrono accepts single-digit fields, so check the shape first
    if !has_fixed_shape(value) {
        return Err(parse_error());
    }

    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(|_| parse_error())
}

fn has_fixed_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == DATETIME_FORMAT_HINT.len()
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            10 => *b == b' ',
            13 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}

/// Place a wall-clock time in `tz`.
///
/// Ambiguous times (clocks going back) take the later instant, on the
/// post-transition offset. Times inside a DST gap are moved forward past the
/// transition.
pub fn localize(naive: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(_, latest) => latest,
        LocalResult::None => tz
            .from_local_datetime(&(naive - Duration::hours(1)))
            .earliest()
            .map(|dt| dt + Duration::hours(1))
            .unwrap_or_else(|| tz.from_utc_datetime(&naive)),
    }
}
