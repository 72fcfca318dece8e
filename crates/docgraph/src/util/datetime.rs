//! Timestamp parsing and formatting.
//!
//! The ledger renders timestamps as `YYYY-MM-DDTHH:MM:SS.mmm` in UTC with no
//! zone designator. Parsing also accepts a trailing `Z` or `±HH:MM` offset, a
//! space separator and any number of fractional digits (truncated to
//! microseconds). Internally timestamps are microseconds since the Unix epoch.

const MICROSECONDS_PER_SECOND: i64 = 1_000_000;
const MICROSECONDS_PER_MINUTE: i64 = 60 * MICROSECONDS_PER_SECOND;
const MICROSECONDS_PER_HOUR: i64 = 60 * MICROSECONDS_PER_MINUTE;
const MICROSECONDS_PER_DAY: i64 = 24 * MICROSECONDS_PER_HOUR;

/// Error type for timestamp parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeParseError {
    pub message: String,
}

impl std::fmt::Display for DateTimeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DateTimeParseError {}

fn invalid(what: &str, input: &str) -> DateTimeParseError {
    DateTimeParseError {
        message: format!("{what}: {input}"),
    }
}

/// Parses a timezone offset (`Z`, `+HH:MM`, `-HH:MM`) into minutes.
fn parse_timezone_offset(offset: &str) -> Result<i64, DateTimeParseError> {
    if offset == "Z" || offset == "z" {
        return Ok(0);
    }
    if offset.len() != 6 || offset.as_bytes()[3] != b':' {
        return Err(invalid("Invalid timezone offset", offset));
    }

    let sign = match offset.as_bytes()[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return Err(invalid("Invalid timezone offset", offset)),
    };
    let hours: i64 = offset[1..3].parse().map_err(|_| invalid("Invalid timezone offset", offset))?;
    let minutes: i64 = offset[4..6].parse().map_err(|_| invalid("Invalid timezone offset", offset))?;
    if hours > 24 || (hours == 24 && minutes != 0) || minutes > 59 {
        return Err(invalid("Timezone offset out of range [-24:00, +24:00]", offset));
    }

    Ok(sign * (hours * 60 + minutes))
}

/// Converts fractional-second digits to microseconds, truncating past six digits.
fn parse_fractional_seconds(frac: &str) -> i64 {
    frac.bytes()
        .chain(std::iter::repeat(b'0'))
        .take(6)
        .fold(0, |acc, c| acc * 10 + (c - b'0') as i64)
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Number of days in a month (1-indexed).
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days since the Unix epoch for a civil date (Howard Hinnant's algorithm).
fn date_to_days(year: i32, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year } as i64;
    let m = if month <= 2 { month as i64 + 9 } else { month as i64 - 3 };

    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let doy = (153 * m + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;

    era * 146097 + doe - 719468
}

/// Inverse of [`date_to_days`].
fn days_to_date(days: i64) -> (i64, u32, u32) {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;

    (if m <= 2 { y + 1 } else { y }, m, d)
}

fn parse_field<T: std::str::FromStr>(s: &str, what: &str, input: &str) -> Result<T, DateTimeParseError> {
    if !s.bytes().all(|c| c.is_ascii_digit()) {
        return Err(invalid(what, input));
    }
    s.parse().map_err(|_| invalid(what, input))
}

/// Parses a timestamp and returns microseconds since the Unix epoch (UTC).
pub fn parse_timestamp(input: &str) -> Result<i64, DateTimeParseError> {
    // YYYY-MM-DDTHH:MM:SS is the minimum
    if input.len() < 19 || !input.is_ascii() {
        return Err(invalid("Invalid timestamp", input));
    }
    let b = input.as_bytes();
    if b[4] != b'-' || b[7] != b'-' || (b[10] != b'T' && b[10] != b' ') || b[13] != b':' || b[16] != b':' {
        return Err(invalid("Invalid timestamp", input));
    }

    let year: i32 = parse_field(&input[..4], "Invalid year in timestamp", input)?;
    let month: u32 = parse_field(&input[5..7], "Invalid month in timestamp", input)?;
    let day: u32 = parse_field(&input[8..10], "Invalid day in timestamp", input)?;
    let hours: i64 = parse_field(&input[11..13], "Invalid hours in timestamp", input)?;
    let minutes: i64 = parse_field(&input[14..16], "Invalid minutes in timestamp", input)?;
    let seconds: i64 = parse_field(&input[17..19], "Invalid seconds in timestamp", input)?;

    if !(1..=12).contains(&month) {
        return Err(invalid("Invalid month in timestamp", input));
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(invalid("Invalid day in timestamp", input));
    }
    if hours > 23 {
        return Err(invalid("Invalid hours in timestamp", input));
    }
    if minutes > 59 {
        return Err(invalid("Invalid minutes in timestamp", input));
    }
    if seconds > 59 {
        return Err(invalid("Invalid seconds in timestamp", input));
    }

    let rest = &input[19..];
    let (fraction, offset) = match rest.strip_prefix('.') {
        Some(after_dot) => {
            let end = after_dot
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_dot.len());
            if end == 0 {
                return Err(invalid("Invalid fractional seconds in timestamp", input));
            }
            (&after_dot[..end], &after_dot[end..])
        }
        None => ("", rest),
    };
    let offset_min = if offset.is_empty() { 0 } else { parse_timezone_offset(offset)? };

    let local = date_to_days(year, month, day) * MICROSECONDS_PER_DAY
        + hours * MICROSECONDS_PER_HOUR
        + minutes * MICROSECONDS_PER_MINUTE
        + seconds * MICROSECONDS_PER_SECOND
        + parse_fractional_seconds(fraction);

    // local = UTC + offset
    Ok(local - offset_min * MICROSECONDS_PER_MINUTE)
}

/// Formats microseconds since the Unix epoch as `YYYY-MM-DDTHH:MM:SS.mmm`.
///
/// Sub-millisecond precision is dropped.
pub fn format_timestamp(epoch_micros: i64) -> String {
    let days = epoch_micros.div_euclid(MICROSECONDS_PER_DAY);
    let time_micros = epoch_micros.rem_euclid(MICROSECONDS_PER_DAY);
    let (year, month, day) = days_to_date(days);

    let hours = time_micros / MICROSECONDS_PER_HOUR;
    let minutes = time_micros % MICROSECONDS_PER_HOUR / MICROSECONDS_PER_MINUTE;
    let seconds = time_micros % MICROSECONDS_PER_MINUTE / MICROSECONDS_PER_SECOND;
    let millis = time_micros % MICROSECONDS_PER_SECOND / 1000;

    format!("{year:04}-{month:02}-{day:02}T{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}
