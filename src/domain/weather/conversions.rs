use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Timelike, Utc};

/// Placeholder shown wherever a clock time is missing or malformed.
pub const MISSING_TIME: &str = "--";

/// Placeholder day label for a missing or malformed date.
pub const MISSING_DAY: &str = "Day";

/// Short weekday (`Mon`) for a provider `YYYY-MM-DD` date.
#[must_use]
pub fn format_day_label(date: Option<&str>) -> String {
    date.and_then(parse_date)
        .map_or_else(|| MISSING_DAY.to_string(), |d| d.format("%a").to_string())
}

/// 12-hour clock rendering of a provider local timestamp such as
/// `2024-01-01T18:05` or `2024-01-01T18:05:00`.
///
/// Only the text after the `T` is inspected, so the clock is rendered in the
/// location's own time zone exactly as the provider reported it.
#[must_use]
pub fn format_local_time(value: Option<&str>) -> String {
    value
        .and_then(twelve_hour_clock)
        .unwrap_or_else(|| MISSING_TIME.to_string())
}

fn twelve_hour_clock(value: &str) -> Option<String> {
    let (_, time) = value.split_once('T')?;
    let mut parts = time.split(':');
    let hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute = parts.next().unwrap_or("00");
    let meridiem = if hour % 24 >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    Some(format!("{display_hour}:{minute} {meridiem}"))
}

/// Wall-clock `h:mm AM` for an instant seen from a fixed UTC offset.
#[must_use]
pub fn format_clock_at_offset(instant: DateTime<Utc>, utc_offset_seconds: i32) -> String {
    let offset = FixedOffset::east_opt(utc_offset_seconds).unwrap_or(Utc.fix());
    let local = instant.with_timezone(&offset);
    let (is_pm, hour) = local.hour12();
    let meridiem = if is_pm { "PM" } else { "AM" };
    format!("{hour}:{:02} {meridiem}", local.minute())
}

#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Nearest whole degree; halves round up, so `-2.5` becomes `-2`.
#[must_use]
pub fn round_temp(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
