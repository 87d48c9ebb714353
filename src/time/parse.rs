//! Conversions between clock strings and minute offsets.

use super::day::Day;
use super::error::TimeParseError;
use super::Minute;

/// Converts 24-hour time to 12-hour time, e.g. `"17:00"` to `"5:00PM"`.
///
/// Hours below twelve keep their original formatting (`"09:00"` becomes `"09:00AM"`).
pub fn to_12hr(time: &str) -> Result<String, TimeParseError> {
    let (hour, minute) = split_clock(time)?;
    if hour >= 24 {
        return Err(TimeParseError::InvalidClock(time.to_string()));
    }
    let out = match hour {
        0 => format!("12:{minute}AM"),
        12 => format!("{time}PM"),
        h if h < 12 => format!("{time}AM"),
        h => format!("{}:{minute}PM", h - 12),
    };
    Ok(out)
}

/// Converts 12-hour time to 24-hour time, e.g. `"5:00PM"` to `"17:00"`.
pub fn to_24hr(time: &str) -> Result<String, TimeParseError> {
    let (pre, is_pm) = strip_meridiem(time)?;
    let (hour, minute) = split_clock(pre)?;
    if hour == 0 || hour > 12 {
        return Err(TimeParseError::InvalidClock(time.to_string()));
    }
    let out = match (is_pm, hour) {
        (false, 12) => format!("00:{minute}"),
        (false, _) | (true, 12) => pre.to_string(),
        (true, h) => format!("{:02}:{minute}", h + 12),
    };
    Ok(out)
}

/// Minutes since midnight of a `"13:00"` style time.
pub fn hr24_to_minutes(time: &str) -> Result<Minute, TimeParseError> {
    let (hour, minute) = split_clock(time)?;
    let minute: u16 = minute
        .parse()
        .map_err(|_| TimeParseError::InvalidClock(time.to_string()))?;
    if hour >= 24 || minute >= 60 {
        return Err(TimeParseError::InvalidClock(time.to_string()));
    }
    Ok(hour * 60 + minute)
}

/// Minutes since midnight of a `"1:00PM"` style time.
pub fn hr12_to_minutes(time: &str) -> Result<Minute, TimeParseError> {
    hr24_to_minutes(&to_24hr(time)?)
}

/// Formats minutes since midnight as `"HH:MM"`.
pub fn minutes_to_hr24(minutes: Minute) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parses `"MoWeFr 10:00AM - 11:00AM"` into its days and its `[start, end]` block.
///
/// The compact form `"MoWeFr 10:00AM-11:00AM"` is accepted as well.
pub fn parse_time_all(time: &str) -> Result<(Vec<Day>, (Minute, Minute)), TimeParseError> {
    let tokens: Vec<&str> = time.split_whitespace().collect();
    let (days, start, end) = match tokens.as_slice() {
        [days, start, "-", end] => (*days, *start, *end),
        [days, range] => match range.split_once('-') {
            Some((start, end)) => (*days, start, end),
            None => return Err(TimeParseError::Malformed(time.to_string())),
        },
        _ => return Err(TimeParseError::Malformed(time.to_string())),
    };

    let days = Day::parse_run(days)?;
    let start = hr12_to_minutes(start)?;
    let end = hr12_to_minutes(end)?;
    if end < start {
        return Err(TimeParseError::Reversed(time.to_string()));
    }
    Ok((days, (start, end)))
}

fn strip_meridiem(time: &str) -> Result<(&str, bool), TimeParseError> {
    let trimmed = time.trim();
    if trimmed.len() < 3 || !trimmed.is_ascii() {
        return Err(TimeParseError::InvalidClock(time.to_string()));
    }
    let (pre, suffix) = trimmed.split_at(trimmed.len() - 2);
    match suffix {
        "AM" | "am" => Ok((pre, false)),
        "PM" | "pm" => Ok((pre, true)),
        _ => Err(TimeParseError::InvalidClock(time.to_string())),
    }
}

fn split_clock(time: &str) -> Result<(u16, &str), TimeParseError> {
    let (hour, minute) = time
        .split_once(':')
        .ok_or_else(|| TimeParseError::InvalidClock(time.to_string()))?;
    let hour: u16 = hour
        .trim()
        .parse()
        .map_err(|_| TimeParseError::InvalidClock(time.to_string()))?;
    if minute.len() != 2 || !minute.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeParseError::InvalidClock(time.to_string()));
    }
    Ok((hour, minute))
}
