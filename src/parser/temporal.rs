//! Date, time and duration parsing
//!
//! chrono covers instants, local dates and times, and offset date-times directly.
//! The ISO-8601 shapes it has no type for (periods, year-months, month-days,
//! offset times) are modeled here as small value types.

use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^([-+]?)P(?:([-+]?[0-9]+)D)?(T(?:([-+]?[0-9]+)H)?(?:([-+]?[0-9]+)M)?(?:([-+]?[0-9]+)(?:[.,]([0-9]{0,9}))?S)?)?$",
    )
    .expect("duration pattern is valid")
});

static PERIOD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^([-+]?)P(?:([-+]?[0-9]+)Y)?(?:([-+]?[0-9]+)M)?(?:([-+]?[0-9]+)W)?(?:([-+]?[0-9]+)D)?$",
    )
    .expect("period pattern is valid")
});

static YEAR_MONTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([-+]?[0-9]{4,})-([0-9]{2})$").expect("year-month pattern is valid"));

static MONTH_DAY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^--([0-9]{2})-([0-9]{2})$").expect("month-day pattern is valid"));

/// A date-based amount of time, e.g. `P1Y2M25D`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Period {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl Period {
    pub fn new(years: i32, months: i32, days: i32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}Y{}M{}D", self.years, self.months, self.days)
    }
}

/// A calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Year(pub i32);

/// A month of a specific year, e.g. `2015-02`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }
}

/// A day of a month without a year, e.g. `--12-03`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    /// Accepts any day valid in a leap year, so `--02-29` is allowed
    pub fn new(month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(2000, month, day).map(|_| Self { month, day })
    }
}

/// A time of day with a UTC offset, e.g. `10:15:30+01:00`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetTime {
    pub time: NaiveTime,
    pub offset: FixedOffset,
}

/// Parses an ISO-8601 duration such as `P2DT3H4M` or `PT-6.5S`
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let captures = DURATION_PATTERN
        .captures(input)
        .ok_or_else(|| format!("'{input}' is not an ISO-8601 duration"))?;

    let has_days = captures.get(2).is_some();
    let time_part = captures.get(3).map(|m| m.as_str()).unwrap_or_default();
    let has_time_fields = (4..=6).any(|index| captures.get(index).is_some());
    if (!has_days && !has_time_fields) || time_part.len() == 1 {
        return Err(format!("'{input}' is not an ISO-8601 duration"));
    }

    let field = |index: usize| -> Result<i64, String> {
        captures
            .get(index)
            .map(|m| m.as_str().parse::<i64>().map_err(|e| e.to_string()))
            .transpose()
            .map(Option::unwrap_or_default)
    };

    let days = field(2)?;
    let hours = field(4)?;
    let minutes = field(5)?;
    let seconds = field(6)?;
    let nanos = match captures.get(7) {
        Some(fraction) if !fraction.as_str().is_empty() => {
            let digits = format!("{:0<9}", fraction.as_str());
            let magnitude: i64 = digits.parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
            if captures.get(6).map(|m| m.as_str().starts_with('-')).unwrap_or(false) {
                -magnitude
            } else {
                magnitude
            }
        }
        _ => 0,
    };

    let total_seconds = days
        .checked_mul(86_400)
        .and_then(|d| hours.checked_mul(3_600).and_then(|h| d.checked_add(h)))
        .and_then(|s| minutes.checked_mul(60).and_then(|m| s.checked_add(m)))
        .and_then(|s| s.checked_add(seconds))
        .ok_or_else(|| format!("duration '{input}' is out of range"))?;

    let duration = Duration::try_seconds(total_seconds)
        .and_then(|d| d.checked_add(&Duration::nanoseconds(nanos)))
        .ok_or_else(|| format!("duration '{input}' is out of range"))?;

    if captures.get(1).map(|m| m.as_str()) == Some("-") {
        Ok(-duration)
    } else {
        Ok(duration)
    }
}

/// Parses an ISO-8601 period such as `P1Y2M25D` or `P3W`
pub fn parse_period(input: &str) -> Result<Period, String> {
    let captures = PERIOD_PATTERN
        .captures(input)
        .ok_or_else(|| format!("'{input}' is not an ISO-8601 period"))?;
    if (2..=5).all(|index| captures.get(index).is_none()) {
        return Err(format!("'{input}' is not an ISO-8601 period"));
    }

    let field = |index: usize| -> Result<i32, String> {
        captures
            .get(index)
            .map(|m| m.as_str().parse::<i32>().map_err(|e| e.to_string()))
            .transpose()
            .map(Option::unwrap_or_default)
    };

    let weeks = field(4)?;
    let days = field(5)?;
    let days = weeks
        .checked_mul(7)
        .and_then(|w| w.checked_add(days))
        .ok_or_else(|| format!("period '{input}' is out of range"))?;
    let period = Period::new(field(2)?, field(3)?, days);

    if captures.get(1).map(|m| m.as_str()) != Some("-") {
        return Ok(period);
    }
    match (
        period.years.checked_neg(),
        period.months.checked_neg(),
        period.days.checked_neg(),
    ) {
        (Some(years), Some(months), Some(days)) => Ok(Period::new(years, months, days)),
        _ => Err(format!("period '{input}' is out of range")),
    }
}

/// Parses an RFC 3339 instant, normalized to UTC
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}

/// Parses `YYYY-MM-DD`
pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|e| e.to_string())
}

/// Parses `hh:mm`, `hh:mm:ss` or `hh:mm:ss.fff`
pub fn parse_time(input: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(input, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .map_err(|e| e.to_string())
}

/// Parses a local date-time with `T` separator; seconds are optional
pub fn parse_date_time(input: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"))
        .map_err(|e| e.to_string())
}

/// Parses an RFC 3339 date-time keeping its offset
pub fn parse_offset_date_time(input: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(input).map_err(|e| e.to_string())
}

/// Parses `hh:mm[:ss[.fff]]` followed by `Z` or a `±hh:mm` offset
pub fn parse_offset_time(input: &str) -> Result<OffsetTime, String> {
    let split = input
        .rfind(['+', '-', 'Z', 'z'])
        .ok_or_else(|| format!("'{input}' has no UTC offset"))?;
    let (time, offset) = input.split_at(split);
    Ok(OffsetTime {
        time: parse_time(time)?,
        offset: parse_zone_offset(offset)?,
    })
}

/// Parses a date-time with offset and region, e.g. `2007-12-03T10:15:30+01:00[Europe/Paris]`
pub fn parse_zoned_date_time(input: &str) -> Result<DateTime<Tz>, String> {
    let (date_time, zone) = input
        .strip_suffix(']')
        .and_then(|rest| rest.split_once('['))
        .ok_or_else(|| format!("'{input}' has no [Region/City] zone suffix"))?;
    let zone = parse_zone(zone)?;
    let offset_date_time = parse_offset_date_time(date_time)?;
    let zoned = offset_date_time.with_timezone(&zone);
    if zoned.offset().fix() != *offset_date_time.offset() {
        tracing::debug!(
            input,
            "Offset of zoned date-time differs from its zone rules, keeping the instant"
        );
    }
    Ok(zoned)
}

/// Parses an IANA zone name such as `Australia/Brisbane`
pub fn parse_zone(input: &str) -> Result<Tz, String> {
    input.parse::<Tz>().map_err(|e| e.to_string())
}

/// Parses `Z`, `±hh`, `±hh:mm`, `±hhmm` or `±hh:mm:ss`
pub fn parse_zone_offset(input: &str) -> Result<FixedOffset, String> {
    if input.eq_ignore_ascii_case("z") {
        return Ok(Utc.fix());
    }

    let invalid = || format!("'{input}' is not a UTC offset");
    let (sign, rest) = match input.as_bytes().first() {
        Some(b'+') => (1, &input[1..]),
        Some(b'-') => (-1, &input[1..]),
        _ => return Err(invalid()),
    };
    if !rest.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return Err(invalid());
    }

    let digits: Vec<&str> = if rest.contains(':') {
        rest.split(':').collect()
    } else {
        match rest.len() {
            1 | 2 => vec![rest],
            4 => vec![&rest[..2], &rest[2..]],
            6 => vec![&rest[..2], &rest[2..4], &rest[4..]],
            _ => return Err(invalid()),
        }
    };
    if digits.is_empty() || digits.len() > 3 || digits.iter().any(|d| d.is_empty()) {
        return Err(invalid());
    }

    let parts: Vec<i32> = digits
        .iter()
        .map(|d| d.parse::<i32>().map_err(|_| invalid()))
        .collect::<Result<_, _>>()?;
    let hours = parts[0];
    let minutes = parts.get(1).copied().unwrap_or(0);
    let seconds = parts.get(2).copied().unwrap_or(0);
    if hours > 18 || minutes > 59 || seconds > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3_600 + minutes * 60 + seconds)).ok_or_else(invalid)
}

/// Parses a year, e.g. `2015`
pub fn parse_year(input: &str) -> Result<Year, String> {
    input.parse::<i32>().map(Year).map_err(|e| e.to_string())
}

/// Parses `YYYY-MM`
pub fn parse_year_month(input: &str) -> Result<YearMonth, String> {
    let invalid = || format!("'{input}' is not a year-month");
    let captures = YEAR_MONTH_PATTERN.captures(input).ok_or_else(invalid)?;
    let year = captures[1].parse::<i32>().map_err(|_| invalid())?;
    let month = captures[2].parse::<u32>().map_err(|_| invalid())?;
    YearMonth::new(year, month).ok_or_else(invalid)
}

/// Parses `--MM-DD`
pub fn parse_month_day(input: &str) -> Result<MonthDay, String> {
    let invalid = || format!("'{input}' is not a month-day");
    let captures = MONTH_DAY_PATTERN.captures(input).ok_or_else(invalid)?;
    let month = captures[1].parse::<u32>().map_err(|_| invalid())?;
    let day = captures[2].parse::<u32>().map_err(|_| invalid())?;
    MonthDay::new(month, day).ok_or_else(invalid)
}
