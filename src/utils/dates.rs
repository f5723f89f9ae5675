//! UTC date arithmetic: relative ages, snapping to calendar units, breakdowns.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::strings::plural;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapUnit {
    Second,
    Minute,
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SnapOptions {
    pub days: i64,
    pub months: i32,
    /// `None` keeps the shifted instant as-is.
    pub snap: Option<SnapUnit>,
}

impl SnapOptions {
    pub fn snap(unit: SnapUnit) -> Self {
        Self {
            snap: Some(unit),
            ..Self::default()
        }
    }
}

/// Whole hours elapsed from `date` until `now` (floored).
pub fn hours_between(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - date).num_milliseconds().div_euclid(1000 * 60 * 60)
}

/// Whole hours elapsed since `date`.
pub fn hours_ago(date: DateTime<Utc>) -> i64 {
    hours_between(date, Utc::now())
}

/// Human-readable age for an hour count: `in the last hour`, `5 hours ago`, `2 days ago`.
pub fn relative_age(hours_ago: i64, with_ago: bool) -> String {
    let suffix = if with_ago { " ago" } else { "" };

    if hours_ago < 1 {
        return "in the last hour".to_string();
    }
    if hours_ago < 24 {
        return format!("{} {}{}", hours_ago, plural("hour", hours_ago), suffix);
    }

    let days_ago = hours_ago / 24;
    format!("{} {}{}", days_ago, plural("day", days_ago), suffix)
}

/// Midnight of the Sunday starting `date`'s week.
pub fn week_start(date: DateTime<Utc>) -> Result<DateTime<Utc>> {
    snap_date(date, SnapOptions::snap(SnapUnit::Week))
}

/// Absolute whole minutes between two instants (floored).
pub fn minutes_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (b - a).num_milliseconds().abs() / (1000 * 60)
}

/// Shift `date` by months then days, then truncate to the requested unit.
///
/// Month arithmetic clamps to the end of shorter months (Jan 31 + 1 month is Feb 28/29).
pub fn snap_date(date: DateTime<Utc>, options: SnapOptions) -> Result<DateTime<Utc>> {
    let shifted = shift_months(date, options.months)?
        .checked_add_signed(Duration::days(options.days))
        .ok_or_else(|| out_of_range("days", options.days))?;

    match options.snap {
        None => Ok(shifted),
        Some(unit) => snap_to(shifted, unit),
    }
}

fn shift_months(date: DateTime<Utc>, months: i32) -> Result<DateTime<Utc>> {
    let magnitude = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    };
    shifted.ok_or_else(|| out_of_range("months", months as i64))
}

fn snap_to(date: DateTime<Utc>, unit: SnapUnit) -> Result<DateTime<Utc>> {
    let day = date.date_naive();
    let time = date.time();

    let snapped: Option<NaiveDateTime> = match unit {
        SnapUnit::Second => NaiveTime::from_hms_opt(time.hour(), time.minute(), time.second())
            .map(|t| day.and_time(t)),
        SnapUnit::Minute => {
            NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).map(|t| day.and_time(t))
        }
        SnapUnit::Hour => NaiveTime::from_hms_opt(time.hour(), 0, 0).map(|t| day.and_time(t)),
        SnapUnit::Day => day.and_hms_opt(0, 0, 0),
        SnapUnit::Week => day
            .checked_sub_signed(Duration::days(day.weekday().num_days_from_sunday() as i64))
            .and_then(|d| d.and_hms_opt(0, 0, 0)),
        SnapUnit::Month => day.with_day(1).and_then(|d| d.and_hms_opt(0, 0, 0)),
        SnapUnit::Year => {
            NaiveDate::from_ymd_opt(day.year(), 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        }
    };

    snapped
        .map(|naive| naive.and_utc())
        .ok_or_else(|| Error::internal_unexpected(format!("Cannot snap {} to {:?}", date, unit)))
}

fn out_of_range(field: &str, value: i64) -> Error {
    Error::validation_invalid_argument(
        field,
        "Date shift is out of the representable range",
        Some(value.to_string()),
        None,
    )
}

/// Calendar breakdown of an instant (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateParts {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
    /// Day of month.
    pub date: u32,
    /// Day of week, 0 = Sunday.
    pub day: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
    /// Milliseconds since the Unix epoch.
    pub time: i64,
    pub iso_string: String,
}

pub fn to_parts(date: DateTime<Utc>) -> DateParts {
    DateParts {
        year: date.year(),
        month: date.month(),
        date: date.day(),
        day: date.weekday().num_days_from_sunday(),
        hours: date.hour(),
        minutes: date.minute(),
        seconds: date.second(),
        milliseconds: date.timestamp_subsec_millis(),
        time: date.timestamp_millis(),
        iso_string: date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    }
}
