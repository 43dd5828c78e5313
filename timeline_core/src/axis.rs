//! # Month Axis
//!
//! Builds the [`DisplayWindow`]: the contiguous run of calendar months a
//! timeline is drawn against. Month 0 sits at the left edge (0%) and the
//! right edge (100%) is the end of the last month.
//!
//! ## Example
//!
//! ```rust
//! use timeline_core::axis::{build_month_axis, YearMonth};
//! use timeline_core::labels::DefaultLabels;
//!
//! let start = YearMonth::new(2024, 9).unwrap();
//! let end = YearMonth::new(2025, 6).unwrap();
//! let window = build_month_axis(start, end, &DefaultLabels).unwrap();
//!
//! assert_eq!(window.len(), 10);
//! assert_eq!(window.months()[0].short_label, "Sep");
//! assert_eq!(window.months()[9].short_label, "Jun");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{TimelineError, TimelineResult};
use crate::labels::{month_key, LabelResolver};
use crate::layout::BarLayout;

/// Earliest year accepted on an axis
pub const MIN_YEAR: i32 = 1;
/// Latest year accepted on an axis
pub const MAX_YEAR: i32 = 9999;

/// A calendar month identified by year and 1-based month number.
///
/// Serializes as a `"YYYY-MM"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a validated year-month.
    ///
    /// Fails with `InvalidInput` when the month is outside 1..=12 or the year
    /// is outside [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn new(year: i32, month: u32) -> TimelineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(TimelineError::invalid_input(
                "month",
                month.to_string(),
                "Month must be between 1 and 12",
            ));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(TimelineError::invalid_input(
                "year",
                year.to_string(),
                format!("Year must be between {} and {}", MIN_YEAR, MAX_YEAR),
            ));
        }
        Ok(YearMonth { year, month })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> TimelineResult<Self> {
        YearMonth::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Advance by `n` months
    pub fn plus_months(&self, n: u32) -> TimelineResult<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month - 1) + i64::from(n);
        let year = i32::try_from(index.div_euclid(12)).map_err(|_| {
            TimelineError::invalid_input("months", n.to_string(), "Month offset overflows the calendar")
        })?;
        // rem_euclid(12) is always in 0..12
        YearMonth::new(year, index.rem_euclid(12) as u32 + 1)
    }

    /// The following month
    pub fn succ(&self) -> TimelineResult<Self> {
        self.plus_months(1)
    }

    /// First day of this month
    pub fn first_day(&self) -> TimelineResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .ok_or_else(|| TimelineError::date_parse("year_month", self.to_string()))
    }

    /// First day of the following month (exclusive end of this month)
    fn end_exclusive(&self) -> TimelineResult<NaiveDate> {
        // December of MAX_YEAR has no successor in range, but chrono still
        // knows the date that follows it.
        if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
                .ok_or_else(|| TimelineError::date_parse("year_month", self.to_string()))
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
                .ok_or_else(|| TimelineError::date_parse("year_month", self.to_string()))
        }
    }

    /// Number of days in this month
    pub fn days_in_month(&self) -> TimelineResult<i64> {
        Ok((self.end_exclusive()? - self.first_day()?).num_days())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = TimelineError;

    /// Parse `YYYY-MM`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| TimelineError::date_parse("year_month", s))?;
        let digits = |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(year, 4) || !digits(month, 2) {
            return Err(TimelineError::date_parse("year_month", s));
        }
        let year: i32 = year.parse().map_err(|_| TimelineError::date_parse("year_month", s))?;
        let month: u32 = month.parse().map_err(|_| TimelineError::date_parse("year_month", s))?;
        YearMonth::new(year, month).map_err(|_| TimelineError::date_parse("year_month", s))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = TimelineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

/// One column of the month axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    pub year: i32,
    /// 1-based month number
    pub month: u32,
    /// Short display label (e.g. "Sep")
    pub short_label: String,
    /// Length of the month in days
    pub days: i64,
}

impl Month {
    pub fn year_month(&self) -> TimelineResult<YearMonth> {
        YearMonth::new(self.year, self.month)
    }

    /// Label with year, e.g. "Sep 2024"
    pub fn display_label(&self) -> String {
        format!("{} {}", self.short_label, self.year)
    }
}

/// The contiguous, non-empty month range shown on a timeline axis.
///
/// Only constructed through [`build_month_axis`] and friends, which
/// guarantee contiguity and at least one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayWindow {
    months: Vec<Month>,
    /// First day of the first month
    start: NaiveDate,
    /// First day after the last month
    end: NaiveDate,
}

impl DisplayWindow {
    pub fn months(&self) -> &[Month] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Always false; a window holds at least one month.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// First day of the window (inclusive)
    pub fn window_start(&self) -> NaiveDate {
        self.start
    }

    /// Day after the last day of the window (exclusive)
    pub fn window_end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered by the window
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Header cell positions, one per month, proportional to each month's
    /// length in days.
    pub fn month_columns(&self) -> Vec<BarLayout> {
        let total = self.total_days() as f64;
        let mut offset_days = 0i64;
        let mut columns = Vec::with_capacity(self.months.len());

        for month in &self.months {
            let days = month.days;
            let left = offset_days as f64 / total * 100.0;
            let width = days as f64 / total * 100.0;
            columns.push(BarLayout::clamped(left, width));
            offset_days += days;
        }

        columns
    }
}

/// Build the month axis spanning `start..=end`.
///
/// Fails with `InvalidRange` when `end` precedes `start`.
pub fn build_month_axis(
    start: YearMonth,
    end: YearMonth,
    labels: &impl LabelResolver,
) -> TimelineResult<DisplayWindow> {
    if end < start {
        return Err(TimelineError::invalid_range(start, end));
    }

    let mut months = Vec::new();
    let mut current = start;
    loop {
        months.push(Month {
            year: current.year(),
            month: current.month(),
            short_label: labels.resolve(&month_key(current.month())),
            days: current.days_in_month()?,
        });
        if current == end {
            break;
        }
        current = current.succ()?;
    }

    Ok(DisplayWindow {
        months,
        start: start.first_day()?,
        end: end.end_exclusive()?,
    })
}

/// Build a month axis of `count` months beginning at `start`.
///
/// A zero count is an empty range and fails with `InvalidRange`.
pub fn build_month_axis_from_count(
    start: YearMonth,
    count: u32,
    labels: &impl LabelResolver,
) -> TimelineResult<DisplayWindow> {
    if count == 0 {
        return Err(TimelineError::invalid_range(start, "0 months"));
    }
    let end = start.plus_months(count - 1)?;
    build_month_axis(start, end, labels)
}

/// The caller-controlled year/range selector.
///
/// ## JSON Examples
///
/// ```json
/// { "kind": "calendar_year", "year": 2024 }
/// { "kind": "school_year", "start_year": 2024 }
/// { "kind": "range", "start": "2024-09", "end": "2025-06" }
/// { "kind": "months", "start": "2024-01", "count": 18 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowSelector {
    /// January through December of `year`
    CalendarYear { year: i32 },
    /// September of `start_year` through June of the following year
    SchoolYear { start_year: i32 },
    /// Explicit inclusive month range
    Range { start: YearMonth, end: YearMonth },
    /// `count` months starting at `start`
    Months { start: YearMonth, count: u32 },
}

impl WindowSelector {
    /// First month of a school year
    pub const SCHOOL_YEAR_START_MONTH: u32 = 9;
    /// Last month of a school year (in the following calendar year)
    pub const SCHOOL_YEAR_END_MONTH: u32 = 6;

    /// Produce the display window for this selection.
    pub fn resolve(&self, labels: &impl LabelResolver) -> TimelineResult<DisplayWindow> {
        match *self {
            WindowSelector::CalendarYear { year } => {
                build_month_axis(YearMonth::new(year, 1)?, YearMonth::new(year, 12)?, labels)
            }
            WindowSelector::SchoolYear { start_year } => build_month_axis(
                YearMonth::new(start_year, Self::SCHOOL_YEAR_START_MONTH)?,
                YearMonth::new(start_year + 1, Self::SCHOOL_YEAR_END_MONTH)?,
                labels,
            ),
            WindowSelector::Range { start, end } => build_month_axis(start, end, labels),
            WindowSelector::Months { start, count } => build_month_axis_from_count(start, count, labels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::{DefaultLabels, LabelMap};

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_school_year_axis() {
        let window = build_month_axis(ym(2024, 9), ym(2025, 6), &DefaultLabels).unwrap();
        let labels: Vec<String> = window.months().iter().map(|m| m.display_label()).collect();
        assert_eq!(
            labels,
            [
                "Sep 2024", "Oct 2024", "Nov 2024", "Dec 2024", "Jan 2025",
                "Feb 2025", "Mar 2025", "Apr 2025", "May 2025", "Jun 2025",
            ]
        );
        assert_eq!(window.window_start(), NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
        assert_eq!(window.window_end(), NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    }

    #[test]
    fn test_single_month_axis() {
        let window = build_month_axis(ym(2024, 2), ym(2024, 2), &DefaultLabels).unwrap();
        assert_eq!(window.len(), 1);
        assert!(!window.is_empty());
        assert_eq!(window.total_days(), 29);
        assert_eq!(window.months()[0].days, 29);
        let columns = window.month_columns();
        assert_eq!(columns, [BarLayout { left_percent: 0.0, width_percent: 100.0 }]);
    }

    #[test]
    fn test_end_before_start_is_invalid_range() {
        let err = build_month_axis(ym(2025, 6), ym(2024, 9), &DefaultLabels).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_RANGE");
    }

    #[test]
    fn test_axis_from_count() {
        let window = build_month_axis_from_count(ym(2024, 11), 4, &DefaultLabels).unwrap();
        let months: Vec<(i32, u32)> = window.months().iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(months, [(2024, 11), (2024, 12), (2025, 1), (2025, 2)]);

        assert!(build_month_axis_from_count(ym(2024, 11), 0, &DefaultLabels).is_err());
    }

    #[test]
    fn test_axis_uses_injected_labels() {
        let labels = LabelMap::new().with("month.short.1", "janv.");
        let window = build_month_axis(ym(2024, 1), ym(2024, 2), &labels).unwrap();
        assert_eq!(window.months()[0].short_label, "janv.");
        assert_eq!(window.months()[1].short_label, "Feb");
    }

    #[test]
    fn test_calendar_year_total_days() {
        let leap = WindowSelector::CalendarYear { year: 2024 }.resolve(&DefaultLabels).unwrap();
        assert_eq!(leap.total_days(), 366);
        let common = WindowSelector::CalendarYear { year: 2023 }.resolve(&DefaultLabels).unwrap();
        assert_eq!(common.total_days(), 365);
        assert_eq!(common.len(), 12);
    }

    #[test]
    fn test_school_year_selector() {
        let window = WindowSelector::SchoolYear { start_year: 2024 }.resolve(&DefaultLabels).unwrap();
        assert_eq!(window.len(), 10);
        assert_eq!(window.months()[0].month, 9);
        assert_eq!(window.months()[9].year, 2025);
    }

    #[test]
    fn test_month_columns_cover_window() {
        let window = WindowSelector::CalendarYear { year: 2023 }.resolve(&DefaultLabels).unwrap();
        let columns = window.month_columns();
        assert_eq!(columns.len(), 12);
        assert!(columns[0].left_percent.abs() < 1e-9);
        // January is 31 of 365 days
        assert!((columns[0].width_percent - 31.0 / 365.0 * 100.0).abs() < 1e-9);
        let total: f64 = columns.iter().map(|c| c.width_percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
        let last = columns[11];
        assert!((last.left_percent + last.width_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_year_month_parsing() {
        assert_eq!("2024-09".parse::<YearMonth>().unwrap(), ym(2024, 9));
        assert_eq!(" 0001-01 ".parse::<YearMonth>().unwrap(), ym(1, 1));
        for bad in [
            "2024", "2024-13", "2024-00", "abcd-01", "-01", "2024-001", "", "+2024-01", "-2024-01", "2024-9",
            "24-09", "02024-09", "2024-+9",
        ] {
            let err = bad.parse::<YearMonth>().unwrap_err();
            assert_eq!(err.error_code(), "DATE_PARSE", "input {:?}", bad);
        }
    }

    #[test]
    fn test_year_month_validation_and_arithmetic() {
        assert!(YearMonth::new(2024, 0).is_err());
        assert!(YearMonth::new(2024, 13).is_err());
        assert!(YearMonth::new(0, 1).is_err());
        assert_eq!(ym(2024, 12).succ().unwrap(), ym(2025, 1));
        assert_eq!(ym(2024, 3).plus_months(22).unwrap(), ym(2026, 1));
        assert!(ym(MAX_YEAR, 12).succ().is_err());
        assert_eq!(ym(2023, 2).days_in_month().unwrap(), 28);
        assert_eq!(ym(MAX_YEAR, 12).days_in_month().unwrap(), 31);
    }

    #[test]
    fn test_selector_serialization() {
        let json = r#"{"kind":"range","start":"2024-09","end":"2025-06"}"#;
        let selector: WindowSelector = serde_json::from_str(json).unwrap();
        assert_eq!(selector, WindowSelector::Range { start: ym(2024, 9), end: ym(2025, 6) });
        assert_eq!(serde_json::to_string(&selector).unwrap(), json);

        let bad = r#"{"kind":"range","start":"2024-19","end":"2025-06"}"#;
        assert!(serde_json::from_str::<WindowSelector>(bad).is_err());
    }
}
