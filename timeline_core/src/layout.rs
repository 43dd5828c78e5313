//! # Bar Layout
//!
//! Converts an item's date range into a horizontal bar position expressed
//! as percentages of a [`DisplayWindow`].
//!
//! ## Algorithm
//!
//! 1. The window is the continuous range `[window_start, window_end)`.
//! 2. An item covers `[start_date, end_date + 1 day)`; end dates are inclusive.
//! 3. Both bounds are clipped into the window, so partially visible items
//!    render a truncated bar.
//! 4. `left = (clipped_start - window_start) / window_days * 100`
//! 5. `width = (clipped_end - clipped_start) / window_days * 100`, never negative.
//!
//! Items entirely outside the window produce a zero-width bar at the nearest
//! edge. An item whose start follows its end produces a zero-width bar at
//! its (clipped) start.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use timeline_core::axis::WindowSelector;
//! use timeline_core::labels::DefaultLabels;
//! use timeline_core::layout::{compute_bar_style, MinBarWidth};
//!
//! let window = WindowSelector::CalendarYear { year: 2023 }.resolve(&DefaultLabels).unwrap();
//! let bar = compute_bar_style(
//!     NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2023, 3, 31).unwrap(),
//!     &window,
//!     MinBarWidth::Exact,
//! );
//!
//! assert!((bar.left_percent - 16.16).abs() < 0.01);
//! assert!((bar.width_percent - 8.49).abs() < 0.01);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::axis::DisplayWindow;
use crate::errors::{TimelineError, TimelineResult};

/// Horizontal bar position as percentages of the display window.
///
/// Invariant: both values lie in `[0, 100]` and their sum is at most 100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BarLayout {
    pub left_percent: f64,
    pub width_percent: f64,
}

impl BarLayout {
    /// Build a layout, forcing it back inside `[0, 100]`.
    pub fn clamped(left_percent: f64, width_percent: f64) -> Self {
        let left = clamp_percent(left_percent, 100.0);
        let width = clamp_percent(width_percent, 100.0 - left);
        BarLayout {
            left_percent: left,
            width_percent: width,
        }
    }

    /// Right edge of the bar
    pub fn right_percent(&self) -> f64 {
        self.left_percent + self.width_percent
    }

    pub fn is_visible(&self) -> bool {
        self.width_percent > 0.0
    }
}

fn clamp_percent(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max.max(0.0))
    }
}

/// Policy for very short bars.
///
/// A one-day item in a year-long window is about 0.27% wide, which may not
/// show up at all once rendered. `Percent` raises any bar that overlaps the
/// window to a minimum width; bars outside the window stay at zero width.
///
/// ## TOML
///
/// ```toml
/// min_bar_width = { mode = "exact" }
/// min_bar_width = { mode = "percent", value = 1.5 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum MinBarWidth {
    /// Width strictly proportional to the covered days
    #[default]
    Exact,
    /// At least this many percent of the window
    Percent(f64),
}

impl MinBarWidth {
    /// Minimum width in percent, if one applies
    fn floor(&self) -> Option<f64> {
        match *self {
            MinBarWidth::Exact => None,
            MinBarWidth::Percent(p) if p.is_finite() && p > 0.0 => Some(p.min(100.0)),
            MinBarWidth::Percent(_) => None,
        }
    }
}

/// Compute the bar for an item spanning `start_date..=end_date`.
///
/// Never fails: any pair of dates yields a layout satisfying the
/// [`BarLayout`] invariant.
pub fn compute_bar_style(
    start_date: NaiveDate,
    end_date: NaiveDate,
    window: &DisplayWindow,
    policy: MinBarWidth,
) -> BarLayout {
    let window_start = window.window_start();
    let window_end = window.window_end();
    let total_days = window.total_days() as f64;

    let end_exclusive = end_date.succ_opt().unwrap_or(end_date);
    let clipped_start = start_date.clamp(window_start, window_end);
    let clipped_end = end_exclusive.clamp(window_start, window_end);

    let left_days = (clipped_start - window_start).num_days();
    let width_days = (clipped_end - clipped_start).num_days().max(0);

    let mut left = left_days as f64 / total_days * 100.0;
    let mut width = width_days as f64 / total_days * 100.0;

    if width_days > 0 {
        if let Some(min_width) = policy.floor() {
            if width < min_width {
                width = min_width;
                if left + width > 100.0 {
                    left = 100.0 - width;
                }
            }
        }
    }

    BarLayout::clamped(left, width)
}

/// Position of a single date (e.g. a "today" line), or `None` when the date
/// falls outside the window.
pub fn marker_percent(date: NaiveDate, window: &DisplayWindow) -> Option<f64> {
    if !window.contains(date) {
        return None;
    }
    let offset = (date - window.window_start()).num_days() as f64;
    Some(offset / window.total_days() as f64 * 100.0)
}

/// Parse a strict ISO `YYYY-MM-DD` date.
///
/// Surrounding whitespace is ignored. Signed years and single-digit months
/// or days are rejected. `field` names the input in the resulting
/// `DateParse` error.
pub fn parse_iso_date(field: &str, value: &str) -> TimelineResult<NaiveDate> {
    let trimmed = value.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| TimelineError::date_parse(field, value))?;
    // chrono accepts "+2024-3-1"; only the canonical form is allowed
    if trimmed.len() != 10 || date.format("%Y-%m-%d").to_string() != trimmed {
        return Err(TimelineError::date_parse(field, value));
    }
    Ok(date)
}
