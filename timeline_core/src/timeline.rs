//! # Timeline Assembly
//!
//! Ties the pieces together for one render: flatten the plan tree under the
//! current expansion state, then lay out one bar per visible row against the
//! display window.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use timeline_core::axis::WindowSelector;
//! use timeline_core::hierarchy::{ExpansionState, PlanNode};
//! use timeline_core::labels::DefaultLabels;
//! use timeline_core::layout::MinBarWidth;
//! use timeline_core::status::{ItemKind, Status};
//! use timeline_core::timeline::layout_timeline;
//!
//! let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
//! let plan = vec![
//!     PlanNode::new(1, "Attendance", ItemKind::Goal, d(2024, 9, 1), d(2025, 6, 30))
//!         .with_status(Status::AtRisk),
//! ];
//! let window = WindowSelector::SchoolYear { start_year: 2024 }.resolve(&DefaultLabels).unwrap();
//!
//! let layout = layout_timeline(
//!     &plan,
//!     &ExpansionState::new(),
//!     &window,
//!     MinBarWidth::Exact,
//!     &DefaultLabels,
//!     None,
//! ).unwrap();
//!
//! assert_eq!(layout.rows.len(), 1);
//! assert_eq!(layout.rows[0].status_label, "At Risk");
//! assert!((layout.rows[0].bar.width_percent - 100.0).abs() < 1e-9);
//! ```

use chrono::NaiveDate;
use serde::Serialize;

use crate::axis::{DisplayWindow, Month};
use crate::errors::TimelineResult;
use crate::hierarchy::{flatten, ExpansionState, PlanNode, TimelineRow};
use crate::item::ItemId;
use crate::labels::LabelResolver;
use crate::layout::{compute_bar_style, marker_percent, BarLayout, MinBarWidth};
use crate::status::{ItemKind, Status, StatusStyle};

/// A row with everything the rendering layer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOutRow {
    pub id: ItemId,
    pub title: String,
    pub kind: ItemKind,
    pub kind_label: String,
    pub level: u8,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Status,
    pub status_label: String,
    pub style: StatusStyle,
    /// Progress clamped to 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    pub has_children: bool,
    pub expanded: bool,
    pub bar: BarLayout,
}

/// The complete layout for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout {
    /// Month axis, left to right
    pub axis: Vec<Month>,
    /// Header cell per month
    pub columns: Vec<BarLayout>,
    pub window_start: NaiveDate,
    /// Exclusive
    pub window_end: NaiveDate,
    /// Position of the marker date (e.g. today), when inside the window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_percent: Option<f64>,
    pub rows: Vec<LaidOutRow>,
}

impl TimelineLayout {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose bar is visible in the window
    pub fn visible_rows(&self) -> impl Iterator<Item = &LaidOutRow> {
        self.rows.iter().filter(|r| r.bar.is_visible())
    }
}

/// Compute the layout of every visible row.
///
/// Items whose start follows their end are kept (as zero-width bars) and
/// logged at warn level; one broken item does not abort the render.
pub fn layout_timeline(
    roots: &[PlanNode],
    expansion: &ExpansionState,
    window: &DisplayWindow,
    policy: MinBarWidth,
    labels: &impl LabelResolver,
    marker: Option<NaiveDate>,
) -> TimelineResult<TimelineLayout> {
    let rows = flatten(roots, expansion)?;
    log::debug!(
        "laying out {} rows over {} months ({} .. {})",
        rows.len(),
        window.len(),
        window.window_start(),
        window.window_end()
    );

    let rows = rows
        .into_iter()
        .map(|row| lay_out_row(row, window, policy, labels))
        .collect();

    Ok(TimelineLayout {
        axis: window.months().to_vec(),
        columns: window.month_columns(),
        window_start: window.window_start(),
        window_end: window.window_end(),
        marker_percent: marker.and_then(|date| marker_percent(date, window)),
        rows,
    })
}

fn lay_out_row(
    row: TimelineRow,
    window: &DisplayWindow,
    policy: MinBarWidth,
    labels: &impl LabelResolver,
) -> LaidOutRow {
    let TimelineRow {
        item,
        has_children,
        expanded,
    } = row;

    if item.has_inverted_dates() {
        log::warn!(
            "item {} '{}' starts {} after it ends {}; drawing a zero-width bar",
            item.id,
            item.title,
            item.start_date,
            item.end_date
        );
    }

    let bar = compute_bar_style(item.start_date, item.end_date, window, policy);
    let progress = item.clamped_progress();

    LaidOutRow {
        kind_label: item.kind.label(labels),
        status_label: item.status.label(labels),
        style: item.status.style(),
        progress,
        has_children,
        expanded,
        bar,
        id: item.id,
        title: item.title,
        kind: item.kind,
        level: item.level,
        start_date: item.start_date,
        end_date: item.end_date,
        status: item.status,
    }
}
