//! # Timeline Items
//!
//! The flat, render-ready record for one plan item. Items are produced by
//! flattening a [`PlanNode`](crate::hierarchy::PlanNode) tree; `level` is
//! the nesting depth used for indentation.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "id": 12,
//!   "title": "Weekly check-ins",
//!   "kind": "activity",
//!   "level": 2,
//!   "start_date": "2024-09-09",
//!   "end_date": "2024-12-20",
//!   "status": "on_track",
//!   "progress": 40.0
//! }
//! ```

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::status::{ItemKind, Status};

/// Deepest nesting level (focus area = 0, objective = 1, activity = 2)
pub const MAX_LEVEL: u8 = 2;

/// Identifier of a plan item, unique within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        ItemId(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: ItemId,
    pub title: String,
    pub kind: ItemKind,
    /// Nesting depth, 0..=MAX_LEVEL
    pub level: u8,
    pub start_date: NaiveDate,
    /// Inclusive
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: Status,
    /// Percent complete, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

impl TimelineItem {
    /// True when the start date follows the end date.
    ///
    /// Such items still render (as zero-width bars); callers may want to
    /// flag them.
    pub fn has_inverted_dates(&self) -> bool {
        self.start_date > self.end_date
    }

    /// Number of calendar days covered, counting both ends; 0 when inverted.
    pub fn duration_days(&self) -> i64 {
        ((self.end_date - self.start_date).num_days() + 1).max(0)
    }

    /// Progress forced into 0..=100; non-finite values are dropped.
    pub fn clamped_progress(&self) -> Option<f64> {
        self.progress
            .filter(|p| p.is_finite())
            .map(|p| p.clamp(0.0, 100.0))
    }
}
