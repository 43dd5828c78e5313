//! Item status and kind enumerations with their display tokens.
//!
//! Status colors are mapped through an exhaustive `match`, so adding a
//! status without a style is a compile error rather than a missing
//! dictionary key at render time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::labels::LabelResolver;

/// Progress status of a plan item
///
/// # Example
/// ```
/// use timeline_core::status::Status;
///
/// let style = Status::AtRisk.style();
/// assert_eq!(style.bar_color, "amber-500");
/// assert_eq!(Status::AtRisk.label_key(), "status.at_risk");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    OnTrack,
    AtRisk,
    OffTrack,
    #[default]
    NotStarted,
}

/// Style tokens handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusStyle {
    /// Fill color of the bar
    pub bar_color: &'static str,
    /// Color of the status text
    pub text_color: &'static str,
    /// Badge style name
    pub badge: &'static str,
}

impl Status {
    /// All statuses in display order
    pub const ALL: [Status; 4] = [Status::OnTrack, Status::AtRisk, Status::OffTrack, Status::NotStarted];

    /// Stable snake_case code, identical to the serialized form
    pub fn code(&self) -> &'static str {
        match self {
            Status::OnTrack => "on_track",
            Status::AtRisk => "at_risk",
            Status::OffTrack => "off_track",
            Status::NotStarted => "not_started",
        }
    }

    pub fn style(&self) -> StatusStyle {
        match self {
            Status::OnTrack => StatusStyle {
                bar_color: "green-500",
                text_color: "green-800",
                badge: "success",
            },
            Status::AtRisk => StatusStyle {
                bar_color: "amber-500",
                text_color: "amber-800",
                badge: "warning",
            },
            Status::OffTrack => StatusStyle {
                bar_color: "red-500",
                text_color: "red-800",
                badge: "danger",
            },
            Status::NotStarted => StatusStyle {
                bar_color: "gray-400",
                text_color: "gray-700",
                badge: "neutral",
            },
        }
    }

    /// Label key for the label resolver
    pub fn label_key(&self) -> String {
        format!("status.{}", self.code())
    }

    pub fn label(&self, labels: &impl LabelResolver) -> String {
        labels.resolve(&self.label_key())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Kind of plan item.
///
/// Strategy timelines use focus area / objective / activity; goal timelines
/// use the simplified goal / activity pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    FocusArea,
    Objective,
    Goal,
    Activity,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [ItemKind::FocusArea, ItemKind::Objective, ItemKind::Goal, ItemKind::Activity];

    pub fn code(&self) -> &'static str {
        match self {
            ItemKind::FocusArea => "focus_area",
            ItemKind::Objective => "objective",
            ItemKind::Goal => "goal",
            ItemKind::Activity => "activity",
        }
    }

    pub fn label_key(&self) -> String {
        format!("kind.{}", self.code())
    }

    pub fn label(&self, labels: &impl LabelResolver) -> String {
        labels.resolve(&self.label_key())
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
