//! # timeline_core - Timeline Layout Engine
//!
//! `timeline_core` computes Gantt-style layouts for student-support plans:
//! focus areas, objectives and activities (or goals and activities) drawn as
//! bars against a month axis. All inputs and outputs are JSON-serializable,
//! so a web view, a CLI, or an assistant can all consume the same layout.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Percentages, not pixels**: The rendering layer decides the scale
//! - **Rich Errors**: Structured error types, not just strings
//! - **Injected labels**: Month and status text come from a caller-supplied resolver
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use timeline_core::{
//!     layout_timeline, DefaultLabels, ExpansionState, ItemKind, MinBarWidth, PlanNode, WindowSelector,
//! };
//!
//! let d = |m, day| NaiveDate::from_ymd_opt(2023, m, day).unwrap();
//! let plan = vec![PlanNode::new(1, "Reading intervention", ItemKind::Goal, d(3, 1), d(3, 31))];
//! let window = WindowSelector::CalendarYear { year: 2023 }.resolve(&DefaultLabels)?;
//!
//! let layout = layout_timeline(&plan, &ExpansionState::new(), &window, MinBarWidth::Exact, &DefaultLabels, None)?;
//! let bar = layout.rows[0].bar;
//! assert!((bar.left_percent - 16.16).abs() < 0.01);
//! assert!((bar.width_percent - 8.49).abs() < 0.01);
//! # Ok::<(), timeline_core::TimelineError>(())
//! ```
//!
//! ## Modules
//!
//! - [`axis`] - Month axis and window selection
//! - [`layout`] - Date range to bar position
//! - [`hierarchy`] - Plan trees, expand/collapse state, flattening
//! - [`timeline`] - Full per-render layout
//! - [`status`] - Status and item-kind enums with style tokens
//! - [`labels`] - Label resolution
//! - [`plan`] - Plan documents as supplied by a data layer
//! - [`config`] - TOML configuration
//! - [`file_io`] - Loading plans and saving layouts
//! - [`errors`] - Structured error types

pub mod axis;
pub mod config;
pub mod errors;
pub mod file_io;
pub mod hierarchy;
pub mod item;
pub mod labels;
pub mod layout;
pub mod plan;
pub mod status;
pub mod timeline;

// Re-export commonly used types at crate root for convenience
pub use axis::{build_month_axis, build_month_axis_from_count, DisplayWindow, Month, WindowSelector, YearMonth};
pub use config::{load_config, TimelineConfig};
pub use errors::{TimelineError, TimelineResult};
pub use file_io::{load_plan, save_layout};
pub use hierarchy::{flatten, ExpansionState, PlanNode, TimelineRow};
pub use item::{ItemId, TimelineItem};
pub use labels::{DefaultLabels, LabelMap, LabelResolver};
pub use layout::{compute_bar_style, marker_percent, parse_iso_date, BarLayout, MinBarWidth};
pub use plan::{PlanDocument, PlanRecord};
pub use status::{ItemKind, Status, StatusStyle};
pub use timeline::{layout_timeline, LaidOutRow, TimelineLayout};
