//! # Hierarchy Flattening
//!
//! Plans arrive as trees (focus area → objective → activity, or goal →
//! activity). Rendering wants a flat list in depth-first order where each
//! row knows its indentation level and whether its children are shown.
//!
//! Expand/collapse state is owned by the caller as an [`ExpansionState`]:
//! a plain `id -> bool` map where missing ids read as expanded.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use timeline_core::hierarchy::{flatten, ExpansionState, PlanNode};
//! use timeline_core::item::ItemId;
//! use timeline_core::status::ItemKind;
//!
//! let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
//! let plan = vec![
//!     PlanNode::new(1, "Improve attendance", ItemKind::Goal, d(1, 1), d(6, 30))
//!         .with_child(PlanNode::new(2, "Morning check-in", ItemKind::Activity, d(1, 8), d(3, 29))),
//! ];
//!
//! let mut expansion = ExpansionState::new();
//! assert_eq!(flatten(&plan, &expansion).unwrap().len(), 2);
//!
//! expansion.toggle(ItemId(1));
//! let rows = flatten(&plan, &expansion).unwrap();
//! assert_eq!(rows.len(), 1);
//! assert!(!rows[0].expanded);
//! ```

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{TimelineError, TimelineResult};
use crate::item::{ItemId, TimelineItem, MAX_LEVEL};
use crate::status::{ItemKind, Status};

/// One node of a plan tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanNode {
    pub id: ItemId,
    pub title: String,
    pub kind: ItemKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PlanNode>,
}

impl PlanNode {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        kind: ItemKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        PlanNode {
            id: ItemId(id),
            title: title.into(),
            kind,
            start_date,
            end_date,
            status: Status::default(),
            progress: None,
            children: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_child(mut self, child: PlanNode) -> Self {
        self.children.push(child);
        self
    }

    /// The item for this node at the given depth
    pub fn to_item(&self, level: u8) -> TimelineItem {
        TimelineItem {
            id: self.id,
            title: self.title.clone(),
            kind: self.kind,
            level,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            progress: self.progress,
        }
    }

    /// Ids of this node and every descendant that has children
    pub fn parent_ids(&self) -> Vec<ItemId> {
        let mut ids = Vec::new();
        collect_parent_ids(self, &mut ids);
        ids
    }
}

fn collect_parent_ids(node: &PlanNode, ids: &mut Vec<ItemId>) {
    if !node.children.is_empty() {
        ids.push(node.id);
        for child in &node.children {
            collect_parent_ids(child, ids);
        }
    }
}

/// Per-parent expand/collapse flags. Missing ids are expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState(HashMap<ItemId, bool>);

impl ExpansionState {
    pub fn new() -> Self {
        ExpansionState(HashMap::new())
    }

    pub fn is_expanded(&self, id: ItemId) -> bool {
        self.0.get(&id).copied().unwrap_or(true)
    }

    /// Flip the flag for `id`, returning the new value.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        let expanded = !self.is_expanded(id);
        self.0.insert(id, expanded);
        expanded
    }

    pub fn set(&mut self, id: ItemId, expanded: bool) {
        self.0.insert(id, expanded);
    }

    pub fn collapse_all(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        for id in ids {
            self.0.insert(id, false);
        }
    }

    /// Forget every flag, so everything reads as expanded.
    pub fn expand_all(&mut self) {
        self.0.clear();
    }

    /// Ids currently collapsed, sorted
    pub fn collapsed(&self) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = self
            .0
            .iter()
            .filter(|(_, expanded)| !**expanded)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }
}

/// A flattened plan item ready for layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub item: TimelineItem,
    pub has_children: bool,
    /// Whether this row's children are shown (always true for leaves)
    pub expanded: bool,
}

/// Flatten a plan tree depth-first, omitting children of collapsed nodes.
///
/// Fails with `HierarchyTooDeep` if any node (shown or hidden) sits deeper
/// than [`MAX_LEVEL`].
pub fn flatten(roots: &[PlanNode], expansion: &ExpansionState) -> TimelineResult<Vec<TimelineRow>> {
    let mut rows = Vec::new();
    for root in roots {
        walk(root, 0, true, expansion, &mut rows)?;
    }
    Ok(rows)
}

fn walk(
    node: &PlanNode,
    depth: usize,
    visible: bool,
    expansion: &ExpansionState,
    rows: &mut Vec<TimelineRow>,
) -> TimelineResult<()> {
    let level = u8::try_from(depth)
        .ok()
        .filter(|level| *level <= MAX_LEVEL)
        .ok_or(TimelineError::HierarchyTooDeep { id: node.id.0, depth })?;

    let expanded = expansion.is_expanded(node.id);
    if visible {
        rows.push(TimelineRow {
            item: node.to_item(level),
            has_children: !node.children.is_empty(),
            expanded,
        });
    }

    for child in &node.children {
        walk(child, depth + 1, visible && expanded, expansion, rows)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    /// Two focus areas, the first with two objectives each holding activities
    fn strategy_plan() -> Vec<PlanNode> {
        vec![
            PlanNode::new(1, "Academic success", ItemKind::FocusArea, d(1, 1), d(12, 31))
                .with_child(
                    PlanNode::new(10, "Raise reading scores", ItemKind::Objective, d(2, 1), d(6, 30))
                        .with_child(PlanNode::new(100, "Tutoring", ItemKind::Activity, d(2, 5), d(5, 31)))
                        .with_child(PlanNode::new(101, "Book club", ItemKind::Activity, d(3, 1), d(6, 15))),
                )
                .with_child(
                    PlanNode::new(11, "Math support", ItemKind::Objective, d(9, 1), d(12, 20))
                        .with_child(PlanNode::new(110, "Study hall", ItemKind::Activity, d(9, 3), d(12, 18))),
                ),
            PlanNode::new(2, "Family engagement", ItemKind::FocusArea, d(1, 1), d(12, 31)),
        ]
    }

    fn ids(rows: &[TimelineRow]) -> Vec<u64> {
        rows.iter().map(|r| r.item.id.0).collect()
    }

    #[test]
    fn test_depth_first_order_and_levels() {
        let rows = flatten(&strategy_plan(), &ExpansionState::new()).unwrap();
        assert_eq!(ids(&rows), [1, 10, 100, 101, 11, 110, 2]);
        let levels: Vec<u8> = rows.iter().map(|r| r.item.level).collect();
        assert_eq!(levels, [0, 1, 2, 2, 1, 2, 0]);
        assert!(rows[0].has_children);
        assert!(!rows[2].has_children);
        assert!(rows.iter().all(|r| r.expanded));
    }

    #[test]
    fn test_collapsed_parent_hides_descendants() {
        let mut expansion = ExpansionState::new();
        expansion.set(ItemId(10), false);
        let rows = flatten(&strategy_plan(), &expansion).unwrap();
        assert_eq!(ids(&rows), [1, 10, 11, 110, 2]);
        assert!(!rows[1].expanded);

        expansion.set(ItemId(1), false);
        let rows = flatten(&strategy_plan(), &expansion).unwrap();
        assert_eq!(ids(&rows), [1, 2]);
    }

    #[test]
    fn test_collapse_is_remembered_under_collapsed_ancestor() {
        let mut expansion = ExpansionState::new();
        expansion.collapse_all([ItemId(1), ItemId(10)]);
        expansion.toggle(ItemId(1));
        let rows = flatten(&strategy_plan(), &expansion).unwrap();
        assert_eq!(ids(&rows), [1, 10, 11, 110, 2]);
    }

    #[test]
    fn test_toggle_defaults_to_expanded() {
        let mut expansion = ExpansionState::new();
        assert!(expansion.is_expanded(ItemId(7)));
        assert!(!expansion.toggle(ItemId(7)));
        assert!(!expansion.is_expanded(ItemId(7)));
        assert!(expansion.toggle(ItemId(7)));
        assert!(expansion.collapsed().is_empty());
    }

    #[test]
    fn test_expand_all_and_collapsed_listing() {
        let mut expansion = ExpansionState::new();
        expansion.collapse_all(strategy_plan()[0].parent_ids());
        assert_eq!(expansion.collapsed(), [ItemId(1), ItemId(10), ItemId(11)]);
        expansion.expand_all();
        assert!(expansion.collapsed().is_empty());
        assert_eq!(flatten(&strategy_plan(), &expansion).unwrap().len(), 7);
    }

    #[test]
    fn test_empty_plan() {
        assert!(flatten(&[], &ExpansionState::new()).unwrap().is_empty());
    }

    #[test]
    fn test_too_deep_is_rejected_even_when_hidden() {
        let plan = vec![PlanNode::new(1, "a", ItemKind::FocusArea, d(1, 1), d(2, 1)).with_child(
            PlanNode::new(2, "b", ItemKind::Objective, d(1, 1), d(2, 1)).with_child(
                PlanNode::new(3, "c", ItemKind::Activity, d(1, 1), d(2, 1))
                    .with_child(PlanNode::new(4, "d", ItemKind::Activity, d(1, 1), d(2, 1))),
            ),
        )];

        let err = flatten(&plan, &ExpansionState::new()).unwrap_err();
        assert_eq!(err, TimelineError::HierarchyTooDeep { id: 4, depth: 3 });

        let mut expansion = ExpansionState::new();
        expansion.set(ItemId(1), false);
        assert!(flatten(&plan, &expansion).is_err());
    }

    #[test]
    fn test_expansion_state_json() {
        let mut expansion = ExpansionState::new();
        expansion.set(ItemId(4), false);
        let json = serde_json::to_string(&expansion).unwrap();
        assert_eq!(json, r#"{"4":false}"#);
        let parsed: ExpansionState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, expansion);
    }
}
