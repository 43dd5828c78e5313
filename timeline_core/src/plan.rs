//! # Plan Documents
//!
//! The on-disk/JSON form of a plan as supplied by a data-access layer: a
//! flat list of records linked by `parent_id`, in display order. Dates are
//! kept as strings until conversion so that a malformed date can be
//! reported against the item that carries it.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "title": "Lincoln High 2024-25",
//!   "window": { "kind": "school_year", "start_year": 2024 },
//!   "items": [
//!     { "id": 1, "title": "Academic success", "kind": "focus_area",
//!       "start_date": "2024-09-01", "end_date": "2025-06-30", "status": "on_track" },
//!     { "id": 10, "parent_id": 1, "title": "Tutoring", "kind": "objective",
//!       "start_date": "2024-10-01", "end_date": "2025-03-31", "progress": 35.0 }
//!   ]
//! }
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::axis::WindowSelector;
use crate::errors::{TimelineError, TimelineResult};
use crate::hierarchy::PlanNode;
use crate::item::{ItemId, MAX_LEVEL};
use crate::layout::parse_iso_date;
use crate::status::{ItemKind, Status};

/// Current schema version for plan documents
pub const SCHEMA_VERSION: &str = "0.1.0";

fn default_version() -> String {
    SCHEMA_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    /// Schema version (for compatibility checks)
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub title: String,

    /// Window to show when the caller does not pick one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowSelector>,

    #[serde(default)]
    pub items: Vec<PlanRecord>,
}

/// One item as stored by the data-access layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub id: ItemId,
    /// Parent item; `None` for top-level items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ItemId>,
    pub title: String,
    pub kind: ItemKind,
    /// ISO `YYYY-MM-DD`
    pub start_date: String,
    /// ISO `YYYY-MM-DD`, inclusive
    pub end_date: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

impl PlanRecord {
    fn to_node(&self, index: usize) -> TimelineResult<PlanNode> {
        let start_date = parse_iso_date(&format!("items[{}].start_date", index), &self.start_date)?;
        let end_date = parse_iso_date(&format!("items[{}].end_date", index), &self.end_date)?;
        let mut node = PlanNode::new(self.id.0, self.title.clone(), self.kind, start_date, end_date)
            .with_status(self.status);
        node.progress = self.progress;
        Ok(node)
    }
}

impl PlanDocument {
    pub fn new(title: impl Into<String>) -> Self {
        PlanDocument {
            version: default_version(),
            title: title.into(),
            window: None,
            items: Vec::new(),
        }
    }

    /// Build the plan tree, keeping record order among siblings.
    ///
    /// # Errors
    ///
    /// * `DateParse` - a start or end date is not a valid ISO date
    /// * `InvalidInput` - duplicate ids, unknown parents, or a parent cycle
    /// * `HierarchyTooDeep` - nesting beyond three levels
    pub fn to_nodes(&self) -> TimelineResult<Vec<PlanNode>> {
        let mut seen = HashSet::new();
        for record in &self.items {
            if !seen.insert(record.id) {
                return Err(TimelineError::invalid_input("id", record.id.to_string(), "Duplicate item id"));
            }
        }

        let mut children: HashMap<ItemId, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for (index, record) in self.items.iter().enumerate() {
            match record.parent_id {
                None => roots.push(index),
                Some(parent) if !seen.contains(&parent) => {
                    return Err(TimelineError::invalid_input(
                        format!("items[{}].parent_id", index),
                        parent.to_string(),
                        "Parent item does not exist",
                    ));
                }
                Some(parent) => children.entry(parent).or_default().push(index),
            }
        }

        let mut attached = 0;
        let mut nodes = Vec::with_capacity(roots.len());
        for index in roots {
            nodes.push(self.build(index, 0, &children, &mut attached)?);
        }

        // Records never reached from a root sit on a parent cycle
        if attached != self.items.len() {
            let orphan = self
                .items
                .iter()
                .find(|r| r.parent_id.is_some() && !reachable(&nodes, r.id))
                .map(|r| r.id.to_string())
                .unwrap_or_default();
            return Err(TimelineError::invalid_input("parent_id", orphan, "Parent links form a cycle"));
        }

        Ok(nodes)
    }

    fn build(
        &self,
        index: usize,
        depth: usize,
        children: &HashMap<ItemId, Vec<usize>>,
        attached: &mut usize,
    ) -> TimelineResult<PlanNode> {
        let record = &self.items[index];
        if depth > usize::from(MAX_LEVEL) {
            return Err(TimelineError::HierarchyTooDeep { id: record.id.0, depth });
        }

        let mut node = record.to_node(index)?;
        *attached += 1;
        if let Some(child_indices) = children.get(&record.id) {
            for &child in child_indices {
                node.children.push(self.build(child, depth + 1, children, attached)?);
            }
        }
        Ok(node)
    }
}

fn reachable(nodes: &[PlanNode], id: ItemId) -> bool {
    nodes.iter().any(|n| n.id == id || reachable(&n.children, id))
}
