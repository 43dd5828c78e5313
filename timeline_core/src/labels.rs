//! # Label Resolution
//!
//! Month abbreviations, status names and item-kind names are looked up by
//! key through a [`LabelResolver`] that the caller passes in explicitly.
//! Organizations rename things ("Focus Area" becomes "Priority", months get
//! translated), so nothing in the engine hard-codes display text.
//!
//! ## Keys
//!
//! | Key                 | Default      |
//! |---------------------|--------------|
//! | `month.short.1..12` | `Jan`..`Dec` |
//! | `status.on_track`   | `On Track`   |
//! | `kind.focus_area`   | `Focus Area` |
//!
//! ## Example
//!
//! ```rust
//! use timeline_core::labels::{DefaultLabels, LabelMap, LabelResolver};
//!
//! assert_eq!(DefaultLabels.resolve("month.short.3"), "Mar");
//!
//! let labels = LabelMap::new().with("kind.focus_area", "Priority");
//! assert_eq!(labels.resolve("kind.focus_area"), "Priority");
//! // Keys missing from the map fall back to the built-in English text
//! assert_eq!(labels.resolve("month.short.3"), "Mar");
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("month.short.1", "Jan"),
        ("month.short.2", "Feb"),
        ("month.short.3", "Mar"),
        ("month.short.4", "Apr"),
        ("month.short.5", "May"),
        ("month.short.6", "Jun"),
        ("month.short.7", "Jul"),
        ("month.short.8", "Aug"),
        ("month.short.9", "Sep"),
        ("month.short.10", "Oct"),
        ("month.short.11", "Nov"),
        ("month.short.12", "Dec"),
        ("status.on_track", "On Track"),
        ("status.at_risk", "At Risk"),
        ("status.off_track", "Off Track"),
        ("status.not_started", "Not Started"),
        ("kind.focus_area", "Focus Area"),
        ("kind.objective", "Objective"),
        ("kind.activity", "Activity"),
        ("kind.goal", "Goal"),
    ])
});

/// Key for the short label of a month (1-based).
pub fn month_key(month: u32) -> String {
    format!("month.short.{}", month)
}

/// Opaque `key -> display string` lookup.
pub trait LabelResolver {
    /// Look up a key, returning `None` when this resolver has no entry.
    fn label_for(&self, key: &str) -> Option<String>;

    /// Look up a key, falling back to the built-in English text and finally
    /// to the key itself.
    fn resolve(&self, key: &str) -> String {
        self.label_for(key)
            .or_else(|| DEFAULT_LABELS.get(key).map(|s| (*s).to_string()))
            .unwrap_or_else(|| key.to_string())
    }
}

impl<T: LabelResolver + ?Sized> LabelResolver for &T {
    fn label_for(&self, key: &str) -> Option<String> {
        (**self).label_for(key)
    }
}

/// The built-in English labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLabels;

impl LabelResolver for DefaultLabels {
    fn label_for(&self, key: &str) -> Option<String> {
        DEFAULT_LABELS.get(key).map(|s| (*s).to_string())
    }
}

/// Caller-supplied label overrides (organization terminology, translations).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelMap(HashMap<String, String>);

impl LabelMap {
    /// Create an empty map
    pub fn new() -> Self {
        LabelMap(HashMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.insert(key, label);
        self
    }

    /// Insert or replace a label
    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.0.insert(key.into(), label.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for LabelMap {
    fn from(map: HashMap<String, String>) -> Self {
        LabelMap(map)
    }
}

impl LabelResolver for LabelMap {
    fn label_for(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_month_labels() {
        let names: Vec<String> = (1..=12).map(|m| DefaultLabels.resolve(&month_key(m))).collect();
        assert_eq!(
            names,
            ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        );
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        assert_eq!(DefaultLabels.label_for("nope"), None);
        assert_eq!(DefaultLabels.resolve("nope"), "nope");
        assert_eq!(LabelMap::new().resolve("nope"), "nope");
    }

    #[test]
    fn test_overrides_take_precedence() {
        let labels = LabelMap::new()
            .with("month.short.1", "janv.")
            .with("status.at_risk", "Needs Attention");
        assert_eq!(labels.resolve("month.short.1"), "janv.");
        assert_eq!(labels.resolve("status.at_risk"), "Needs Attention");
        assert_eq!(labels.resolve("status.on_track"), "On Track");
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn test_label_map_serializes_as_plain_object() {
        let labels = LabelMap::new().with("kind.goal", "Target");
        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"{"kind.goal":"Target"}"#);
        let parsed: LabelMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, labels);
    }
}
