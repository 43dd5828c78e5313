//! # Configuration
//!
//! Layout settings read from a TOML file. Every field has a default, so an
//! empty file (or no file) is a valid configuration.
//!
//! ```toml
//! # Single-day milestones get at least 1% of the axis
//! min_bar_width = { mode = "percent", value = 1.0 }
//!
//! [labels]
//! "kind.focus_area" = "Priority"
//! "status.at_risk" = "Needs Attention"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{TimelineError, TimelineResult};
use crate::labels::LabelMap;
use crate::layout::MinBarWidth;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Minimum-width policy for short bars
    pub min_bar_width: MinBarWidth,

    /// Label overrides layered over the built-in English labels
    pub labels: LabelMap,
}

impl TimelineConfig {
    /// Parse a TOML document.
    ///
    /// # Example
    ///
    /// ```rust
    /// use timeline_core::config::TimelineConfig;
    /// use timeline_core::layout::MinBarWidth;
    ///
    /// let config = TimelineConfig::from_toml_str(r#"
    ///     min_bar_width = { mode = "percent", value = 0.5 }
    /// "#).unwrap();
    /// assert_eq!(config.min_bar_width, MinBarWidth::Percent(0.5));
    /// ```
    pub fn from_toml_str(text: &str) -> TimelineResult<Self> {
        let config: TimelineConfig = toml::from_str(text).map_err(|e| TimelineError::ConfigError {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> TimelineResult<()> {
        if let MinBarWidth::Percent(p) = self.min_bar_width {
            if !p.is_finite() || !(0.0..=100.0).contains(&p) {
                return Err(TimelineError::invalid_input(
                    "min_bar_width",
                    p.to_string(),
                    "Minimum bar width must be between 0 and 100 percent",
                ));
            }
        }
        Ok(())
    }
}

/// Load a configuration file.
pub fn load_config(path: &Path) -> TimelineResult<TimelineConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| TimelineError::file_error("read config", path.display().to_string(), e.to_string()))?;
    let config = TimelineConfig::from_toml_str(&text)?;
    log::debug!("loaded config from {} ({} label overrides)", path.display(), config.labels.len());
    Ok(config)
}
