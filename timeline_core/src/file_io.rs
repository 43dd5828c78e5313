//! # File I/O Module
//!
//! Reads plan documents and writes computed layouts:
//! - **Atomic saves**: write to `.tmp`, sync, rename, so a reader never sees
//!   a half-written layout
//! - **Version validation**: plan files from a newer schema are refused
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use timeline_core::file_io::load_plan;
//!
//! let plan = load_plan(Path::new("plan.json"))?;
//! println!("{} items", plan.items.len());
//! # Ok::<(), timeline_core::errors::TimelineError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;

use crate::errors::{TimelineError, TimelineResult};
use crate::plan::{PlanDocument, SCHEMA_VERSION};

/// Parse a plan document from JSON text and check its schema version.
pub fn parse_plan(json: &str) -> TimelineResult<PlanDocument> {
    let plan: PlanDocument = serde_json::from_str(json).map_err(|e| TimelineError::SerializationError {
        reason: e.to_string(),
    })?;
    validate_version(&plan.version)?;
    Ok(plan)
}

/// Load a plan document from a JSON file.
///
/// # Returns
///
/// * `Ok(PlanDocument)` - Successfully loaded plan
/// * `Err(TimelineError::VersionMismatch)` - File version is incompatible
/// * `Err(TimelineError::SerializationError)` - Invalid JSON
/// * `Err(TimelineError::FileError)` - I/O error
pub fn load_plan(path: &Path) -> TimelineResult<PlanDocument> {
    let mut file =
        File::open(path).map_err(|e| TimelineError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| TimelineError::file_error("read", path.display().to_string(), e.to_string()))?;

    let plan = parse_plan(&contents).map_err(|e| match e {
        TimelineError::SerializationError { reason } => TimelineError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), reason),
        },
        other => other,
    })?;

    log::debug!("loaded plan '{}' with {} items from {}", plan.title, plan.items.len(), path.display());
    Ok(plan)
}

/// Write any serializable value as pretty JSON with atomic write semantics.
///
/// The save process:
/// 1. Serialize to JSON
/// 2. Write to a temporary file next to the target
/// 3. Sync to disk (fsync)
/// 4. Rename over the target (atomic on most filesystems)
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> TimelineResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| TimelineError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = tmp_path_for(path);
    let write_tmp = || -> std::io::Result<()> {
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()
    };

    write_tmp().map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        TimelineError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        TimelineError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Save a computed layout (or plan) as JSON.
pub fn save_layout<T: Serialize>(layout: &T, path: &Path) -> TimelineResult<()> {
    save_json(layout, path)?;
    log::info!("wrote layout to {}", path.display());
    Ok(())
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    path.with_extension(extension)
}

/// `(major, minor)` of a dotted version string; a missing minor reads as 0.
fn major_minor(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = match parts.next() {
        Some(part) => part.parse().ok()?,
        None => 0,
    };
    Some((major, minor))
}

/// A plan is readable when its major version matches. While the schema is
/// 0.x, a newer minor is refused as well.
fn validate_version(file_version: &str) -> TimelineResult<()> {
    let compatible = match (major_minor(file_version), major_minor(SCHEMA_VERSION)) {
        (Some((file_major, file_minor)), Some((major, minor))) => {
            file_major == major && (major != 0 || file_minor <= minor)
        }
        _ => false,
    };

    if compatible {
        Ok(())
    } else {
        Err(TimelineError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanRecord;
    use crate::status::{ItemKind, Status};
    use crate::item::ItemId;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_plan_path(name: &str) -> PathBuf {
        temp_dir().join(format!("pathline_test_{}.json", name))
    }

    fn sample_plan() -> PlanDocument {
        let mut plan = PlanDocument::new("Test Plan");
        plan.items.push(PlanRecord {
            id: ItemId(1),
            parent_id: None,
            title: "Attendance".to_string(),
            kind: ItemKind::Goal,
            start_date: "2024-09-01".to_string(),
            end_date: "2025-06-30".to_string(),
            status: Status::AtRisk,
            progress: Some(20.0),
        });
        plan
    }

    #[test]
    fn test_save_and_load_plan() {
        let path = temp_plan_path("plan_roundtrip");
        save_json(&sample_plan(), &path).unwrap();

        let loaded = load_plan(&path).unwrap();
        assert_eq!(loaded, sample_plan());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_plan_path("atomic");
        let tmp_path = tmp_path_for(&path);
        assert_eq!(tmp_path.extension().unwrap(), "tmp");

        save_layout(&sample_plan(), &path).unwrap();
        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_plan(&temp_plan_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json_mentions_path() {
        let path = temp_plan_path("invalid_json");
        fs::write(&path, "{ not json").unwrap();
        match load_plan(&path).unwrap_err() {
            TimelineError::SerializationError { reason } => assert!(reason.contains("pathline_test_invalid_json")),
            other => panic!("unexpected error {:?}", other),
        }
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("banana").is_err());
        assert!(validate_version("0").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("0.x").is_err());
        assert!(validate_version("").is_err());
        assert_eq!(major_minor(" 2.7.1 "), Some((2, 7)));

        let err = parse_plan(r#"{ "version": "3.0.0", "items": [] }"#).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }
}
