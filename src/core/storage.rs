//! Baseline persistence
//!
//! Snapshots are stored as pretty-printed JSON so a saved baseline stays
//! inspectable and hand-editable. Both directions validate: a snapshot is
//! checked before it hits disk and again after it comes back.

use std::fs;
use std::path::Path;

use log::info;

use crate::types::{BaselineSnapshot, DetectorError};

/// Write a snapshot to disk, creating parent directories as needed
pub fn save_baseline<P: AsRef<Path>>(
    snapshot: &BaselineSnapshot,
    path: P,
) -> Result<(), DetectorError> {
    snapshot.validate()?;
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    info!("baseline saved to {}", path.display());
    Ok(())
}

/// Read a snapshot back, validating before returning it
pub fn load_baseline<P: AsRef<Path>>(path: P) -> Result<BaselineSnapshot, DetectorError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let snapshot: BaselineSnapshot = serde_json::from_str(&json)?;
    snapshot.validate()?;
    info!(
        "baseline loaded from {} ({} frames)",
        path.display(),
        snapshot.frames
    );
    Ok(snapshot)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("droopwatch_{}_{}.json", name, std::process::id()))
    }

    fn sample() -> BaselineSnapshot {
        BaselineSnapshot {
            scores: vec![0.01, -0.02, 0.015, 0.0],
            mean: 0.00125,
            std_dev: 0.0129,
            frames: 4,
            captured_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let path = temp_path("round_trip");
        let snapshot = sample();

        save_baseline(&snapshot, &path).unwrap();
        let loaded = load_baseline(&path).unwrap();
        assert_eq!(loaded, snapshot);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = std::env::temp_dir().join(format!("droopwatch_nested_{}", std::process::id()));
        let path = dir.join("deep").join("baseline.json");

        save_baseline(&sample(), &path).unwrap();
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_rejects_invalid_snapshot() {
        let mut bad = sample();
        bad.frames = 99;
        let path = temp_path("invalid_save");

        assert!(matches!(
            save_baseline(&bad, &path),
            Err(DetectorError::InvalidSnapshot(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_missing_file_is_storage_error() {
        let path = temp_path("does_not_exist");
        assert!(matches!(
            load_baseline(&path),
            Err(DetectorError::Storage(_))
        ));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let path = temp_path("malformed");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_baseline(&path),
            Err(DetectorError::Serialize(_))
        ));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_inconsistent_snapshot() {
        let path = temp_path("inconsistent");
        let mut bad = sample();
        bad.frames = 99;
        // Bypass save-side validation by writing the JSON directly
        fs::write(&path, serde_json::to_string(&bad).unwrap()).unwrap();

        assert!(matches!(
            load_baseline(&path),
            Err(DetectorError::InvalidSnapshot(_))
        ));

        let _ = fs::remove_file(&path);
    }
}
