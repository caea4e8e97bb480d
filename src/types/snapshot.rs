//! Baseline snapshot for persistence across sessions
//!
//! A completed calibration can be captured, written to disk, and restored
//! into a fresh detector so a known subject skips recalibration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::error::DetectorError;

/// A captured baseline: the calibration scores plus their summary stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineSnapshot {
    /// Baseline skew scores, oldest first
    pub scores: Vec<f64>,
    /// Mean of `scores`
    pub mean: f64,
    /// Population standard deviation of `scores`
    pub std_dev: f64,
    /// Number of frames that produced this baseline
    pub frames: usize,
    /// When the snapshot was captured
    pub captured_at: DateTime<Utc>,
}

impl BaselineSnapshot {
    /// Check internal consistency before the snapshot is trusted
    ///
    /// A snapshot restored from disk may come from an older run or a
    /// different tool; reject anything that would poison the detector.
    pub fn validate(&self) -> Result<(), DetectorError> {
        if self.scores.is_empty() {
            return Err(DetectorError::InvalidSnapshot(
                "snapshot has no baseline scores".to_string(),
            ));
        }
        if let Some(bad) = self.scores.iter().find(|s| !s.is_finite()) {
            return Err(DetectorError::InvalidSnapshot(format!(
                "non-finite baseline score: {}",
                bad
            )));
        }
        if !self.mean.is_finite() || !self.std_dev.is_finite() {
            return Err(DetectorError::InvalidSnapshot(
                "non-finite summary statistics".to_string(),
            ));
        }
        if self.std_dev < 0.0 {
            return Err(DetectorError::InvalidSnapshot(format!(
                "negative standard deviation: {}",
                self.std_dev
            )));
        }
        if self.frames != self.scores.len() {
            return Err(DetectorError::InvalidSnapshot(format!(
                "frame count {} does not match {} stored scores",
                self.frames,
                self.scores.len()
            )));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
