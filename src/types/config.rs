//! Detector tuning parameters

use serde::{Deserialize, Serialize};

use crate::types::error::DetectorError;
use crate::{
    BASELINE_FRAMES, DRIFT_STABILITY_DIVISOR, PERSIST_FRAMES, RECENT_FRAMES, THRESHOLD_FLOOR,
};

/// Tunable parameters for one detector instance
///
/// Every field has a default matching the crate-level constants, so a
/// partial JSON config deserializes with the rest filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Frames collected to establish the baseline
    pub baseline_frames: usize,
    /// Recent frames averaged for the live comparison
    pub recent_frames: usize,
    /// Net deviant frames required before the alert latches
    pub persist_frames: u32,
    /// Minimum deviation threshold
    pub threshold_floor: f64,
    /// Divisor applied to the threshold for the adaptive-drift test
    pub drift_stability_divisor: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            baseline_frames: BASELINE_FRAMES,
            recent_frames: RECENT_FRAMES,
            persist_frames: PERSIST_FRAMES,
            threshold_floor: THRESHOLD_FLOOR,
            drift_stability_divisor: DRIFT_STABILITY_DIVISOR,
        }
    }
}

impl DetectorConfig {
    /// Trigger-happy preset: latches sooner, on smaller deviations
    pub fn strict() -> Self {
        Self {
            persist_frames: 5,
            threshold_floor: 0.05,
            ..Self::default()
        }
    }

    /// Conservative preset: needs a longer, larger deviation
    pub fn relaxed() -> Self {
        Self {
            persist_frames: 12,
            threshold_floor: 0.10,
            ..Self::default()
        }
    }

    /// Reject configurations the detector cannot run with
    pub fn validate(&self) -> Result<(), DetectorError> {
        if self.baseline_frames == 0 {
            return Err(DetectorError::InvalidConfig(
                "baseline_frames must be at least 1".to_string(),
            ));
        }
        if self.recent_frames == 0 {
            return Err(DetectorError::InvalidConfig(
                "recent_frames must be at least 1".to_string(),
            ));
        }
        if self.persist_frames == 0 {
            return Err(DetectorError::InvalidConfig(
                "persist_frames must be at least 1".to_string(),
            ));
        }
        if !self.threshold_floor.is_finite() || self.threshold_floor < 0.0 {
            return Err(DetectorError::InvalidConfig(format!(
                "threshold_floor must be finite and non-negative, got {}",
                self.threshold_floor
            )));
        }
        if !self.drift_stability_divisor.is_finite() || self.drift_stability_divisor <= 0.0 {
            return Err(DetectorError::InvalidConfig(format!(
                "drift_stability_divisor must be finite and positive, got {}",
                self.drift_stability_divisor
            )));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
