//! droopwatch: streaming facial-asymmetry detection
//!
//! Pipeline: landmark source → skew scorer → baseline/recent windows →
//! hysteresis → per-frame result

pub mod core;
pub mod types;

// =============================================================================
// DETECTION PARAMETERS - defaults for DetectorConfig
// =============================================================================

/// Frames collected to establish the personal baseline
pub const BASELINE_FRAMES: usize = 60;

/// Recent frames averaged for the live comparison
pub const RECENT_FRAMES: usize = 10;

/// Net deviant frames required before the alert latches
pub const PERSIST_FRAMES: u32 = 8;

/// Minimum deviation threshold
/// Guards against false positives when the baseline variance is near zero
pub const THRESHOLD_FLOOR: f64 = 0.07;

/// Baseline standard-deviation multiplier for the deviation threshold
pub const DEVIATION_STD_MULTIPLIER: f64 = 3.0;

/// Divisor applied to the threshold for the adaptive-drift stability test
/// Half the alert threshold: the baseline only drifts while clearly stable
pub const DRIFT_STABILITY_DIVISOR: f64 = 2.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "0.1.0";
