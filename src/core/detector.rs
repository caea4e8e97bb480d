//! The streaming asymmetry detector
//!
//! Two-phase state machine. Calibration collects a personal baseline of
//! skew scores; monitoring compares a short recent window against that
//! baseline and latches an alert when the deviation persists. A slow
//! drift path feeds stable recent readings back into the baseline so
//! lighting and posture changes do not accumulate into false alarms.

use chrono::Utc;
use log::{debug, info, warn};
use std::fmt;

use crate::core::hysteresis::AlertLatch;
use crate::core::scorer::AsymmetryScorer;
use crate::types::{
    BaselineSnapshot, CalibrationProgress, DetectorConfig, DetectorError, FrameInput, FrameResult,
    MonitorReading, ScoreWindow, SkewScore,
};
use crate::DEVIATION_STD_MULTIPLIER;

// =============================================================================
// PHASE
// =============================================================================

/// Which half of the lifecycle the detector is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorPhase {
    /// Collecting baseline frames
    Calibrating,
    /// Baseline established, watching for deviation
    Monitoring,
}

impl fmt::Display for DetectorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorPhase::Calibrating => write!(f, "CALIBRATING"),
            DetectorPhase::Monitoring => write!(f, "MONITORING"),
        }
    }
}

// =============================================================================
// DETECTOR
// =============================================================================

/// Streaming facial-asymmetry detector
pub struct AsymmetryDetector {
    config: DetectorConfig,
    scorer: AsymmetryScorer,
    phase: DetectorPhase,
    baseline: ScoreWindow,
    recent: ScoreWindow,
    latch: AlertLatch,
    frames_processed: u64,
}

impl AsymmetryDetector {
    /// Detector with default tuning
    pub fn new() -> Self {
        Self::from_config(DetectorConfig::default())
    }

    /// Detector with custom tuning, rejected if the config is unusable
    pub fn with_config(config: DetectorConfig) -> Result<Self, DetectorError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: DetectorConfig) -> Self {
        Self {
            scorer: AsymmetryScorer::new(),
            phase: DetectorPhase::Calibrating,
            baseline: ScoreWindow::new(config.baseline_frames),
            recent: ScoreWindow::new(config.recent_frames),
            latch: AlertLatch::new(config.persist_frames),
            frames_processed: 0,
            config,
        }
    }

    /// Process one frame and report its verdict
    ///
    /// Frames are atomic: a rejected frame (non-finite landmarks) leaves
    /// every piece of detector state exactly as it was.
    pub fn process_frame(
        &mut self,
        input: FrameInput,
        timestamp_ms: f64,
    ) -> Result<FrameResult, DetectorError> {
        let landmarks = match input {
            FrameInput::NotReady => {
                self.frames_processed += 1;
                return Ok(FrameResult::NoVideo);
            }
            FrameInput::NoFace => {
                self.frames_processed += 1;
                return Ok(FrameResult::NoFace);
            }
            FrameInput::Face(landmarks) => landmarks,
        };

        if !landmarks.is_finite() {
            return Err(DetectorError::InvalidLandmarks { timestamp_ms });
        }

        self.frames_processed += 1;
        let skew = self.scorer.analyze(&landmarks);

        let result = match self.phase {
            DetectorPhase::Calibrating => self.calibrate_frame(skew, timestamp_ms),
            DetectorPhase::Monitoring => self.monitor_frame(skew, timestamp_ms),
        };
        Ok(result)
    }

    /// Discard everything and return to calibration
    pub fn reset(&mut self) {
        self.phase = DetectorPhase::Calibrating;
        self.baseline.clear();
        self.recent.clear();
        self.latch.reset();
        self.frames_processed = 0;
        info!("detector reset, recalibrating");
    }

    // =========================================================================
    // PHASE HANDLERS
    // =========================================================================

    fn calibrate_frame(&mut self, skew: SkewScore, timestamp_ms: f64) -> FrameResult {
        self.baseline.push(skew.value);
        let collected = self.baseline.len();
        let required = self.config.baseline_frames;

        // The completing frame still reports as calibrating at 100%;
        // monitoring starts on the next frame
        if collected >= required {
            self.phase = DetectorPhase::Monitoring;
            info!(
                "calibration complete: {} frames, baseline mean {:.4}, std {:.4}",
                collected,
                self.baseline.mean(),
                self.baseline.std_dev()
            );
        }

        FrameResult::Calibrating(CalibrationProgress {
            timestamp_ms,
            progress: collected as f64 / required as f64,
            frames_collected: collected,
            frames_required: required,
            skew,
        })
    }

    fn monitor_frame(&mut self, skew: SkewScore, timestamp_ms: f64) -> FrameResult {
        self.recent.push(skew.value);

        let baseline_mean = self.baseline.mean();
        let recent_mean = self.recent.mean();
        let delta = (recent_mean - baseline_mean).abs();
        let threshold = self.threshold();

        // No deviation verdict until the recent window is full; a
        // half-filled mean is too noisy to act on
        let window_full = self.recent.is_full();
        let deviant = window_full && delta > threshold;

        let was_alerted = self.latch.is_alerted();
        let alerted = self.latch.observe(deviant);
        if alerted && !was_alerted {
            warn!(
                "asymmetry alert latched at {} ms: delta {:.4} over threshold {:.4}",
                timestamp_ms, delta, threshold
            );
        }

        // Absorb slow posture and lighting change into the baseline, but
        // only while clearly stable and never once alerted
        if !alerted && window_full && delta < threshold / self.config.drift_stability_divisor {
            self.baseline.push(recent_mean);
            debug!("baseline drift: absorbed recent mean {:.4}", recent_mean);
        }

        let reading = MonitorReading {
            timestamp_ms,
            recent_mean,
            baseline_mean,
            delta,
            threshold,
            persist_count: self.latch.persist_count(),
            skew,
        };

        if alerted {
            FrameResult::Alert(reading)
        } else {
            FrameResult::Ok(reading)
        }
    }

    /// Deviation threshold in effect right now
    ///
    /// Scales with baseline noise, floored so a rock-steady baseline does
    /// not make every micro-expression an alert.
    fn threshold(&self) -> f64 {
        self.config
            .threshold_floor
            .max(DEVIATION_STD_MULTIPLIER * self.baseline.std_dev())
    }

    // =========================================================================
    // BASELINE PERSISTENCE
    // =========================================================================

    /// Capture the current baseline for storage
    pub fn baseline_snapshot(&self) -> Result<BaselineSnapshot, DetectorError> {
        if !self.is_calibrated() {
            return Err(DetectorError::NotCalibrated {
                collected: self.baseline.len(),
                required: self.config.baseline_frames,
            });
        }
        Ok(BaselineSnapshot {
            scores: self.baseline.to_vec(),
            mean: self.baseline.mean(),
            std_dev: self.baseline.std_dev(),
            frames: self.baseline.len(),
            captured_at: Utc::now(),
        })
    }

    /// Restore a previously captured baseline and go straight to monitoring
    ///
    /// If the snapshot holds more scores than the baseline window, the most
    /// recent ones win. Alert state and the recent window are cleared.
    pub fn load_baseline(&mut self, snapshot: &BaselineSnapshot) -> Result<(), DetectorError> {
        snapshot.validate()?;

        self.baseline.clear();
        let skip = snapshot
            .scores
            .len()
            .saturating_sub(self.config.baseline_frames);
        for &score in snapshot.scores.iter().skip(skip) {
            self.baseline.push(score);
        }
        self.recent.clear();
        self.latch.reset();
        self.phase = DetectorPhase::Monitoring;

        info!(
            "baseline restored: {} frames, mean {:.4}, std {:.4}",
            self.baseline.len(),
            self.baseline.mean(),
            self.baseline.std_dev()
        );
        Ok(())
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn phase(&self) -> DetectorPhase {
        self.phase
    }

    pub fn is_calibrated(&self) -> bool {
        self.phase == DetectorPhase::Monitoring
    }

    pub fn is_alerted(&self) -> bool {
        self.latch.is_alerted()
    }

    pub fn persist_count(&self) -> u32 {
        self.latch.persist_count()
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Calibration completion in [0,1]
    pub fn calibration_progress(&self) -> f64 {
        if self.is_calibrated() {
            1.0
        } else {
            self.baseline.len() as f64 / self.config.baseline_frames as f64
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}

impl Default for AsymmetryDetector {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
