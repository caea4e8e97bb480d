//! Per-frame result types emitted by the detector
//!
//! Every processed frame yields exactly one `FrameResult`. The variant
//! carries the payload that makes sense for that status: calibration
//! progress while the baseline is being collected, a monitor reading once
//! the detector is live.

use serde::{Deserialize, Serialize};

use crate::types::score::SkewScore;
use crate::types::status::FrameStatus;

// =============================================================================
// PAYLOADS
// =============================================================================

/// Progress report while the baseline is being collected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProgress {
    /// Source timestamp of this frame, milliseconds
    pub timestamp_ms: f64,
    /// Completion fraction in [0,1], including this frame
    pub progress: f64,
    /// Baseline frames collected so far, including this frame
    pub frames_collected: usize,
    /// Baseline frames required before monitoring starts
    pub frames_required: usize,
    /// This frame's skew measurement with its geometric breakdown
    pub skew: SkewScore,
}

/// Live comparison once the baseline exists
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonitorReading {
    /// Source timestamp of this frame, milliseconds
    pub timestamp_ms: f64,
    /// Mean skew over the recent window
    pub recent_mean: f64,
    /// Mean skew of the calibrated baseline
    pub baseline_mean: f64,
    /// Absolute difference between the two means
    pub delta: f64,
    /// Deviation threshold in effect this frame
    pub threshold: f64,
    /// Net deviant frames accumulated by the hysteresis counter
    pub persist_count: u32,
    /// This frame's skew measurement with its geometric breakdown
    pub skew: SkewScore,
}

// =============================================================================
// FRAME RESULT
// =============================================================================

/// The detector's verdict for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FrameResult {
    /// Source not ready
    NoVideo,
    /// No face in frame; monitoring state is held, not advanced
    NoFace,
    /// Baseline collection in progress
    Calibrating(CalibrationProgress),
    /// Monitoring, deviation below threshold or not yet persistent
    Ok(MonitorReading),
    /// Sustained deviation latched
    Alert(MonitorReading),
}

impl FrameResult {
    /// The coarse status of this result
    pub fn status(&self) -> FrameStatus {
        match self {
            FrameResult::NoVideo => FrameStatus::NoVideo,
            FrameResult::NoFace => FrameStatus::NoFace,
            FrameResult::Calibrating(_) => FrameStatus::Calibrating,
            FrameResult::Ok(_) => FrameStatus::Ok,
            FrameResult::Alert(_) => FrameStatus::Alert,
        }
    }

    /// Monitor reading, if this frame was monitored
    pub fn reading(&self) -> Option<&MonitorReading> {
        match self {
            FrameResult::Ok(r) | FrameResult::Alert(r) => Some(r),
            _ => None,
        }
    }

    /// Calibration progress, if this frame calibrated
    pub fn progress(&self) -> Option<&CalibrationProgress> {
        match self {
            FrameResult::Calibrating(p) => Some(p),
            _ => None,
        }
    }

    /// This frame's skew measurement, whenever a face was scored
    pub fn skew(&self) -> Option<&SkewScore> {
        match self {
            FrameResult::Calibrating(p) => Some(&p.skew),
            FrameResult::Ok(r) | FrameResult::Alert(r) => Some(&r.skew),
            _ => None,
        }
    }

    /// True only for the latched-alert variant
    pub fn is_alert(&self) -> bool {
        matches!(self, FrameResult::Alert(_))
    }

    /// A face was present this frame
    pub fn face_detected(&self) -> bool {
        !matches!(self, FrameResult::NoVideo | FrameResult::NoFace)
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Human-readable colored line for interactive terminals
    pub fn to_terminal_string(&self) -> String {
        let status = self.status();
        let body = match self {
            FrameResult::NoVideo => "waiting for video".to_string(),
            FrameResult::NoFace => "no face detected".to_string(),
            FrameResult::Calibrating(p) => format!(
                "baseline {:>3.0}% ({}/{})",
                p.progress * 100.0,
                p.frames_collected,
                p.frames_required
            ),
            FrameResult::Ok(r) | FrameResult::Alert(r) => format!(
                "delta {:+.4} (threshold {:.4}, persist {})",
                r.delta, r.threshold, r.persist_count
            ),
        };
        format!(
            "{} {}{}{} {}",
            status.emoji(),
            status.color_code(),
            status,
            FrameStatus::color_reset(),
            body
        )
    }

    /// Pipe-delimited line for scripts and log scraping
    ///
    /// Layout: `STATUS|timestamp|field=value|...` with fields fixed per status.
    pub fn to_parseable_string(&self) -> String {
        match self {
            FrameResult::NoVideo => "NO_VIDEO".to_string(),
            FrameResult::NoFace => "NO_FACE".to_string(),
            FrameResult::Calibrating(p) => format!(
                "CALIBRATING|{:.0}|progress={:.2}|frames={}/{}",
                p.timestamp_ms, p.progress, p.frames_collected, p.frames_required
            ),
            FrameResult::Ok(r) => format!(
                "OK|{:.0}|delta={:.4}|threshold={:.4}|persist={}",
                r.timestamp_ms, r.delta, r.threshold, r.persist_count
            ),
            FrameResult::Alert(r) => format!(
                "ALERT|{:.0}|delta={:.4}|threshold={:.4}|persist={}",
                r.timestamp_ms, r.delta, r.threshold, r.persist_count
            ),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
