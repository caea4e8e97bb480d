//! Landmark sources
//!
//! The detector does not care where landmarks come from. A source hands it
//! timestamped frames in order: a JSONL replay for recorded sessions, a
//! synthetic generator for demos and tests, or anything else implementing
//! the trait.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::types::{DetectorError, FrameInput, FrameLandmarks, LandmarkPoint};

// =============================================================================
// FRAME RECORD
// =============================================================================

/// One frame on the wire: a timestamp plus the frame payload
///
/// Serialized flat, so a face frame reads
/// `{"timestamp_ms":33,"kind":"face","eye_left":...}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Source timestamp, milliseconds
    pub timestamp_ms: f64,
    #[serde(flatten)]
    pub input: FrameInput,
}

// =============================================================================
// SOURCE TRAIT
// =============================================================================

/// Anything that hands the detector frames in order
pub trait LandmarkSource {
    /// Produce the next frame, `None` when the stream ends
    fn next_frame(&mut self) -> Result<Option<FrameRecord>, DetectorError>;
}

// =============================================================================
// REPLAY SOURCE
// =============================================================================

/// Replays a prerecorded sequence of frame records
pub struct ReplaySource {
    records: std::vec::IntoIter<FrameRecord>,
}

impl ReplaySource {
    pub fn from_records(records: Vec<FrameRecord>) -> Self {
        Self {
            records: records.into_iter(),
        }
    }

    /// Parse one JSON frame record per line, skipping blank lines
    pub fn from_jsonl<R: BufRead>(reader: R) -> Result<Self, DetectorError> {
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let record: FrameRecord = serde_json::from_str(trimmed)?;
            records.push(record);
        }
        Ok(Self::from_records(records))
    }
}

impl LandmarkSource for ReplaySource {
    fn next_frame(&mut self) -> Result<Option<FrameRecord>, DetectorError> {
        Ok(self.records.next())
    }
}

// =============================================================================
// SYNTHETIC SOURCE
// =============================================================================

/// Deterministic synthetic feed for demos and tests
///
/// Emits a short not-ready warmup, then a level face with slight jitter at
/// 30 fps. From `droop_at` onward the right mouth corner sags by `droop`.
pub struct SyntheticSource {
    frames_total: u64,
    emitted: u64,
    warmup_frames: u64,
    droop_at: Option<u64>,
    droop: f64,
    interval_ms: f64,
    rng_state: u64,
}

impl SyntheticSource {
    pub fn new(frames_total: u64) -> Self {
        Self {
            frames_total,
            emitted: 0,
            warmup_frames: 3,
            droop_at: None,
            droop: 0.0,
            interval_ms: 1000.0 / 30.0,
            rng_state: 0x5eed_cafe,
        }
    }

    /// Sag the right mouth corner by `droop` from frame `at` onward
    pub fn with_droop(mut self, at: u64, droop: f64) -> Self {
        self.droop_at = Some(at);
        self.droop = droop;
        self
    }

    /// Deterministic jitter in [-amplitude, amplitude], LCG-driven
    fn jitter(&mut self, amplitude: f64) -> f64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let unit = (self.rng_state >> 11) as f64 / (1u64 << 53) as f64;
        (unit * 2.0 - 1.0) * amplitude
    }
}

impl LandmarkSource for SyntheticSource {
    fn next_frame(&mut self) -> Result<Option<FrameRecord>, DetectorError> {
        if self.emitted >= self.frames_total {
            return Ok(None);
        }
        let n = self.emitted;
        self.emitted += 1;
        let timestamp_ms = n as f64 * self.interval_ms;

        if n < self.warmup_frames {
            return Ok(Some(FrameRecord {
                timestamp_ms,
                input: FrameInput::NotReady,
            }));
        }

        let droop = match self.droop_at {
            Some(at) if n >= at => self.droop,
            _ => 0.0,
        };
        let j = self.jitter(0.002);
        let landmarks = FrameLandmarks::new(
            LandmarkPoint::new(0.62, 0.40 + j),
            LandmarkPoint::new(0.38, 0.40 - j),
            LandmarkPoint::new(0.44, 0.62),
            LandmarkPoint::new(0.56, 0.62 + droop),
        );
        Ok(Some(FrameRecord {
            timestamp_ms,
            input: FrameInput::Face(landmarks),
        }))
    }
}

// =============================================================================
// TESTS
// =============================================================================
