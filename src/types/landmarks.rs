//! Facial landmark input types
//!
//! The landmark source reports four outer-feature points per frame in
//! normalized [0,1]×[0,1] frame coordinates (y grows downward).

use serde::{Deserialize, Serialize};

/// A single 2-D landmark in normalized frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
}

impl LandmarkPoint {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite (not NaN, not infinite)
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The four landmarks the detector consumes each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameLandmarks {
    /// Outer corner of the left eye
    pub eye_left: LandmarkPoint,
    /// Outer corner of the right eye
    pub eye_right: LandmarkPoint,
    /// Left mouth corner
    pub mouth_left: LandmarkPoint,
    /// Right mouth corner
    pub mouth_right: LandmarkPoint,
}

impl FrameLandmarks {
    /// Create from the four points
    pub const fn new(
        eye_left: LandmarkPoint,
        eye_right: LandmarkPoint,
        mouth_left: LandmarkPoint,
        mouth_right: LandmarkPoint,
    ) -> Self {
        Self {
            eye_left,
            eye_right,
            mouth_left,
            mouth_right,
        }
    }

    /// All eight coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.eye_left.is_finite()
            && self.eye_right.is_finite()
            && self.mouth_left.is_finite()
            && self.mouth_right.is_finite()
    }
}

/// What the landmark source produced for one frame
///
/// `NotReady` and `NoFace` are ordinary inputs, not failures: the first is
/// expected while the source warms up, the second whenever the subject
/// leaves the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameInput {
    /// Source not ready (no frame available yet)
    NotReady,
    /// Source ready, no face detected this frame
    NoFace,
    /// One tracked face with its four landmarks
    Face(FrameLandmarks),
}

impl FrameInput {
    /// Landmarks if a face was detected
    pub fn face(&self) -> Option<&FrameLandmarks> {
        match self {
            FrameInput::Face(lm) => Some(lm),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
