//! Session driver
//!
//! Pairs a landmark source with a detector and pulls frames through one at
//! a time. A hard failure on either side closes the session; a closed
//! session refuses further frames rather than running on half-broken state.

use log::error;

use crate::core::detector::AsymmetryDetector;
use crate::core::source::LandmarkSource;
use crate::types::{DetectorError, FrameResult};

/// Drives frames from a source through a detector until the stream ends
pub struct MonitorSession<S: LandmarkSource> {
    source: S,
    detector: AsymmetryDetector,
    closed: bool,
}

impl<S: LandmarkSource> MonitorSession<S> {
    pub fn new(source: S, detector: AsymmetryDetector) -> Self {
        Self {
            source,
            detector,
            closed: false,
        }
    }

    /// Pull one frame through the detector
    ///
    /// `Ok(None)` means the source is exhausted.
    pub fn advance(&mut self) -> Result<Option<FrameResult>, DetectorError> {
        if self.closed {
            return Err(DetectorError::SessionClosed);
        }

        let record = match self.source.next_frame() {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(None),
            Err(e) => {
                self.closed = true;
                error!("session closed, source failed: {}", e);
                return Err(e);
            }
        };

        match self.detector.process_frame(record.input, record.timestamp_ms) {
            Ok(result) => Ok(Some(result)),
            Err(e) => {
                self.closed = true;
                error!("session closed, frame rejected: {}", e);
                Err(e)
            }
        }
    }

    pub fn detector(&self) -> &AsymmetryDetector {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut AsymmetryDetector {
        &mut self.detector
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Tear down the session, keeping the detector state
    pub fn into_detector(self) -> AsymmetryDetector {
        self.detector
    }
}

// =============================================================================
// TESTS
// =============================================================================
