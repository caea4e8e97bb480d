//! Error type shared across the crate

use thiserror::Error;

/// Everything that can go wrong while detecting
#[derive(Debug, Error)]
pub enum DetectorError {
    /// A monitoring-only operation was asked of an uncalibrated detector
    #[error("detector not calibrated yet ({collected}/{required} baseline frames)")]
    NotCalibrated { collected: usize, required: usize },

    /// The landmark source failed to produce a frame
    #[error("landmark source error: {0}")]
    Source(String),

    /// A frame carried NaN or infinite landmark coordinates
    #[error("non-finite landmark coordinates in frame at {timestamp_ms} ms")]
    InvalidLandmarks { timestamp_ms: f64 },

    /// A persisted baseline failed validation
    #[error("invalid baseline snapshot: {0}")]
    InvalidSnapshot(String),

    /// Configuration rejected before the detector was built
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The session already shut down after a hard failure
    #[error("session closed")]
    SessionClosed,

    /// Reading or writing a baseline file failed
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_problem() {
        let e = DetectorError::NotCalibrated {
            collected: 12,
            required: 60,
        };
        assert_eq!(
            e.to_string(),
            "detector not calibrated yet (12/60 baseline frames)"
        );

        let e = DetectorError::InvalidLandmarks { timestamp_ms: 500.0 };
        assert!(e.to_string().contains("500"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let e: DetectorError = io.into();
        assert!(matches!(e, DetectorError::Storage(_)));
    }
}
