//! Skew score with its geometric breakdown

use serde::{Deserialize, Serialize};

/// One frame's asymmetry measurement
///
/// `value` is the signed, scale-normalized mouth skew. The remaining fields
/// expose the intermediate geometry for logging and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkewScore {
    /// Signed skew: vertical mouth-corner offset in eye-aligned space,
    /// divided by the inter-eye distance
    pub value: f64,
    /// Head roll angle in radians, from the inter-eye vector
    pub eye_angle: f64,
    /// Inter-eye distance used for scale normalization
    pub eye_distance: f64,
    /// Raw vertical mouth-corner offset after roll removal
    pub mouth_rise: f64,
}

impl SkewScore {
    /// One-line geometric breakdown for verbose terminal output
    pub fn to_breakdown_string(&self) -> String {
        format!(
            "skew={:+.4} | angle={:+.4}rad | eye_dist={:.4} | rise={:+.4}",
            self.value, self.eye_angle, self.eye_distance, self.mouth_rise
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_serializes_all_fields() {
        let score = SkewScore {
            value: 0.05,
            eye_angle: 0.01,
            eye_distance: 0.2,
            mouth_rise: 0.01,
        };
        let json = serde_json::to_string(&score).unwrap();
        assert!(json.contains("\"value\""));
        assert!(json.contains("\"eye_angle\""));
        assert!(json.contains("\"eye_distance\""));
        assert!(json.contains("\"mouth_rise\""));
    }

    #[test]
    fn test_breakdown_string_layout() {
        let score = SkewScore {
            value: 0.125,
            eye_angle: 0.0,
            eye_distance: 0.24,
            mouth_rise: 0.03,
        };
        assert_eq!(
            score.to_breakdown_string(),
            "skew=+0.1250 | angle=+0.0000rad | eye_dist=0.2400 | rise=+0.0300"
        );
    }
}
