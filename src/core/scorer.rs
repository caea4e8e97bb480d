//! Skew scoring from raw landmarks
//!
//! The score is the vertical offset between the mouth corners measured in
//! eye-aligned space, divided by the inter-eye distance. Aligning to the
//! eye axis cancels head roll; dividing by eye distance cancels camera
//! distance. What remains is genuine facial asymmetry.

use crate::types::{FrameLandmarks, SkewScore};

/// Computes per-frame skew scores
#[derive(Debug, Clone, Default)]
pub struct AsymmetryScorer;

impl AsymmetryScorer {
    pub fn new() -> Self {
        Self
    }

    /// Full measurement with the geometric breakdown
    pub fn analyze(&self, landmarks: &FrameLandmarks) -> SkewScore {
        let eye_dx = landmarks.eye_left.x - landmarks.eye_right.x;
        let eye_dy = landmarks.eye_left.y - landmarks.eye_right.y;
        let eye_angle = eye_dy.atan2(eye_dx);

        // Degenerate frames (coincident eyes) fall back to unit scale so
        // the score stays finite
        let raw_distance = eye_dx.hypot(eye_dy);
        let eye_distance = if raw_distance == 0.0 { 1.0 } else { raw_distance };

        let mouth_dx = landmarks.mouth_right.x - landmarks.mouth_left.x;
        let mouth_dy = landmarks.mouth_right.y - landmarks.mouth_left.y;

        // Rotate the mouth vector by -eye_angle to cancel head roll
        let (sin_neg, cos_neg) = (-eye_angle).sin_cos();
        let mouth_rise = mouth_dx * sin_neg + mouth_dy * cos_neg;

        SkewScore {
            value: mouth_rise / eye_distance,
            eye_angle,
            eye_distance,
            mouth_rise,
        }
    }

    /// Just the skew value
    pub fn score(&self, landmarks: &FrameLandmarks) -> f64 {
        self.analyze(landmarks).value
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LandmarkPoint;

    fn level_face() -> FrameLandmarks {
        FrameLandmarks::new(
            LandmarkPoint::new(0.6, 0.4),
            LandmarkPoint::new(0.4, 0.4),
            LandmarkPoint::new(0.45, 0.6),
            LandmarkPoint::new(0.55, 0.6),
        )
    }

    fn face_with_right_droop(droop: f64) -> FrameLandmarks {
        let mut lm = level_face();
        lm.mouth_right.y += droop;
        lm
    }

    fn rotate(p: LandmarkPoint, theta: f64, cx: f64, cy: f64) -> LandmarkPoint {
        let (x, y) = (p.x - cx, p.y - cy);
        let (sin, cos) = theta.sin_cos();
        LandmarkPoint::new(cx + x * cos - y * sin, cy + x * sin + y * cos)
    }

    fn rotate_face(lm: &FrameLandmarks, theta: f64) -> FrameLandmarks {
        FrameLandmarks::new(
            rotate(lm.eye_left, theta, 0.5, 0.5),
            rotate(lm.eye_right, theta, 0.5, 0.5),
            rotate(lm.mouth_left, theta, 0.5, 0.5),
            rotate(lm.mouth_right, theta, 0.5, 0.5),
        )
    }

    #[test]
    fn test_level_symmetric_face_scores_zero() {
        let scorer = AsymmetryScorer::new();
        assert_eq!(scorer.score(&level_face()), 0.0);
    }

    #[test]
    fn test_droop_direction_sets_sign() {
        let scorer = AsymmetryScorer::new();

        // Right corner sagging (y grows downward) raises the score
        assert!(scorer.score(&face_with_right_droop(0.05)) > 0.0);

        // Left corner sagging lowers it
        let mut lm = level_face();
        lm.mouth_left.y += 0.05;
        assert!(scorer.score(&lm) < 0.0);
    }

    #[test]
    fn test_expected_magnitude() {
        // Droop 0.05 over eye distance 0.2 is a skew of 0.25
        let scorer = AsymmetryScorer::new();
        let score = scorer.score(&face_with_right_droop(0.05));
        assert!((score - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_head_roll_does_not_change_score() {
        let scorer = AsymmetryScorer::new();
        let lm = face_with_right_droop(0.04);
        let flat = scorer.score(&lm);

        for theta in [-0.7, -0.3, 0.1, 0.45, 1.2] {
            let rolled = scorer.score(&rotate_face(&lm, theta));
            assert!(
                (rolled - flat).abs() < 1e-9,
                "score changed under roll {}: {} vs {}",
                theta,
                rolled,
                flat
            );
        }
    }

    #[test]
    fn test_camera_distance_does_not_change_score() {
        let scorer = AsymmetryScorer::new();
        let near = face_with_right_droop(0.04);
        let far = FrameLandmarks::new(
            LandmarkPoint::new(near.eye_left.x * 0.25, near.eye_left.y * 0.25),
            LandmarkPoint::new(near.eye_right.x * 0.25, near.eye_right.y * 0.25),
            LandmarkPoint::new(near.mouth_left.x * 0.25, near.mouth_left.y * 0.25),
            LandmarkPoint::new(near.mouth_right.x * 0.25, near.mouth_right.y * 0.25),
        );
        assert!((scorer.score(&near) - scorer.score(&far)).abs() < 1e-12);
    }

    #[test]
    fn test_coincident_eyes_stay_finite() {
        let scorer = AsymmetryScorer::new();
        let p = LandmarkPoint::new(0.5, 0.4);
        let lm = FrameLandmarks::new(
            p,
            p,
            LandmarkPoint::new(0.45, 0.6),
            LandmarkPoint::new(0.55, 0.65),
        );
        let score = scorer.analyze(&lm);
        assert!(score.value.is_finite());
        assert_eq!(score.eye_distance, 1.0);
    }

    #[test]
    fn test_analyze_breakdown_is_consistent() {
        let scorer = AsymmetryScorer::new();
        let s = scorer.analyze(&face_with_right_droop(0.03));
        assert!((s.value - s.mouth_rise / s.eye_distance).abs() < 1e-15);
    }

    #[test]
    fn test_deterministic() {
        let scorer = AsymmetryScorer::new();
        let lm = face_with_right_droop(0.02);
        assert_eq!(scorer.score(&lm), scorer.score(&lm));
    }
}
