//! Fixed-capacity sliding window over skew scores

use std::collections::VecDeque;

/// Sliding window that keeps the most recent `capacity` scores
///
/// Pushing past capacity evicts the oldest entry. Statistics are defined
/// for any fill level; an empty window reports zero for both.
#[derive(Debug, Clone)]
pub struct ScoreWindow {
    scores: VecDeque<f64>,
    capacity: usize,
}

impl ScoreWindow {
    /// Create an empty window with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            scores: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a score, evicting the oldest if the window is full
    pub fn push(&mut self, score: f64) {
        if self.scores.len() == self.capacity {
            self.scores.pop_front();
        }
        self.scores.push_back(score);
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Window holds exactly `capacity` scores
    pub fn is_full(&self) -> bool {
        self.scores.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Arithmetic mean, 0.0 when empty
    pub fn mean(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.iter().sum::<f64>() / self.scores.len() as f64
    }

    /// Population standard deviation, 0.0 when empty
    pub fn std_dev(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .scores
            .iter()
            .map(|s| (s - mean).powi(2))
            .sum::<f64>()
            / self.scores.len() as f64;
        variance.sqrt()
    }

    /// Drop all scores, keeping the capacity
    pub fn clear(&mut self) {
        self.scores.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.scores.iter()
    }

    /// Copy out the scores, oldest first
    pub fn to_vec(&self) -> Vec<f64> {
        self.scores.iter().copied().collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
