//! Alert hysteresis counter
//!
//! One deviant frame means nothing; eight net deviant frames mean a
//! sustained change. The counter climbs on deviant frames, decays on clean
//! ones, and latches once it reaches the persistence requirement.

/// Latching persistence counter
#[derive(Debug, Clone)]
pub struct AlertLatch {
    persist: u32,
    alerted: bool,
    persist_frames: u32,
}

impl AlertLatch {
    pub fn new(persist_frames: u32) -> Self {
        Self {
            persist: 0,
            alerted: false,
            persist_frames,
        }
    }

    /// Feed one frame's verdict; returns the latched alert state
    ///
    /// The counter saturates at `persist_frames` going up and at zero going
    /// down. Once latched, the alert never clears short of a reset.
    pub fn observe(&mut self, deviant: bool) -> bool {
        if deviant {
            if self.persist < self.persist_frames {
                self.persist += 1;
            }
            if self.persist >= self.persist_frames {
                self.alerted = true;
            }
        } else {
            self.persist = self.persist.saturating_sub(1);
        }
        self.alerted
    }

    pub fn persist_count(&self) -> u32 {
        self.persist
    }

    pub fn is_alerted(&self) -> bool {
        self.alerted
    }

    /// Clear the counter and the latch
    pub fn reset(&mut self) {
        self.persist = 0;
        self.alerted = false;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latches_on_exact_climb() {
        let mut latch = AlertLatch::new(8);
        for i in 1..8 {
            assert!(!latch.observe(true), "latched early at frame {}", i);
        }
        assert!(latch.observe(true));
        assert_eq!(latch.persist_count(), 8);
    }

    #[test]
    fn test_alternating_frames_never_latch() {
        let mut latch = AlertLatch::new(8);
        for _ in 0..100 {
            latch.observe(true);
            latch.observe(false);
        }
        assert!(!latch.is_alerted());
        assert!(latch.persist_count() <= 1);
    }

    #[test]
    fn test_decay_is_gradual_not_instant() {
        let mut latch = AlertLatch::new(8);
        for _ in 0..5 {
            latch.observe(true);
        }
        latch.observe(false);
        assert_eq!(latch.persist_count(), 4);
    }

    #[test]
    fn test_latch_survives_recovery() {
        let mut latch = AlertLatch::new(8);
        for _ in 0..8 {
            latch.observe(true);
        }
        assert!(latch.is_alerted());

        for _ in 0..50 {
            assert!(latch.observe(false));
        }
        assert!(latch.is_alerted());
        assert_eq!(latch.persist_count(), 0);
    }

    #[test]
    fn test_counter_saturates_at_requirement() {
        let mut latch = AlertLatch::new(8);
        for _ in 0..500 {
            latch.observe(true);
        }
        assert_eq!(latch.persist_count(), 8);
    }

    #[test]
    fn test_counter_never_goes_below_zero() {
        let mut latch = AlertLatch::new(8);
        for _ in 0..10 {
            latch.observe(false);
        }
        assert_eq!(latch.persist_count(), 0);
    }

    #[test]
    fn test_reset_clears_latch() {
        let mut latch = AlertLatch::new(8);
        for _ in 0..8 {
            latch.observe(true);
        }
        latch.reset();
        assert!(!latch.is_alerted());
        assert_eq!(latch.persist_count(), 0);
    }
}
