//! Core modules for droopwatch

pub mod detector;
pub mod hysteresis;
pub mod scorer;
pub mod session;
pub mod source;
pub mod storage;

pub use detector::{AsymmetryDetector, DetectorPhase};
pub use hysteresis::AlertLatch;
pub use scorer::AsymmetryScorer;
pub use session::MonitorSession;
pub use source::{FrameRecord, LandmarkSource, ReplaySource, SyntheticSource};
pub use storage::{load_baseline, save_baseline};
