//! Core types for droopwatch

mod config;
mod error;
mod landmarks;
mod report;
mod score;
mod snapshot;
mod status;
mod window;

pub use config::DetectorConfig;
pub use error::DetectorError;
pub use landmarks::{FrameInput, FrameLandmarks, LandmarkPoint};
pub use report::{CalibrationProgress, FrameResult, MonitorReading};
pub use score::SkewScore;
pub use snapshot::BaselineSnapshot;
pub use status::FrameStatus;
pub use window::ScoreWindow;
