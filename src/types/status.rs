//! Frame status enum with display helpers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse per-frame status, one of five mutually exclusive values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStatus {
    /// Source not ready yet
    NoVideo,
    /// Source ready, no face in frame
    NoFace,
    /// Collecting baseline frames
    Calibrating,
    /// Monitoring, no sustained deviation
    Ok,
    /// Sustained asymmetry deviation latched
    Alert,
}

impl FrameStatus {
    /// ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            FrameStatus::NoVideo => "\x1b[90m",     // Gray
            FrameStatus::NoFace => "\x1b[33m",      // Yellow
            FrameStatus::Calibrating => "\x1b[36m", // Cyan
            FrameStatus::Ok => "\x1b[32m",          // Green
            FrameStatus::Alert => "\x1b[31m",       // Red
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Emoji for compact terminal display
    pub fn emoji(&self) -> &'static str {
        match self {
            FrameStatus::NoVideo => "⏳",
            FrameStatus::NoFace => "🔍",
            FrameStatus::Calibrating => "🔶",
            FrameStatus::Ok => "🟢",
            FrameStatus::Alert => "🔴",
        }
    }
}

impl fmt::Display for FrameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FrameStatus::NoVideo => "NO_VIDEO",
            FrameStatus::NoFace => "NO_FACE",
            FrameStatus::Calibrating => "CALIBRATING",
            FrameStatus::Ok => "OK",
            FrameStatus::Alert => "ALERT",
        };
        write!(f, "{}", s)
    }
}

// =============================================================================
// TESTS
// =============================================================================
