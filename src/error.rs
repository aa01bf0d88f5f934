//! Frame rejection reasons.
//!
//! None of these are fatal: a rejected frame is dropped and the session
//! carries on. They exist so callers can count or log drops.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FrameRejection {
    /// The pose model did not deliver the full 33-point skeleton.
    #[error("expected 33 landmarks, got {0}")]
    LandmarkCount(usize),

    /// Frame confidence below the configured floor (or not a number).
    #[error("confidence {confidence} below floor {floor}")]
    LowConfidence { confidence: f64, floor: f64 },

    /// Timestamp went backwards within the session.
    #[error("timestamp {timestamp_ms}ms precedes previous frame at {previous_ms}ms")]
    OutOfOrder { timestamp_ms: u64, previous_ms: u64 },
}
