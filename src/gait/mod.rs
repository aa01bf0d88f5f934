pub mod cadence;
pub mod contact;
pub mod engine;
pub mod foot_strike;
pub mod gct;
pub mod ingest;
pub mod metrics;
pub mod oscillation;
pub mod posture;

pub use contact::{FootContactDetector, FootContactEvent, FootState, Side};
pub use engine::GaitEngine;
pub use foot_strike::FootStrike;
pub use ingest::{FrameIngest, MIN_FRAMES};
pub use metrics::GaitMetrics;
