pub mod config;
pub mod error;
pub mod export;
pub mod gait;
pub mod pose;
pub mod scoring;
pub mod session;
pub mod synthetic;
pub mod window;

pub use config::Config;
pub use error::FrameRejection;
pub use gait::{FootStrike, GaitEngine, GaitMetrics};
pub use pose::{Landmark, LandmarkIndex, Pose, PoseFrame};
pub use scoring::FormScorer;
pub use session::{
    FrameStatus, GaitProgress, GaitSessionResult, ProgressSubscription, SessionController,
};
pub use window::RollingWindow;
