pub mod controller;
pub mod progress;
pub mod result;

pub use controller::{FrameStatus, SessionController, SessionState};
pub use progress::{Closed, GaitProgress, ProgressHub, ProgressSubscription};
pub use result::GaitSessionResult;
