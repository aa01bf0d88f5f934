use crate::config::{GaitConfig, WindowConfig};
use crate::error::FrameRejection;
use crate::gait::cadence::estimate_cadence_spm;
use crate::gait::contact::{FootContactDetector, FootContactEvent};
use crate::gait::foot_strike::classify_foot_strike;
use crate::gait::gct::estimate_gct_ms;
use crate::gait::ingest::FrameIngest;
use crate::gait::metrics::GaitMetrics;
use crate::gait::oscillation::estimate_oscillation_cm;
use crate::gait::posture::{arm_symmetry, forward_lean_deg, hip_drop_deg};
use crate::pose::PoseFrame;
use crate::window::RollingWindow;

/// 1セッション分の解析状態
///
/// フレームウィンドウを共有バッファとし、各推定器はそこから読むだけ。
/// 接地イベント・間隔・腰高さはそれぞれ専用のウィンドウに持つ。
pub struct GaitEngine {
    ingest: FrameIngest,
    contacts: FootContactDetector,
    hip_history: RollingWindow<f64>,
    body_height_cm: f64,
}

impl GaitEngine {
    pub fn new(gait: &GaitConfig, windows: &WindowConfig) -> Self {
        Self {
            ingest: FrameIngest::new(windows.frames, gait.min_confidence),
            contacts: FootContactDetector::new(windows.contact_events, windows.step_intervals),
            hip_history: RollingWindow::new(windows.hip_history),
            body_height_cm: gait.body_height_cm,
        }
    }

    /// 1フレーム処理。受理されたら今回の着地イベントを返す
    pub fn process(&mut self, frame: PoseFrame) -> Result<Vec<FootContactEvent>, FrameRejection> {
        self.ingest.accept(frame)?;
        let frames = self.ingest.frames();
        if let Some(pose) = frames.latest() {
            self.hip_history.push(pose.hip_center().y);
        }
        Ok(self.contacts.update(frames))
    }

    pub fn has_enough_data(&self) -> bool {
        self.ingest.has_enough_data()
    }

    /// 現在のバッファから全推定値を計算
    pub fn metrics(&self) -> GaitMetrics {
        let frames = self.ingest.frames();
        let now_ms = self.ingest.latest_timestamp_ms().unwrap_or(0);
        GaitMetrics {
            cadence_spm: estimate_cadence_spm(self.contacts.events(), now_ms),
            ground_contact_time_ms: estimate_gct_ms(&self.contacts.step_intervals()),
            vertical_oscillation_cm: estimate_oscillation_cm(
                &self.hip_history,
                self.body_height_cm,
            ),
            forward_lean_deg: forward_lean_deg(frames),
            hip_drop_deg: hip_drop_deg(frames),
            arm_symmetry: arm_symmetry(frames),
            foot_strike: classify_foot_strike(frames),
        }
    }

    pub fn ingest(&self) -> &FrameIngest {
        &self.ingest
    }

    pub fn contacts(&self) -> &FootContactDetector {
        &self.contacts
    }

    pub fn hip_history(&self) -> &RollingWindow<f64> {
        &self.hip_history
    }
}
