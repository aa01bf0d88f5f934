use crate::error::FrameRejection;
use crate::pose::{LandmarkIndex, Pose, PoseFrame};
use crate::window::RollingWindow;

/// 推定値を出すのに必要な最小フレーム数（30fps で約1秒）
pub const MIN_FRAMES: usize = 30;

/// フレームの検証とバッファリング
pub struct FrameIngest {
    frames: RollingWindow<Pose>,
    min_confidence: f64,
    /// 受理したフレームの総数（ウィンドウから溢れた分も含む）
    accepted: u64,
    confidence_sum: f64,
    first_timestamp_ms: Option<u64>,
}

impl FrameIngest {
    pub fn new(capacity: usize, min_confidence: f64) -> Self {
        Self {
            frames: RollingWindow::new(capacity),
            min_confidence,
            accepted: 0,
            confidence_sum: 0.0,
            first_timestamp_ms: None,
        }
    }

    /// フレームを検証してウィンドウに積む
    ///
    /// 拒否されたフレームは何も変更しない。
    pub fn accept(&mut self, frame: PoseFrame) -> Result<(), FrameRejection> {
        if frame.landmarks.len() != LandmarkIndex::COUNT {
            return Err(FrameRejection::LandmarkCount(frame.landmarks.len()));
        }
        // NaN も弾く
        if !(frame.confidence >= self.min_confidence) {
            return Err(FrameRejection::LowConfidence {
                confidence: frame.confidence,
                floor: self.min_confidence,
            });
        }
        if let Some(prev) = self.frames.latest() {
            if frame.timestamp_ms < prev.timestamp_ms {
                return Err(FrameRejection::OutOfOrder {
                    timestamp_ms: frame.timestamp_ms,
                    previous_ms: prev.timestamp_ms,
                });
            }
        }

        let pose = Pose::try_from(frame).map_err(FrameRejection::LandmarkCount)?;
        self.accepted += 1;
        self.confidence_sum += pose.confidence;
        self.first_timestamp_ms.get_or_insert(pose.timestamp_ms);
        self.frames.push(pose);
        Ok(())
    }

    /// 約1秒分のフレームが溜まったか
    pub fn has_enough_data(&self) -> bool {
        self.frames.len() >= MIN_FRAMES.min(self.frames.capacity())
    }

    pub fn frames(&self) -> &RollingWindow<Pose> {
        &self.frames
    }

    pub fn accepted_count(&self) -> u64 {
        self.accepted
    }

    /// 受理した全フレームの平均信頼度
    pub fn average_confidence(&self) -> f64 {
        if self.accepted == 0 {
            0.0
        } else {
            self.confidence_sum / self.accepted as f64
        }
    }

    pub fn latest_timestamp_ms(&self) -> Option<u64> {
        self.frames.latest().map(|p| p.timestamp_ms)
    }

    /// 最初の受理フレームからの経過秒
    pub fn elapsed_secs(&self) -> f64 {
        match (self.first_timestamp_ms, self.latest_timestamp_ms()) {
            (Some(first), Some(last)) => last.saturating_sub(first) as f64 / 1000.0,
            _ => 0.0,
        }
    }
}
