use serde::{Deserialize, Serialize};

use crate::pose::{LandmarkIndex, Pose};
use crate::window::RollingWindow;

/// 着地判定: 直前フレームでこれより速く下降していること
const LANDING_DESCENT: f64 = 0.003;
/// 着地判定: 現フレームでこれ未満まで減速していること
const LANDING_STOP: f64 = 0.002;
/// 離地判定: これより速く上昇したら離地
const LIFTOFF_RISE: f64 = -0.005;
/// 同じ足の接地間隔として採用する範囲 (ms)。外れ値はノイズ扱い
const MIN_STEP_INTERVAL_MS: u64 = 100;
const MAX_STEP_INTERVAL_MS: u64 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn ankle(self) -> LandmarkIndex {
        match self {
            Side::Left => LandmarkIndex::LeftAnkle,
            Side::Right => LandmarkIndex::RightAnkle,
        }
    }

    pub fn heel(self) -> LandmarkIndex {
        match self {
            Side::Left => LandmarkIndex::LeftHeel,
            Side::Right => LandmarkIndex::RightHeel,
        }
    }

    pub fn toe(self) -> LandmarkIndex {
        match self {
            Side::Left => LandmarkIndex::LeftFootIndex,
            Side::Right => LandmarkIndex::RightFootIndex,
        }
    }

    pub fn wrist(self) -> LandmarkIndex {
        match self {
            Side::Left => LandmarkIndex::LeftWrist,
            Side::Right => LandmarkIndex::RightWrist,
        }
    }
}

/// 片足の接地状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FootState {
    pub is_down: bool,
    pub last_contact_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootContactEvent {
    pub foot: Side,
    pub timestamp_ms: u64,
}

/// 足首Y軌跡から着地/離地を検出する左右独立のステートマシン
///
/// Up → Down: 下降していた足が止まった（着地）
/// Down → Up: 足が持ち上がった（離地）
/// is_down フラグにより、離地を挟まない連続着地はカウントしない。
pub struct FootContactDetector {
    left: FootState,
    right: FootState,
    events: RollingWindow<FootContactEvent>,
    left_intervals: RollingWindow<u64>,
    right_intervals: RollingWindow<u64>,
}

impl FootContactDetector {
    pub fn new(event_capacity: usize, interval_capacity: usize) -> Self {
        Self {
            left: FootState::default(),
            right: FootState::default(),
            events: RollingWindow::new(event_capacity),
            left_intervals: RollingWindow::new(interval_capacity),
            right_intervals: RollingWindow::new(interval_capacity),
        }
    }

    /// 最新フレームを受けて状態を更新し、発生した着地イベントを返す
    ///
    /// `frames` の末尾3フレームを使う。3フレーム未満なら何もしない。
    pub fn update(&mut self, frames: &RollingWindow<Pose>) -> Vec<FootContactEvent> {
        let (Some(oldest), Some(prev), Some(current)) =
            (frames.back(2), frames.back(1), frames.back(0))
        else {
            return Vec::new();
        };

        let mut landed = Vec::new();
        for side in Side::BOTH {
            let ankle = side.ankle();
            let v1 = prev.get(ankle).y - oldest.get(ankle).y;
            let v2 = current.get(ankle).y - prev.get(ankle).y;
            if let Some(event) = self.step_foot(side, v1, v2, current.timestamp_ms) {
                landed.push(event);
            }
        }
        landed
    }

    fn step_foot(
        &mut self,
        side: Side,
        v1: f64,
        v2: f64,
        timestamp_ms: u64,
    ) -> Option<FootContactEvent> {
        let (state, intervals) = match side {
            Side::Left => (&mut self.left, &mut self.left_intervals),
            Side::Right => (&mut self.right, &mut self.right_intervals),
        };

        if state.is_down {
            if v2 < LIFTOFF_RISE {
                state.is_down = false;
                tracing::trace!(?side, timestamp_ms, "liftoff");
            }
            return None;
        }

        if !(v1 > LANDING_DESCENT && v2 < LANDING_STOP) {
            return None;
        }

        state.is_down = true;
        if let Some(prev_ms) = state.last_contact_ms {
            let interval = timestamp_ms.saturating_sub(prev_ms);
            if (MIN_STEP_INTERVAL_MS..=MAX_STEP_INTERVAL_MS).contains(&interval) {
                intervals.push(interval);
            }
        }
        state.last_contact_ms = Some(timestamp_ms);

        let event = FootContactEvent { foot: side, timestamp_ms };
        self.events.push(event);
        tracing::trace!(?side, timestamp_ms, "landing");
        Some(event)
    }

    pub fn state(&self, side: Side) -> FootState {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn events(&self) -> &RollingWindow<FootContactEvent> {
        &self.events
    }

    pub fn intervals(&self, side: Side) -> &RollingWindow<u64> {
        match side {
            Side::Left => &self.left_intervals,
            Side::Right => &self.right_intervals,
        }
    }

    /// 左右を合わせた接地間隔履歴 (ms)
    pub fn step_intervals(&self) -> Vec<u64> {
        self.left_intervals
            .iter()
            .chain(self.right_intervals.iter())
            .copied()
            .collect()
    }
}
