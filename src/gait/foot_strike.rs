use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gait::contact::Side;
use crate::pose::Pose;
use crate::window::RollingWindow;

/// 判定に使う直近フレーム数（左右で 2×20 = 40 票）
const STRIKE_FRAMES: usize = 20;
/// 踵とつま先の高さ差がこれ以下なら中足部とみなす（正規化単位）
const STRIKE_MARGIN: f64 = 0.015;

/// 接地パターン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FootStrike {
    Heel,
    Midfoot,
    Forefoot,
}

impl FootStrike {
    pub fn label(self) -> &'static str {
        match self {
            FootStrike::Heel => "heel",
            FootStrike::Midfoot => "midfoot",
            FootStrike::Forefoot => "forefoot",
        }
    }
}

impl fmt::Display for FootStrike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn vote(pose: &Pose, side: Side) -> FootStrike {
    // 画像Yは下が正: 踵が低い（Yが大きい）なら踵接地
    let diff = pose.get(side.heel()).y - pose.get(side.toe()).y;
    if diff > STRIKE_MARGIN {
        FootStrike::Heel
    } else if diff < -STRIKE_MARGIN {
        FootStrike::Forefoot
    } else {
        FootStrike::Midfoot
    }
}

/// 直近20フレーム×左右の多数決
///
/// 同数の場合は Midfoot → Heel → Forefoot の順で優先。
pub fn classify_foot_strike(frames: &RollingWindow<Pose>) -> FootStrike {
    let mut counts = [0usize; 3];
    for pose in frames.last_n(STRIKE_FRAMES) {
        for side in Side::BOTH {
            let slot = match vote(pose, side) {
                FootStrike::Midfoot => 0,
                FootStrike::Heel => 1,
                FootStrike::Forefoot => 2,
            };
            counts[slot] += 1;
        }
    }

    let [mid, heel, fore] = counts;
    if mid >= heel && mid >= fore {
        FootStrike::Midfoot
    } else if heel >= fore {
        FootStrike::Heel
    } else {
        FootStrike::Forefoot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Landmark, LandmarkIndex};

    /// 踵Y − つま先Y を左右別に指定
    fn make_pose(left_diff: f64, right_diff: f64) -> Pose {
        let mut landmarks = [Landmark::new(0.5, 0.5, 0.0); LandmarkIndex::COUNT];
        landmarks[LandmarkIndex::LeftFootIndex as usize] = Landmark::new(0.45, 0.90, 0.0);
        landmarks[LandmarkIndex::LeftHeel as usize] = Landmark::new(0.43, 0.90 + left_diff, 0.0);
        landmarks[LandmarkIndex::RightFootIndex as usize] = Landmark::new(0.55, 0.90, 0.0);
        landmarks[LandmarkIndex::RightHeel as usize] = Landmark::new(0.53, 0.90 + right_diff, 0.0);
        Pose::new(landmarks, 0, 0.9)
    }

    fn window(poses: impl IntoIterator<Item = Pose>) -> RollingWindow<Pose> {
        let mut w = RollingWindow::new(150);
        for p in poses {
            w.push(p);
        }
        w
    }

    #[test]
    fn test_heel_strike() {
        let w = window(std::iter::repeat(make_pose(0.03, 0.03)).take(20));
        assert_eq!(classify_foot_strike(&w), FootStrike::Heel);
    }

    #[test]
    fn test_forefoot_strike() {
        let w = window(std::iter::repeat(make_pose(-0.03, -0.03)).take(20));
        assert_eq!(classify_foot_strike(&w), FootStrike::Forefoot);
    }

    #[test]
    fn test_within_margin_is_midfoot() {
        let w = window(std::iter::repeat(make_pose(0.01, -0.01)).take(20));
        assert_eq!(classify_foot_strike(&w), FootStrike::Midfoot);
    }

    #[test]
    fn test_majority_vote() {
        // 左は踵 (20票)、右は 12 フレーム踵 + 8 フレーム前足
        let mut poses: Vec<Pose> = (0..12).map(|_| make_pose(0.03, 0.03)).collect();
        poses.extend((0..8).map(|_| make_pose(0.03, -0.03)));
        assert_eq!(classify_foot_strike(&window(poses)), FootStrike::Heel);
    }

    #[test]
    fn test_tie_prefers_midfoot() {
        // 左右で 20票ずつ heel / midfoot
        let w = window(std::iter::repeat(make_pose(0.03, 0.0)).take(20));
        assert_eq!(classify_foot_strike(&w), FootStrike::Midfoot);
    }

    #[test]
    fn test_only_last_20_frames() {
        let mut poses: Vec<Pose> = (0..40).map(|_| make_pose(-0.03, -0.03)).collect();
        poses.extend((0..20).map(|_| make_pose(0.03, 0.03)));
        assert_eq!(classify_foot_strike(&window(poses)), FootStrike::Heel);
    }

    #[test]
    fn test_empty_is_midfoot() {
        assert_eq!(classify_foot_strike(&window([])), FootStrike::Midfoot);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&FootStrike::Forefoot).unwrap(), "\"forefoot\"");
        assert_eq!(FootStrike::Heel.to_string(), "heel");
    }
}
