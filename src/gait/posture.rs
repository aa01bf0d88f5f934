use nalgebra::Vector2;

use crate::gait::contact::Side;
use crate::pose::{Landmark, LandmarkIndex, Pose};
use crate::window::RollingWindow;

/// 前傾角の平均に使うフレーム数
const LEAN_FRAMES: usize = 10;
/// ヒップドロップの最大値を探すフレーム数
const HIP_DROP_FRAMES: usize = 15;
/// 腕振り軌跡を見るフレーム数
const ARM_FRAMES: usize = 45;

fn xy(l: &Landmark) -> Vector2<f64> {
    Vector2::new(l.x, l.y)
}

/// 肩中点→腰中点ベクトルと鉛直のなす角（度）
fn lean_deg(pose: &Pose) -> f64 {
    let torso = xy(&pose.hip_center()) - xy(&pose.shoulder_center());
    f64::atan2(torso.x.abs(), torso.y.abs()).to_degrees()
}

/// 前傾角（度）: 直近10フレームの平均。フレームが無ければ 0
pub fn forward_lean_deg(frames: &RollingWindow<Pose>) -> f64 {
    let recent = frames.last_n(LEAN_FRAMES);
    let n = recent.len();
    if n == 0 {
        return 0.0;
    }
    recent.map(lean_deg).sum::<f64>() / n as f64
}

/// ヒップドロップ（度）: 直近15フレームで最も左右差が大きい瞬間
///
/// 一瞬の大きな骨盤の落ち込みが臨床的に意味を持つので平均ではなく最大値。
pub fn hip_drop_deg(frames: &RollingWindow<Pose>) -> f64 {
    frames
        .last_n(HIP_DROP_FRAMES)
        .map(|pose| {
            let left = pose.get(LandmarkIndex::LeftHip);
            let right = pose.get(LandmarkIndex::RightHip);
            f64::atan2((left.y - right.y).abs(), (left.x - right.x).abs()).to_degrees()
        })
        .fold(0.0, f64::max)
}

/// 手首軌跡のバウンディング対角長
fn arm_arc(frames: &RollingWindow<Pose>, side: Side) -> f64 {
    let mut min = Vector2::new(f64::MAX, f64::MAX);
    let mut max = Vector2::new(f64::MIN, f64::MIN);
    let mut seen = false;
    for pose in frames.last_n(ARM_FRAMES) {
        let p = xy(pose.get(side.wrist()));
        min = min.inf(&p);
        max = max.sup(&p);
        seen = true;
    }
    if !seen {
        return 0.0;
    }
    (max - min).norm()
}

/// 腕振りの左右対称性 (0.0〜1.0)
///
/// 両腕とも動きが無ければ 1.0（一致とみなす）、片方だけ 0 なら 0.5。
pub fn arm_symmetry(frames: &RollingWindow<Pose>) -> f64 {
    let left = arm_arc(frames, Side::Left);
    let right = arm_arc(frames, Side::Right);
    match (left > 0.0, right > 0.0) {
        (false, false) => 1.0,
        (true, false) | (false, true) => 0.5,
        (true, true) => (left.min(right) / left.max(right)).clamp(0.0, 1.0),
    }
}
