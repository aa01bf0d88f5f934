//! Deterministic synthetic running frames.
//!
//! Each foot follows a stance/swing cycle: flat on the ground for
//! `stance_frames`, then a half-sine lift for the rest of the stride. The
//! right foot runs half a stride behind the left. Hips bounce twice per
//! stride, wrists counter-swing, and the shoulders sit slightly ahead of the
//! hips.

use std::f64::consts::PI;

use crate::pose::{Landmark, LandmarkIndex, PoseFrame};

/// Image Y of a planted foot.
const GROUND_Y: f64 = 0.9;
const HIP_Y: f64 = 0.5;
const SHOULDER_Y: f64 = 0.28;
const HEAD_Y: f64 = 0.14;

#[derive(Debug, Clone)]
pub struct SyntheticGait {
    pub start_ms: u64,
    pub frame_interval_ms: u64,
    pub confidence: f64,
    /// Frames per full stride (one cycle of one foot)
    pub stride_frames: usize,
    pub stance_frames: usize,
    /// Peak ankle lift during swing
    pub foot_lift: f64,
    /// Peak-to-trough hip bounce
    pub hip_bounce: f64,
    /// Peak left/right hip height difference
    pub hip_tilt: f64,
    /// Shoulder-midpoint X offset ahead of the hips
    pub lean_offset: f64,
    pub left_arm_swing: f64,
    pub right_arm_swing: f64,
    /// Heel Y minus toe Y at every frame (> 0.015 reads as heel strike)
    pub heel_drop: f64,
    /// Max per-coordinate noise, 0 disables
    pub jitter: f64,
}

impl Default for SyntheticGait {
    fn default() -> Self {
        Self {
            start_ms: 0,
            frame_interval_ms: 33,
            confidence: 0.95,
            stride_frames: 20,
            stance_frames: 8,
            foot_lift: 0.08,
            hip_bounce: 0.03,
            hip_tilt: 0.003,
            lean_offset: 0.025,
            left_arm_swing: 0.06,
            right_arm_swing: 0.06,
            heel_drop: 0.0,
            jitter: 0.0,
        }
    }
}

impl SyntheticGait {
    /// Stride length in frames, at least 1.
    fn stride(&self) -> usize {
        self.stride_frames.max(1)
    }

    fn ankle_y(&self, stride_index: usize) -> f64 {
        let stride = self.stride();
        let k = stride_index % stride;
        if k < self.stance_frames {
            return GROUND_Y;
        }
        let swing = stride.saturating_sub(self.stance_frames).max(1) as f64;
        let t = (k - self.stance_frames) as f64 / swing;
        GROUND_Y - self.foot_lift * (PI * t).sin()
    }

    /// Hash-style noise in [-jitter, jitter], fixed per (frame, landmark).
    fn noise(&self, frame: usize, landmark: usize, axis: usize) -> f64 {
        if self.jitter == 0.0 {
            return 0.0;
        }
        let seed = frame as f64 * 12.9898 + landmark as f64 * 78.233 + axis as f64 * 37.719;
        let r = seed.sin() * 43_758.545_3;
        (r - r.floor() - 0.5) * 2.0 * self.jitter
    }

    /// Frame number `i` of the run.
    pub fn frame(&self, i: usize) -> PoseFrame {
        use LandmarkIndex::*;

        let stride = self.stride();
        let half = stride / 2;
        let stride_phase = 2.0 * PI * i as f64 / stride as f64;
        // two bounces per stride
        let hip_y = HIP_Y + self.hip_bounce / 2.0 * (2.0 * stride_phase).sin();
        let tilt = self.hip_tilt * stride_phase.sin();
        let shoulder_x = 0.5 + self.lean_offset;

        let mut lm = [Landmark::default(); LandmarkIndex::COUNT];
        let mut set = |idx: LandmarkIndex, x: f64, y: f64| {
            lm[idx as usize] = Landmark::new(x, y, 0.0);
        };

        for (idx, dx, dy) in [
            (Nose, 0.0, 0.0),
            (LeftEyeInner, -0.01, -0.01),
            (LeftEye, -0.015, -0.01),
            (LeftEyeOuter, -0.02, -0.01),
            (RightEyeInner, 0.01, -0.01),
            (RightEye, 0.015, -0.01),
            (RightEyeOuter, 0.02, -0.01),
            (LeftEar, -0.03, 0.0),
            (RightEar, 0.03, 0.0),
            (MouthLeft, -0.01, 0.02),
            (MouthRight, 0.01, 0.02),
        ] {
            set(idx, shoulder_x + dx, HEAD_Y + (hip_y - HIP_Y) + dy);
        }

        let shoulder_y = SHOULDER_Y + (hip_y - HIP_Y);
        set(LeftShoulder, shoulder_x - 0.05, shoulder_y);
        set(RightShoulder, shoulder_x + 0.05, shoulder_y);

        let swing = stride_phase.sin();
        let lift = stride_phase.cos();
        let left_wrist = (
            0.44 + self.left_arm_swing * swing,
            0.45 + self.left_arm_swing / 2.0 * lift,
        );
        let right_wrist = (
            0.56 - self.right_arm_swing * swing,
            0.45 - self.right_arm_swing / 2.0 * lift,
        );
        set(
            LeftElbow,
            (shoulder_x - 0.05 + left_wrist.0) / 2.0,
            (shoulder_y + left_wrist.1) / 2.0,
        );
        set(
            RightElbow,
            (shoulder_x + 0.05 + right_wrist.0) / 2.0,
            (shoulder_y + right_wrist.1) / 2.0,
        );
        for idx in [LeftWrist, LeftPinky, LeftIndex, LeftThumb] {
            set(idx, left_wrist.0, left_wrist.1);
        }
        for idx in [RightWrist, RightPinky, RightIndex, RightThumb] {
            set(idx, right_wrist.0, right_wrist.1);
        }

        set(LeftHip, 0.46, hip_y + tilt);
        set(RightHip, 0.54, hip_y - tilt);

        let left_ankle_y = self.ankle_y(i);
        let right_ankle_y = self.ankle_y(i + half);
        for (ankle, heel, toe, knee, x, ankle_y, hip) in [
            (LeftAnkle, LeftHeel, LeftFootIndex, LeftKnee, 0.47, left_ankle_y, hip_y + tilt),
            (RightAnkle, RightHeel, RightFootIndex, RightKnee, 0.53, right_ankle_y, hip_y - tilt),
        ] {
            set(ankle, x, ankle_y);
            set(heel, x - 0.02, ankle_y + 0.02 + self.heel_drop);
            set(toe, x + 0.04, ankle_y + 0.02);
            set(knee, x, (hip + ankle_y) / 2.0);
        }

        for (n, l) in lm.iter_mut().enumerate() {
            l.x += self.noise(i, n, 0);
            l.y += self.noise(i, n, 1);
        }

        PoseFrame::new(
            lm.to_vec(),
            self.start_ms + i as u64 * self.frame_interval_ms,
            self.confidence,
        )
    }

    pub fn frames(&self, count: usize) -> impl Iterator<Item = PoseFrame> + '_ {
        (0..count).map(move |i| self.frame(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_shape() {
        let gait = SyntheticGait::default();
        let frames: Vec<_> = gait.frames(5).collect();
        assert_eq!(frames.len(), 5);
        assert!(frames.iter().all(|f| f.landmarks.len() == 33));
        assert_eq!(frames[4].timestamp_ms, 132);
        assert_eq!(frames[0].confidence, 0.95);
    }

    #[test]
    fn test_feet_half_stride_apart() {
        let gait = SyntheticGait::default();
        for i in 0..40 {
            let f = gait.frame(i);
            let left = f.landmarks[LandmarkIndex::LeftAnkle as usize].y;
            let right = f.landmarks[LandmarkIndex::RightAnkle as usize].y;
            let later = gait.frame(i + 10);
            assert!((later.landmarks[LandmarkIndex::RightAnkle as usize].y - left).abs() < 1e-12);
            assert!(right <= GROUND_Y + 1e-12);
        }
    }

    #[test]
    fn test_degenerate_stride_settings() {
        let zero = SyntheticGait {
            stride_frames: 0,
            ..Default::default()
        };
        let all_stance = SyntheticGait {
            stride_frames: 4,
            stance_frames: 10,
            ..Default::default()
        };
        for gait in [zero, all_stance] {
            for frame in gait.frames(12) {
                assert_eq!(frame.landmarks.len(), 33);
                assert!(frame.landmarks.iter().all(|l| l.x.is_finite() && l.y.is_finite()));
            }
        }
    }

    #[test]
    fn test_jitter_deterministic_and_bounded() {
        let gait = SyntheticGait { jitter: 0.001, ..Default::default() };
        let clean = SyntheticGait::default();
        let a = gait.frame(7);
        let b = gait.frame(7);
        assert_eq!(a, b);
        for (noisy, exact) in a.landmarks.iter().zip(clean.frame(7).landmarks.iter()) {
            assert!((noisy.x - exact.x).abs() <= 0.001 + 1e-12);
            assert!((noisy.y - exact.y).abs() <= 0.001 + 1e-12);
        }
    }
}
