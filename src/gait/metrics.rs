use serde::{Deserialize, Serialize};

use crate::gait::foot_strike::FootStrike;

/// ある時点での推定値一式
///
/// 0 は「まだ推定できない」を意味する（ケイデンス・GCT・上下動）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaitMetrics {
    pub cadence_spm: f64,
    pub ground_contact_time_ms: f64,
    pub vertical_oscillation_cm: f64,
    pub forward_lean_deg: f64,
    pub hip_drop_deg: f64,
    /// 0.0〜1.0
    pub arm_symmetry: f64,
    pub foot_strike: FootStrike,
}

impl GaitMetrics {
    /// 腕振り対称性をパーセント表記で
    pub fn arm_symmetry_pct(&self) -> f64 {
        self.arm_symmetry * 100.0
    }
}

impl Default for GaitMetrics {
    fn default() -> Self {
        Self {
            cadence_spm: 0.0,
            ground_contact_time_ms: 0.0,
            vertical_oscillation_cm: 0.0,
            forward_lean_deg: 0.0,
            hip_drop_deg: 0.0,
            arm_symmetry: 1.0,
            foot_strike: FootStrike::Midfoot,
        }
    }
}
