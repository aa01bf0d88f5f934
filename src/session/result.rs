use serde::{Deserialize, Serialize};

use crate::gait::{FootStrike, GaitMetrics};
use crate::scoring::FormAssessment;

/// セッション終了時の最終結果（以後変更しない）
///
/// `stride_length_m` は仮定ペースから逆算した値で、実測ではない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaitSessionResult {
    pub form_score: f64,
    pub cadence_spm: f64,
    pub ground_contact_time_ms: f64,
    pub vertical_oscillation_cm: f64,
    pub forward_lean_deg: f64,
    pub hip_drop_deg: f64,
    pub arm_symmetry_pct: f64,
    pub foot_strike: FootStrike,
    pub stride_length_m: f64,
    pub assumed_pace_min_per_km: f64,
    pub coaching_tips: Vec<String>,
    pub frames_analyzed: u64,
    pub avg_confidence: f64,
    pub duration_sec: f64,
}

impl GaitSessionResult {
    pub fn new(
        m: &GaitMetrics,
        assessment: FormAssessment,
        frames_analyzed: u64,
        avg_confidence: f64,
        duration_sec: f64,
    ) -> Self {
        Self {
            form_score: assessment.form_score,
            cadence_spm: m.cadence_spm,
            ground_contact_time_ms: m.ground_contact_time_ms,
            vertical_oscillation_cm: m.vertical_oscillation_cm,
            forward_lean_deg: m.forward_lean_deg,
            hip_drop_deg: m.hip_drop_deg,
            arm_symmetry_pct: m.arm_symmetry_pct(),
            foot_strike: m.foot_strike,
            stride_length_m: assessment.stride_length_m,
            assumed_pace_min_per_km: assessment.assumed_pace_min_per_km,
            coaching_tips: assessment.coaching_tips,
            frames_analyzed,
            avg_confidence,
            duration_sec,
        }
    }
}
