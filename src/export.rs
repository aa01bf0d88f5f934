//! Payloads for downstream consumers of a finished session.
//!
//! `InjuryRiskRequest` is the JSON body the injury-risk service accepts;
//! `feature_vector` is the input row of the on-device gait model.

use serde::{Deserialize, Serialize};

use crate::session::GaitSessionResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryRiskRequest {
    pub ground_contact_time_ms: f64,
    pub vertical_oscillation_cm: f64,
    /// サービス側は整数で受ける
    pub cadence_spm: u32,
    pub stride_length_m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_lean_degrees: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hip_drop_degrees: Option<f64>,
    pub avg_pace_min_per_km: f64,
}

impl From<&GaitSessionResult> for InjuryRiskRequest {
    fn from(r: &GaitSessionResult) -> Self {
        Self {
            ground_contact_time_ms: r.ground_contact_time_ms,
            vertical_oscillation_cm: r.vertical_oscillation_cm,
            cadence_spm: r.cadence_spm.max(0.0).round() as u32,
            stride_length_m: r.stride_length_m,
            forward_lean_degrees: Some(r.forward_lean_deg),
            hip_drop_degrees: Some(r.hip_drop_deg),
            avg_pace_min_per_km: r.assumed_pace_min_per_km,
        }
    }
}

impl InjuryRiskRequest {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub const FEATURE_COUNT: usize = 8;

/// オンデバイスモデルの入力順:
/// gct, 上下動, ケイデンス, ストライド, 前傾, 骨盤の落ち込み, 腕振り対称性(%), ペース
pub fn feature_vector(r: &GaitSessionResult) -> [f32; FEATURE_COUNT] {
    [
        r.ground_contact_time_ms as f32,
        r.vertical_oscillation_cm as f32,
        r.cadence_spm as f32,
        r.stride_length_m as f32,
        r.forward_lean_deg as f32,
        r.hip_drop_deg as f32,
        r.arm_symmetry_pct as f32,
        r.assumed_pace_min_per_km as f32,
    ]
}
