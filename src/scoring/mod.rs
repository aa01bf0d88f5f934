//! Composite running-form score, coaching tips and the stride heuristic.

pub mod rules;
pub mod tips;

use crate::gait::GaitMetrics;

pub use rules::Severity;
pub use tips::coaching_tips;

/// 0〜100 のフォームスコア
///
/// 基礎点 40 に各指標のバンド得点を足す。未推定（0）のケイデンス・GCT は 0 点。
pub fn form_score(m: &GaitMetrics) -> f64 {
    let total = rules::SCORE_TABLE
        .iter()
        .fold(rules::BASE_POINTS, |acc, (metric, table)| {
            acc + rules::points_for(*metric, table, m)
        });
    total.clamp(0.0, 100.0)
}

/// Assumed pace in min/km for a score tier.
///
/// Placeholder until real pace input exists: the video has no distance
/// reference, so stride length is back-computed from this.
pub fn assumed_pace_min_per_km(form_score: f64) -> f64 {
    if form_score >= 80.0 {
        4.5
    } else if form_score >= 60.0 {
        5.5
    } else {
        6.5
    }
}

/// Metres per step at the assumed pace. 0 when cadence is unknown.
pub fn stride_length_m(cadence_spm: f64, pace_min_per_km: f64) -> f64 {
    if cadence_spm <= 0.0 || pace_min_per_km <= 0.0 {
        return 0.0;
    }
    let metres_per_min = 1000.0 / pace_min_per_km;
    metres_per_min / cadence_spm
}

/// Score, tips and stride estimate for one set of metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct FormAssessment {
    pub form_score: f64,
    pub coaching_tips: Vec<String>,
    pub assumed_pace_min_per_km: f64,
    pub stride_length_m: f64,
}

pub struct FormScorer;

impl FormScorer {
    pub fn score(m: &GaitMetrics) -> f64 {
        form_score(m)
    }

    pub fn assess(m: &GaitMetrics) -> FormAssessment {
        let score = form_score(m);
        let pace = assumed_pace_min_per_km(score);
        FormAssessment {
            form_score: score,
            coaching_tips: coaching_tips(m),
            assumed_pace_min_per_km: pace,
            stride_length_m: stride_length_m(m.cadence_spm, pace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gait::FootStrike;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn metrics(cadence: f64, gct: f64, lean: f64, hip: f64, arm: f64) -> GaitMetrics {
        GaitMetrics {
            cadence_spm: cadence,
            ground_contact_time_ms: gct,
            vertical_oscillation_cm: 8.0,
            forward_lean_deg: lean,
            hip_drop_deg: hip,
            arm_symmetry: arm,
            foot_strike: FootStrike::Midfoot,
        }
    }

    #[test]
    fn test_perfect_form() {
        assert!(approx(form_score(&metrics(180.0, 190.0, 7.0, 2.0, 0.95)), 100.0));
    }

    #[test]
    fn test_unknown_metrics_base_only() {
        // lean 0 / hip 8 / arm 0.5 も得点なし
        assert!(approx(form_score(&metrics(0.0, 0.0, 0.0, 8.0, 0.5)), 40.0));
    }

    #[test]
    fn test_band_edges() {
        let base = metrics(0.0, 0.0, 0.0, 8.0, 0.5);
        let with = |f: fn(&mut GaitMetrics)| {
            let mut m = base;
            f(&mut m);
            form_score(&m) - 40.0
        };
        assert!(approx(with(|m| m.cadence_spm = 175.0), 18.0));
        assert!(approx(with(|m| m.cadence_spm = 195.0), 14.0));
        assert!(approx(with(|m| m.cadence_spm = 160.0), 9.0));
        assert!(approx(with(|m| m.cadence_spm = 215.0), 4.0));
        assert!(approx(with(|m| m.cadence_spm = 216.0), 0.0));
        assert!(approx(with(|m| m.ground_contact_time_ms = 199.9), 18.0));
        assert!(approx(with(|m| m.ground_contact_time_ms = 200.0), 14.0));
        assert!(approx(with(|m| m.ground_contact_time_ms = 299.0), 5.0));
        assert!(approx(with(|m| m.ground_contact_time_ms = 300.0), 0.0));
        assert!(approx(with(|m| m.forward_lean_deg = 12.0), 4.0));
        assert!(approx(with(|m| m.hip_drop_deg = 5.0), 5.0));
        assert!(approx(with(|m| m.arm_symmetry = 0.8), 5.0));
        assert!(approx(with(|m| m.arm_symmetry = 0.7), 2.0));
    }

    #[test]
    fn test_pace_tiers_and_stride() {
        assert_eq!(assumed_pace_min_per_km(80.0), 4.5);
        assert_eq!(assumed_pace_min_per_km(79.9), 5.5);
        assert_eq!(assumed_pace_min_per_km(59.0), 6.5);
        // 5.5 min/km, 180 spm → 181.8 m/min / 180
        assert!(approx(stride_length_m(180.0, 5.5), 1000.0 / 5.5 / 180.0));
        assert_eq!(stride_length_m(0.0, 5.5), 0.0);
    }

    #[test]
    fn test_assess_bundles() {
        let a = FormScorer::assess(&metrics(180.0, 190.0, 7.0, 2.0, 0.95));
        assert!(approx(a.form_score, 100.0));
        assert_eq!(a.assumed_pace_min_per_km, 4.5);
        assert!(approx(a.stride_length_m, 1000.0 / 4.5 / 180.0));
        assert_eq!(a.coaching_tips.len(), 1);
    }
}
