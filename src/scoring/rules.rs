//! Ordered scoring tables.
//!
//! Each metric has its own band table; the first band whose predicate holds
//! awards its points. Tables are plain data so they can be tuned and tested
//! without touching control flow.

use crate::gait::GaitMetrics;

pub const BASE_POINTS: f64 = 40.0;

/// Metric a rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Cadence,
    GroundContact,
    ForwardLean,
    HipDrop,
    ArmSymmetry,
    VerticalOscillation,
}

impl Metric {
    pub fn value(self, m: &GaitMetrics) -> f64 {
        match self {
            Metric::Cadence => m.cadence_spm,
            Metric::GroundContact => m.ground_contact_time_ms,
            Metric::ForwardLean => m.forward_lean_deg,
            Metric::HipDrop => m.hip_drop_deg,
            Metric::ArmSymmetry => m.arm_symmetry,
            Metric::VerticalOscillation => m.vertical_oscillation_cm,
        }
    }

    /// Cadence, GCT and oscillation report 0 until enough contacts/samples exist.
    pub fn is_known(self, value: f64) -> bool {
        match self {
            Metric::Cadence | Metric::GroundContact | Metric::VerticalOscillation => value > 0.0,
            Metric::ForwardLean | Metric::HipDrop | Metric::ArmSymmetry => value.is_finite(),
        }
    }
}

/// Value test for one band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    /// min <= v <= max
    Within(f64, f64),
    /// v < limit
    Below(f64),
    /// v >= limit
    AtLeast(f64),
    /// v < min || v > max
    Outside(f64, f64),
    /// v > limit
    Above(f64),
}

impl Band {
    pub fn contains(self, v: f64) -> bool {
        match self {
            Band::Within(min, max) => (min..=max).contains(&v),
            Band::Below(limit) => v < limit,
            Band::AtLeast(limit) => v >= limit,
            Band::Outside(min, max) => v < min || v > max,
            Band::Above(limit) => v > limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRule {
    pub band: Band,
    pub points: f64,
}

const fn rule(band: Band, points: f64) -> ScoreRule {
    ScoreRule { band, points }
}

/// Optimal window 175–190 spm.
pub const CADENCE_RULES: &[ScoreRule] = &[
    rule(Band::Within(175.0, 190.0), 18.0),
    rule(Band::Within(170.0, 195.0), 14.0),
    rule(Band::Within(160.0, 205.0), 9.0),
    rule(Band::Within(150.0, 215.0), 4.0),
];

/// Shorter contact is better.
pub const GCT_RULES: &[ScoreRule] = &[
    rule(Band::Below(200.0), 18.0),
    rule(Band::Below(230.0), 14.0),
    rule(Band::Below(260.0), 10.0),
    rule(Band::Below(300.0), 5.0),
];

/// Optimal 5–10 degrees.
pub const LEAN_RULES: &[ScoreRule] = &[
    rule(Band::Within(5.0, 10.0), 8.0),
    rule(Band::Within(3.0, 13.0), 4.0),
];

pub const HIP_DROP_RULES: &[ScoreRule] = &[
    rule(Band::Below(4.0), 8.0),
    rule(Band::Below(6.0), 5.0),
    rule(Band::Below(8.0), 2.0),
];

pub const ARM_SYMMETRY_RULES: &[ScoreRule] = &[
    rule(Band::AtLeast(0.9), 8.0),
    rule(Band::AtLeast(0.8), 5.0),
    rule(Band::AtLeast(0.7), 2.0),
];

/// Scored metrics and their tables, in evaluation order.
pub const SCORE_TABLE: &[(Metric, &[ScoreRule])] = &[
    (Metric::Cadence, CADENCE_RULES),
    (Metric::GroundContact, GCT_RULES),
    (Metric::ForwardLean, LEAN_RULES),
    (Metric::HipDrop, HIP_DROP_RULES),
    (Metric::ArmSymmetry, ARM_SYMMETRY_RULES),
];

/// Highest points a table can award.
pub fn max_points(rules: &[ScoreRule]) -> f64 {
    rules.iter().map(|r| r.points).fold(0.0, f64::max)
}

/// Points from the first matching band, 0 if none match or the value is unknown.
pub fn points_for(metric: Metric, rules: &[ScoreRule], m: &GaitMetrics) -> f64 {
    let value = metric.value(m);
    if !metric.is_known(value) {
        return 0.0;
    }
    rules
        .iter()
        .find(|r| r.band.contains(value))
        .map_or(0.0, |r| r.points)
}

/// Tip severity. Higher sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Minor = 1,
    Moderate = 2,
    Major = 3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipRule {
    pub metric: Metric,
    pub band: Band,
    pub severity: Severity,
    pub tip: &'static str,
}

const fn tip(metric: Metric, band: Band, severity: Severity, tip: &'static str) -> TipRule {
    TipRule { metric, band, severity, tip }
}

/// Coaching tips. Within one metric the rules go most to least severe and
/// only the first match fires. Every scored band below full points is
/// covered by a rule, so a value that loses points always gets a tip.
pub const TIP_RULES: &[TipRule] = &[
    tip(
        Metric::Cadence,
        Band::Below(160.0),
        Severity::Major,
        "Your cadence is low. Aim for quicker, shorter steps, adding 5-10% to your step rate over the next few weeks.",
    ),
    tip(
        Metric::Cadence,
        Band::Below(175.0),
        Severity::Moderate,
        "Cadence is slightly below optimal. Try running to a 175-180 bpm metronome for short intervals.",
    ),
    tip(
        Metric::Cadence,
        Band::Above(205.0),
        Severity::Moderate,
        "Your step rate is very high. Let your stride open up a little while staying relaxed.",
    ),
    tip(
        Metric::Cadence,
        Band::Above(190.0),
        Severity::Minor,
        "Cadence is a touch above the 175-190 range. Relax and let each stride finish naturally.",
    ),
    tip(
        Metric::GroundContact,
        Band::AtLeast(300.0),
        Severity::Major,
        "Long ground contact suggests overstriding. Focus on quick, light steps landing under your hips.",
    ),
    tip(
        Metric::GroundContact,
        Band::AtLeast(260.0),
        Severity::Moderate,
        "Ground contact is on the long side. Think \"hot ground\": pick your feet up sooner.",
    ),
    tip(
        Metric::GroundContact,
        Band::AtLeast(200.0),
        Severity::Minor,
        "Ground contact is close to optimal. Skipping drills and pogo hops will sharpen it further.",
    ),
    tip(
        Metric::HipDrop,
        Band::AtLeast(8.0),
        Severity::Major,
        "Significant hip drop detected. Add single-leg glute bridges and clamshells 3x per week.",
    ),
    tip(
        Metric::HipDrop,
        Band::AtLeast(6.0),
        Severity::Moderate,
        "Some hip drop on landing. Side planks and single-leg balance work will help stabilize your pelvis.",
    ),
    tip(
        Metric::HipDrop,
        Band::AtLeast(4.0),
        Severity::Minor,
        "Slight hip drop. A few minutes of single-leg balance work in your warm-up will help.",
    ),
    tip(
        Metric::ForwardLean,
        Band::Outside(3.0, 13.0),
        Severity::Moderate,
        "Adjust your forward lean: aim for a slight lean of 5-10 degrees from the ankles, not the waist.",
    ),
    tip(
        Metric::ForwardLean,
        Band::Outside(5.0, 10.0),
        Severity::Minor,
        "Fine-tune your posture: a gentle 5-10 degree lean from the ankles keeps you moving efficiently.",
    ),
    tip(
        Metric::ArmSymmetry,
        Band::Below(0.7),
        Severity::Moderate,
        "Your arm swing is uneven. Keep both elbows at about 90 degrees and swing front to back evenly.",
    ),
    tip(
        Metric::ArmSymmetry,
        Band::Below(0.9),
        Severity::Minor,
        "Slight arm swing asymmetry. Focus on matching the range of both arms.",
    ),
    tip(
        Metric::VerticalOscillation,
        Band::Above(12.0),
        Severity::Moderate,
        "High vertical oscillation wastes energy. Run \"quiet\" and direct your effort forward, not up.",
    ),
];

pub const POSITIVE_TIP: &str =
    "Great form! Your running mechanics look efficient. Keep up the consistent training.";
