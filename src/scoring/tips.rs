use std::collections::HashSet;

use crate::gait::GaitMetrics;
use crate::scoring::rules::{Metric, Severity, TipRule, POSITIVE_TIP, TIP_RULES};

/// 指標ごとに最初にマッチしたルールだけ採用し、重大度の高い順に並べる
///
/// 同じ重大度の中ではテーブル順を保つ（安定ソート）。
/// 1件も出なければ肯定的な一言を返す。
pub fn coaching_tips(m: &GaitMetrics) -> Vec<String> {
    coaching_tips_with(TIP_RULES, m)
}

pub(crate) fn coaching_tips_with(rules: &[TipRule], m: &GaitMetrics) -> Vec<String> {
    let mut fired: HashSet<Metric> = HashSet::new();
    let mut hits: Vec<(Severity, &'static str)> = Vec::new();

    for rule in rules {
        if fired.contains(&rule.metric) {
            continue;
        }
        let value = rule.metric.value(m);
        if !rule.metric.is_known(value) {
            continue;
        }
        if rule.band.contains(value) {
            fired.insert(rule.metric);
            hits.push((rule.severity, rule.tip));
        }
    }

    hits.sort_by(|a, b| b.0.cmp(&a.0));

    let mut seen = HashSet::new();
    let tips: Vec<String> = hits
        .into_iter()
        .filter(|(_, tip)| seen.insert(*tip))
        .map(|(_, tip)| tip.to_string())
        .collect();

    if tips.is_empty() {
        vec![POSITIVE_TIP.to_string()]
    } else {
        tips
    }
}
