use crate::gait::contact::FootContactEvent;
use crate::window::RollingWindow;

/// 直近この期間の接地を数える (ms)
const RECENT_SPAN_MS: u64 = 3_000;
/// 直近の接地がこれ未満なら履歴全体を使う
const MIN_RECENT_EVENTS: usize = 3;
const MIN_CADENCE_SPM: f64 = 100.0;
const MAX_CADENCE_SPM: f64 = 240.0;

/// ケイデンス (steps/min)
///
/// `now_ms` は最新フレームのタイムスタンプ。接地が2回未満なら 0。
pub fn estimate_cadence_spm(events: &RollingWindow<FootContactEvent>, now_ms: u64) -> f64 {
    let cutoff = now_ms.saturating_sub(RECENT_SPAN_MS);
    let recent: Vec<u64> = events
        .iter()
        .map(|e| e.timestamp_ms)
        .filter(|&ts| ts >= cutoff)
        .collect();

    let timestamps = if recent.len() >= MIN_RECENT_EVENTS {
        recent
    } else {
        events.iter().map(|e| e.timestamp_ms).collect()
    };

    let (Some(&first), Some(&last)) = (timestamps.first(), timestamps.last()) else {
        return 0.0;
    };
    let span_ms = last.saturating_sub(first);
    if timestamps.len() < 2 || span_ms == 0 {
        return 0.0;
    }

    let cadence = timestamps.len() as f64 / span_ms as f64 * 60_000.0;
    cadence.clamp(MIN_CADENCE_SPM, MAX_CADENCE_SPM)
}
