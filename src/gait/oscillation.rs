//! 腰中点Yの上下動から上下動量 (vertical oscillation) を推定する。

use crate::window::RollingWindow;

/// 解析に使う直近サンプル数（30fps で約2秒）
const ANALYSIS_SAMPLES: usize = 60;
/// これ未満の振れ幅は微小ノイズとして無視（正規化単位）
const MIN_AMPLITUDE: f64 = 0.005;
/// 生理的にありうる範囲 (cm)
const MIN_OSCILLATION_CM: f64 = 2.0;
const MAX_OSCILLATION_CM: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Extremum {
    Peak(f64),
    Trough(f64),
}

/// 局所極値を列挙する（平坦部は最初の点だけ拾う）
fn local_extrema(samples: &[f64]) -> Vec<Extremum> {
    let mut out = Vec::new();
    for w in samples.windows(3) {
        let (a, b, c) = (w[0], w[1], w[2]);
        if b > a && b >= c {
            out.push(Extremum::Peak(b));
        } else if b < a && b <= c {
            out.push(Extremum::Trough(b));
        }
    }
    out
}

/// 振れ幅ゲート付きで山→谷の振幅を集める
///
/// 同種の極値が続いた場合はより極端な方で置き換える。ゲート未満の
/// 逆向き極値はジッタとして読み飛ばす。
fn peak_to_trough_amplitudes(extrema: &[Extremum]) -> Vec<f64> {
    let mut amplitudes = Vec::new();
    let mut anchor: Option<Extremum> = None;

    for &e in extrema {
        anchor = match (anchor, e) {
            (None, e) => Some(e),
            (Some(Extremum::Peak(p)), Extremum::Peak(q)) => Some(Extremum::Peak(p.max(q))),
            (Some(Extremum::Trough(p)), Extremum::Trough(q)) => Some(Extremum::Trough(p.min(q))),
            (Some(Extremum::Peak(p)), Extremum::Trough(t)) => {
                // 画像座標は下が正だが振幅は絶対値で扱う
                let amplitude = (p - t).abs();
                if amplitude >= MIN_AMPLITUDE {
                    amplitudes.push(amplitude);
                    Some(e)
                } else {
                    anchor
                }
            }
            (Some(Extremum::Trough(t)), Extremum::Peak(p)) => {
                if (p - t).abs() >= MIN_AMPLITUDE {
                    Some(e)
                } else {
                    anchor
                }
            }
        };
    }
    amplitudes
}

/// 上下動量 (cm)
///
/// 周期が1つも見つからなければ窓内の max−min で代用する。
/// サンプルが2未満なら 0。
pub fn estimate_oscillation_cm(hip_history: &RollingWindow<f64>, body_height_cm: f64) -> f64 {
    let samples: Vec<f64> = hip_history.last_n(ANALYSIS_SAMPLES).copied().collect();
    if samples.len() < 2 {
        return 0.0;
    }

    let amplitudes = peak_to_trough_amplitudes(&local_extrema(&samples));
    let amplitude = if amplitudes.is_empty() {
        let max = samples.iter().copied().fold(f64::MIN, f64::max);
        let min = samples.iter().copied().fold(f64::MAX, f64::min);
        max - min
    } else {
        amplitudes.iter().sum::<f64>() / amplitudes.len() as f64
    };

    (amplitude * body_height_cm).clamp(MIN_OSCILLATION_CM, MAX_OSCILLATION_CM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn window_from(values: impl IntoIterator<Item = f64>) -> RollingWindow<f64> {
        let mut w = RollingWindow::new(150);
        for v in values {
            w.push(v);
        }
        w
    }

    /// 振れ幅 (山→谷) が `peak_to_trough` の正弦波、1周期 `period` サンプル
    fn sine(n: usize, period: usize, peak_to_trough: f64) -> Vec<f64> {
        (0..n)
            .map(|i| 0.5 + peak_to_trough / 2.0 * (2.0 * PI * i as f64 / period as f64).sin())
            .collect()
    }

    #[test]
    fn test_sine_converges_to_amplitude_times_height() {
        let w = window_from(sine(90, 20, 0.05));
        let cm = estimate_oscillation_cm(&w, 175.0);
        assert!((cm - 0.05 * 175.0).abs() < 0.05, "cm={}", cm);
    }

    #[test]
    fn test_height_override_scales() {
        let w = window_from(sine(90, 20, 0.05));
        let tall = estimate_oscillation_cm(&w, 190.0);
        let short = estimate_oscillation_cm(&w, 160.0);
        assert!(tall > short);
        assert!((tall - 0.05 * 190.0).abs() < 0.05);
    }

    #[test]
    fn test_jitter_below_gate_ignored() {
        // 0.002 の細かい揺れを載せても振幅はほぼ変わらない
        let values: Vec<f64> = sine(90, 30, 0.06)
            .into_iter()
            .enumerate()
            .map(|(i, v)| if i % 2 == 0 { v + 0.001 } else { v - 0.001 })
            .collect();
        let cm = estimate_oscillation_cm(&window_from(values), 100.0);
        assert!((cm - 6.0).abs() < 0.6, "cm={}", cm);
    }

    #[test]
    fn test_clamped_to_physiological_range() {
        let huge = window_from(sine(90, 20, 0.5));
        assert_eq!(estimate_oscillation_cm(&huge, 175.0), 20.0);

        let flat = window_from(std::iter::repeat(0.5).take(60));
        assert_eq!(estimate_oscillation_cm(&flat, 175.0), 2.0);
    }

    #[test]
    fn test_monotonic_falls_back_to_range() {
        // 極値がない単調列 → max-min
        let w = window_from((0..40).map(|i| 0.5 + i as f64 * 0.001));
        let cm = estimate_oscillation_cm(&w, 100.0);
        assert!((cm - 3.9).abs() < 1e-9, "cm={}", cm);
    }

    #[test]
    fn test_too_few_samples() {
        assert_eq!(estimate_oscillation_cm(&window_from([]), 175.0), 0.0);
        assert_eq!(estimate_oscillation_cm(&window_from([0.5]), 175.0), 0.0);
    }

    #[test]
    fn test_only_latest_samples_used() {
        // 古い大振幅は解析窓 (60) の外
        let mut values = sine(60, 20, 0.2);
        values.extend(sine(60, 20, 0.04));
        let cm = estimate_oscillation_cm(&window_from(values), 100.0);
        assert!((cm - 4.0).abs() < 0.05, "cm={}", cm);
    }
}
