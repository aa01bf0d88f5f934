//! Ground contact time from inter-contact intervals.

/// Ground contact occupies roughly this fraction of the step cycle.
const CONTACT_RATIO: f64 = 0.58;
/// Ratio used when outlier rejection leaves nothing.
const FALLBACK_RATIO: f64 = 0.6;
const MIN_INTERVALS: usize = 4;
/// Intervals farther than this many standard deviations from the mean are dropped.
const OUTLIER_SIGMA: f64 = 2.0;

/// Mean and population standard deviation. `None` for an empty slice.
pub fn mean_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}

/// Estimate GCT in milliseconds. Returns 0 with fewer than four intervals.
pub fn estimate_gct_ms(intervals_ms: &[u64]) -> f64 {
    if intervals_ms.len() < MIN_INTERVALS {
        return 0.0;
    }
    let values: Vec<f64> = intervals_ms.iter().map(|&v| v as f64).collect();
    let Some((mean, std)) = mean_std(&values) else {
        return 0.0;
    };

    let kept: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| (v - mean).abs() <= OUTLIER_SIGMA * std)
        .collect();

    match mean_std(&kept) {
        Some((clean_mean, _)) => clean_mean * CONTACT_RATIO,
        None => mean * FALLBACK_RATIO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_intervals() {
        let gct = estimate_gct_ms(&[400; 10]);
        assert!((gct - 232.0).abs() < 1e-9, "gct={}", gct);
    }

    #[test]
    fn test_too_few_intervals() {
        assert_eq!(estimate_gct_ms(&[]), 0.0);
        assert_eq!(estimate_gct_ms(&[400, 400, 400]), 0.0);
        assert!(estimate_gct_ms(&[400, 400, 400, 400]) > 0.0);
    }

    #[test]
    fn test_outlier_rejected() {
        let mut intervals = vec![400u64; 12];
        intervals.push(790);
        let gct = estimate_gct_ms(&intervals);
        // the 790 sample sits > 2σ out, so the result matches the clean set
        assert!((gct - 232.0).abs() < 1e-9, "gct={}", gct);
    }

    #[test]
    fn test_mixed_intervals_within_band() {
        // 300/500 alternate: all within 2σ, mean 400
        let gct = estimate_gct_ms(&[300, 500, 300, 500]);
        assert!((gct - 232.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_std() {
        assert!(mean_std(&[]).is_none());
        let (m, s) = mean_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((m - 5.0).abs() < 1e-12);
        assert!((s - 2.0).abs() < 1e-12);
    }
}
