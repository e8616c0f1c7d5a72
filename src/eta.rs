//! # ETA Predictor Module
//!
//! Linear extrapolation of when a series will reach a target value.
//!
//! ## Method
//! The average rate over the last `lookback` samples is extended from the
//! most recent sample:
//!
//! ```text
//! avg_rate  = (last.value - first.value) / (last.time - first.time)
//! eta       = last.time + (target - last.value) / avg_rate
//! ```
//!
//! A zero average rate falls back to the sign of the value change. When the
//! window shows no change at all the target is unreachable and the result
//! is `Eta::Never`, never an infinite timestamp.
//!
//! The projection is direction-agnostic: a target that has already been
//! passed yields an ETA in the past.

use std::cmp::Ordering;

use crate::diff::sign;
use crate::error::EstimateError;
use crate::timeseries::Series;

/// Projected completion time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eta {
    /// Unix timestamp (seconds) at which the target is reached
    At(f64),
    /// No progress in the lookback window; no estimate possible
    Never,
}

impl Eta {
    pub fn timestamp(&self) -> Option<f64> {
        match self {
            Eta::At(t) => Some(*t),
            Eta::Never => None,
        }
    }

    /// Earliest first, `Never` after every real timestamp
    pub fn cmp_ascending(&self, other: &Eta) -> Ordering {
        match (self, other) {
            (Eta::At(a), Eta::At(b)) => a.total_cmp(b),
            (Eta::At(_), Eta::Never) => Ordering::Less,
            (Eta::Never, Eta::At(_)) => Ordering::Greater,
            (Eta::Never, Eta::Never) => Ordering::Equal,
        }
    }
}

/// ETA for one of several targets evaluated against the same series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetEta {
    pub target: f64,
    pub eta: Eta,
}

/// Estimate when `series` reaches `target` using the last `lookback` samples
///
/// A `lookback` of 0 uses the whole series.
///
/// ## Errors
/// - `InsufficientData` if fewer than two samples fall in the window
/// - `DegenerateInterval` if the window spans zero time
pub fn calc_eta(series: &Series, target: f64, lookback: usize) -> Result<Eta, EstimateError> {
    let window = if lookback == 0 {
        series.samples()
    } else {
        series.last_points(lookback)
    };
    if window.len() < 2 {
        return Err(EstimateError::InsufficientData {
            required: 2,
            actual: window.len(),
        });
    }

    let first = window[0];
    let last = window[window.len() - 1];

    let data_diff = last.value - first.value;
    let time_diff = last.time - first.time;
    if time_diff == 0.0 {
        return Err(EstimateError::DegenerateInterval {
            index: series.len() - window.len(),
            time: first.time,
        });
    }

    let mut avg_rate = data_diff / time_diff;
    if avg_rate == 0.0 {
        // Underflow keeps the direction; a flat window stays at zero
        avg_rate = sign(data_diff);
        log::debug!(
            "Zero average rate over {} samples, falling back to {}",
            window.len(),
            avg_rate
        );
    }

    let remaining = target - last.value;
    if avg_rate == 0.0 {
        if remaining == 0.0 {
            return Ok(Eta::At(last.time));
        }
        return Ok(Eta::Never);
    }

    let eta = last.time + remaining / avg_rate;
    if eta.is_finite() {
        Ok(Eta::At(eta))
    } else {
        Ok(Eta::Never)
    }
}

/// Evaluate every target independently, ordered by ascending ETA
pub fn calc_etas(
    series: &Series,
    targets: &[f64],
    lookback: usize,
) -> Result<Vec<TargetEta>, EstimateError> {
    let mut out = targets
        .iter()
        .map(|&target| calc_eta(series, target, lookback).map(|eta| TargetEta { target, eta }))
        .collect::<Result<Vec<_>, _>>()?;
    out.sort_by(|a, b| a.eta.cmp_ascending(&b.eta));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pairs: &[(f64, f64)]) -> Series {
        Series::from_pairs(pairs.iter().copied()).unwrap()
    }

    fn assert_eta(eta: Eta, expected: f64) {
        match eta {
            Eta::At(t) => assert!((t - expected).abs() < 1e-9, "expected {}, got {}", expected, t),
            Eta::Never => panic!("expected {}, got Never", expected),
        }
    }

    #[test]
    fn test_eta_falling_series() {
        let s = series(&[(0.0, 100.0), (10.0, 90.0), (20.0, 80.0)]);
        assert_eq!(calc_eta(&s, 0.0, 2).unwrap(), Eta::At(100.0));
    }

    #[test]
    fn test_eta_uses_only_lookback_window() {
        // Slow start, fast finish: only the last two samples count
        let s = series(&[(0.0, 0.0), (100.0, 10.0), (110.0, 110.0)]);
        assert_eta(calc_eta(&s, 210.0, 2).unwrap(), 120.0);
        // Whole-history rate is 1, so the target is 100s away
        assert_eta(calc_eta(&s, 210.0, 3).unwrap(), 210.0);
    }

    #[test]
    fn test_eta_lookback_larger_than_series() {
        let s = series(&[(0.0, 0.0), (10.0, 5.0)]);
        assert_eta(calc_eta(&s, 10.0, 1000).unwrap(), 20.0);
    }

    #[test]
    fn test_eta_lookback_zero_uses_whole_series() {
        let s = series(&[(0.0, 0.0), (10.0, 10.0), (20.0, 20.0)]);
        assert_eta(calc_eta(&s, 100.0, 0).unwrap(), 100.0);

        let s = series(&[(0.0, 0.0), (100.0, 10.0), (110.0, 110.0)]);
        assert_eq!(calc_eta(&s, 210.0, 0).unwrap(), calc_eta(&s, 210.0, 3).unwrap());

        let s = series(&[(0.0, 3.0)]);
        assert!(matches!(
            calc_eta(&s, 10.0, 0),
            Err(EstimateError::InsufficientData { actual: 1, .. })
        ));
    }

    #[test]
    fn test_eta_linear_series_matches_analytic_solution() {
        let (a, b) = (250.0, 3.5);
        let pairs: Vec<(f64, f64)> = (0..40)
            .map(|i| {
                let t = 1_700_000_000.0 + i as f64 * 60.0;
                (t, a + b * (t - 1_700_000_000.0))
            })
            .collect();
        let s = series(&pairs);
        let target = 50_000.0;
        let expected = 1_700_000_000.0 + (target - a) / b;
        match calc_eta(&s, target, pairs.len()).unwrap() {
            Eta::At(t) => assert!((t - expected).abs() < 1e-3),
            Eta::Never => panic!("linear series must have an estimate"),
        }
    }

    #[test]
    fn test_eta_target_already_passed_is_in_the_past() {
        let s = series(&[(0.0, 0.0), (10.0, 100.0)]);
        assert_eta(calc_eta(&s, 50.0, 2).unwrap(), 5.0);
    }

    #[test]
    fn test_eta_flat_window_is_never() {
        let s = series(&[(0.0, 10.0), (10.0, 20.0), (20.0, 20.0), (30.0, 20.0)]);
        assert_eq!(calc_eta(&s, 100.0, 3).unwrap(), Eta::Never);
    }

    #[test]
    fn test_eta_flat_window_at_target() {
        let s = series(&[(0.0, 20.0), (10.0, 20.0)]);
        assert_eq!(calc_eta(&s, 20.0, 2).unwrap(), Eta::At(10.0));
    }

    #[test]
    fn test_eta_underflowing_rate_uses_sign() {
        let s = series(&[(0.0, 0.0), (1e300, 1e-300)]);
        // 1e-300 / 1e300 underflows to 0, fallback rate is +1
        assert_eq!(calc_eta(&s, 10.0, 2).unwrap(), Eta::At(1e300 + 10.0));
    }

    #[test]
    fn test_eta_is_repeatable() {
        let s = series(&[(0.0, 3.0), (7.0, 11.0), (13.0, 17.0)]);
        let first = calc_eta(&s, 1000.0, 3).unwrap();
        for _ in 0..10 {
            assert_eq!(calc_eta(&s, 1000.0, 3).unwrap(), first);
        }
    }

    #[test]
    fn test_eta_insufficient_data() {
        let s = series(&[(0.0, 3.0)]);
        assert!(matches!(
            calc_eta(&s, 10.0, 5),
            Err(EstimateError::InsufficientData { actual: 1, .. })
        ));

        let s = series(&[(0.0, 3.0), (1.0, 4.0)]);
        assert!(matches!(
            calc_eta(&s, 10.0, 1),
            Err(EstimateError::InsufficientData { actual: 1, .. })
        ));
    }

    #[test]
    fn test_eta_zero_time_span() {
        let s = series(&[(0.0, 1.0), (5.0, 3.0), (5.0, 4.0)]);
        assert_eq!(
            calc_eta(&s, 10.0, 2),
            Err(EstimateError::DegenerateInterval { index: 1, time: 5.0 })
        );
    }

    #[test]
    fn test_calc_etas_sorted_ascending() {
        let s = series(&[(0.0, 0.0), (10.0, 10.0)]);
        let etas = calc_etas(&s, &[300.0, 50.0, 100.0], 2).unwrap();
        let targets: Vec<f64> = etas.iter().map(|e| e.target).collect();
        assert_eq!(targets, vec![50.0, 100.0, 300.0]);
        assert_eq!(etas[0].eta, Eta::At(50.0));
    }

    #[test]
    fn test_cmp_ascending_never_last() {
        let mut etas = vec![Eta::Never, Eta::At(30.0), Eta::At(-5.0)];
        etas.sort_by(Eta::cmp_ascending);
        assert_eq!(etas, vec![Eta::At(-5.0), Eta::At(30.0), Eta::Never]);
    }

    #[test]
    fn test_eta_thread_safe() {
        let s = series(&[(0.0, 100.0), (10.0, 90.0), (20.0, 80.0)]);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| calc_eta(&s, 0.0, 2)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap().unwrap(), Eta::At(100.0));
            }
        });
    }
}
