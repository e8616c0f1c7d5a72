//! # Rate Estimator Module
//!
//! Turns a value history into a rate-of-change series (e.g. damage per
//! second from a remaining-HP series).
//!
//! ## Sign Convention
//! Some series count progress up, others count remaining work down. Unless
//! the caller fixes the scale, it is inferred from the first non-zero step
//! so both kinds come out positive while progress is being made.
//!
//! ## Timestamps
//! Each rate point is stamped at the start of its interval, i.e. it is the
//! rate observed since that sample.

use crate::diff::{diff, sign};
use crate::error::EstimateError;
use crate::timeseries::{RateSample, Series};

/// Sign of the first non-zero value step, or 0 for a flat series
pub fn infer_scale(value_diffs: &[f64]) -> f64 {
    value_diffs
        .iter()
        .map(|d| sign(*d))
        .find(|s| *s != 0.0)
        .unwrap_or(0.0)
}

/// Rate of change between each pair of adjacent samples
///
/// `scale` multiplies every rate; `None` (or zero) infers it from the data.
/// Output length is always `series.len() - 1`.
///
/// ## Errors
/// - `InsufficientData` for fewer than two samples
/// - `DegenerateInterval` when two adjacent samples share a timestamp
pub fn rate(series: &Series, scale: Option<f64>) -> Result<Vec<RateSample>, EstimateError> {
    if series.len() < 2 {
        return Err(EstimateError::InsufficientData {
            required: 2,
            actual: series.len(),
        });
    }

    let value_diffs = diff(series.iter().map(|s| s.value));
    let time_diffs = diff(series.iter().map(|s| s.time));

    let scale = match scale {
        Some(s) if s != 0.0 => s,
        _ => infer_scale(&value_diffs),
    };

    let samples = series.samples();
    let mut out = Vec::with_capacity(value_diffs.len());
    for (i, (dv, dt)) in value_diffs.iter().zip(time_diffs.iter()).enumerate() {
        if *dt == 0.0 {
            return Err(EstimateError::DegenerateInterval {
                index: i + 1,
                time: samples[i].time,
            });
        }
        out.push(RateSample::new(samples[i].time, dv * scale / dt));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pairs: &[(f64, f64)]) -> Series {
        Series::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_rate_rising_series() {
        let out = rate(&series(&[(0.0, 0.0), (5.0, 10.0), (10.0, 30.0)]), None).unwrap();
        assert_eq!(out, vec![RateSample::new(0.0, 2.0), RateSample::new(5.0, 4.0)]);
    }

    #[test]
    fn test_rate_falling_series_is_positive() {
        let out = rate(&series(&[(0.0, 100.0), (10.0, 90.0), (20.0, 70.0)]), None).unwrap();
        assert_eq!(out, vec![RateSample::new(0.0, 1.0), RateSample::new(10.0, 2.0)]);
    }

    #[test]
    fn test_rate_explicit_scale() {
        let out = rate(&series(&[(0.0, 100.0), (10.0, 90.0)]), Some(1.0)).unwrap();
        assert_eq!(out, vec![RateSample::new(0.0, -1.0)]);
    }

    #[test]
    fn test_rate_zero_scale_is_inferred() {
        let falling = series(&[(0.0, 100.0), (10.0, 90.0), (20.0, 70.0)]);
        assert_eq!(rate(&falling, Some(0.0)), rate(&falling, None));
        assert_eq!(rate(&falling, Some(0.0)).unwrap()[0], RateSample::new(0.0, 1.0));
    }

    #[test]
    fn test_rate_skips_leading_flat_steps_for_scale() {
        let out = rate(
            &series(&[(0.0, 50.0), (1.0, 50.0), (2.0, 40.0), (3.0, 45.0)]),
            None,
        )
        .unwrap();
        // First non-zero step is downwards, so scale is -1
        assert_eq!(out[0].rate, 0.0);
        assert_eq!(out[1].rate, 10.0);
        assert_eq!(out[2].rate, -5.0);
    }

    #[test]
    fn test_rate_flat_series_is_zero() {
        let out = rate(&series(&[(0.0, 7.0), (1.0, 7.0), (2.0, 7.0)]), None).unwrap();
        assert!(out.iter().all(|p| p.rate == 0.0));
    }

    #[test]
    fn test_rate_constant_increment() {
        let pairs: Vec<(f64, f64)> = (0..50).map(|i| (i as f64 * 3.0, 10.0 + i as f64 * 6.0)).collect();
        let out = rate(&series(&pairs), Some(1.0)).unwrap();
        assert_eq!(out.len(), pairs.len() - 1);
        assert!(out.iter().all(|p| (p.rate - 2.0).abs() < 1e-12));
    }

    #[test]
    fn test_rate_insufficient_data() {
        assert_eq!(
            rate(&series(&[(0.0, 1.0)]), None),
            Err(EstimateError::InsufficientData {
                required: 2,
                actual: 1
            })
        );
        assert!(rate(&Series::default(), None).is_err());
    }

    #[test]
    fn test_rate_degenerate_interval() {
        let err = rate(&series(&[(0.0, 1.0), (5.0, 2.0), (5.0, 3.0)]), None).unwrap_err();
        assert_eq!(err, EstimateError::DegenerateInterval { index: 2, time: 5.0 });
    }

    #[test]
    fn test_infer_scale() {
        assert_eq!(infer_scale(&[0.0, 0.0, 3.0]), 1.0);
        assert_eq!(infer_scale(&[0.0, -2.0, 3.0]), -1.0);
        assert_eq!(infer_scale(&[0.0, 0.0]), 0.0);
        assert_eq!(infer_scale(&[]), 0.0);
    }
}
