//! # Downsampling Module
//!
//! Reduces a dense rate series to a bounded number of points for plotting
//! using the LTTB (Largest Triangle Three Buckets) algorithm.
//!
//! The first and last points are always kept. The interior is split into
//! `target - 2` buckets and from each bucket the point forming the largest
//! triangle with the previously chosen point and the average of the next
//! bucket is kept, so spikes survive where striding or averaging would
//! flatten them.
//!
//! The selection is deterministic.

use crate::timeseries::RateSample;

/// Downsample `points` to at most `target_points` points
///
/// Inputs that already fit, or hold fewer than two points, are returned
/// unchanged. Targets below three leave only the end points.
pub fn downsample(points: &[RateSample], target_points: usize) -> Vec<RateSample> {
    let n = points.len();

    if n <= target_points || n < 2 {
        return points.to_vec();
    }

    if target_points < 3 {
        log::trace!("Downsampling {} points to end points only", n);
        return vec![points[0], points[n - 1]];
    }

    log::trace!("Downsampling {} points to {}", n, target_points);

    let mut result = Vec::with_capacity(target_points);
    result.push(points[0]);

    let bucket_size = (n - 2) as f64 / (target_points - 2) as f64;
    let mut a_index = 0usize;

    for i in 0..(target_points - 2) {
        let bucket_start = (i as f64 * bucket_size).floor() as usize + 1;
        let bucket_end = (((i + 1) as f64 * bucket_size).floor() as usize + 1).min(n - 1);

        // Average of the next bucket (or the last point for the final bucket)
        let next_start = bucket_end;
        let next_end = (((i + 2) as f64 * bucket_size).floor() as usize + 1).min(n - 1);
        let (avg_x, avg_y) = if next_start < next_end {
            let next = &points[next_start..next_end];
            let count = next.len() as f64;
            let sum_x: f64 = next.iter().map(|p| p.time).sum();
            let sum_y: f64 = next.iter().map(|p| p.rate).sum();
            (sum_x / count, sum_y / count)
        } else {
            (points[n - 1].time, points[n - 1].rate)
        };

        let a = points[a_index];
        let mut max_area = -1.0f64;
        let mut max_index = bucket_start;

        for (j, p) in points[bucket_start..bucket_end].iter().enumerate() {
            let area = ((a.time - avg_x) * (p.rate - a.rate) - (a.time - p.time) * (avg_y - a.rate)).abs();
            if area > max_area {
                max_area = area;
                max_index = bucket_start + j;
            }
        }

        result.push(points[max_index]);
        a_index = max_index;
    }

    result.push(points[n - 1]);
    result
}

/// Number of points the smoothed rate chart should keep: half the raw
/// points (rounded), capped at `max_points`
pub fn smoothing_target(len: usize, max_points: usize) -> usize {
    max_points.min((len + 1) / 2)
}
