//! # Time Series Module
//!
//! Immutable (timestamp, value) history for one tracked entity.
//!
//! A `Series` is built once by the data loader and only ever read by the
//! engine. Construction enforces the invariant every computation relies on:
//! finite samples with non-decreasing timestamps.

use crate::error::SeriesError;

/// One snapshot: unix timestamp in seconds and the tracked value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((time, value): (f64, f64)) -> Self {
        Self { time, value }
    }
}

/// Rate of change between two adjacent samples, stamped at the interval start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSample {
    pub time: f64,
    pub rate: f64,
}

impl RateSample {
    pub fn new(time: f64, rate: f64) -> Self {
        Self { time, rate }
    }
}

/// Anything that can be drawn as an (x, y) point
pub trait PlotPoint {
    fn xy(&self) -> (f64, f64);
}

impl PlotPoint for Sample {
    fn xy(&self) -> (f64, f64) {
        (self.time, self.value)
    }
}

impl PlotPoint for RateSample {
    fn xy(&self) -> (f64, f64) {
        (self.time, self.rate)
    }
}

pub trait PointSliceExt {
    fn min_max_time(&self) -> Option<(f64, f64)>;
    fn min_max_value(&self) -> Option<(f64, f64)>;
}

// Implement the trait for any slice of plottable points
impl<P: PlotPoint> PointSliceExt for [P] {
    fn min_max_time(&self) -> Option<(f64, f64)> {
        self.iter().fold(None, |acc, point| {
            let (x, _) = point.xy();
            match acc {
                None => Some((x, x)),
                Some((min, max)) => Some((f64::min(min, x), f64::max(max, x))),
            }
        })
    }

    fn min_max_value(&self) -> Option<(f64, f64)> {
        self.iter().fold(None, |acc, point| {
            let (_, y) = point.xy();
            match acc {
                None => Some((y, y)),
                Some((min, max)) => Some((f64::min(min, y), f64::max(max, y))),
            }
        })
    }
}

/// Ordered, validated sequence of samples
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    data: Vec<Sample>,
}

impl Series {
    /// Build a series, rejecting non-finite samples and backwards timestamps
    pub fn new(data: Vec<Sample>) -> Result<Self, SeriesError> {
        for (index, sample) in data.iter().enumerate() {
            if !sample.time.is_finite() || !sample.value.is_finite() {
                return Err(SeriesError::NonFinite { index });
            }
            if index > 0 {
                let previous = data[index - 1].time;
                if sample.time < previous {
                    return Err(SeriesError::Unordered {
                        index,
                        previous,
                        current: sample.time,
                    });
                }
            }
        }
        Ok(Self { data })
    }

    /// Build from `(timestamp, value)` pairs as found in the snapshot document
    pub fn from_pairs<I>(pairs: I) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(pairs.into_iter().map(Sample::from).collect())
    }

    /// Build from parallel timestamp and value columns
    pub fn from_columns(times: &[f64], values: &[f64]) -> Result<Self, SeriesError> {
        if times.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        Self::from_pairs(times.iter().copied().zip(values.iter().copied()))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.data
    }

    pub fn last_point(&self) -> Option<&Sample> {
        self.data.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.data.iter()
    }

    /// The `n` most recent samples (all of them if the series is shorter)
    pub fn last_points(&self, n: usize) -> &[Sample] {
        &self.data[self.data.len().saturating_sub(n)..]
    }

    /// New series with every value passed through `f`; timestamps are kept
    pub fn map_values<F>(&self, f: F) -> Series
    where
        F: Fn(f64) -> f64,
    {
        Series {
            data: self
                .data
                .iter()
                .map(|s| Sample::new(s.time, f(s.value)))
                .collect(),
        }
    }
}
