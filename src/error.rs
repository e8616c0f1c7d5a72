//! # Error Types Module
//!
//! Centralized error handling for raid-eta.
//! One error type per concern, each carrying enough context to tell the
//! user which entity or file was at fault.
//!
//! ## Error Types
//! - `EstimateError`: Rate and ETA computations that cannot produce a number
//! - `SeriesError`: A series that violates the ordering invariant
//! - `DataError`: Snapshot document I/O and parsing errors
//! - `ConfigError`: Configuration file I/O and parsing errors
//! - `ChartError`: Chart rendering failures
//!
//! ## Usage Examples
//! ```rust,ignore
//! // Engine functions use EstimateError
//! pub fn rate(series: &Series, scale: Option<f64>) -> Result<Vec<RateSample>, EstimateError> { ... }
//!
//! // Config module uses ConfigError
//! pub fn load() -> Result<Config, ConfigError> { ... }
//! ```
//!
//! An unreachable target is not an error: `eta::Eta::Never` covers it, so the
//! presentation layer can show "no estimate available" instead of a date.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the estimation engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    /// Fewer samples than the computation needs
    #[error("Not enough data: need at least {required} samples, got {actual}")]
    InsufficientData { required: usize, actual: usize },
    /// Two samples share a timestamp where a rate is computed
    #[error("Zero-length interval at sample {index} (t = {time})")]
    DegenerateInterval { index: usize, time: f64 },
}

/// Errors raised while building a `Series`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    /// Timestamp goes backwards
    #[error("Timestamp at sample {index} ({current}) is before the previous one ({previous})")]
    Unordered {
        index: usize,
        previous: f64,
        current: f64,
    },
    /// Timestamp or value is NaN or infinite
    #[error("Sample {index} is not a finite number")]
    NonFinite { index: usize },
    /// Parallel time/value columns differ in length
    #[error("Column length mismatch: {times} timestamps, {values} values")]
    LengthMismatch { times: usize, values: usize },
}

/// Errors that can occur while loading a snapshot document
#[derive(Debug, Error)]
pub enum DataError {
    /// Failed to read the document
    #[error("Failed to read data file {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to parse the document
    #[error("Failed to parse data file: {0}")]
    ParseFailed(#[from] serde_json::Error),
    /// An entity's series breaks the ordering invariant
    #[error("Invalid series for {entity}: {source}")]
    InvalidSeries {
        entity: String,
        #[source]
        source: SeriesError,
    },
}

/// Errors that can occur during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[source] std::io::Error),
    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteFailed(#[source] std::io::Error),
    /// Failed to parse config file
    #[error("Failed to parse config file: {0}")]
    ParseFailed(#[from] toml::de::Error),
    /// Failed to serialize config
    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),
}

/// Errors that can occur while drawing charts
#[derive(Debug, Error)]
pub enum ChartError {
    /// Nothing to plot
    #[error("Chart \"{0}\" has no data to plot")]
    NoData(String),
    /// Drawing backend failure
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}
