//! # raid-eta
//!
//! Completion estimates and chart series for timed raid events.
//!
//! The engine is four pure functions over an in-memory `Series`:
//! - `diff::diff`: pairwise forward differences
//! - `rate::rate`: rate-of-change series with sign inference
//! - `eta::calc_eta`: linear ETA over a lookback window
//! - `downsample::downsample`: LTTB point reduction for plotting
//!
//! `dashboard` composes them per entity of a snapshot document; `format`
//! and `charts` turn the result into text and SVG.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod diff;
pub mod downsample;
pub mod error;
pub mod eta;
pub mod format;
pub mod raid_data;
pub mod rate;
pub mod timeseries;
