//! # Raid Snapshot Data Module
//!
//! Typed model of the `data.json` document produced by the snapshot
//! collector. Parsing happens once per dashboard load; everything past this
//! module works with validated `Series` values.
//!
//! ## Document Shape
//! ```text
//! {
//!   "data":      { "<entity>": [[t, v], ...] },
//!   "target":    { "<entity>": [target, ...] },
//!   "scale":     { "<entity>": number },
//!   "startTime": { "<entity>": [t, ...] },
//!   "endTime":   { "<entity>": [t, ...] },
//!   "config":    { "pageTitle": ..., "etaLookBack": ..., ... }
//! }
//! ```
//!
//! Entity maps are `BTreeMap`s so charts and output keep a stable order.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::timeseries::Series;

/// Sentinel in the `scale` map for series that are already in display units
const SCALE_AS_IS: f64 = -1.0;

/// How an entity's raw values become the plotted progress series
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityScale {
    /// Raw values count up towards the first target; plot what is left,
    /// divided into display units and clamped at zero
    Remaining { divisor: f64 },
    /// Raw values are plotted unchanged
    AsIs,
    /// Not plotted
    Hidden,
}

impl From<f64> for EntityScale {
    fn from(raw: f64) -> Self {
        if raw > 0.0 {
            EntityScale::Remaining { divisor: raw }
        } else if raw == SCALE_AS_IS {
            EntityScale::AsIs
        } else {
            EntityScale::Hidden
        }
    }
}

impl EntityScale {
    /// Apply the scale to an entity series, `None` when the entity is hidden
    ///
    /// `first_target` is only consulted for `Remaining`.
    pub fn apply(&self, series: &Series, first_target: Option<f64>) -> Option<Series> {
        match *self {
            EntityScale::Remaining { divisor } => {
                let target = first_target?;
                Some(series.map_values(|v| f64::max((target - v) / divisor, 0.0)))
            }
            EntityScale::AsIs => Some(series.clone()),
            EntityScale::Hidden => None,
        }
    }
}

/// Event-level presentation settings carried in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventConfig {
    pub page_title: String,
    pub eta_look_back: usize,
    /// Hours west of UTC
    #[serde(default)]
    pub timezone_offset: f64,
    #[serde(default)]
    pub timezone_name: String,
    pub hp_title: String,
    pub hp_unit: String,
    pub dps_title: String,
    pub dps_unit: String,
}

impl EventConfig {
    /// Offset east of UTC in seconds, as used by chrono
    pub fn utc_offset_seconds(&self) -> i32 {
        (-self.timezone_offset * 3600.0).round() as i32
    }
}

/// Raw document as it appears on disk
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRaidData {
    data: BTreeMap<String, Vec<(f64, f64)>>,
    #[serde(default)]
    target: BTreeMap<String, Vec<f64>>,
    #[serde(default)]
    scale: BTreeMap<String, f64>,
    #[serde(default)]
    start_time: BTreeMap<String, Vec<f64>>,
    #[serde(default)]
    end_time: BTreeMap<String, Vec<f64>>,
    config: EventConfig,
}

/// One tracked entity (boss) with everything the dashboard needs
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    pub series: Series,
    pub targets: Vec<f64>,
    pub scale: EntityScale,
    pub start_times: Vec<f64>,
    pub end_times: Vec<f64>,
}

impl Entity {
    pub fn has_many_targets(&self) -> bool {
        self.targets.len() > 1
    }

    /// Series in display units, `None` when the entity is not plotted
    pub fn progress_series(&self) -> Option<Series> {
        self.scale.apply(&self.series, self.targets.first().copied())
    }
}

/// Parsed and validated snapshot document
#[derive(Debug, Clone, PartialEq)]
pub struct RaidData {
    pub entities: Vec<Entity>,
    pub config: EventConfig,
}

impl RaidData {
    /// Parse a document from a JSON string
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let raw: RawRaidData = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Read and parse a document from disk
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let contents = fs::read_to_string(path).map_err(|source| DataError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json(&contents)?;
        log::info!(
            "Loaded {} entities from {}",
            data.entities.len(),
            path.display()
        );
        Ok(data)
    }

    fn from_raw(mut raw: RawRaidData) -> Result<Self, DataError> {
        let mut entities = Vec::with_capacity(raw.data.len());

        for (name, pairs) in raw.data {
            let series = Series::from_pairs(pairs).map_err(|source| DataError::InvalidSeries {
                entity: name.clone(),
                source,
            })?;
            let scale = raw
                .scale
                .get(&name)
                .copied()
                .map(EntityScale::from)
                .unwrap_or(EntityScale::Hidden);

            entities.push(Entity {
                targets: raw.target.remove(&name).unwrap_or_default(),
                start_times: raw.start_time.remove(&name).unwrap_or_default(),
                end_times: raw.end_time.remove(&name).unwrap_or_default(),
                name,
                series,
                scale,
            });
        }

        Ok(Self {
            entities,
            config: raw.config,
        })
    }
}
