//! # Dashboard Module
//!
//! Feeds every entity of a snapshot document through the engine and
//! collects what the page shows: ETA rows, completed run times, the
//! progress chart series and the smoothed rate chart series.
//!
//! ## Failure Isolation
//! Estimation errors are per entity. A failing entity is logged and its
//! row or chart line is left out; the rest of the dashboard still renders.

use crate::downsample::{downsample, smoothing_target};
use crate::eta::{calc_eta, Eta};
use crate::error::EstimateError;
use crate::format::{group_thousands, relative_time, runtime_text, DisplayZone};
use crate::raid_data::{Entity, RaidData};
use crate::rate::rate;
use crate::timeseries::{RateSample, Sample, Series};

/// Projected completion of one target
#[derive(Debug, Clone, PartialEq)]
pub struct EtaRow {
    pub entity: String,
    pub target: f64,
    pub eta: Eta,
    pub many_targets: bool,
}

impl EtaRow {
    pub fn text(&self, zone: &DisplayZone, now: f64) -> String {
        let label = if self.many_targets {
            format!("{} to reach {}", self.entity, group_thousands(self.target))
        } else {
            self.entity.clone()
        };
        match self.eta {
            Eta::At(ts) => format!("{}: {} ({})", label, relative_time(ts, now), zone.absolute(ts)),
            Eta::Never => format!("{}: no estimate available", label),
        }
    }
}

/// Recorded run time of a target that has already been reached
#[derive(Debug, Clone, PartialEq)]
pub struct RunTimeRow {
    pub entity: String,
    pub target: f64,
    pub start: f64,
    pub end: f64,
}

impl RunTimeRow {
    pub fn text(&self, zone: &DisplayZone) -> String {
        format!(
            "{}: {} ({})",
            self.entity,
            runtime_text(self.start, self.end),
            zone.absolute(self.end)
        )
    }
}

/// One named line on a chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine<P> {
    pub name: String,
    pub points: Vec<P>,
}

/// Everything the page renders
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub title: String,
    pub eta_rows: Vec<EtaRow>,
    pub run_times: Vec<RunTimeRow>,
    pub progress: Vec<ChartLine<Sample>>,
    pub rates: Vec<ChartLine<RateSample>>,
}

/// Knobs the dashboard takes from application settings
#[derive(Debug, Clone, Copy)]
pub struct DashboardOptions {
    pub lookback: usize,
    pub max_smoothed_points: usize,
}

impl Dashboard {
    pub fn build(data: &RaidData, options: DashboardOptions) -> Self {
        let mut eta_rows = Vec::new();
        let mut run_times = Vec::new();
        let mut progress = Vec::new();
        let mut rates = Vec::new();

        for entity in &data.entities {
            collect_targets(entity, options.lookback, &mut eta_rows, &mut run_times);

            let Some(series) = entity.progress_series() else {
                log::debug!("{} is not plotted", entity.name);
                continue;
            };

            match smoothed_rate(&series, options.max_smoothed_points) {
                Ok(points) => rates.push(ChartLine {
                    name: entity.name.clone(),
                    points,
                }),
                Err(e) => log::warn!("Skipping rate chart for {}: {}", entity.name, e),
            }

            progress.push(ChartLine {
                name: entity.name.clone(),
                points: series.samples().to_vec(),
            });
        }

        eta_rows.sort_by(|a, b| a.eta.cmp_ascending(&b.eta));
        run_times.sort_by(|a, b| a.end.total_cmp(&b.end));

        Self {
            title: data.config.page_title.clone(),
            eta_rows,
            run_times,
            progress,
            rates,
        }
    }
}

/// ETA rows for targets still ahead, run-time rows for targets reached
fn collect_targets(
    entity: &Entity,
    lookback: usize,
    eta_rows: &mut Vec<EtaRow>,
    run_times: &mut Vec<RunTimeRow>,
) {
    let Some(last) = entity.series.last_point() else {
        log::warn!("{} has no samples", entity.name);
        return;
    };

    for (i, &target) in entity.targets.iter().enumerate() {
        if last.value < target {
            match calc_eta(&entity.series, target, lookback) {
                Ok(eta) => eta_rows.push(EtaRow {
                    entity: entity.name.clone(),
                    target,
                    eta,
                    many_targets: entity.has_many_targets(),
                }),
                Err(e) => log::warn!(
                    "No ETA for {} (target {}): {}",
                    entity.name,
                    group_thousands(target),
                    e
                ),
            }
        } else if let (Some(&start), Some(&end)) = (entity.start_times.get(i), entity.end_times.get(i)) {
            if end != 0.0 {
                run_times.push(RunTimeRow {
                    entity: entity.name.clone(),
                    target,
                    start,
                    end,
                });
            }
        }
    }
}

/// Rate series downsampled for the chart
pub fn smoothed_rate(
    series: &Series,
    max_points: usize,
) -> Result<Vec<RateSample>, EstimateError> {
    let raw = rate(series, None)?;
    let target = smoothing_target(raw.len(), max_points);
    Ok(downsample(&raw, target))
}
