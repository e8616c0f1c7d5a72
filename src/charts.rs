//! # Charts Module
//!
//! Draws the dashboard's line charts (progress and smoothed rate) to SVG
//! with plotters. One line per entity, time on the x axis in the event's
//! time zone.

use std::path::Path;

use plotters::prelude::*;

use crate::dashboard::ChartLine;
use crate::error::ChartError;
use crate::format::DisplayZone;
use crate::timeseries::{PlotPoint, PointSliceExt};

const LINE_COLORS: [RGBColor; 6] = [RED, BLUE, GREEN, MAGENTA, CYAN, BLACK];

/// Labels and size of one chart
#[derive(Debug, Clone)]
pub struct ChartSpec<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
    pub width: u32,
    pub height: u32,
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

/// Union of the bounds of every line, `None` if all lines are empty
fn bounds<P: PlotPoint>(lines: &[ChartLine<P>]) -> Option<((f64, f64), (f64, f64))> {
    let mut acc: Option<((f64, f64), (f64, f64))> = None;
    for line in lines {
        let (Some(time), Some(value)) = (line.points.min_max_time(), line.points.min_max_value()) else {
            continue;
        };
        acc = Some(match acc {
            None => (time, value),
            Some(((t0, t1), (v0, v1))) => (
                (t0.min(time.0), t1.max(time.1)),
                (v0.min(value.0), v1.max(value.1)),
            ),
        });
    }
    acc
}

/// Widen a range so flat data still gets a visible axis
fn pad_range((min, max): (f64, f64), margin: f64) -> (f64, f64) {
    let span = max - min;
    if span <= f64::EPSILON * max.abs().max(1.0) {
        (min - 1.0, max + 1.0)
    } else {
        (min - span * margin, max + span * margin)
    }
}

/// Render `lines` as an SVG line chart at `path`
pub fn render_lines<P: PlotPoint>(
    path: &Path,
    spec: &ChartSpec<'_>,
    lines: &[ChartLine<P>],
    zone: &DisplayZone,
) -> Result<(), ChartError> {
    let Some((time_range, value_range)) = bounds(lines) else {
        return Err(ChartError::NoData(spec.title.to_string()));
    };
    let (min_time, max_time) = pad_range(time_range, 0.0);
    let (min_value, max_value) = pad_range(value_range, 0.05);

    let root = SVGBackend::new(path, (spec.width, spec.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(15)
        .caption(spec.title, ("sans-serif", 20))
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(min_time..max_time, min_value..max_value)
        .map_err(draw_err)?;

    chart
        .plotting_area()
        .fill(&RGBColor(245, 245, 240))
        .map_err(draw_err)?;

    let tick = |t: &f64| zone.tick(*t);
    chart
        .configure_mesh()
        .axis_style(RGBColor(60, 60, 60))
        .x_desc(spec.x_desc)
        .y_desc(spec.y_desc)
        .x_labels(6)
        .x_label_formatter(&tick)
        .draw()
        .map_err(draw_err)?;

    for (i, line) in lines.iter().enumerate() {
        let color = LINE_COLORS[i % LINE_COLORS.len()];
        chart
            .draw_series(LineSeries::new(line.points.iter().map(|p| p.xy()), &color))
            .map_err(draw_err)?
            .label(line.name.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    log::info!("Wrote chart {}", path.display());
    Ok(())
}
