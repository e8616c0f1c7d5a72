use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use raid_eta::charts::{render_lines, ChartSpec};
use raid_eta::config::Config;
use raid_eta::dashboard::{Dashboard, DashboardOptions};
use raid_eta::error::ChartError;
use raid_eta::format::DisplayZone;
use raid_eta::raid_data::RaidData;

#[derive(Parser)]
#[command(name = "raid-eta")]
#[command(about = "Raid progress ETAs and charts from a snapshot document")]
struct Cli {
    /// Snapshot document (data.json)
    data_file: PathBuf,

    /// Directory for the chart files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Settings file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reference time in unix seconds for relative ETAs (defaults to now)
    #[arg(long)]
    now: Option<f64>,

    /// Skip writing chart files
    #[arg(long)]
    no_charts: bool,
}

/// An explicit settings file must load; the default location falls back to defaults
fn load_settings(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Cannot load settings {}", path.display())),
        None => Ok(Config::load().unwrap_or_else(|e| {
            log::warn!("{}, using default settings", e);
            Config::default()
        })),
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = load_settings(cli.config.as_deref())?;

    let data = RaidData::load(&cli.data_file)
        .with_context(|| format!("Cannot load {}", cli.data_file.display()))?;

    let dashboard = Dashboard::build(
        &data,
        DashboardOptions {
            lookback: config.effective_lookback(data.config.eta_look_back),
            max_smoothed_points: config.max_smoothed_points,
        },
    );

    let zone = DisplayZone::new(data.config.utc_offset_seconds(), data.config.timezone_name.clone());
    let now = cli
        .now
        .unwrap_or_else(|| chrono::Utc::now().timestamp() as f64);

    println!("{}", dashboard.title);
    for row in &dashboard.eta_rows {
        println!("{}", row.text(&zone, now));
    }
    if !dashboard.run_times.is_empty() {
        println!("Boss run time:");
        for row in &dashboard.run_times {
            println!("{}", row.text(&zone));
        }
    }

    if cli.no_charts || !config.render_charts {
        return Ok(());
    }

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("Cannot create {}", cli.out_dir.display()))?;

    let progress_spec = ChartSpec {
        title: &data.config.hp_title,
        x_desc: &data.config.timezone_name,
        y_desc: &data.config.hp_unit,
        width: config.chart_width,
        height: config.chart_height,
    };
    let rate_spec = ChartSpec {
        title: &data.config.dps_title,
        y_desc: &data.config.dps_unit,
        ..progress_spec.clone()
    };

    let results = [
        render_lines(&cli.out_dir.join("progress.svg"), &progress_spec, &dashboard.progress, &zone),
        render_lines(&cli.out_dir.join("rate.svg"), &rate_spec, &dashboard.rates, &zone),
    ];
    for result in results {
        match result {
            Ok(()) => {}
            Err(e @ ChartError::NoData(_)) => log::warn!("{}", e),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
