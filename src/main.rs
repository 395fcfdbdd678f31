//! Alcohol Dashboard - headless shell
//!
//! Builds the dashboard snapshot, prints it as JSON and optionally exports
//! CSV tables. With auto-refresh on, re-renders until the process is stopped.

use alcohol_dashboard::dashboard::RefreshScheduler;
use alcohol_dashboard::{DashboardConfig, DashboardSnapshot, Datasets, Frames};
use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;

fn print_snapshot(snapshot: &DashboardSnapshot, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(snapshot)?
    } else {
        serde_json::to_string(snapshot)?
    };
    println!("{}", json);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = DashboardConfig::load_or_default(config_path.as_deref())
        .context("failed to load dashboard configuration")?;

    // Malformed embedded data is fatal: every view depends on it.
    let datasets = Arc::new(Datasets::build().context("embedded datasets are malformed")?);

    let snapshot = DashboardSnapshot::build(&datasets, &config.controls)
        .context("failed to build dashboard snapshot")?;
    print_snapshot(&snapshot, config.pretty)?;

    if let Some(dir) = &config.export_dir {
        Frames::export_all(&datasets, dir)
            .with_context(|| format!("failed to export tables to {}", dir.display()))?;
    }

    if config.controls.auto_refresh {
        let pretty = config.pretty;
        let handle = RefreshScheduler::start(
            Arc::clone(&datasets),
            config.controls.clone(),
            config.controls.refresh_interval(),
            move |result| match result {
                Ok(snapshot) => {
                    if let Err(e) = print_snapshot(&snapshot, pretty) {
                        log::error!("Failed to print snapshot: {}", e);
                    }
                }
                Err(e) => log::warn!("Refresh skipped: {}", e),
            },
        );
        handle.wait();
    }

    Ok(())
}
