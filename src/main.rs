//! Pandemic Dashboard - Monthly Deaths & Vaccinations Viewer

use anyhow::{Context, Result};
use eframe::egui;
use pandemic_dashboard::config::CONFIG_FILE;
use pandemic_dashboard::gui::{DashboardApp, PAGE_TITLE};
use pandemic_dashboard::{logging, DashboardConfig, DashboardData};
use std::path::Path;
use tracing::{error, info};

fn main() -> Result<()> {
    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))
        .context("invalid dashboard configuration")?;
    logging::init_logging(&config.log_level)?;
    info!(data = %config.data_path.display(), cutoff = %config.bubble_cutoff, "startup");

    let data = DashboardData::load(&config)
        .inspect_err(|e| error!("load failed: {e}"))
        .with_context(|| format!("failed to load {}", config.data_path.display()))?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([900.0, 600.0])
            .with_title(PAGE_TITLE),
        ..Default::default()
    };

    let frame_interval = config.frame_interval_secs;
    eframe::run_native(
        PAGE_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, data, frame_interval)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
