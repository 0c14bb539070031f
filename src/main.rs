mod app;
mod color;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::DashboardApp;
use clap::Parser;
use eframe::egui;
use healthcare_dashboard::config::DashboardConfig;
use healthcare_dashboard::data::loader;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::parse();
    let data_path = &config.source.data_path;
    let store = loader::load_file(data_path)
        .inspect_err(|e| log::error!("Failed to load dataset: {e:#}"))
        .with_context(|| format!("loading {}", data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Healthcare Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(store)))),
    )
    .map_err(|e| anyhow!("UI terminated: {e}"))
}
