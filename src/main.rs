//! Volley Trends - Google Trends Volleyball Dashboard
//!
//! Loads the weekly search-interest exports, merges them into one table and
//! shows an interactive year-by-year dashboard.

mod data;
mod stats;
mod charts;
mod gui;

use anyhow::Context;
use data::{TrendPipeline, DATA_DIR};
use eframe::egui;
use gui::VolleyTrendsApp;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // Prepare the merged dataset once, before the window opens
    let dataset = TrendPipeline::prepare(Path::new(DATA_DIR))
        .context("failed to prepare the trend dataset")?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1200.0, 700.0])
            .with_title("Volley Trends"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Volley Trends",
        options,
        Box::new(move |cc| Ok(Box::new(VolleyTrendsApp::new(cc, dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("ui loop failed: {e}"))
}
