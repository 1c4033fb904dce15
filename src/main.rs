mod app;
mod cli;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};
use app::SalesDashboardApp;
use clap::Parser;
use config::AppConfig;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let cwd = std::env::current_dir().context("resolving working directory")?;
    let mut config = AppConfig::discover(args.config.as_deref(), &cwd)?;
    args.apply_to(&mut config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(SalesDashboardApp::new(&config)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}
