mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::MovieDashApp;
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE));
    log::info!("Using data file {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Movie Analytics Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(MovieDashApp::new(&config)))),
    )
}
