mod app;
mod cli;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::AirportExplorerApp;
use cli::Args;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    let args = Args::parse_args();
    env_logger::init();

    let mut config = AppConfig::load(args.config.as_deref());
    if let Some(path) = args.data_path {
        config.data_path = path;
    }
    log::debug!("Config: {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "New England Airport Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(AirportExplorerApp::new(&config)))),
    )
}
