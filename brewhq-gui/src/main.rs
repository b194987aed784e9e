mod app;
mod views;

use eframe::egui;
use log::warn;

use brewhq_core::{load_config, Config};

use crate::app::BrewApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = load_config(None).unwrap_or_else(|e| {
        warn!("Using default configuration: {:#}", e);
        Config::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("BrewHQ"),
        ..Default::default()
    };

    eframe::run_native(
        "BrewHQ",
        options,
        Box::new(|cc| Ok(Box::new(BrewApp::new(cc, config)))),
    )
}
