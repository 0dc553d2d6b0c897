use eframe::egui;

mod app;
mod config;
mod download;
mod engine;
mod localizations;
mod models;
mod orchestrator;
mod selector;
mod theme;
mod ui;

use app::QuickFileApp;
use config::AppConfig;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    log::debug!("Configuration: {:?}", config);
    let app = QuickFileApp::new(config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 520.0])
            .with_min_inner_size([420.0, 480.0])
            .with_title("QuickFile - Download any Content in One Place"),
        ..Default::default()
    };

    eframe::run_native(
        "QuickFile",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Box::new(app)
        }),
    )
}
