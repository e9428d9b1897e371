mod app;
mod artifacts;
mod assembler;
mod color;
mod config;
mod error;
mod features;
#[cfg(test)]
#[allow(dead_code)]
#[path = "bin/generate_artifacts.rs"]
mod generate_artifacts;
mod state;
mod ui;

use anyhow::Context;
use eframe::egui;

use crate::app::GradePredictorApp;
use crate::artifacts::resolver;
use crate::assembler::Assembler;
use crate::config::AppConfig;
use crate::state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::load()?;
    log::info!("Configuration: {config:?}");

    let mut resolution = resolver::resolve(&config.artifacts.dir);
    if config.artifacts.strict_load {
        let directory = resolution.directory.clone();
        let bundle = resolution
            .into_strict()
            .context("strict_load is set and an artifact failed to load")?;
        resolution = resolver::Resolution {
            directory,
            bundle,
            failures: Vec::new(),
        };
    }

    let state = AppState::new(
        resolution,
        Assembler::new(config.artifacts.column_policy()),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Student Performance Predictor",
        options,
        Box::new(|_cc| Ok(Box::new(GradePredictorApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
