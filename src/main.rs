#![cfg_attr(not(target_os = "windows"), allow(dead_code))]

use log::{error, info, warn};

mod borderless;
mod controller;
mod error;
mod inventory;
mod logging;
mod models;
mod resolutions;
mod settings;
mod window_system;

#[cfg(target_os = "windows")]
mod gui;
#[cfg(target_os = "windows")]
mod windows;

use resolutions::catalog_with_custom;

fn main() {
    let (settings, settings_warning) = settings::load_or_default();

    match logging::init(&settings.log_level) {
        Some(path) => info!("Logging to {}", path.display()),
        None => info!("Logging to console only"),
    }
    if let Some(msg) = settings_warning {
        warn!("{}", msg);
    }

    info!("Border Terminator v{} starting", env!("CARGO_PKG_VERSION"));
    let catalog = catalog_with_custom(&settings.custom_resolutions);

    #[cfg(target_os = "windows")]
    {
        if settings.dpi_aware {
            windows::enable_dpi_awareness();
        }

        if let Err(e) = gui::run(&settings, &catalog) {
            error!("Failed to run the application window: {}", e);
            std::process::exit(1);
        }
    }

    #[cfg(not(target_os = "windows"))]
    {
        let _ = catalog;
        error!("Border Terminator only manages windows on Windows");
        std::process::exit(1);
    }
}
