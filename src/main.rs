//! DCS-gRPC Installer
//!
//! A desktop wizard that installs a DCS-gRPC release into the DCS Saved Games
//! folder and enables it in MissionScripting.lua.
//! Built with Rust and egui.

use dcs_grpc_installer::center_window::calculate_window_position;
use dcs_grpc_installer::config::{InstallerConfig, MIN_WINDOW_SIZE, WINDOW_SIZE};
use dcs_grpc_installer::gui::ACCENT;
use dcs_grpc_installer::{logging, DcsGrpcInstaller};

// Third-party crate imports
use eframe::egui;

/// Configure the application window
fn configure_window() -> eframe::NativeOptions {
    let window_size = WINDOW_SIZE;
    let center_pos = calculate_window_position(window_size);

    let viewport_builder = egui::ViewportBuilder::default()
        .with_inner_size(window_size)
        .with_position(center_pos)
        .with_decorations(true)
        .with_resizable(true)
        .with_min_inner_size(MIN_WINDOW_SIZE);

    eframe::NativeOptions {
        viewport: viewport_builder,
        ..Default::default()
    }
}

/// Apply a dark teal theme
fn configure_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();

    visuals.override_text_color = Some(egui::Color32::from_rgb(230, 240, 238));
    visuals.panel_fill = egui::Color32::from_rgb(29, 52, 58);
    visuals.window_fill = egui::Color32::from_rgb(36, 64, 71);
    visuals.widgets.active.bg_fill = ACCENT;
    visuals.widgets.hovered.bg_fill = egui::Color32::from_rgb(61, 140, 130);
    visuals.widgets.inactive.bg_fill = egui::Color32::from_rgb(44, 78, 86);
    visuals.widgets.noninteractive.bg_fill = egui::Color32::from_rgb(44, 78, 86);
    visuals.selection.bg_fill = ACCENT;
    visuals.hyperlink_color = ACCENT;
    visuals.error_fg_color = egui::Color32::from_rgb(255, 110, 110);

    ctx.set_visuals(visuals);
}

fn main() {
    logging::init();
    log::info!("App started");

    let config = InstallerConfig::load();
    let native_options = configure_window();

    let result = eframe::run_native(
        "Install DCS-gRPC",
        native_options,
        Box::new(move |cc| {
            configure_visuals(&cc.egui_ctx);
            Ok(Box::new(DcsGrpcInstaller::new(config)))
        }),
    );

    if let Err(e) = result {
        log::error!("Failed to start eframe: {}", e);
        std::process::exit(1);
    }
}
