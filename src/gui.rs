//! GUI rendering components for the DCS-gRPC Installer
//!
//! This module contains the page rendering, the navigation bar and the popup.
//! Widgets only emit [`WizardEvent`]s; the session decides what happens next.

use std::path::Path;

use eframe::egui;

use crate::config::APP_VERSION;
use crate::data_structures::DcsGrpcInstaller;
use crate::wizard::{Page, WizardEvent};

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(94, 196, 182);
const ERROR: egui::Color32 = egui::Color32::from_rgb(255, 110, 110);
const NAV_BUTTON_SIZE: [f32; 2] = [100.0, 36.0];

impl DcsGrpcInstaller {
    /// Draw a spinning progress indicator
    fn draw_spinner(ui: &mut egui::Ui, color: egui::Color32) {
        let time = ui.ctx().input(|i| i.time) as f32;
        let rotation_speed = 4.0;
        let angle = (time * rotation_speed) % (2.0 * std::f32::consts::PI);
        let center = ui.cursor().min + egui::vec2(8.0, 8.0);
        let radius = 6.0;
        let painter = ui.painter();
        let end_angle = angle + std::f32::consts::PI * 1.5;
        let segments = 20;
        let angle_step = (end_angle - angle) / segments as f32;
        for i in 0..segments {
            let angle1 = angle + i as f32 * angle_step;
            let angle2 = angle + (i + 1) as f32 * angle_step;
            let p1 = center + egui::vec2(radius * angle1.cos(), radius * angle1.sin());
            let p2 = center + egui::vec2(radius * angle2.cos(), radius * angle2.sin());
            painter.line_segment([p1, p2], egui::Stroke::new(2.0, color));
        }
    }

    fn section_title(ui: &mut egui::Ui, text: &str) {
        ui.label(egui::RichText::new(text).size(16.0).color(ACCENT));
        ui.separator();
    }

    /// Render the application header
    pub fn render_header(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!("DCS-gRPC Installer v{}", APP_VERSION))
                    .size(17.0)
                    .color(ACCENT),
            );
        });
        ui.add_space(4.0);
    }

    fn render_start_page(&self, ui: &mut egui::Ui) {
        Self::section_title(ui, "Welcome to the DCS-gRPC installer");
        ui.add_space(7.0);
        ui.label(egui::RichText::new("This tool downloads a DCS-gRPC release into your DCS Saved Games folder").size(13.0));
        ui.label(egui::RichText::new("and enables it in MissionScripting.lua.").size(13.0));
        ui.add_space(7.0);
        ui.label(egui::RichText::new("Click Next to continue.").size(13.0));
    }

    fn render_version_page(&self, ui: &mut egui::Ui, events: &mut Vec<WizardEvent>) {
        Self::section_title(ui, "Select Version");

        if let Some(err) = self.session.versions_error() {
            ui.label(egui::RichText::new(err).size(13.0).color(ERROR));
            return;
        }
        if self.versions_rx.is_some() {
            ui.horizontal(|ui| {
                Self::draw_spinner(ui, ACCENT);
                ui.add_space(20.0);
                ui.label(egui::RichText::new("Loading versions...").size(13.0));
            });
            return;
        }

        let selected = self.session.selected_version();
        for (i, version) in self.session.versions().iter().enumerate() {
            let label = if i == 0 {
                format!("{} (latest)", version.tag)
            } else {
                version.tag.clone()
            };
            if ui.radio(selected == Some(version.tag.as_str()), label).clicked() {
                events.push(WizardEvent::SelectVersion(version.tag.clone()));
            }
        }
    }

    fn path_input(
        ui: &mut egui::Ui,
        value: &str,
        pick: impl FnOnce(Option<&Path>) -> Option<std::path::PathBuf>,
    ) -> Option<String> {
        let mut changed = None;
        ui.horizontal(|ui| {
            let mut text = value.to_owned();
            let width = (ui.available_width() - 90.0).max(200.0);
            if ui
                .add(egui::TextEdit::singleline(&mut text).desired_width(width))
                .changed()
            {
                changed = Some(text);
            }
            if ui.button("Browse").clicked() {
                let current = Path::new(value);
                let start = current.exists().then_some(current);
                if let Some(path) = pick(start) {
                    changed = Some(path.display().to_string());
                }
            }
        });
        changed
    }

    fn render_file_page(&self, ui: &mut egui::Ui, events: &mut Vec<WizardEvent>) {
        Self::section_title(ui, "Select Installation Locations");

        ui.label(egui::RichText::new("DCS Saved Games Folder").size(13.0));
        let dir = Self::path_input(ui, &self.session.install_dir, |start| {
            let mut dialog = rfd::FileDialog::new().set_title("Select the DCS Saved Games folder");
            if let Some(start) = start {
                dialog = dialog.set_directory(start);
            }
            dialog.pick_folder()
        });
        if let Some(dir) = dir {
            events.push(WizardEvent::InstallDirChanged(dir));
        }

        ui.add_space(10.0);
        ui.separator();
        ui.label(egui::RichText::new("DCS MissionScripting.lua").size(13.0));
        let file = Self::path_input(ui, &self.session.script_file, |start| {
            let mut dialog = rfd::FileDialog::new()
                .set_title("Select MissionScripting.lua")
                .add_filter("Lua Files", &["lua"]);
            if let Some(dir) = start.and_then(Path::parent) {
                dialog = dialog.set_directory(dir);
            }
            dialog.pick_file()
        });
        if let Some(file) = file {
            events.push(WizardEvent::ScriptFileChanged(file));
        }
    }

    fn overview_value(ui: &mut egui::Ui, title: &str, value: &str) {
        ui.label(egui::RichText::new(title).size(13.0).color(ACCENT));
        let value = if value.trim().is_empty() { "Not Set" } else { value };
        ui.label(egui::RichText::new(value).size(13.0));
        ui.separator();
    }

    fn render_overview_page(&self, ui: &mut egui::Ui) {
        Self::section_title(ui, "Final checks");
        ui.label(egui::RichText::new("Click install to continue").size(13.0));
        ui.add_space(8.0);

        let version = self.session.selected_version().unwrap_or_default();
        Self::overview_value(ui, "Version", version);
        Self::overview_value(ui, "Installation Directory", &self.session.install_dir);
        Self::overview_value(ui, "MissionScripting.lua", &self.session.script_file);

        if let Some(url) = self.session.selected_entry().and_then(|v| v.html_url.as_deref()) {
            if ui.button("Release notes").clicked() {
                if let Err(e) = webbrowser::open(url) {
                    log::error!("Failed to open browser: {}", e);
                }
            }
        }
    }

    fn render_navigation(&self, ui: &mut egui::Ui, events: &mut Vec<WizardEvent>) {
        let buttons = self.session.buttons();
        let idle = self.is_idle();
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let nav_button = |ui: &mut egui::Ui, enabled: bool, text: &str| {
                ui.add_enabled(enabled, egui::Button::new(text).min_size(NAV_BUTTON_SIZE.into()))
                    .clicked()
            };
            if nav_button(ui, idle && buttons.previous, "Previous") {
                events.push(WizardEvent::Previous);
            }
            if nav_button(ui, idle && buttons.next, "Next") {
                events.push(WizardEvent::Next);
            }
            if nav_button(ui, idle && buttons.install, "Install") {
                events.push(WizardEvent::Install);
            }
            if self.installing {
                ui.add_space(12.0);
                Self::draw_spinner(ui, ACCENT);
                ui.add_space(20.0);
                ui.label(egui::RichText::new("Installing DCS-gRPC...").size(13.0));
            }
        });
        ui.add_space(6.0);
    }

    fn render_popup(&mut self, ctx: &egui::Context) {
        let Some(popup) = self.popup.clone() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("DCS-gRPC Installer")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(&popup.message).size(13.0));
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.popup = None;
            if popup.exit_on_close {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }
}

impl eframe::App for DcsGrpcInstaller {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_versions();
        self.poll_install();

        let mut events = Vec::new();
        egui::TopBottomPanel::top("header").show(ctx, |ui| self.render_header(ui));
        egui::TopBottomPanel::bottom("navigation").show(ctx, |ui| self.render_navigation(ui, &mut events));
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(self.is_idle(), |ui| match self.session.page() {
                Page::Start => self.render_start_page(ui),
                Page::VersionSelect => self.render_version_page(ui, &mut events),
                Page::FileSelect => self.render_file_page(ui, &mut events),
                Page::Overview => self.render_overview_page(ui),
            });
        });
        self.render_popup(ctx);

        for event in events {
            log::debug!("Wizard event: {:?}", event);
            let effect = self.session.handle(event);
            self.apply_effect(effect);
        }

        // Keep the spinner moving and keep polling the background work
        if self.installing || self.versions_rx.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        }
    }
}
