use crate::config::ReselectPolicy;
use crate::ui::app::UIState;
use crate::ui::controller::AppController;
/// Settings View
///
/// Manages application configuration: appearance, analysis behaviour,
/// data locations and logging. Every change is persisted immediately.
use eframe::egui;

const THEMES: [&str; 3] = ["Debugger", "Dark", "Light"];

/// Text buffers for the path fields, synced from the controller when the window opens
#[derive(Clone, Default)]
pub struct SettingsUIState {
    pub open: bool,
    pub synced: bool,
    pub export_dir: String,
    pub portfolio_path: String,
}

/// Render the settings window when open
pub fn render_settings_window(ctx: &egui::Context, ui_state: &mut UIState, controller: &mut AppController) {
    let mut open = ui_state.settings_ui_state.open;
    if !open {
        ui_state.settings_ui_state.synced = false;
        return;
    }

    egui::Window::new("Settings")
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .default_width(420.0)
        .show(ctx, |ui| render_settings(ui, ui_state, controller));

    ui_state.settings_ui_state.open = open;
}

/// Live-preview the font size while dragging; write settings.json once the edit ends
fn apply_font_size(ui_state: &mut UIState, controller: &mut AppController, slider: &egui::Response, size: f32) {
    if slider.changed() {
        if let Err(e) = controller.preview_settings(|s| s.ui_font_size = size) {
            ui_state.error_message = Some(e.user_message());
        }
    }
    if slider.drag_stopped() || (slider.changed() && !slider.dragged()) {
        if let Err(e) = controller.persist_settings() {
            ui_state.error_message = Some(e.user_message());
        }
    }
}

fn render_settings(ui: &mut egui::Ui, ui_state: &mut UIState, controller: &mut AppController) {
    // Load current settings from controller on first frame only
    if !ui_state.settings_ui_state.synced {
        let state = controller.settings();
        ui_state.settings_ui_state.export_dir = state.export_dir.clone();
        ui_state.settings_ui_state.portfolio_path = state.portfolio_path.clone();
        ui_state.settings_ui_state.synced = true;
    }

    let mut state = controller.settings().clone();

    // Appearance
    ui.group(|ui| {
        ui.label("Appearance");
        ui.separator();

        let current = THEMES.get(state.theme_idx).copied().unwrap_or(THEMES[0]);
        egui::ComboBox::from_label("Theme")
            .selected_text(current)
            .show_ui(ui, |ui| {
                for (idx, name) in THEMES.iter().enumerate() {
                    ui.selectable_value(&mut state.theme_idx, idx, *name);
                }
            });

        let mut font_size = state.ui_font_size;
        let slider = ui.add(egui::Slider::new(&mut font_size, 8.0..=32.0).text("Font size").step_by(1.0));
        apply_font_size(ui_state, controller, &slider, font_size);
        state.ui_font_size = controller.settings().ui_font_size;

        ui.checkbox(&mut state.show_console, "Show console panel");
    });

    ui.separator();

    // Analysis
    ui.group(|ui| {
        ui.label("Analysis");
        ui.separator();
        ui.label("When another memory region is selected during analysis:");
        ui.horizontal(|ui| {
            for policy in ReselectPolicy::ALL {
                ui.radio_value(&mut state.reselect_policy, policy, policy.to_string());
            }
        });
    });

    if state != *controller.settings() {
        let next = state.clone();
        if let Err(e) = controller.update_settings(move |s| *s = next) {
            ui_state.error_message = Some(e.user_message());
        }
    }

    ui.separator();

    // Data locations
    ui.group(|ui| {
        ui.label("Data");
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Dump directory:");
            let edit = ui.text_edit_singleline(&mut ui_state.settings_ui_state.export_dir);
            if edit.lost_focus() {
                let dir = ui_state.settings_ui_state.export_dir.trim().to_string();
                if let Err(e) = controller.update_settings(|s| s.export_dir = dir) {
                    ui_state.error_message = Some(e.user_message());
                }
            }
            if ui.button("Browse...").clicked() {
                if let Some(path) = rfd::FileDialog::new().pick_folder() {
                    let dir = path.to_string_lossy().to_string();
                    ui_state.settings_ui_state.export_dir = dir.clone();
                    if let Err(e) = controller.update_settings(|s| s.export_dir = dir) {
                        ui_state.error_message = Some(e.user_message());
                    }
                }
            }
        });
        ui.horizontal(|ui| {
            ui.label("Dump target:");
            ui.monospace(controller.default_dump_path().display().to_string());
        });

        ui.horizontal(|ui| {
            ui.label("Portfolio file:");
            ui.text_edit_singleline(&mut ui_state.settings_ui_state.portfolio_path);
            if ui.button("Browse...").clicked() {
                if let Some(path) = rfd::FileDialog::new().add_filter("JSON", &["json"]).pick_file() {
                    ui_state.settings_ui_state.portfolio_path = path.to_string_lossy().to_string();
                }
            }
        });
        ui.horizontal(|ui| {
            if ui.button("Load").clicked() {
                let path = std::path::PathBuf::from(ui_state.settings_ui_state.portfolio_path.trim());
                let result = controller
                    .load_portfolio(&path)
                    .map(|()| format!("Portfolio loaded from {}", path.display()));
                ui_state.report(result);
            }
            if ui.button("Use builtin data").clicked() {
                ui_state.settings_ui_state.portfolio_path.clear();
                let result = controller
                    .use_builtin_portfolio()
                    .map(|()| "Switched to builtin portfolio".to_string());
                ui_state.report(result);
            }
        });
    });

    ui.separator();

    // Advanced Settings
    ui.group(|ui| {
        ui.label("Advanced Settings");
        ui.separator();

        let mut debug_logging = controller.settings().debug_logging;
        if ui.checkbox(&mut debug_logging, "Enable debug logging").changed() {
            if let Err(e) = controller.update_settings(|s| s.debug_logging = debug_logging) {
                ui_state.error_message = Some(e.user_message());
            }
        }
        if let Some(path) = &ui_state.log_file {
            ui.horizontal(|ui| {
                ui.label("Log file:");
                ui.monospace(path.display().to_string());
            });
        }
    });

    ui.separator();

    // Action Buttons
    ui.horizontal(|ui| {
        if ui.button("Save Settings").clicked() {
            let result = controller
                .persist_settings()
                .map(|()| "Settings saved".to_string());
            ui_state.report(result);
        }

        if ui.button("Reset to Defaults").clicked() {
            let result = controller
                .reset_settings()
                .map(|()| "Settings reset to defaults".to_string());
            ui_state.report(result);
            // Reload the text buffers on the next frame
            ui_state.settings_ui_state.synced = false;
        }
    });
}
