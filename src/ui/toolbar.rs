//! Toolbar: ANALYZE/STOP, RESET, SEARCH, DUMP RESUME and the decorative status readouts.

use eframe::egui;
use egui::{Color32, RichText};

use crate::ui::app::UIState;
use crate::ui::controller::AppController;
use crate::ui::palette;

const REPOSITORY_URL: &str = "https://github.com/nipv20s/template-debugger-style-portfolio";

fn tool_button(label: &str, fill: Color32) -> egui::Button<'static> {
    egui::Button::new(RichText::new(label.to_string()).monospace().small().color(Color32::WHITE)).fill(fill)
}

/// Render the toolbar row
pub fn render_toolbar(ui: &mut egui::Ui, ui_state: &mut UIState, controller: &mut AppController) {
    ui.horizontal(|ui| {
        // Execution controls
        let running = controller.is_analyzing();
        let (label, fill) = if running {
            ("■ STOP", palette::ERROR)
        } else {
            ("▶ ANALYZE", palette::SUCCESS)
        };
        if ui.add(tool_button(label, fill)).clicked() {
            if controller.selected_project().is_none() && !running {
                ui_state.info_message = Some("Select a memory region to analyze first".to_string());
            } else {
                controller.toggle_analysis();
            }
            ui_state.needs_repaint = true;
        }

        if ui
            .add(tool_button("⟲ RESET", palette::BORDER))
            .on_hover_text("Stop analysis and clear the selection")
            .clicked()
        {
            controller.reset();
            ui_state.search_query.clear();
            ui_state.needs_repaint = true;
        }

        ui.separator();

        // Search filters the memory map as the user types
        ui.label(RichText::new("🔍").color(palette::MUTED));
        let search = ui.add(
            egui::TextEdit::singleline(&mut ui_state.search_query)
                .hint_text("SEARCH")
                .font(egui::TextStyle::Monospace)
                .desired_width(160.0),
        );
        if search.changed() {
            log::debug!("[UI] [SEARCH] Filter: '{}'", ui_state.search_query);
        }
        if !ui_state.search_query.is_empty() && ui.small_button("✕").clicked() {
            ui_state.search_query.clear();
        }

        if ui
            .add(tool_button("⬇ DUMP RESUME", palette::ACCENT))
            .on_hover_text(controller.default_dump_path().display().to_string())
            .clicked()
        {
            let target = controller.settings().export_target();
            ui_state.report(controller.export_dump(&target).map(|path| format!("Resume dumped to {}", path.display())));
        }

        if ui.small_button("…").on_hover_text("Save resume dump as...").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .set_file_name(crate::export::DUMP_FILE_NAME)
                .add_filter("JSON", &["json"])
                .save_file()
            {
                ui_state.report(controller.export_dump(&path).map(|path| format!("Resume dumped to {}", path.display())));
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.hyperlink_to(RichText::new("⑂ FORK").monospace().small(), REPOSITORY_URL);

            if ui
                .selectable_label(ui_state.settings_ui_state.open, RichText::new("⚙").monospace())
                .on_hover_text("Settings")
                .clicked()
            {
                ui_state.settings_ui_state.open = !ui_state.settings_ui_state.open;
            }

            ui.separator();
            for readout in ["PID: 1337", "MEM: 8.2GB", "CPU: 2.4GHz"] {
                ui.label(RichText::new(readout).monospace().small().color(palette::MUTED));
            }
        });
    });
}
