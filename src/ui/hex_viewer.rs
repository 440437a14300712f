//! Hex Viewer panel: byte dump of the selected project's tech stack.

use eframe::egui;
use egui::RichText;

use crate::synth::hexdump;
use crate::ui::controller::AppController;
use crate::ui::palette;

pub fn render_hex_viewer(ui: &mut egui::Ui, controller: &AppController) {
    let dump = controller.hex_dump();
    let has_project = controller.selected_project().is_some();
    let sim = controller.simulation();

    ui.horizontal(|ui| {
        ui.label(
            RichText::new("HEX VIEWER - TECH STACK DUMP")
                .monospace()
                .strong()
                .color(palette::TEXT),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(dump.summary(has_project)).monospace().small().color(palette::MUTED));
        });
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .id_source("hex_viewer_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for (line_idx, line) in dump.lines.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 6.0;
                    ui.add_sized(
                        [72.0, 14.0],
                        egui::Label::new(RichText::new(&line.offset).monospace().small().color(palette::ACCENT)),
                    );
                    for (col, byte) in line.hex_bytes().enumerate() {
                        let text = RichText::new(byte).monospace().small();
                        let text = if hexdump::is_highlighted(line_idx, col, sim.is_active(), sim.byte) {
                            text.color(palette::BG).background_color(palette::ACCENT)
                        } else {
                            text.color(palette::TEXT)
                        };
                        ui.label(text);
                    }
                    ui.separator();
                    ui.label(RichText::new(&line.ascii).monospace().small().color(palette::MUTED));
                });
            }

            if has_project {
                ui.add_space(6.0);
                ui.separator();
                ui.label(RichText::new("DECODED TECH STACK:").monospace().small().color(palette::MUTED));
                ui.horizontal_wrapped(|ui| {
                    for tech in &dump.technologies {
                        ui.label(RichText::new(format!("[{}]", tech)).monospace().small().color(palette::SUCCESS));
                    }
                });
            }
        });
}
