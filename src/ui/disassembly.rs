//! Disassembly panel: synthesized listing of the selected project plus its details.

use eframe::egui;
use egui::RichText;

use crate::models::Project;
use crate::synth::Instruction;
use crate::ui::controller::AppController;
use crate::ui::{palette, widgets};

const DETAILS_WIDTH: f32 = 300.0;

pub fn render_disassembly(ui: &mut egui::Ui, controller: &AppController) {
    let (Some(project), Some(listing)) = (controller.selected_project(), controller.disassembly()) else {
        render_placeholder(ui);
        return;
    };

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(
                RichText::new(format!("DISASSEMBLY - {}", project.name))
                    .monospace()
                    .strong()
                    .color(palette::TEXT),
            );
            ui.label(
                RichText::new(format!(
                    "Base: {} | Size: {} | {}",
                    project.address, project.size, project.permissions
                ))
                .monospace()
                .small()
                .color(palette::MUTED),
            );
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            for (label, url) in project.links.iter() {
                ui.hyperlink_to(RichText::new(label).monospace().small(), url);
            }
        });
    });
    ui.separator();

    egui::SidePanel::right("project_details")
        .resizable(false)
        .exact_width(DETAILS_WIDTH)
        .frame(egui::Frame::none().fill(palette::BG.gamma_multiply(0.5)).inner_margin(egui::Margin::same(12.0)))
        .show_inside(ui, |ui| render_details(ui, project));

    egui::CentralPanel::default()
        .frame(egui::Frame::none().inner_margin(egui::Margin::same(8.0)))
        .show_inside(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_source("disassembly_scroll")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    for (index, instruction) in listing.iter().enumerate() {
                        render_instruction(ui, instruction, controller.executing_line() == Some(index));
                    }
                });
        });
}

fn render_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            RichText::new("◉\n\nSelect a memory region to analyze")
                .monospace()
                .color(palette::MUTED),
        );
    });
}

fn render_instruction(ui: &mut egui::Ui, instruction: &Instruction, executing: bool) {
    let frame = if executing {
        egui::Frame::none().fill(palette::ACCENT.gamma_multiply(0.2))
    } else {
        egui::Frame::none()
    };

    let row = frame
        .rounding(3.0)
        .inner_margin(egui::Margin::symmetric(8.0, 4.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.add_sized(
                    [64.0, 16.0],
                    egui::Label::new(RichText::new(instruction.address_label()).monospace().color(palette::ACCENT)),
                );
                ui.add_sized(
                    [48.0, 16.0],
                    egui::Label::new(RichText::new(instruction.mnemonic).monospace().color(palette::EXEC)),
                );
                ui.label(RichText::new(&instruction.operands).monospace().color(palette::TEXT));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if executing {
                        ui.label(RichText::new("▶").small().color(palette::ACCENT));
                    }
                    ui.label(RichText::new(instruction.comment).monospace().small().color(palette::MUTED));
                });
            });
        })
        .response;

    if executing {
        widgets::accent_stripe(ui, row.rect, palette::ACCENT);
    }
}

fn section_title(ui: &mut egui::Ui, title: &str) {
    ui.add_space(6.0);
    ui.label(RichText::new(title).monospace().strong().color(palette::TEXT));
    ui.add_space(4.0);
}

fn render_details(ui: &mut egui::Ui, project: &Project) {
    egui::ScrollArea::vertical()
        .id_source("project_details_scroll")
        .show(ui, |ui| {
            section_title(ui, "PROJECT SUMMARY");
            ui.label(RichText::new(&project.description).color(palette::MUTED));

            section_title(ui, "TECH STACK");
            ui.horizontal_wrapped(|ui| {
                for tech in &project.tech_stack {
                    egui::Frame::none()
                        .fill(palette::PANEL)
                        .stroke(egui::Stroke::new(1.0, palette::BORDER))
                        .rounding(3.0)
                        .inner_margin(egui::Margin::symmetric(6.0, 2.0))
                        .show(ui, |ui| {
                            ui.label(RichText::new(tech).monospace().small().color(palette::TEXT));
                        });
                }
            });

            section_title(ui, "ACHIEVEMENTS");
            for achievement in &project.achievements {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("•").color(palette::SUCCESS));
                    ui.label(RichText::new(achievement).color(palette::MUTED));
                });
            }
        });
}
