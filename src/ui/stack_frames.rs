//! Stack Frames panel: skills with proficiency bars, plus the profile registers.

use eframe::egui;
use egui::{RichText, Sense};

use crate::models::Register;
use crate::ui::app::UIState;
use crate::ui::controller::{AppController, SelectionAction};
use crate::ui::palette::{self, LevelBand};
use crate::ui::widgets;

/// "Used in: N project(s)"
pub fn used_in_label(count: usize) -> String {
    format!("Used in: {} project{}", count, if count == 1 { "" } else { "s" })
}

pub fn render_stack_frames(ui: &mut egui::Ui, ui_state: &mut UIState, controller: &mut AppController) {
    let store = controller.store();
    widgets::panel_header(ui, "STACK FRAMES", &format!("{} frames active", store.skills.len()));

    render_registers(ui, &store.registers);

    let expanded = controller.selection().skill.clone();
    let mut toggled: Option<String> = None;

    egui::ScrollArea::vertical()
        .id_source("stack_frames_scroll")
        .auto_shrink([false; 2])
        .max_height(widgets::height_above_footer(ui.available_height()))
        .show(ui, |ui| {
            for skill in &store.skills {
                let is_open = expanded.as_deref() == Some(skill.id.as_str());
                let band = LevelBand::of(skill.level);

                let frame = if is_open {
                    egui::Frame::none()
                        .fill(palette::SUCCESS.gamma_multiply(0.2))
                        .stroke(egui::Stroke::new(1.0, palette::SUCCESS.gamma_multiply(0.5)))
                } else {
                    egui::Frame::none().stroke(egui::Stroke::new(1.0, egui::Color32::TRANSPARENT))
                };

                let row = frame
                    .rounding(4.0)
                    .inner_margin(egui::Margin::same(8.0))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(format!("Frame {}", skill.frame_address))
                                    .monospace()
                                    .small()
                                    .color(palette::ACCENT),
                            );
                            let chevron = if is_open { "▾" } else { "▸" };
                            ui.label(RichText::new(chevron).small().color(palette::MUTED));
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(
                                    RichText::new(format!("{}%", skill.level))
                                        .monospace()
                                        .small()
                                        .strong()
                                        .color(band.color()),
                                );
                            });
                        });
                        ui.label(RichText::new(&skill.name).monospace().color(palette::TEXT));
                        widgets::level_bar(ui, skill.level, band.color());

                        if is_open {
                            ui.add_space(4.0);
                            ui.label(RichText::new(&skill.description).small().color(palette::MUTED));
                            ui.label(RichText::new(used_in_label(skill.projects.len())).small().color(palette::MUTED));
                        }
                    })
                    .response;

                let response = ui.interact(row.rect, ui.id().with(("frame", &skill.id)), Sense::click());
                if response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
                    toggled = Some(skill.id.clone());
                }
            }
        });

    widgets::panel_footer(
        ui,
        &[
            format!("Stack Depth: {}", store.skills.len()),
            format!("Avg Level: {}%", store.average_skill_level()),
        ],
    );

    if let Some(id) = toggled {
        controller.dispatch(SelectionAction::ToggleSkill(id));
        ui_state.needs_repaint = true;
    }
}

/// Register strip: profile metadata as name = value pairs
fn render_registers(ui: &mut egui::Ui, registers: &[Register]) {
    if registers.is_empty() {
        return;
    }
    egui::CollapsingHeader::new(RichText::new("REGISTERS").monospace().small().color(palette::MUTED))
        .id_source("registers")
        .default_open(true)
        .show(ui, |ui| {
            egui::Grid::new("register_grid")
                .num_columns(2)
                .spacing([12.0, 2.0])
                .show(ui, |ui| {
                    for register in registers {
                        ui.label(RichText::new(&register.name).monospace().small().color(palette::EXEC));
                        ui.label(RichText::new(&register.value).monospace().small().color(palette::TEXT))
                            .on_hover_text(&register.description);
                        ui.end_row();
                    }
                });
        });
    ui.separator();
}
