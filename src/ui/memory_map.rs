//! Memory Map panel: one row per project, filtered by the toolbar search.

use eframe::egui;
use egui::{RichText, Sense};

use crate::models::Project;
use crate::ui::app::UIState;
use crate::ui::controller::{AppController, SelectionAction};
use crate::ui::{palette, widgets};

/// Case-insensitive match on project name or any technology. Empty query matches all.
pub fn matches_search(project: &Project, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    project.name.to_lowercase().contains(&query)
        || project.tech_stack.iter().any(|tech| tech.to_lowercase().contains(&query))
}

fn segment_caption(shown: usize, total: usize) -> String {
    if shown == total {
        format!("{} segments loaded", total)
    } else {
        format!("{}/{} segments match", shown, total)
    }
}

pub fn render_memory_map(ui: &mut egui::Ui, ui_state: &mut UIState, controller: &mut AppController) {
    let store = controller.store();
    let visible: Vec<&Project> = store
        .projects
        .iter()
        .filter(|p| matches_search(p, &ui_state.search_query))
        .collect();

    widgets::panel_header(ui, "MEMORY MAP", &segment_caption(visible.len(), store.projects.len()));

    let selected_id = controller.selection().project.clone();
    let mut clicked: Option<String> = None;

    egui::ScrollArea::vertical()
        .id_source("memory_map_scroll")
        .auto_shrink([false; 2])
        .max_height(widgets::height_above_footer(ui.available_height()))
        .show(ui, |ui| {
            if visible.is_empty() {
                ui.label(RichText::new("No segments match the search").monospace().small().color(palette::MUTED));
            }
            for project in &visible {
                let selected = selected_id.as_deref() == Some(project.id.as_str());
                let frame = if selected {
                    egui::Frame::none()
                        .fill(palette::ACCENT.gamma_multiply(0.2))
                        .stroke(egui::Stroke::new(1.0, palette::ACCENT.gamma_multiply(0.5)))
                } else {
                    egui::Frame::none().stroke(egui::Stroke::new(1.0, egui::Color32::TRANSPARENT))
                };

                let row = frame
                    .rounding(4.0)
                    .inner_margin(egui::Margin::same(8.0))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            widgets::status_dot(ui, palette::status_color(project.status));
                            ui.label(RichText::new(&project.address).monospace().small().color(palette::ACCENT));
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                let chevron = if selected { "▾" } else { "▸" };
                                ui.label(RichText::new(chevron).small().color(palette::MUTED));
                            });
                        });
                        ui.label(RichText::new(&project.name).monospace().color(palette::TEXT));
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(project.permissions.to_string())
                                    .monospace()
                                    .small()
                                    .color(palette::permission_color(project.permissions)),
                            );
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(RichText::new(&project.size).monospace().small().color(palette::MUTED));
                            });
                        });
                        ui.label(RichText::new(&project.description).small().color(palette::MUTED));
                    })
                    .response;

                let response = ui.interact(row.rect, ui.id().with(("segment", &project.id)), Sense::click());
                if response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
                    clicked = Some(project.id.clone());
                }
            }
        });

    widgets::panel_footer(
        ui,
        &[
            format!("Total: {} KB", store.total_size_kb()),
            format!("Free: {} KB", store.free_size_kb()),
        ],
    );

    if let Some(id) = clicked {
        controller.dispatch(SelectionAction::SelectProject(id));
        ui_state.needs_repaint = true;
    }
}
