/// Custom egui Widgets
///
/// Small painter-based pieces shared by the debugger panels:
/// - panel_header: title plus a muted subtitle line
/// - status_dot: filled circle coloured by project status
/// - level_bar: thin proficiency bar for stack frames
/// - console_viewport: monospace log viewer

use eframe::egui;
use egui::{Color32, Pos2, Rect, RichText, Stroke, Vec2};
use std::collections::VecDeque;

use crate::log_collector::LogLine;
use crate::ui::palette;

/// Title row used at the top of every panel
pub fn panel_header(ui: &mut egui::Ui, title: &str, subtitle: &str) {
    ui.add_space(4.0);
    ui.label(RichText::new(title).monospace().strong().color(palette::TEXT));
    if !subtitle.is_empty() {
        ui.label(RichText::new(subtitle).monospace().small().color(palette::MUTED));
    }
    ui.add_space(2.0);
    ui.separator();
}

/// Footer lines in the muted monospace style
pub fn panel_footer(ui: &mut egui::Ui, lines: &[String]) {
    ui.separator();
    for line in lines {
        ui.label(RichText::new(line).monospace().small().color(palette::MUTED));
    }
}

/// Room reserved below a panel's scroll area for its footer lines
pub const FOOTER_HEIGHT: f32 = 48.0;

/// Scroll area height that leaves room for the footer, never negative
pub fn height_above_footer(available: f32) -> f32 {
    (available - FOOTER_HEIGHT).max(0.0)
}

/// Draws a small filled circle, used as the status indicator of a memory segment
pub fn status_dot(ui: &mut egui::Ui, color: Color32) {
    let (response, painter) = ui.allocate_painter(Vec2::splat(8.0), egui::Sense::hover());
    painter.circle_filled(response.rect.center(), 3.0, color);
}

/// Draws a proficiency bar filled to `level` percent
///
/// The track uses the background colour so the bar reads the same on every
/// theme; the fill colour comes from the caller's level band.
pub fn level_bar(ui: &mut egui::Ui, level: u8, color: Color32) {
    let width = ui.available_width().max(20.0);
    let (response, painter) = ui.allocate_painter(Vec2::new(width, 4.0), egui::Sense::hover());
    let rect = response.rect;

    painter.rect_filled(rect, 2.0, palette::BG);

    let fraction = f32::from(level.min(100)) / 100.0;
    if fraction > 0.0 {
        let filled = Rect::from_min_max(rect.min, Pos2::new(rect.left() + rect.width() * fraction, rect.bottom()));
        painter.rect_filled(filled, 2.0, color);
    }
}

/// Left accent stripe for a highlighted row
pub fn accent_stripe(ui: &egui::Ui, rect: Rect, color: Color32) {
    ui.painter().line_segment(
        [rect.left_top(), rect.left_bottom()],
        Stroke::new(2.0, color),
    );
}

/// Colour for a console line by severity
pub fn log_level_color(level: log::Level) -> Color32 {
    match level {
        log::Level::Error => palette::ERROR,
        log::Level::Warn => palette::WARNING,
        log::Level::Info => palette::TEXT,
        log::Level::Debug | log::Level::Trace => palette::MUTED,
    }
}

/// Terminal-style log viewer with monospace font
pub fn console_viewport(ui: &mut egui::Ui, lines: &VecDeque<LogLine>) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if lines.is_empty() {
                ui.monospace("Awaiting output...");
                return;
            }
            for line in lines {
                ui.label(
                    RichText::new(line.formatted())
                        .monospace()
                        .small()
                        .color(log_level_color(line.level)),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_colors() {
        assert_eq!(log_level_color(log::Level::Error), palette::ERROR);
        assert_eq!(log_level_color(log::Level::Warn), palette::WARNING);
        assert_eq!(log_level_color(log::Level::Debug), palette::MUTED);
    }

    #[test]
    fn test_height_above_footer_clamps() {
        assert_eq!(height_above_footer(300.0), 300.0 - FOOTER_HEIGHT);
        assert_eq!(height_above_footer(FOOTER_HEIGHT), 0.0);
        assert_eq!(height_above_footer(10.0), 0.0);
    }
}
