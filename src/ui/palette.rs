//! Debugger colour palette and the deterministic colour mappings used by the panels.
//!
//! Palette:
//! - Background: #0f1419, Panel: #1a1f29, Border: #2d3748
//! - Text: #e2e8f0, Muted: #94a3b8, Accent: #38bdf8
//! - Success: #10b981, Warning: #f59e0b, Error: #ef4444
//! - Exec: #8b5cf6, Read: #06b6d4, Write: #f97316

use eframe::egui;
use egui::Color32;
use std::collections::BTreeMap;

use crate::models::{Permissions, ProjectStatus};

pub const BG: Color32 = Color32::from_rgb(0x0f, 0x14, 0x19);
pub const PANEL: Color32 = Color32::from_rgb(0x1a, 0x1f, 0x29);
pub const BORDER: Color32 = Color32::from_rgb(0x2d, 0x37, 0x48);
pub const TEXT: Color32 = Color32::from_rgb(0xe2, 0xe8, 0xf0);
pub const MUTED: Color32 = Color32::from_rgb(0x94, 0xa3, 0xb8);
pub const ACCENT: Color32 = Color32::from_rgb(0x38, 0xbd, 0xf8);
pub const SUCCESS: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81);
pub const WARNING: Color32 = Color32::from_rgb(0xf5, 0x9e, 0x0b);
pub const ERROR: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
pub const EXEC: Color32 = Color32::from_rgb(0x8b, 0x5c, 0xf6);
pub const READ: Color32 = Color32::from_rgb(0x06, 0xb6, 0xd4);
pub const WRITE: Color32 = Color32::from_rgb(0xf9, 0x73, 0x16);

/// EXEC wins over WRITE, WRITE over READ
pub fn permission_color(perms: Permissions) -> Color32 {
    if perms.exec {
        EXEC
    } else if perms.write {
        WRITE
    } else {
        READ
    }
}

pub fn status_color(status: ProjectStatus) -> Color32 {
    match status {
        ProjectStatus::Running => SUCCESS,
        ProjectStatus::Loaded => ACCENT,
        ProjectStatus::Stopped => ERROR,
    }
}

/// Proficiency band of a skill level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelBand {
    Expert,
    Advanced,
    Proficient,
    Familiar,
}

impl LevelBand {
    pub fn of(level: u8) -> LevelBand {
        match level {
            90.. => LevelBand::Expert,
            80..=89 => LevelBand::Advanced,
            70..=79 => LevelBand::Proficient,
            _ => LevelBand::Familiar,
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            LevelBand::Expert => SUCCESS,
            LevelBand::Advanced => ACCENT,
            LevelBand::Proficient => WARNING,
            LevelBand::Familiar => ERROR,
        }
    }
}

/// Visuals for theme index 0
pub fn debugger_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = PANEL;
    visuals.window_fill = PANEL;
    visuals.extreme_bg_color = BG;
    visuals.faint_bg_color = BG;
    visuals.window_stroke.color = BORDER;
    visuals.window_stroke.width = 1.0;

    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.3);
    visuals.selection.stroke.color = ACCENT;
    visuals.selection.stroke.width = 1.0;

    visuals.widgets.noninteractive.bg_fill = PANEL;
    visuals.widgets.noninteractive.bg_stroke.color = BORDER;
    visuals.widgets.noninteractive.bg_stroke.width = 1.0;

    visuals.widgets.inactive.bg_fill = BORDER;
    visuals.widgets.inactive.weak_bg_fill = BORDER;
    visuals.widgets.inactive.fg_stroke.color = TEXT;

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(0x4a, 0x55, 0x68);
    visuals.widgets.hovered.weak_bg_fill = Color32::from_rgb(0x4a, 0x55, 0x68);
    visuals.widgets.hovered.bg_stroke.color = ACCENT;
    visuals.widgets.hovered.fg_stroke.color = TEXT;

    visuals.widgets.active.bg_fill = ACCENT.gamma_multiply(0.5);
    visuals.widgets.active.bg_stroke.color = ACCENT;
    visuals.widgets.active.fg_stroke.color = TEXT;

    visuals.override_text_color = Some(TEXT);
    visuals.hyperlink_color = ACCENT;

    visuals
}

/// Map a theme index to visuals; unknown indices use the debugger palette
pub fn visuals_for(theme_idx: usize) -> egui::Visuals {
    match theme_idx {
        1 => egui::Visuals::dark(),
        2 => egui::Visuals::light(),
        _ => debugger_visuals(),
    }
}

/// Font size the egui default text styles are designed around (monospace body)
pub const BASE_FONT_SIZE: f32 = 12.0;

/// egui's default text styles rescaled so monospace text renders at `font_size`
pub fn text_styles(font_size: f32) -> BTreeMap<egui::TextStyle, egui::FontId> {
    let scale = font_size / BASE_FONT_SIZE;
    egui::Style::default()
        .text_styles
        .into_iter()
        .map(|(style, font)| (style, egui::FontId::new(font.size * scale, font.family)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_priority() {
        assert_eq!(permission_color(Permissions::READ_EXEC), EXEC);
        assert_eq!(permission_color(Permissions::READ_WRITE), WRITE);
        assert_eq!(permission_color(Permissions { read: true, write: false, exec: false }), READ);
        assert_eq!(permission_color(Permissions { read: true, write: true, exec: true }), EXEC);
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color(ProjectStatus::Running), SUCCESS);
        assert_eq!(status_color(ProjectStatus::Loaded), ACCENT);
        assert_eq!(status_color(ProjectStatus::Stopped), ERROR);
    }

    #[test]
    fn test_level_band_boundaries() {
        assert_eq!(LevelBand::of(100), LevelBand::Expert);
        assert_eq!(LevelBand::of(90), LevelBand::Expert);
        assert_eq!(LevelBand::of(89), LevelBand::Advanced);
        assert_eq!(LevelBand::of(80), LevelBand::Advanced);
        assert_eq!(LevelBand::of(79), LevelBand::Proficient);
        assert_eq!(LevelBand::of(70), LevelBand::Proficient);
        assert_eq!(LevelBand::of(69), LevelBand::Familiar);
        assert_eq!(LevelBand::of(0), LevelBand::Familiar);
        assert_eq!(LevelBand::of(95).color(), SUCCESS);
    }

    #[test]
    fn test_visuals_for_theme_index() {
        assert_eq!(visuals_for(0).panel_fill, PANEL);
        assert_eq!(visuals_for(7).panel_fill, PANEL);
        assert!(!visuals_for(2).dark_mode);
    }

    #[test]
    fn test_text_styles_follow_font_size() {
        let defaults = egui::Style::default().text_styles;
        let doubled = text_styles(24.0);
        assert_eq!(doubled[&egui::TextStyle::Monospace].size, 24.0);
        for (style, font) in &defaults {
            assert_eq!(doubled[style].size, font.size * 2.0);
            assert_eq!(doubled[style].family, font.family);
        }
        assert_eq!(text_styles(BASE_FONT_SIZE), defaults);
    }
}
