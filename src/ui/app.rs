/// Main App Orchestrator and UI State Management
///
/// This module provides the transient UI state and the eframe::App implementation
/// for the debugger window. It drains the simulator timer channel and the log
/// channel every frame, applies the theme, and lays out the panels.

use eframe::egui;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::error::AppError;
use crate::log_collector::LogLine;
use crate::simulator::TimerFired;
use crate::ui::controller::AppController;
use crate::ui::settings::SettingsUIState;
use crate::ui::{disassembly, hex_viewer, memory_map, palette, settings, stack_frames, toolbar, widgets};

/// Console buffer cap
pub const MAX_CONSOLE_LINES: usize = 500;

/// How long success/info banners stay up
const MESSAGE_TTL: Duration = Duration::from_secs(4);

/// Transient UI state - state that doesn't persist across sessions
pub struct UIState {
    /// Dirty flag: set when data changes, cleared after the repaint request
    pub needs_repaint: bool,

    /// Memory map filter text
    pub search_query: String,

    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub info_message: Option<String>,
    /// When the current success/info banner was raised
    pub message_time: Option<Instant>,

    /// Recent log lines (fixed-size VecDeque for O(1) appends)
    pub console: VecDeque<LogLine>,

    /// File the log collector appends to, shown in settings
    pub log_file: Option<PathBuf>,

    pub settings_ui_state: SettingsUIState,

    /// Cached theme index to avoid recalculating visuals
    pub cached_theme_idx: Option<usize>,
    pub cached_font_size: Option<f32>,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            needs_repaint: true,
            search_query: String::new(),
            error_message: None,
            success_message: None,
            info_message: None,
            message_time: None,
            console: VecDeque::with_capacity(MAX_CONSOLE_LINES),
            log_file: None,
            settings_ui_state: SettingsUIState::default(),
            cached_theme_idx: None,
            cached_font_size: None,
        }
    }
}

impl UIState {
    /// Surface an operation result as a success or error banner
    pub fn report(&mut self, result: Result<String, AppError>) {
        match result {
            Ok(msg) => {
                self.success_message = Some(msg);
                self.message_time = Some(Instant::now());
            }
            Err(e) => self.error_message = Some(e.user_message()),
        }
        self.needs_repaint = true;
    }

    /// Append a log line, dropping the oldest beyond the cap
    pub fn push_console(&mut self, line: LogLine) {
        self.console.push_back(line);
        while self.console.len() > MAX_CONSOLE_LINES {
            self.console.pop_front();
        }
    }
}

/// Main Application UI Structure
pub struct AppUI {
    pub controller: AppController,
    pub ui_state: UIState,
    /// Simulator timer firings
    pub timer_rx: Option<tokio::sync::mpsc::UnboundedReceiver<TimerFired>>,
    /// Log lines mirrored from the LogCollector
    pub log_rx: Option<tokio::sync::mpsc::Receiver<LogLine>>,
    /// Shared with the TokioScheduler so timer tasks can wake the frame loop
    pub ctx_slot: Option<Arc<RwLock<Option<egui::Context>>>>,
}

impl AppUI {
    pub fn new(
        controller: AppController,
        timer_rx: Option<tokio::sync::mpsc::UnboundedReceiver<TimerFired>>,
        log_rx: Option<tokio::sync::mpsc::Receiver<LogLine>>,
    ) -> Self {
        Self {
            controller,
            ui_state: UIState::default(),
            timer_rx,
            log_rx,
            ctx_slot: None,
        }
    }

    pub fn with_repaint_slot(mut self, slot: Arc<RwLock<Option<egui::Context>>>) -> Self {
        self.ctx_slot = Some(slot);
        self
    }

    pub fn with_log_file(mut self, path: PathBuf) -> Self {
        self.ui_state.log_file = Some(path);
        self
    }

    /// Apply all pending timer firings to the simulator
    pub fn process_timer_events(&mut self) {
        if let Some(ref mut rx) = self.timer_rx {
            while let Ok(fired) = rx.try_recv() {
                self.controller.handle_timer(fired);
                self.ui_state.needs_repaint = true;
            }
        }
    }

    /// Move pending log lines into the console buffer
    pub fn process_log_events(&mut self) {
        if let Some(ref mut rx) = self.log_rx {
            while let Ok(line) = rx.try_recv() {
                self.ui_state.push_console(line);
                self.ui_state.needs_repaint = true;
            }
        }
    }

    fn attach_context(&mut self, ctx: &egui::Context) {
        if let Some(slot) = &self.ctx_slot {
            if let Ok(mut guard) = slot.write() {
                if guard.is_none() {
                    *guard = Some(ctx.clone());
                }
            }
        }
    }

    /// Re-applies visuals only when the theme index or font size changed
    fn apply_theme_from_state(&mut self, ctx: &egui::Context) {
        let settings = self.controller.settings();
        if self.ui_state.cached_theme_idx != Some(settings.theme_idx) {
            ctx.set_visuals(palette::visuals_for(settings.theme_idx));
            self.ui_state.cached_theme_idx = Some(settings.theme_idx);
        }
        if self.ui_state.cached_font_size != Some(settings.ui_font_size) {
            let styles = palette::text_styles(settings.ui_font_size);
            ctx.style_mut(|style| style.text_styles = styles);
            self.ui_state.cached_font_size = Some(settings.ui_font_size);
        }
    }

    fn clear_expired_messages(&mut self) {
        if let Some(raised) = self.ui_state.message_time {
            if raised.elapsed() >= MESSAGE_TTL {
                self.ui_state.success_message = None;
                self.ui_state.info_message = None;
                self.ui_state.message_time = None;
            }
        }
    }

    /// Render transient messages (errors, success, info)
    fn render_messages(&mut self, ctx: &egui::Context) {
        if let Some(msg) = self.ui_state.error_message.clone() {
            egui::TopBottomPanel::top("error_panel").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(palette::ERROR, format!("Error: {}", msg));
                    if ui.button("Dismiss").clicked() {
                        self.ui_state.error_message = None;
                    }
                });
            });
        }

        if let Some(msg) = self.ui_state.success_message.clone() {
            egui::TopBottomPanel::top("success_panel").show(ctx, |ui| {
                ui.colored_label(palette::SUCCESS, msg);
            });
        }

        if let Some(msg) = self.ui_state.info_message.clone() {
            if self.ui_state.message_time.is_none() {
                self.ui_state.message_time = Some(Instant::now());
            }
            egui::TopBottomPanel::top("info_panel").show(ctx, |ui| {
                ui.colored_label(palette::ACCENT, msg);
            });
        }
    }

    fn render_console(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("console_panel")
            .resizable(true)
            .default_height(120.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("CONSOLE").monospace().small().strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Clear").clicked() {
                            self.ui_state.console.clear();
                        }
                    });
                });
                widgets::console_viewport(ui, &self.ui_state.console);
            });
    }
}

impl eframe::App for AppUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.attach_context(ctx);
        self.apply_theme_from_state(ctx);

        // Process all pending async events (sets needs_repaint on data changes)
        self.process_timer_events();
        self.process_log_events();
        self.clear_expired_messages();

        if self.ui_state.needs_repaint {
            ctx.request_repaint();
            self.ui_state.needs_repaint = false;
        } else if self.controller.is_analyzing() || self.ui_state.message_time.is_some() {
            // Fallback in case no context is attached to the scheduler
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar::render_toolbar(ui, &mut self.ui_state, &mut self.controller);
        });

        self.render_messages(ctx);

        if self.controller.settings().show_console {
            self.render_console(ctx);
        }

        egui::SidePanel::left("memory_map")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                memory_map::render_memory_map(ui, &mut self.ui_state, &mut self.controller);
            });

        egui::SidePanel::right("stack_frames")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                stack_frames::render_stack_frames(ui, &mut self.ui_state, &mut self.controller);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::TopBottomPanel::bottom("hex_viewer")
                .resizable(true)
                .default_height(200.0)
                .show_inside(ui, |ui| {
                    hex_viewer::render_hex_viewer(ui, &self.controller);
                });
            egui::CentralPanel::default().show_inside(ui, |ui| {
                disassembly::render_disassembly(ui, &self.controller);
            });
        });

        settings::render_settings_window(ctx, &mut self.ui_state, &mut self.controller);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.stop_analysis();
        log::info!("[UI] Window closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppState;
    use crate::data::PortfolioStore;
    use crate::simulator::{ManualScheduler, TimerKind};
    use crate::ui::controller::SelectionAction;

    fn app() -> (AppUI, tokio::sync::mpsc::UnboundedSender<TimerFired>, tokio::sync::mpsc::Sender<LogLine>) {
        let controller = AppController::new(
            AppState::default(),
            PortfolioStore::builtin(),
            Box::new(ManualScheduler::new()),
        );
        let (timer_tx, timer_rx) = tokio::sync::mpsc::unbounded_channel();
        let (log_tx, log_rx) = tokio::sync::mpsc::channel(16);
        (AppUI::new(controller, Some(timer_rx), Some(log_rx)), timer_tx, log_tx)
    }

    #[test]
    fn test_console_is_capped() {
        let mut state = UIState::default();
        for i in 0..(MAX_CONSOLE_LINES + 25) {
            state.push_console(LogLine::new(log::Level::Info, format!("line {}", i)));
        }
        assert_eq!(state.console.len(), MAX_CONSOLE_LINES);
        assert_eq!(state.console.front().map(|l| l.message.as_str()), Some("line 25"));
    }

    #[test]
    fn test_report_sets_banners() {
        let mut state = UIState::default();
        state.report(Ok("done".to_string()));
        assert_eq!(state.success_message.as_deref(), Some("done"));
        state.report(Err(AppError::Export("disk full".to_string())));
        assert!(state.error_message.unwrap().contains("disk full"));
    }

    #[test]
    fn test_timer_events_reach_controller() {
        let (mut app, timer_tx, _log_tx) = app();
        app.controller.dispatch(SelectionAction::SelectProject("e-commerce-platform".into()));
        assert!(app.controller.toggle_analysis());
        let generation = app.controller.simulation().generation;

        timer_tx.send(TimerFired { kind: TimerKind::Line, generation }).unwrap();
        timer_tx.send(TimerFired { kind: TimerKind::Byte, generation }).unwrap();
        app.process_timer_events();
        assert_eq!(app.controller.simulation().line, 1);
        assert_eq!(app.controller.simulation().byte, 1);

        timer_tx.send(TimerFired { kind: TimerKind::Deadline, generation }).unwrap();
        app.process_timer_events();
        assert!(!app.controller.is_analyzing());
    }

    #[test]
    fn test_log_events_fill_console() {
        let (mut app, _timer_tx, log_tx) = app();
        log_tx.try_send(LogLine::new(log::Level::Warn, "careful")).unwrap();
        app.process_log_events();
        assert_eq!(app.ui_state.console.len(), 1);
        assert!(app.ui_state.needs_repaint);
    }
}
