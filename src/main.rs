use tokio::sync::mpsc;

use debugfolio::config::loader::get_global_settings_path;
use debugfolio::log_collector::{ensure_logs_dir_exists, get_global_logs_path};
use debugfolio::ui::app::AppUI;
use debugfolio::ui::controller::AppController;
use debugfolio::{AppState, LogCollector, LogLine, PortfolioStore, SettingsManager, TokioScheduler};

#[tokio::main]
async fn main() -> debugfolio::Result<()> {
    // =========================================================================
    // LOG COLLECTOR - MUST BE FIRST
    // =========================================================================
    let log_dir = match get_global_logs_path() {
        Ok(dir) => {
            ensure_logs_dir_exists(&dir)?;
            dir
        }
        Err(e) => {
            eprintln!("[Main] ERROR: Failed to get global logs path: {}", e);
            return Err(format!("Failed to determine logs directory: {}", e).into());
        }
    };
    let (log_ui_tx, log_ui_rx) = mpsc::channel::<LogLine>(1024);
    let log_collector = match LogCollector::new(log_dir, log_ui_tx) {
        Ok(collector) => collector,
        Err(e) => {
            eprintln!("[Main] WARNING: LogCollector initialization failed: {}", e);
            return Err(format!("LogCollector initialization failed: {}", e).into());
        }
    };
    let log_file = log_collector.log_file().to_path_buf();

    // Wire LogCollector as the global logger; the level is refined once settings load
    if let Err(e) = log::set_boxed_logger(Box::new(log_collector.clone()))
        .map(|()| log::set_max_level(log::LevelFilter::Info))
    {
        eprintln!("[Main] WARNING: Failed to set LogCollector as global logger: {}", e);
    }
    log::info!("Debugfolio v{} starting, logging to {}", debugfolio::VERSION, log_file.display());

    // =========================================================================
    // SETTINGS
    // =========================================================================
    let settings = match SettingsManager::load() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("[Main] Failed to load settings, using defaults: {}", e);
            AppState::default()
        }
    };
    log::set_max_level(settings.log_level());

    // =========================================================================
    // PORTFOLIO DATA
    // =========================================================================
    let store = match settings.portfolio_file() {
        Some(path) => match PortfolioStore::load_from_file(&path) {
            Ok(store) => {
                log::info!("[Main] Portfolio loaded from {}", path.display());
                store
            }
            Err(e) => {
                log::warn!("[Main] {}; falling back to builtin portfolio", e);
                PortfolioStore::builtin()
            }
        },
        None => PortfolioStore::builtin(),
    };

    // =========================================================================
    // CONTROLLER AND SCHEDULER
    // =========================================================================
    let (scheduler, timer_rx) = TokioScheduler::new();
    let repaint_slot = scheduler.ui_context_slot();

    let mut controller = AppController::new(settings, store, Box::new(scheduler));
    if let Ok(path) = get_global_settings_path() {
        controller = controller.with_settings_path(path);
    }

    let app_ui = AppUI::new(controller, Some(timer_rx), Some(log_ui_rx))
        .with_repaint_slot(repaint_slot)
        .with_log_file(log_file);

    // =========================================================================
    // LAUNCH EGUI
    // =========================================================================
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 860.0])
            .with_min_inner_size([960.0, 600.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Debugfolio",
        options,
        Box::new(move |_cc| Box::new(app_ui)),
    );

    // =========================================================================
    // SHUTDOWN
    // =========================================================================
    if let Err(e) = log_collector.wait_for_empty() {
        eprintln!("[Main] WARNING: Failed to wait for log collector to empty: {}", e);
    }

    result.map_err(|e| e.into())
}
