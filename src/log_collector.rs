//! Decoupled logging pipeline for the debugger UI.
//!
//! Every `log::info!`/`warn!`/`error!` call lands here. Lines are pushed onto
//! an unbounded crossbeam channel and a background thread appends them to
//! `logs/debugfolio-<date>.log`, then mirrors them to the console panel.
//!
//! ```text
//! log::info!()
//!     |
//! [LogCollector] (non-blocking)
//!     | (crossbeam channel)
//!     v
//! [DiskPersister thread] --> logs/debugfolio-YYYY-MM-DD.log
//!     |
//!     +--> UI console (tokio mpsc, try_send)
//! ```
//!
//! Disk persistence never depends on the UI: a full or closed UI channel only
//! drops the console copy.

use chrono::Local;
use crossbeam_channel::{unbounded, Sender};
use log::{Level, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Internal log line or special marker
enum LogMessage {
    Line(LogLine),
    /// Flush marker with channel sender to signal completion
    Flush(std::sync::mpsc::Sender<()>),
}

/// Get the global logs path relative to the current working directory: ./logs
pub fn get_global_logs_path() -> Result<PathBuf, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Failed to get current working directory: {}", e))?;
    Ok(cwd.join("logs"))
}

/// Ensure the global logs directory exists
pub fn ensure_logs_dir_exists(log_dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(log_dir).map_err(|e| format!("Failed to create logs directory: {}", e))
}

/// Today's log file inside `log_dir`
pub fn log_file_for_today(log_dir: &Path) -> PathBuf {
    log_dir.join(format!("debugfolio-{}.log", Local::now().format("%Y-%m-%d")))
}

/// A log line with metadata
#[derive(Clone, Debug, PartialEq)]
pub struct LogLine {
    pub message: String,
    pub level: Level,
    /// HH:MM:SS.mmm
    pub timestamp: String,
}

impl LogLine {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        LogLine {
            message: message.into(),
            level,
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
        }
    }

    /// `[HH:MM:SS.mmm] [LEVEL] message`, the on-disk and console format
    pub fn formatted(&self) -> String {
        format!("[{}] [{}] {}", self.timestamp, self.level, self.message)
    }
}

/// Unified logger that handles disk and UI dispatch
#[derive(Clone)]
pub struct LogCollector {
    tx: Sender<LogMessage>,
    log_file: PathBuf,
}

impl LogCollector {
    /// Create the collector and spawn its disk persister thread.
    ///
    /// `ui_tx` receives a copy of every line for the console panel.
    pub fn new(log_dir: PathBuf, ui_tx: tokio::sync::mpsc::Sender<LogLine>) -> Result<Self, String> {
        ensure_logs_dir_exists(&log_dir)?;
        let log_file = log_file_for_today(&log_dir);

        let (tx, rx) = unbounded::<LogMessage>();
        let path = log_file.clone();

        std::thread::spawn(move || {
            let mut handle: Option<File> = None;

            while let Ok(msg) = rx.recv() {
                match msg {
                    LogMessage::Line(line) => {
                        if handle.is_none() {
                            handle = OpenOptions::new().create(true).append(true).open(&path).ok();
                        }
                        if let Some(file) = handle.as_mut() {
                            let _ = writeln!(file, "{}", line.formatted());
                        }
                        // UI copy is best effort
                        let _ = ui_tx.try_send(line);
                    }
                    LogMessage::Flush(done) => {
                        if let Some(file) = handle.as_mut() {
                            let _ = file.flush();
                            let _ = file.sync_data();
                        }
                        let _ = done.send(());
                    }
                }
            }
        });

        Ok(LogCollector { tx, log_file })
    }

    /// File this collector appends to
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Send a log line (non-blocking)
    pub fn push(&self, line: LogLine) {
        let _ = self.tx.send(LogMessage::Line(line));
    }

    pub fn push_str(&self, level: Level, message: impl Into<String>) {
        self.push(LogLine::new(level, message));
    }

    /// Block until every line sent before this call has reached disk.
    pub fn wait_for_empty(&self) -> Result<(), String> {
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        self.tx
            .send(LogMessage::Flush(tx))
            .map_err(|e| format!("Failed to send flush marker: {}", e))?;
        rx.recv().map_err(|e| format!("Flush signal interrupted: {}", e))
    }
}

/// Wires all log::info!(), log::warn!(), log::error!() calls into LogCollector
impl Log for LogCollector {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.push(LogLine::new(record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {
        let _ = self.wait_for_empty();
    }
}

/// Format and log at info level
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        let msg = format!($($arg)*);
        log::info!("{}", msg);
    }}
}
