//! Debugfolio
//!
//! A developer portfolio presented as a debugger/disassembler window. Projects
//! appear as memory regions, skills as stack frames, and the selected project
//! is rendered as a synthetic disassembly listing plus a hex dump of its tech
//! stack. An "analysis" mode animates an execution highlight across both.
//!
//! The system is organized into functional modules:
//! - **error**: Unified error type hierarchy
//! - **models**: Core data structures (projects, skills, registers)
//! - **data**: The portfolio store, builtin dataset and JSON loading
//! - **synth**: Pure disassembly and hex dump synthesis
//! - **simulator**: Execution highlight state machine and timer scheduling
//! - **config**: Persisted user settings
//! - **export**: Resume dump writer
//! - **ui**: AppController and the egui panels
//! - **log_collector**: File + console logging backend

// Core foundational modules
pub mod error;
pub mod models;
pub mod data;

// Pure synthesis and the animation engine
pub mod synth;
pub mod simulator;

// Configuration and export
pub mod config;
pub mod export;

// UI controller and Egui integration
pub mod ui;

// Robust, decoupled logging system
pub mod log_collector;

// Re-export the log crate for macro usage
pub use log;

// Re-export log collector for use throughout the system
pub use log_collector::{LogCollector, LogLine};

// ============================================================================
// PUBLIC RE-EXPORTS FOR CONVENIENCE
// ============================================================================

pub use error::{AppError, ConfigError, ExportError, PortfolioError, Result};

pub use models::{Permissions, Project, ProjectLinks, ProjectStatus, Register, Skill};

pub use data::PortfolioStore;

pub use config::{AppState, ReselectPolicy, SettingsManager};

pub use simulator::{ExecutionSimulator, ManualScheduler, Scheduler, SimulationState, TokioScheduler};

pub use ui::{AppController, SelectionAction};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn test_error_reexport() {
        let _: Result<i32> = Ok(42);
    }

    #[test]
    fn test_models_reexport() {
        let store = PortfolioStore::builtin();
        assert_eq!(store.projects.len(), 5);
        assert_eq!(store.skills.len(), 8);
        assert_eq!(ProjectStatus::Running, ProjectStatus::Running);
    }
}
