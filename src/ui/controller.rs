//! AppController: owns the portfolio data, the selection and the execution simulator.
//!
//! Panels never mutate state directly. They report clicks as `SelectionAction`s
//! or call one of the controller's operations; the controller applies the pure
//! selection reducer and keeps the simulator consistent with the selection
//! according to the configured `ReselectPolicy`.

use std::path::{Path, PathBuf};

use crate::config::{AppState, ReselectPolicy, SettingsManager};
use crate::data::PortfolioStore;
use crate::error::AppError;
use crate::export;
use crate::log_info;
use crate::models::{Project, Skill};
use crate::simulator::{ExecutionSimulator, Scheduler, SimulationState, TimerFired};
use crate::synth::{self, HexDump, Instruction};

/// User-driven selection changes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionAction {
    SelectProject(String),
    ClearProject,
    SelectSkill(String),
    /// Clicking the expanded frame collapses it
    ToggleSkill(String),
    ClearSkill,
    Reset,
}

/// At most one selected project and one selected skill, by id
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub project: Option<String>,
    pub skill: Option<String>,
}

impl SelectionState {
    /// Pure transition. Project actions never touch the skill and vice versa.
    pub fn reduce(self, action: SelectionAction) -> SelectionState {
        match action {
            SelectionAction::SelectProject(id) => SelectionState { project: Some(id), ..self },
            SelectionAction::ClearProject => SelectionState { project: None, ..self },
            SelectionAction::SelectSkill(id) => SelectionState { skill: Some(id), ..self },
            SelectionAction::ToggleSkill(id) => {
                let skill = if self.skill.as_deref() == Some(id.as_str()) { None } else { Some(id) };
                SelectionState { skill, ..self }
            }
            SelectionAction::ClearSkill => SelectionState { skill: None, ..self },
            SelectionAction::Reset => SelectionState::default(),
        }
    }
}

/// Central state manager for the debugger window
pub struct AppController {
    settings: AppState,
    /// Overrides the global settings location (tests, portable installs)
    settings_path: Option<PathBuf>,
    store: PortfolioStore,
    selection: SelectionState,
    simulator: ExecutionSimulator,
}

impl AppController {
    pub fn new(settings: AppState, store: PortfolioStore, scheduler: Box<dyn Scheduler>) -> Self {
        log_info!(
            "[AppController] Loaded {} projects, {} skills (reselect policy: {})",
            store.projects.len(),
            store.skills.len(),
            settings.reselect_policy
        );
        AppController {
            settings,
            settings_path: None,
            store,
            selection: SelectionState::default(),
            simulator: ExecutionSimulator::new(scheduler),
        }
    }

    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn settings(&self) -> &AppState {
        &self.settings
    }

    pub fn store(&self) -> &PortfolioStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn simulation(&self) -> &SimulationState {
        self.simulator.state()
    }

    pub fn is_analyzing(&self) -> bool {
        self.simulator.is_active()
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selection.project.as_deref().and_then(|id| self.store.project(id))
    }

    pub fn selected_skill(&self) -> Option<&Skill> {
        self.selection.skill.as_deref().and_then(|id| self.store.skill(id))
    }

    /// Disassembly of the selected project, `None` when nothing is selected
    pub fn disassembly(&self) -> Option<Vec<Instruction>> {
        self.selected_project().map(synth::disassemble)
    }

    pub fn hex_dump(&self) -> HexDump {
        synth::hex_dump(self.selected_project())
    }

    /// Instruction index to highlight, only while a cycle runs
    pub fn executing_line(&self) -> Option<usize> {
        let state = self.simulator.state();
        state.is_active().then_some(state.line as usize)
    }

    /// Global byte index to highlight, only while a cycle runs
    pub fn executing_byte(&self) -> Option<usize> {
        let state = self.simulator.state();
        state.is_active().then_some(state.byte as usize)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Apply a selection change, then reconcile the simulator with it.
    pub fn dispatch(&mut self, action: SelectionAction) {
        match &action {
            SelectionAction::SelectProject(id) if self.store.project(id).is_none() => {
                log::warn!("[AppController] Ignoring selection of unknown project '{}'", id);
                return;
            }
            SelectionAction::SelectSkill(id) | SelectionAction::ToggleSkill(id)
                if self.store.skill(id).is_none() =>
            {
                log::warn!("[AppController] Ignoring selection of unknown skill '{}'", id);
                return;
            }
            _ => {}
        }

        let previous = self.selection.project.clone();
        self.selection = std::mem::take(&mut self.selection).reduce(action);
        log::debug!("[AppController] Selection now {:?}", self.selection);

        if self.selection.project != previous {
            self.on_project_changed();
        }
    }

    fn on_project_changed(&mut self) {
        if !self.simulator.is_active() {
            return;
        }
        if self.selection.project.is_none() {
            // Nothing left to animate
            self.simulator.stop();
            return;
        }
        match self.settings.reselect_policy {
            ReselectPolicy::Stop => self.simulator.stop(),
            ReselectPolicy::Restart => {
                let project = self.selection.project.as_deref().and_then(|id| self.store.project(id));
                self.simulator.start(project);
            }
            ReselectPolicy::Continue => {
                log::debug!("[AppController] Project changed mid-cycle, continuing");
            }
        }
    }

    // ------------------------------------------------------------------
    // Analysis
    // ------------------------------------------------------------------

    /// ANALYZE/STOP button. Returns whether a cycle is running afterwards.
    pub fn toggle_analysis(&mut self) -> bool {
        if self.simulator.is_active() {
            self.simulator.stop();
        } else {
            let project = self.selection.project.as_deref().and_then(|id| self.store.project(id));
            self.simulator.start(project);
        }
        self.simulator.is_active()
    }

    pub fn stop_analysis(&mut self) {
        self.simulator.stop();
    }

    /// RESET button: stop the simulator and clear both selections.
    pub fn reset(&mut self) {
        self.simulator.stop();
        self.selection = SelectionState::default();
        log_info!("[AppController] Debugger state reset");
    }

    pub fn handle_timer(&mut self, fired: TimerFired) {
        self.simulator.handle_timer(fired);
    }

    // ------------------------------------------------------------------
    // Resume dump
    // ------------------------------------------------------------------

    pub fn default_dump_path(&self) -> PathBuf {
        self.settings.export_target().join(export::DUMP_FILE_NAME)
    }

    /// Write the resume dump to `target` (file or directory)
    pub fn export_dump(&self, target: &Path) -> Result<PathBuf, AppError> {
        export::write_dump(&self.store, target).map_err(|e| {
            log::error!("[AppController] Resume dump failed: {}", e);
            AppError::from(e)
        })
    }

    // ------------------------------------------------------------------
    // Portfolio data
    // ------------------------------------------------------------------

    /// Replace the data set with a portfolio file and remember it in the settings.
    ///
    /// The settings are persisted before anything changes, so an error leaves
    /// both the data and the selection untouched. On success the current cycle
    /// is stopped and the selection cleared, since the old ids may not exist in
    /// the new data.
    pub fn load_portfolio(&mut self, path: &Path) -> Result<(), AppError> {
        let store = PortfolioStore::load_from_file(path)?;
        let path_str = path.display().to_string();
        self.update_settings(|s| s.portfolio_path = path_str)?;
        self.replace_store(store);
        Ok(())
    }

    /// Switch back to the builtin sample data
    pub fn use_builtin_portfolio(&mut self) -> Result<(), AppError> {
        self.update_settings(|s| s.portfolio_path.clear())?;
        self.replace_store(PortfolioStore::builtin());
        Ok(())
    }

    fn replace_store(&mut self, store: PortfolioStore) {
        self.simulator.stop();
        self.selection = SelectionState::default();
        self.store = store;
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Mutate the settings and persist them.
    ///
    /// Invalid values are rejected, and a failed write keeps the previous settings.
    pub fn update_settings<F>(&mut self, f: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut AppState),
    {
        let mut next = self.settings.clone();
        f(&mut next);
        next.validate()?;
        self.write_settings(&next)?;
        self.apply_settings(next);
        Ok(())
    }

    /// Apply a change in memory only, e.g. while a slider is being dragged.
    ///
    /// Call `persist_settings` once the edit is finished.
    pub fn preview_settings<F>(&mut self, f: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut AppState),
    {
        let mut next = self.settings.clone();
        f(&mut next);
        next.validate()?;
        self.apply_settings(next);
        Ok(())
    }

    fn apply_settings(&mut self, next: AppState) {
        if next.debug_logging != self.settings.debug_logging {
            log::set_max_level(next.log_level());
            log_info!("[AppController] Log level set to {}", next.log_level());
        }
        self.settings = next;
    }

    /// Explicitly persist current settings to disk
    pub fn persist_settings(&self) -> Result<(), AppError> {
        self.write_settings(&self.settings)
    }

    fn write_settings(&self, state: &AppState) -> Result<(), AppError> {
        let result = match &self.settings_path {
            Some(path) => SettingsManager::save_to(state, path),
            None => SettingsManager::save(state),
        };
        result.map_err(|e| {
            log::error!("[AppController] Failed to persist settings: {}", e);
            AppError::from(e)
        })
    }

    /// Reset settings to defaults and persist
    pub fn reset_settings(&mut self) -> Result<(), AppError> {
        let policy_before = self.settings.reselect_policy;
        self.update_settings(|s| *s = AppState::default())?;
        log_info!(
            "[AppController] Settings reset to defaults (reselect policy {} -> {})",
            policy_before,
            self.settings.reselect_policy
        );
        Ok(())
    }
}
