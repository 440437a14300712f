//! Execution Simulator
//!
//! Drives the "analysis" highlight animation: while running, the instruction
//! line advances every 800ms, the byte cursor every 200ms, and the whole cycle
//! ends on its own after 5s.
//!
//! # Module Structure
//!
//! - `state`: counters, phases, and the pure transition function
//! - `scheduler`: interval/timeout primitives with cancellation handles
//!
//! At most one line timer, one byte timer and one deadline timer are alive at
//! a time. Starting a new cycle releases the previous timers first, and firings
//! from an older cycle are recognised by their generation and dropped.

pub mod scheduler;
pub mod state;

pub use scheduler::{ManualScheduler, Scheduler, TimerFired, TimerHandle, TimerKind, TokioScheduler};
pub use state::{SimEvent, SimPhase, SimulationState};

use crate::models::Project;
use state::{BYTE_PERIOD, CYCLE_DURATION, LINE_PERIOD};

pub struct ExecutionSimulator {
    state: SimulationState,
    scheduler: Box<dyn Scheduler>,
    timers: Vec<TimerHandle>,
}

impl ExecutionSimulator {
    pub fn new(scheduler: Box<dyn Scheduler>) -> Self {
        ExecutionSimulator {
            state: SimulationState::default(),
            scheduler,
            timers: Vec::new(),
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Number of timers currently held
    pub fn armed_timers(&self) -> usize {
        self.timers.len()
    }

    /// Begin a cycle for `project`. Without a project this is a no-op.
    ///
    /// Returns whether a cycle was started.
    pub fn start(&mut self, project: Option<&Project>) -> bool {
        let Some(project) = project else {
            log::debug!("[Simulator] start ignored: no project selected");
            return false;
        };

        self.release_timers();
        self.state = self.state.apply(SimEvent::Started);
        let generation = self.state.generation;

        self.timers.push(self.scheduler.every(LINE_PERIOD, TimerKind::Line, generation));
        self.timers.push(self.scheduler.every(BYTE_PERIOD, TimerKind::Byte, generation));
        self.timers.push(self.scheduler.after(CYCLE_DURATION, TimerKind::Deadline, generation));

        log::info!(
            "[Simulator] Analysis started for {} (generation {})",
            project.name,
            generation
        );
        true
    }

    /// End the current cycle immediately and cancel all pending timers.
    pub fn stop(&mut self) {
        self.release_timers();
        if self.state.is_active() {
            self.state = self.state.apply(SimEvent::Stopped);
            log::info!("[Simulator] Analysis stopped (generation {})", self.state.generation);
        }
    }

    /// Apply a timer firing. Stale or post-cycle firings are ignored.
    pub fn handle_timer(&mut self, fired: TimerFired) {
        if fired.generation != self.state.generation || !self.state.is_active() {
            log::debug!(
                "[Simulator] Dropping stale {:?} tick (generation {}, current {})",
                fired.kind,
                fired.generation,
                self.state.generation
            );
            return;
        }

        let event = match fired.kind {
            TimerKind::Line => SimEvent::LineTick,
            TimerKind::Byte => SimEvent::ByteTick,
            TimerKind::Deadline => SimEvent::DeadlineReached,
        };
        self.state = self.state.apply(event);

        if !self.state.is_active() {
            self.release_timers();
            log::info!("[Simulator] Analysis cycle completed (generation {})", self.state.generation);
        }
    }

    fn release_timers(&mut self) {
        for timer in self.timers.drain(..) {
            timer.cancel();
        }
    }
}

impl Drop for ExecutionSimulator {
    fn drop(&mut self) {
        self.release_timers();
    }
}
