//! Simulation state and its pure transitions.
//!
//! `SimulationState::apply` is the only way the counters move. The simulator
//! feeds it events derived from timer firings; the UI only reads the result.

use std::time::Duration;

/// Period of the instruction-line counter.
pub const LINE_PERIOD: Duration = Duration::from_millis(800);

/// Period of the byte counter.
pub const BYTE_PERIOD: Duration = Duration::from_millis(200);

/// Total length of one analysis cycle.
pub const CYCLE_DURATION: Duration = Duration::from_millis(5000);

/// The line counter wraps at this value.
pub const LINE_MODULUS: u8 = 8;

/// The byte counter wraps at this value.
pub const BYTE_MODULUS: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimPhase {
    #[default]
    Idle,
    Running,
}

/// Inputs to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Started,
    LineTick,
    ByteTick,
    DeadlineReached,
    Stopped,
}

/// Snapshot of the execution animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationState {
    pub phase: SimPhase,
    /// Current instruction line, 0..LINE_MODULUS
    pub line: u8,
    /// Current byte, 0..BYTE_MODULUS
    pub byte: u8,
    /// Incremented on every start; timer firings carry the generation they belong to
    pub generation: u64,
}

impl SimulationState {
    pub fn is_active(&self) -> bool {
        self.phase == SimPhase::Running
    }

    /// Apply one event and return the next state.
    pub fn apply(self, event: SimEvent) -> SimulationState {
        match (self.phase, event) {
            (_, SimEvent::Started) => SimulationState {
                phase: SimPhase::Running,
                line: 0,
                byte: 0,
                generation: self.generation.wrapping_add(1),
            },
            (SimPhase::Running, SimEvent::LineTick) => SimulationState {
                line: (self.line + 1) % LINE_MODULUS,
                ..self
            },
            (SimPhase::Running, SimEvent::ByteTick) => SimulationState {
                byte: (self.byte + 1) % BYTE_MODULUS,
                ..self
            },
            (SimPhase::Running, SimEvent::DeadlineReached | SimEvent::Stopped) => SimulationState {
                phase: SimPhase::Idle,
                ..self
            },
            (SimPhase::Idle, _) => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_resets_counters() {
        let state = SimulationState {
            phase: SimPhase::Idle,
            line: 5,
            byte: 9,
            generation: 3,
        };
        let next = state.apply(SimEvent::Started);
        assert!(next.is_active());
        assert_eq!((next.line, next.byte, next.generation), (0, 0, 4));
    }

    #[test]
    fn test_line_counter_wraps_at_eight() {
        let mut state = SimulationState::default().apply(SimEvent::Started);
        let mut seen = Vec::new();
        for _ in 0..9 {
            state = state.apply(SimEvent::LineTick);
            seen.push(state.line);
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 7, 0, 1]);
    }

    #[test]
    fn test_byte_counter_wraps_at_sixteen() {
        let mut state = SimulationState::default().apply(SimEvent::Started);
        for _ in 0..16 {
            state = state.apply(SimEvent::ByteTick);
        }
        assert_eq!(state.byte, 0);
        assert_eq!(state.line, 0, "byte ticks must not move the line counter");
    }

    #[test]
    fn test_ticks_ignored_while_idle() {
        let idle = SimulationState::default();
        assert_eq!(idle.apply(SimEvent::LineTick), idle);
        assert_eq!(idle.apply(SimEvent::ByteTick), idle);
        assert_eq!(idle.apply(SimEvent::DeadlineReached), idle);
    }

    #[test]
    fn test_deadline_keeps_counters() {
        let state = SimulationState::default()
            .apply(SimEvent::Started)
            .apply(SimEvent::LineTick)
            .apply(SimEvent::DeadlineReached);
        assert!(!state.is_active());
        assert_eq!(state.line, 1);
    }
}
