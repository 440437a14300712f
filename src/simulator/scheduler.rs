//! Timer scheduling for the execution simulator.
//!
//! A `Scheduler` hands out periodic and one-shot timers. Every timer is
//! represented by a `TimerHandle`; cancelling or dropping the handle stops the
//! timer. Firings are delivered as `TimerFired` values, never as callbacks into
//! the simulator, so all state changes happen on the thread that owns it.
//!
//! - `TokioScheduler`: production, one tokio task per timer
//! - `ManualScheduler`: virtual clock advanced explicitly by the caller

use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tokio::sync::mpsc;

/// Which of the simulator's timers fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Line,
    Byte,
    Deadline,
}

/// A timer firing, tagged with the cycle generation it was scheduled for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub kind: TimerKind,
    pub generation: u64,
}

/// Cancellation token for a scheduled timer. Cancels on drop.
pub struct TimerHandle {
    kind: TimerKind,
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    pub fn new(kind: TimerKind, cancel: impl FnOnce() + Send + 'static) -> Self {
        TimerHandle {
            kind,
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn cancel(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("kind", &self.kind)
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Interval and timeout primitives
pub trait Scheduler: Send {
    /// Fire `kind` every `period`, first firing one period from now.
    fn every(&mut self, period: Duration, kind: TimerKind, generation: u64) -> TimerHandle;

    /// Fire `kind` once after `delay`.
    fn after(&mut self, delay: Duration, kind: TimerKind, generation: u64) -> TimerHandle;
}

// ============================================================================
// TOKIO SCHEDULER
// ============================================================================

/// Runs each timer as a tokio task and forwards firings over an mpsc channel.
///
/// The receiving end is drained by the UI loop. When an egui context is
/// attached, every firing also requests a repaint so the frame loop wakes up.
pub struct TokioScheduler {
    runtime: tokio::runtime::Handle,
    tx: mpsc::UnboundedSender<TimerFired>,
    ui_context: Arc<RwLock<Option<egui::Context>>>,
}

impl TokioScheduler {
    /// Create a scheduler bound to the current tokio runtime.
    ///
    /// Must be called from within a runtime context.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerFired>) {
        Self::with_handle(tokio::runtime::Handle::current())
    }

    pub fn with_handle(runtime: tokio::runtime::Handle) -> (Self, mpsc::UnboundedReceiver<TimerFired>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = TokioScheduler {
            runtime,
            tx,
            ui_context: Arc::new(RwLock::new(None)),
        };
        (scheduler, rx)
    }

    /// Shared slot for the egui context used to request repaints
    pub fn ui_context_slot(&self) -> Arc<RwLock<Option<egui::Context>>> {
        Arc::clone(&self.ui_context)
    }

    fn deliver(
        tx: &mpsc::UnboundedSender<TimerFired>,
        ui_context: &RwLock<Option<egui::Context>>,
        fired: TimerFired,
    ) -> bool {
        if tx.send(fired).is_err() {
            return false;
        }
        if let Ok(guard) = ui_context.read() {
            if let Some(ctx) = guard.as_ref() {
                ctx.request_repaint();
            }
        }
        true
    }
}

impl Scheduler for TokioScheduler {
    fn every(&mut self, period: Duration, kind: TimerKind, generation: u64) -> TimerHandle {
        // Anchor the first tick to scheduling time, not to when the task first runs.
        let start = tokio::time::Instant::now() + period;
        let tx = self.tx.clone();
        let ui_context = Arc::clone(&self.ui_context);
        let task = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(start, period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !Self::deliver(&tx, &ui_context, TimerFired { kind, generation }) {
                    break;
                }
            }
        });
        TimerHandle::new(kind, move || task.abort())
    }

    fn after(&mut self, delay: Duration, kind: TimerKind, generation: u64) -> TimerHandle {
        let deadline = tokio::time::Instant::now() + delay;
        let tx = self.tx.clone();
        let ui_context = Arc::clone(&self.ui_context);
        let task = self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            Self::deliver(&tx, &ui_context, TimerFired { kind, generation });
        });
        TimerHandle::new(kind, move || task.abort())
    }
}

// ============================================================================
// MANUAL SCHEDULER
// ============================================================================

#[derive(Debug)]
struct ManualTimer {
    id: u64,
    kind: TimerKind,
    generation: u64,
    due: Duration,
    period: Option<Duration>,
}

#[derive(Debug, Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    timers: Vec<ManualTimer>,
}

impl ManualClock {
    fn register(&mut self, kind: TimerKind, generation: u64, delay: Duration, period: Option<Duration>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.timers.push(ManualTimer {
            id,
            kind,
            generation,
            due: self.now + delay,
            period,
        });
        id
    }

    /// Pop the earliest timer due at or before `until`; ties go to the older timer.
    fn pop_due(&mut self, until: Duration) -> Option<TimerFired> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[idx];
        self.now = timer.due;
        let fired = TimerFired {
            kind: timer.kind,
            generation: timer.generation,
        };
        match timer.period {
            Some(period) => timer.due += period,
            None => {
                self.timers.remove(idx);
            }
        }
        Some(fired)
    }
}

/// Deterministic scheduler driven by an explicit virtual clock.
///
/// Clones share the same clock, so a test can keep one handle while the
/// simulator owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<ManualClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.clock.lock().map(|c| c.now).unwrap_or_default()
    }

    /// Number of timers still armed
    pub fn pending(&self) -> usize {
        self.clock.lock().map(|c| c.timers.len()).unwrap_or_default()
    }

    /// Move the clock forward by `by`, invoking `on_fire` for each firing in order.
    ///
    /// The clock lock is released before each callback, so `on_fire` may cancel
    /// or schedule timers.
    pub fn advance(&self, by: Duration, mut on_fire: impl FnMut(TimerFired)) {
        let target = self.now() + by;
        loop {
            let next = match self.clock.lock() {
                Ok(mut clock) => clock.pop_due(target),
                Err(_) => None,
            };
            match next {
                Some(fired) => on_fire(fired),
                None => break,
            }
        }
        if let Ok(mut clock) = self.clock.lock() {
            clock.now = target;
        }
    }

    fn schedule(&self, kind: TimerKind, generation: u64, delay: Duration, period: Option<Duration>) -> TimerHandle {
        let id = match self.clock.lock() {
            Ok(mut clock) => clock.register(kind, generation, delay, period),
            Err(_) => return TimerHandle::new(kind, || {}),
        };
        let clock = Arc::clone(&self.clock);
        TimerHandle::new(kind, move || {
            if let Ok(mut clock) = clock.lock() {
                clock.timers.retain(|t| t.id != id);
            }
        })
    }
}

impl Scheduler for ManualScheduler {
    fn every(&mut self, period: Duration, kind: TimerKind, generation: u64) -> TimerHandle {
        self.schedule(kind, generation, period, Some(period))
    }

    fn after(&mut self, delay: Duration, kind: TimerKind, generation: u64) -> TimerHandle {
        self.schedule(kind, generation, delay, None)
    }
}
