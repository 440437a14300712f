//! Execution simulator integration tests
//!
//! Covers both schedulers:
//! - ManualScheduler: deterministic virtual clock
//! - TokioScheduler: real tokio tasks on a paused runtime clock

use std::time::Duration;

use debugfolio::simulator::{SimPhase, TimerFired};
use debugfolio::{ExecutionSimulator, ManualScheduler, PortfolioStore, TokioScheduler};

fn drain(sim: &mut ExecutionSimulator, rx: &mut tokio::sync::mpsc::UnboundedReceiver<TimerFired>) -> usize {
    let mut count = 0;
    while let Ok(fired) = rx.try_recv() {
        sim.handle_timer(fired);
        count += 1;
    }
    count
}

#[test]
fn test_full_cycle_on_virtual_clock() {
    let store = PortfolioStore::builtin();
    let clock = ManualScheduler::new();
    let mut sim = ExecutionSimulator::new(Box::new(clock.clone()));

    assert!(sim.start(Some(&store.projects[3])));
    assert_eq!(sim.state().phase, SimPhase::Running);

    let mut line_values = Vec::new();
    for _ in 0..6 {
        clock.advance(Duration::from_millis(800), |fired| sim.handle_timer(fired));
        line_values.push(sim.state().line);
    }
    // 4800ms: six line ticks, still inside the 5s cycle
    assert_eq!(line_values, vec![1, 2, 3, 4, 5, 6]);
    assert!(sim.is_active());

    clock.advance(Duration::from_millis(200), |fired| sim.handle_timer(fired));
    assert!(!sim.is_active());
    assert_eq!(clock.pending(), 0);
    assert_eq!(sim.armed_timers(), 0);
}

#[test]
fn test_line_counter_wraps_at_eight() {
    let store = PortfolioStore::builtin();
    let clock = ManualScheduler::new();
    let mut sim = ExecutionSimulator::new(Box::new(clock.clone()));
    sim.start(Some(&store.projects[0]));

    // Deliver line ticks directly past the wrap point; the deadline is the only limit
    let generation = sim.state().generation;
    for _ in 0..9 {
        sim.handle_timer(TimerFired { kind: debugfolio::simulator::TimerKind::Line, generation });
    }
    assert_eq!(sim.state().line, 1);
}

#[test]
fn test_stop_then_start_resets_counters() {
    let store = PortfolioStore::builtin();
    let clock = ManualScheduler::new();
    let mut sim = ExecutionSimulator::new(Box::new(clock.clone()));

    sim.start(Some(&store.projects[0]));
    clock.advance(Duration::from_millis(1700), |fired| sim.handle_timer(fired));
    assert_eq!((sim.state().line, sim.state().byte), (2, 8));

    sim.stop();
    assert_eq!(sim.state().phase, SimPhase::Idle);
    sim.start(Some(&store.projects[0]));
    assert_eq!((sim.state().line, sim.state().byte), (0, 0));
}

#[tokio::test(start_paused = true)]
async fn test_tokio_scheduler_drives_cycle() {
    let store = PortfolioStore::builtin();
    let (scheduler, mut rx) = TokioScheduler::new();
    let mut sim = ExecutionSimulator::new(Box::new(scheduler));

    assert!(sim.start(Some(&store.projects[1])));
    // Let the spawned timer tasks register before moving the clock
    tokio::task::yield_now().await;

    tokio::time::sleep(Duration::from_millis(810)).await;
    drain(&mut sim, &mut rx);
    assert_eq!(sim.state().line, 1);
    assert_eq!(sim.state().byte, 4);

    tokio::time::sleep(Duration::from_millis(4300)).await;
    drain(&mut sim, &mut rx);
    assert!(!sim.is_active(), "deadline ends the cycle");

    // Timers were aborted: nothing more arrives
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(drain(&mut sim, &mut rx), 0);
}

#[tokio::test(start_paused = true)]
async fn test_tokio_scheduler_stop_aborts_tasks() {
    let store = PortfolioStore::builtin();
    let (scheduler, mut rx) = TokioScheduler::new();
    let mut sim = ExecutionSimulator::new(Box::new(scheduler));

    sim.start(Some(&store.projects[0]));
    tokio::task::yield_now().await;
    tokio::time::sleep(Duration::from_millis(450)).await;
    drain(&mut sim, &mut rx);
    sim.stop();

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(drain(&mut sim, &mut rx), 0);
    assert!(!sim.is_active());
}
