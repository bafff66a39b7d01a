use std::time::Duration;

use assert_matches::assert_matches;
use schedyulah::clock::ManualClock;
use schedyulah::{TimerEngine, TimerError, TimerStatus};

/// End-to-end accounting checks for the timer engine, driven by a manual
/// clock so every figure is exact.

fn engine(start_ms: i64) -> (ManualClock, TimerEngine<ManualClock>) {
    let clock = ManualClock::new(start_ms);
    let mut engine = TimerEngine::new(clock.clone(), Duration::from_millis(100));
    engine.begin_activity("Deep work").unwrap();
    (clock, engine)
}

#[test]
fn run_pause_resume_commit_scenario() {
    let (clock, mut engine) = engine(0);

    engine.start().unwrap();
    clock.set(5_000);
    engine.pause().unwrap();
    clock.set(7_000);
    engine.start().unwrap();
    clock.set(10_000);

    let summary = engine.end_session_preview().unwrap();
    assert_eq!(summary.active_time, 8_000);
    assert_eq!(summary.paused_time, 2_000);
    assert_eq!(summary.total_time, 10_000);
    assert_eq!(summary.productivity, 80);

    let session = engine.commit_session().unwrap();
    assert_eq!(session.duration, 8_000);
    assert_eq!(session.paused_time, 2_000);
    assert_eq!(session.end_time - session.start_time, 10_000);
    assert_eq!(session.productivity(), 80);
    assert_eq!(engine.status(), TimerStatus::Idle);
}

#[test]
fn elapsed_equals_sum_of_running_intervals() {
    let (clock, mut engine) = engine(1_000_000);

    // (run, pause) lengths in ms, with irregular tick sampling while running
    let cycles: [(i64, i64); 6] = [
        (1_250, 400),
        (90, 3_000),
        (10_001, 1),
        (0, 250),
        (777, 0),
        (5_432, 12_345),
    ];
    let mut expected_active = 0u64;
    let mut expected_paused = 0u64;

    for (run, pause) in cycles {
        engine.start().unwrap();
        let mut left = run;
        while left > 0 {
            let step = left.min(37);
            clock.advance(step);
            engine.on_tick();
            left -= step;
        }
        expected_active += run as u64;
        assert_eq!(engine.state().elapsed_time, expected_active);

        engine.pause().unwrap();
        clock.advance(pause);
        engine.on_tick();
        expected_paused += pause as u64;
        assert_eq!(engine.state().elapsed_time, expected_active);
    }

    let session = engine.commit_session().unwrap();
    assert_eq!(session.duration, expected_active);
    assert_eq!(session.paused_time, expected_paused);
}

#[test]
fn paused_time_has_no_drift_against_wall_time() {
    let (clock, mut engine) = engine(42);
    for i in 0..50 {
        engine.start().unwrap();
        clock.advance(100 + i * 13);
        engine.on_tick();
        engine.pause().unwrap();
        clock.advance(7 + i * 3);
    }
    // commit while paused, then again while running
    let paused_commit = engine.commit_session().unwrap();
    assert_eq!(
        paused_commit.paused_time,
        paused_commit.wall_time() - paused_commit.duration
    );

    engine.start().unwrap();
    clock.advance(3_333);
    engine.pause().unwrap();
    clock.advance(1_111);
    engine.start().unwrap();
    clock.advance(2_222);
    let running_commit = engine.commit_session().unwrap();
    assert_eq!(running_commit.duration, 5_555);
    assert_eq!(running_commit.paused_time, 1_111);
    assert_eq!(
        running_commit.paused_time,
        running_commit.wall_time() - running_commit.duration
    );
}

#[test]
fn commit_before_start_is_rejected() {
    let (_, mut engine) = engine(0);
    assert_matches!(
        engine.commit_session(),
        Err(TimerError::InvalidTransition {
            status: TimerStatus::Idle,
            ..
        })
    );
}

#[test]
fn second_session_starts_from_zero() {
    let (clock, mut engine) = engine(0);
    engine.start().unwrap();
    clock.advance(4_000);
    let first = engine.commit_session().unwrap();

    clock.advance(60_000);
    engine.start().unwrap();
    clock.advance(1_000);
    let second = engine.commit_session().unwrap();

    assert_eq!(first.duration, 4_000);
    assert_eq!(second.duration, 1_000);
    assert_eq!(second.paused_time, 0);
    assert_eq!(second.start_time, 64_000);
    assert_ne!(first.id, second.id);
}

#[test]
fn ending_while_paused_counts_the_open_pause() {
    let (clock, mut engine) = engine(0);
    engine.start().unwrap();
    clock.advance(1_000);
    engine.pause().unwrap();
    clock.advance(3_000);

    let session = engine.commit_session().unwrap();
    assert_eq!(session.duration, 1_000);
    assert_eq!(session.paused_time, 3_000);
    assert_eq!(session.productivity(), 25);
}
