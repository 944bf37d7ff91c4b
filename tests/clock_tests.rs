// tests/clock_tests.rs
//
// Часы фазы (MatchClock):
//  1) start при нулевой длительности ничего не делает;
//  2) tick уменьшает remaining и увеличивает elapsed на ту же величину;
//  3) истечение ровно один раз, дальше часы стоят;
//  4) pause/resume сохраняют remaining/elapsed;
//  5) reset_to сбрасывает всё и двигает цикл.

use referee_engine::time_ctrl::{format_game_time, MatchClock, PhaseDurations, TickOutcome};
use referee_engine::domain::Phase;

const HALF: u64 = 45 * 60 * 1000;

#[test]
fn start_with_zero_duration_is_noop() {
    let mut clock = MatchClock::new(0);
    assert!(!clock.start(0));
    assert!(!clock.running);
}

#[test]
fn start_when_already_running_is_noop() {
    let mut clock = MatchClock::new(HALF);
    assert!(clock.start(HALF));
    let cycle = clock.cycle;

    assert!(!clock.start(HALF));
    assert!(clock.running);
    assert_eq!(clock.cycle, cycle, "повторный start не должен двигать цикл");
}

#[test]
fn tick_moves_remaining_and_elapsed_together() {
    let mut clock = MatchClock::new(HALF);
    clock.start(HALF);

    assert_eq!(clock.tick(1_000), TickOutcome::Ongoing);
    assert_eq!(clock.remaining_ms, HALF - 1_000);
    assert_eq!(clock.elapsed_ms, 1_000);
    assert_eq!(clock.remaining_ms + clock.elapsed_ms, HALF);
}

#[test]
fn tick_on_paused_clock_changes_nothing() {
    let mut clock = MatchClock::new(HALF);
    let before = clock.clone();

    assert_eq!(clock.tick(5_000), TickOutcome::Idle);
    assert_eq!(clock, before);
}

#[test]
fn overshooting_tick_floors_at_zero_and_caps_elapsed() {
    let mut clock = MatchClock::new(10_000);
    clock.start(10_000);

    assert_eq!(clock.tick(25_000), TickOutcome::Expired);
    assert_eq!(clock.remaining_ms, 0);
    assert_eq!(clock.elapsed_ms, 10_000);
    assert!(!clock.running);
}

#[test]
fn expiry_is_signalled_exactly_once() {
    let mut clock = MatchClock::new(1_000);
    clock.start(1_000);

    assert_eq!(clock.tick(1_000), TickOutcome::Expired);
    assert_eq!(clock.tick(1_000), TickOutcome::Idle);
    assert_eq!(clock.tick(0), TickOutcome::Idle);
}

#[test]
fn expired_clock_cannot_be_restarted_without_reset() {
    let mut clock = MatchClock::new(1_000);
    clock.start(1_000);
    clock.tick(1_000);

    assert!(clock.is_expired());
    assert!(!clock.start(1_000));

    clock.reset_to(2_000);
    assert!(clock.start(2_000));
}

#[test]
fn pause_and_resume_keep_progress() {
    let mut clock = MatchClock::new(HALF);
    clock.start(HALF);
    clock.tick(60_000);

    assert!(clock.pause());
    assert!(!clock.pause(), "вторая пауза - no-op");
    assert_eq!(clock.tick(60_000), TickOutcome::Idle);

    assert!(clock.start(HALF));
    assert_eq!(clock.remaining_ms, HALF - 60_000);
    assert_eq!(clock.elapsed_ms, 60_000);
}

#[test]
fn reset_to_clears_progress_and_bumps_cycle() {
    let mut clock = MatchClock::new(HALF);
    clock.start(HALF);
    clock.tick(30_000);
    let cycle = clock.cycle;

    clock.reset_to(15 * 60 * 1000);

    assert_eq!(clock.remaining_ms, 15 * 60 * 1000);
    assert_eq!(clock.elapsed_ms, 0);
    assert!(!clock.running);
    assert!(clock.cycle > cycle);
}

#[test]
fn phase_durations_are_zero_for_untimed_phases() {
    let durations = PhaseDurations::standard();

    assert_eq!(durations.duration_for(Phase::PreGame), 0);
    assert_eq!(durations.duration_for(Phase::FullTime), 0);
    assert_eq!(durations.duration_for(Phase::FirstHalf), 2_700_000);
    assert_eq!(durations.duration_for(Phase::SecondHalf), 2_700_000);
    assert_eq!(durations.duration_for(Phase::HalfTime), 900_000);
}

#[test]
fn phase_durations_reject_zero() {
    assert!(PhaseDurations::new(0, 900_000).validate().is_err());
    assert!(PhaseDurations::new(2_700_000, 0).validate().is_err());
    assert!(PhaseDurations::standard().validate().is_ok());
}

#[test]
fn game_time_is_formatted_as_minutes_and_seconds() {
    assert_eq!(format_game_time(0), "00:00");
    assert_eq!(format_game_time(754_000), "12:34");
    assert_eq!(format_game_time(754_999), "12:34");
    assert_eq!(format_game_time(2_700_000), "45:00");
    assert_eq!(format_game_time(6_000_000), "100:00");
}
