// tests/session_tests.rs
//
// Сессия матча (MatchSession):
//  - применённая команда сохраняется и публикуется подписчикам;
//  - отказ ничего не сохраняет;
//  - падение хранилища = предупреждение, состояние всё равно обновлено;
//  - сигналы уходят в SignalSink;
//  - restore из снапшота / с нуля;
//  - планировщик тиков на tokio с "замороженным" временем.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use referee_engine::api::Command;
use referee_engine::domain::{MatchSettings, Phase, Team};
use referee_engine::engine::{CommandOutcome, MatchError, MatchSignal, MatchState};
use referee_engine::infra::{
    InMemoryMatchStorage, MatchStorage, PersistenceError, SnapshotEnvelope,
};
use referee_engine::runtime::{run_ticker, MatchSession, SignalSink};

const NOW: u64 = 1_700_000_000_000;

/// Хранилище, которое всегда падает на записи.
#[derive(Default)]
struct BrokenStorage {
    attempts: usize,
}

impl MatchStorage for BrokenStorage {
    fn save(&mut self, _envelope: &SnapshotEnvelope) -> Result<(), PersistenceError> {
        self.attempts += 1;
        Err(PersistenceError::Unavailable("disk full".into()))
    }

    fn load(&self) -> Result<Option<SnapshotEnvelope>, PersistenceError> {
        Err(PersistenceError::Unavailable("disk full".into()))
    }
}

/// Собирает сигналы в общий вектор.
#[derive(Clone, Default)]
struct RecordingSink {
    seen: Arc<Mutex<Vec<MatchSignal>>>,
}

impl SignalSink for RecordingSink {
    fn on_signal(&mut self, signal: &MatchSignal) {
        self.seen.lock().unwrap().push(*signal);
    }
}

fn new_session() -> MatchSession<InMemoryMatchStorage> {
    let state = MatchState::new(MatchSettings::standard()).unwrap();
    MatchSession::new(state, InMemoryMatchStorage::new())
}

#[test]
fn applied_command_is_persisted_and_published() {
    let mut session = new_session();
    let mut rx = session.subscribe();

    let report = session.dispatch(Command::ConfirmAndStart, NOW).unwrap();

    assert!(report.is_applied());
    assert!(report.persistence_warning.is_none());
    assert_eq!(session.state().phase(), Phase::FirstHalf);
    assert_eq!(session.storage().save_count(), 1);

    let stored = session.storage().load().unwrap().unwrap();
    assert_eq!(&stored.state, session.state());
    assert_eq!(stored.saved_at_ms, NOW);

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().phase(), Phase::FirstHalf);
}

#[test]
fn rejected_command_is_not_persisted() {
    let mut session = new_session();

    let report = session
        .dispatch(Command::AddGoal { team: Team::Home }, NOW)
        .unwrap();

    assert!(!report.is_applied());
    assert!(matches!(report.outcome, CommandOutcome::Rejected(_)));
    assert_eq!(session.storage().save_count(), 0);
    assert_eq!(session.state().home_score(), 0);
}

#[test]
fn bad_argument_is_an_error_and_changes_nothing() {
    let mut session = new_session();
    session.dispatch(Command::ConfirmAndStart, NOW).unwrap();
    let before = session.state().clone();

    let err = session
        .dispatch(
            Command::AdvanceTick {
                delta_ms: -250,
                cycle: None,
            },
            NOW,
        )
        .unwrap_err();

    assert!(matches!(err, MatchError::InvalidArgument(_)));
    assert_eq!(session.state(), &before);
    assert_eq!(session.storage().save_count(), 1);
}

#[test]
fn storage_failure_is_a_warning_not_a_rollback() {
    let state = MatchState::new(MatchSettings::standard()).unwrap();
    let mut session = MatchSession::new(state, BrokenStorage::default());
    let rx = session.subscribe();

    let report = session.dispatch(Command::ConfirmAndStart, NOW).unwrap();
    assert!(report.is_applied());
    assert!(matches!(
        report.persistence_warning,
        Some(PersistenceError::Unavailable(_))
    ));

    let report = session
        .dispatch(Command::AddGoal { team: Team::Away }, NOW + 1)
        .unwrap();
    assert!(report.is_applied());

    assert_eq!(session.state().away_score(), 1);
    assert_eq!(session.storage().attempts, 2);
    assert_eq!(rx.borrow().away_score(), 1);
}

#[test]
fn expiry_signal_reaches_the_sink() {
    let sink = RecordingSink::default();
    let seen = sink.seen.clone();
    let mut session = new_session().with_signal_sink(Box::new(sink));

    session.dispatch(Command::ConfirmAndStart, NOW).unwrap();
    let report = session
        .dispatch(
            Command::AdvanceTick {
                delta_ms: 2_700_000,
                cycle: None,
            },
            NOW,
        )
        .unwrap();

    let expected = MatchSignal::PeriodExpired {
        ended: Phase::FirstHalf,
        entered: Phase::HalfTime,
    };
    assert_eq!(report.signals, vec![expected]);
    assert_eq!(*seen.lock().unwrap(), vec![expected]);

    // Досрочный переход сигнала не даёт.
    session.dispatch(Command::AdvanceEarly, NOW).unwrap();
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn restore_without_snapshot_starts_fresh() {
    let (session, signals) =
        MatchSession::restore(InMemoryMatchStorage::new(), MatchSettings::youth(), NOW).unwrap();

    assert!(signals.is_empty());
    assert_eq!(session.state().phase(), Phase::PreGame);
    assert_eq!(session.state().clock().remaining_ms, 30 * 60_000);
}

#[test]
fn restore_with_unreadable_snapshot_starts_fresh() {
    let (session, signals) =
        MatchSession::restore(BrokenStorage::default(), MatchSettings::standard(), NOW).unwrap();

    assert!(signals.is_empty());
    assert_eq!(session.state().phase(), Phase::PreGame);
}

#[test]
fn restore_catches_up_running_clock() {
    let mut first = new_session();
    first.dispatch(Command::ConfirmAndStart, NOW).unwrap();
    first
        .dispatch(Command::AddGoal { team: Team::Home }, NOW)
        .unwrap();

    let mut storage = InMemoryMatchStorage::new();
    storage
        .save(&first.storage().load().unwrap().unwrap())
        .unwrap();

    // "Процесс лежал" час - тайм закончился, пока нас не было.
    let (session, signals) =
        MatchSession::restore(storage, MatchSettings::standard(), NOW + 3_600_000).unwrap();

    assert_eq!(session.state().phase(), Phase::HalfTime);
    assert_eq!(session.state().home_score(), 1);
    assert_eq!(signals.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn ticker_drives_running_clock_until_expiry() {
    let mut settings = MatchSettings::standard();
    settings.durations.half_ms = 2_000;
    let state = MatchState::new(settings).unwrap();

    let sink = RecordingSink::default();
    let seen = sink.seen.clone();
    let mut session = MatchSession::new(state, InMemoryMatchStorage::new())
        .with_signal_sink(Box::new(sink));
    session.dispatch(Command::ConfirmAndStart, NOW).unwrap();
    let shared = session.into_shared();

    let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);
    let handle = tokio::spawn(run_ticker(
        shared.clone(),
        Duration::from_millis(250),
        || NOW,
        stop_rx,
    ));

    tokio::time::sleep(Duration::from_millis(1_100)).await;
    {
        let guard = shared.lock();
        assert_eq!(guard.state().phase(), Phase::FirstHalf);
        let elapsed = guard.state().clock().elapsed_ms;
        assert!((750..=1_100).contains(&elapsed), "elapsed = {elapsed}");
    }

    tokio::time::sleep(Duration::from_secs(3)).await;
    {
        let guard = shared.lock();
        assert_eq!(guard.state().phase(), Phase::HalfTime);
        assert!(!guard.state().clock().running);
    }
    assert_eq!(seen.lock().unwrap().len(), 1);

    stop_tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn ticker_counts_time_from_resume_not_from_next_interval() {
    let state = MatchState::new(MatchSettings::standard()).unwrap();
    let mut session = MatchSession::new(state, InMemoryMatchStorage::new());
    session.dispatch(Command::ConfirmAndStart, NOW).unwrap();
    let shared = session.into_shared();

    let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);
    let handle = tokio::spawn(run_ticker(
        shared.clone(),
        Duration::from_millis(250),
        || NOW,
        stop_rx,
    ));

    // Пауза между срабатываниями: последний учтённый тик был на 1000 мс.
    tokio::time::sleep(Duration::from_millis(1_100)).await;
    shared.lock().dispatch(Command::ToggleClock, NOW).unwrap();
    let paused_at = shared.lock().state().clock().elapsed_ms;
    assert_eq!(paused_at, 1_000);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(shared.lock().state().clock().elapsed_ms, paused_at);

    // Возобновляем на 6100 мс, тоже между срабатываниями (6000 / 6250).
    shared.lock().dispatch(Command::ToggleClock, NOW).unwrap();
    tokio::time::sleep(Duration::from_millis(2_000)).await;

    // Последний тик на 8000 мс: с момента возобновления прошло 1900 мс,
    // и все они должны попасть в часы.
    assert_eq!(shared.lock().state().clock().elapsed_ms, paused_at + 1_900);

    stop_tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn ticker_started_late_counts_from_clock_start() {
    let state = MatchState::new(MatchSettings::standard()).unwrap();
    let mut session = MatchSession::new(state, InMemoryMatchStorage::new());
    assert!(session.running_since().is_none());

    session.dispatch(Command::ConfirmAndStart, NOW).unwrap();
    let (cycle, _) = session.running_since().unwrap();
    assert_eq!(cycle, session.state().clock().cycle);
    let shared = session.into_shared();

    // Планировщик поднялся через 400 мс после старта часов.
    tokio::time::sleep(Duration::from_millis(400)).await;
    let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);
    let handle = tokio::spawn(run_ticker(
        shared.clone(),
        Duration::from_millis(250),
        || NOW,
        stop_rx,
    ));

    // Срабатывания на 400 / 650 / 900 мс.
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(shared.lock().state().clock().elapsed_ms, 900);

    shared.lock().dispatch(Command::ToggleClock, NOW).unwrap();
    assert!(shared.lock().running_since().is_none());

    stop_tx.send(true).unwrap();
    handle.await.unwrap();
}
