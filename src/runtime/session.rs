// src/runtime/session.rs

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::api::Command;
use crate::domain::{MatchSettings, TimestampMs};
use crate::engine::{CommandOutcome, MatchError, MatchSignal, MatchState};
use crate::infra::{MatchStorage, PersistenceError, SnapshotEnvelope};

/// Получатель сигналов ядра на стороне хоста (вибрация, звук и т.п.).
pub trait SignalSink: Send {
    fn on_signal(&mut self, signal: &MatchSignal);
}

/// Сигналы никуда не идут.
#[derive(Debug, Default)]
pub struct NoopSignalSink;

impl SignalSink for NoopSignalSink {
    fn on_signal(&mut self, _signal: &MatchSignal) {}
}

/// Что получилось после одной команды.
#[derive(Debug)]
pub struct DispatchReport {
    pub outcome: CommandOutcome,
    pub signals: Vec<MatchSignal>,
    /// Снапшот не сохранился. Состояние в памяти при этом уже обновлено
    /// и остаётся авторитетным.
    pub persistence_warning: Option<PersistenceError>,
}

impl DispatchReport {
    pub fn is_applied(&self) -> bool {
        matches!(self.outcome, CommandOutcome::Applied)
    }
}

/// Сессия матча с единственным владельцем состояния.
///
/// - команды применяются строго по одной (`&mut self`);
/// - после каждой применённой команды снапшот уходит в хранилище;
/// - новый снапшот публикуется подписчикам через `watch`.
pub struct MatchSession<S: MatchStorage> {
    state: MatchState,
    storage: S,
    publisher: watch::Sender<MatchState>,
    sink: Box<dyn SignalSink>,
    /// Цикл часов и момент, когда он пошёл. `None`, пока часы стоят.
    running_since: Option<(u64, Instant)>,
}

/// Сессия под мьютексом - так её делят UI-поток и планировщик тиков.
pub type SharedSession<S> = Arc<Mutex<MatchSession<S>>>;

impl<S: MatchStorage> MatchSession<S> {
    pub fn new(state: MatchState, storage: S) -> Self {
        let (publisher, _) = watch::channel(state.clone());
        let mut session = Self {
            state,
            storage,
            publisher,
            sink: Box::new(NoopSignalSink),
            running_since: None,
        };
        session.track_running_since();
        session
    }

    /// Поднять сессию из хранилища, а если снапшота нет (или он не читается),
    /// начать новый матч с `settings`.
    ///
    /// Возвращает сигналы, накопленные при догонке часов.
    pub fn restore(
        storage: S,
        settings: MatchSettings,
        now_ms: TimestampMs,
    ) -> Result<(Self, Vec<MatchSignal>), MatchError> {
        let loaded = storage
            .load()
            .and_then(|envelope| envelope.map(|e| e.resume(now_ms)).transpose());

        match loaded {
            Ok(Some(resumed)) => Ok((Self::new(resumed.state, storage), resumed.signals)),
            Ok(None) => Ok((Self::new(MatchState::new(settings)?, storage), Vec::new())),
            Err(err) => {
                warn!(error = %err, "snapshot could not be restored, starting a fresh match");
                Ok((Self::new(MatchState::new(settings)?, storage), Vec::new()))
            }
        }
    }

    pub fn with_signal_sink(mut self, sink: Box<dyn SignalSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Когда начался текущий ход часов (по монотонному времени tokio).
    ///
    /// Планировщик тиков считает первую дельту нового цикла отсюда,
    /// а не от своего ближайшего срабатывания.
    pub fn running_since(&self) -> Option<(u64, Instant)> {
        self.running_since
    }

    /// Подписка на новые снапшоты.
    pub fn subscribe(&self) -> watch::Receiver<MatchState> {
        self.publisher.subscribe()
    }

    pub fn into_shared(self) -> SharedSession<S> {
        Arc::new(Mutex::new(self))
    }

    /// Применить одну команду.
    ///
    /// `Err` - только мусор на входе. Отказ по фазе приходит как
    /// `CommandOutcome::Rejected` и ничего не сохраняет.
    pub fn dispatch(&mut self, command: Command, now_ms: TimestampMs) -> Result<DispatchReport, MatchError> {
        let transition = command.apply_to(&self.state, now_ms)?;

        if let CommandOutcome::Rejected(reason) = transition.outcome {
            debug!(command = command.name(), %reason, "dispatch rejected");
            return Ok(DispatchReport {
                outcome: transition.outcome,
                signals: Vec::new(),
                persistence_warning: None,
            });
        }

        self.state = transition.state;
        self.track_running_since();

        let persistence_warning = self.persist(now_ms).err();
        if let Some(err) = &persistence_warning {
            warn!(command = command.name(), error = %err, "snapshot persistence failed");
        }

        self.publisher.send_replace(self.state.clone());

        for signal in &transition.signals {
            self.sink.on_signal(signal);
        }

        Ok(DispatchReport {
            outcome: transition.outcome,
            signals: transition.signals,
            persistence_warning,
        })
    }

    fn track_running_since(&mut self) {
        let clock = self.state.clock();
        self.running_since = match self.running_since {
            _ if !clock.running => None,
            Some((cycle, at)) if cycle == clock.cycle => Some((cycle, at)),
            _ => Some((clock.cycle, Instant::now())),
        };
    }

    fn persist(&mut self, now_ms: TimestampMs) -> Result<(), PersistenceError> {
        let envelope = SnapshotEnvelope::new(self.state.clone(), now_ms);
        self.storage.save(&envelope)
    }
}
