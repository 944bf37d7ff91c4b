//! Сохранение снапшотов матча.
//!
//! Снапшот - это весь `MatchState` целиком, включая журнал событий
//! с дискриминатором варианта. Кодек - JSON (`serde_json`), поверх него
//! конверт с версией формата и временем сохранения.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::TimestampMs;
use crate::engine::{MatchSignal, MatchState};

/// Текущая версия формата снапшота.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Ошибки слоя хранения. Для ядра они не фатальны: состояние в памяти
/// остаётся авторитетным.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Ошибка кодека снапшота: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("Неподдерживаемая версия снапшота: {found} (поддерживается {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Снапшот повреждён: {0}")]
    Corrupted(String),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Хранилище недоступно: {0}")]
    Unavailable(String),
}

/// Снапшот -> байты.
pub fn serialize(state: &MatchState) -> Result<Vec<u8>, PersistenceError> {
    Ok(serde_json::to_vec(state)?)
}

/// Байты -> снапшот.
pub fn deserialize(bytes: &[u8]) -> Result<MatchState, PersistenceError> {
    let state: MatchState = serde_json::from_slice(bytes)?;
    state
        .settings()
        .validate()
        .map_err(PersistenceError::Corrupted)?;
    Ok(state)
}

/// Конверт снапшота: версия + когда сохранили (по часам хоста).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotEnvelope {
    pub format_version: u32,
    pub saved_at_ms: TimestampMs,
    pub state: MatchState,
}

impl SnapshotEnvelope {
    pub fn new(state: MatchState, saved_at_ms: TimestampMs) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            saved_at_ms,
            state,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, PersistenceError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, PersistenceError> {
        let envelope: SnapshotEnvelope = serde_json::from_slice(bytes)?;
        if envelope.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: envelope.format_version,
                supported: SNAPSHOT_FORMAT_VERSION,
            });
        }
        envelope
            .state
            .settings()
            .validate()
            .map_err(PersistenceError::Corrupted)?;
        Ok(envelope)
    }

    /// Восстановить матч после падения процесса.
    ///
    /// Если часы в снапшоте шли, догоняем время, прошедшее с момента сохранения,
    /// тем же путём, что и обычный тик: истечение фазы отработает как обычно.
    pub fn resume(self, now_ms: TimestampMs) -> Result<ResumedMatch, PersistenceError> {
        let state = self.state;
        if !state.clock().running || now_ms <= self.saved_at_ms {
            return Ok(ResumedMatch {
                state,
                signals: Vec::new(),
                caught_up_ms: 0,
            });
        }

        let gap_ms = now_ms - self.saved_at_ms;
        let delta = i64::try_from(gap_ms).unwrap_or(i64::MAX);
        let transition = state
            .advance_tick(delta, now_ms)
            .map_err(|err| PersistenceError::Corrupted(err.to_string()))?;

        info!(
            gap_ms,
            phase = %transition.state.phase(),
            "resumed running clock after restart"
        );

        Ok(ResumedMatch {
            state: transition.state,
            signals: transition.signals,
            caught_up_ms: gap_ms,
        })
    }
}

/// Результат восстановления.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResumedMatch {
    pub state: MatchState,
    /// Сигналы, накопившиеся при догонке (например, тайм закончился, пока мы лежали).
    pub signals: Vec<MatchSignal>,
    pub caught_up_ms: u64,
}

/// Байты -> восстановленный матч за один вызов.
pub fn resume_from(bytes: &[u8], now_ms: TimestampMs) -> Result<ResumedMatch, PersistenceError> {
    SnapshotEnvelope::decode(bytes)?.resume(now_ms)
}

/// Абстракция хранилища снапшотов.
///
/// Реализации:
/// - `InMemoryMatchStorage` - тесты и локальный запуск;
/// - `FileMatchStorage` - один файл на диске.
pub trait MatchStorage {
    /// Сохранить снапшот (перезаписывает предыдущий).
    fn save(&mut self, envelope: &SnapshotEnvelope) -> Result<(), PersistenceError>;

    /// Загрузить последний снапшот, если он есть.
    fn load(&self) -> Result<Option<SnapshotEnvelope>, PersistenceError>;
}

/// Простая in-memory реализация. Хранит уже закодированные байты,
/// чтобы кодек гонялся так же, как с настоящим хранилищем.
#[derive(Debug, Default)]
pub struct InMemoryMatchStorage {
    bytes: Option<Vec<u8>>,
    saves: usize,
}

impl InMemoryMatchStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Сколько раз вызывали успешный save.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn raw_bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

impl MatchStorage for InMemoryMatchStorage {
    fn save(&mut self, envelope: &SnapshotEnvelope) -> Result<(), PersistenceError> {
        self.bytes = Some(envelope.encode()?);
        self.saves += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<SnapshotEnvelope>, PersistenceError> {
        self.bytes
            .as_deref()
            .map(SnapshotEnvelope::decode)
            .transpose()
    }
}
