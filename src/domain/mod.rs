//! Доменная модель матча: команды, фазы, карточки, настройки.

pub mod card;
pub mod phase;
pub mod settings;
pub mod team;

/// Идентификатор события в журнале матча.
pub type EventId = u64;
/// Номер игрока на футболке (> 0).
pub type PlayerNumber = u32;
/// Unix timestamp в миллисекундах (UTC). Всегда приходит от хоста,
/// ядро само часы не читает.
pub type TimestampMs = u64;

pub use card::*;
pub use phase::*;
pub use settings::*;
pub use team::*;
