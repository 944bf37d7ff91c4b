// src/time_ctrl/mod.rs
//! Контроль времени матча.
//!
//! Здесь собираем:
//! - длительности фаз (`PhaseDurations`);
//! - часы текущей фазы (`MatchClock`).
//!
//! Модуль не читает системное время: всё время приходит снаружи
//! в виде относительных дельт.

pub mod clock;
pub mod time_rules;

pub use clock::{MatchClock, TickOutcome};
pub use time_rules::PhaseDurations;

/// Формат `mm:ss` для игрового времени (минуты не ограничены 59).
pub fn format_game_time(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
