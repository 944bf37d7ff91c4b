//! Ядро судейского приложения для матча из двух таймов.
//!
//! Машина фаз + часы, счёт и карточки, журнал событий для аудита,
//! снапшоты для восстановления. Хост (UI / сервис) шлёт команды
//! и сам решает, когда тикать время и как показывать сигналы.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod runtime;
pub mod time_ctrl;

pub use api::{Command, Query, QueryResponse};
pub use domain::{CardType, MatchSettings, Phase, SettingsPatch, Team, TeamColor};
pub use engine::{CommandOutcome, MatchError, MatchSignal, MatchState, Transition};
