use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Phase;

/// Ошибки ядра матча.
///
/// Сюда попадает только мусор на входе (отрицательная дельта, нулевой номер
/// игрока и т.п.). Обычные игровые ситуации ошибкой не считаются.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Некорректный аргумент: {0}")]
    InvalidArgument(String),

    #[error("Команда недопустима в текущем состоянии: {0}")]
    InvalidTransition(RejectReason),
}

/// Почему команда была молча отклонена (состояние не изменилось).
#[derive(Clone, Copy, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum RejectReason {
    #[error("Матч можно начать только из PRE_GAME (сейчас {0})")]
    NotInPreGame(Phase),

    #[error("Фаза {0} не игровая")]
    PhaseNotPlayable(Phase),

    #[error("Из фазы {0} нет перехода вперёд")]
    NoTransitionFrom(Phase),

    #[error("В фазе {0} часы запустить нельзя")]
    ClockNotStartable(Phase),

    #[error("Часы стоят")]
    ClockNotRunning,

    #[error("Тик посчитан для цикла {tick_cycle}, а часы уже в цикле {clock_cycle}")]
    StaleTick { tick_cycle: u64, clock_cycle: u64 },

    #[error("Длительности и начальный розыгрыш меняются только в PRE_GAME (сейчас {0})")]
    SettingsLocked(Phase),
}

impl From<RejectReason> for MatchError {
    fn from(reason: RejectReason) -> Self {
        MatchError::InvalidTransition(reason)
    }
}
