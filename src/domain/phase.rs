// src/domain/phase.rs

use core::fmt;

use serde::{Deserialize, Serialize};

/// Фаза матча.
///
/// Порядок вариантов = порядок фаз во времени (derive(Ord) на этом держится).
/// Назад фаза не откатывается, выйти из `FullTime` можно только через reset.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    PreGame,
    FirstHalf,
    HalfTime,
    SecondHalf,
    FullTime,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::PreGame,
        Phase::FirstHalf,
        Phase::HalfTime,
        Phase::SecondHalf,
        Phase::FullTime,
    ];

    /// Можно ли в этой фазе фиксировать голы и карточки.
    pub const fn is_playable(self) -> bool {
        matches!(self, Phase::FirstHalf | Phase::SecondHalf)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::FullTime)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Phase::PreGame => "PRE_GAME",
            Phase::FirstHalf => "FIRST_HALF",
            Phase::HalfTime => "HALF_TIME",
            Phase::SecondHalf => "SECOND_HALF",
            Phase::FullTime => "FULL_TIME",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
