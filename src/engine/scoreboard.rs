use serde::{Deserialize, Serialize};

use crate::domain::{CardType, Phase, PlayerNumber, Team};
use crate::engine::errors::RejectReason;
use crate::engine::event_log::MatchEventKind;
use crate::engine::validation::ensure_playable;

/// Счёт матча. Меняется только через `record_goal`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBoard {
    pub home: u32,
    pub away: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goals_of(&self, team: Team) -> u32 {
        match team {
            Team::Home => self.home,
            Team::Away => self.away,
        }
    }

    /// Засчитать гол. В неигровой фазе - отказ без изменений.
    pub fn record_goal(&mut self, phase: Phase, team: Team) -> Result<MatchEventKind, RejectReason> {
        ensure_playable(phase)?;

        match team {
            Team::Home => self.home = self.home.saturating_add(1),
            Team::Away => self.away = self.away.saturating_add(1),
        }

        Ok(MatchEventKind::GoalScored {
            team,
            home_score_after: self.home,
            away_score_after: self.away,
        })
    }

    /// Карточка: тот же гейт по фазе, счёт не меняется.
    ///
    /// Номер игрока уже проверен на входе (> 0), состав не сверяем.
    pub fn record_card(
        &self,
        phase: Phase,
        team: Team,
        player_number: PlayerNumber,
        card_type: CardType,
    ) -> Result<MatchEventKind, RejectReason> {
        ensure_playable(phase)?;

        Ok(MatchEventKind::CardIssued {
            team,
            player_number,
            card_type,
        })
    }
}
