use serde::{Deserialize, Serialize};

use crate::domain::{EventId, Phase, Team, TeamColor};
use crate::engine::{CommandOutcome, MatchSignal, Transition};

use super::queries::build_match_view;

/// DTO одного события журнала.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventDto {
    pub id: EventId,
    pub phase: Phase,
    /// Игровое время в формате `mm:ss`.
    pub game_time: String,
    /// Готовая строка для экрана.
    pub text: String,
}

/// DTO матча для экрана судьи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchViewDto {
    pub phase: Phase,
    /// Оставшееся время фазы, `mm:ss`.
    pub clock_display: String,
    pub remaining_ms: u64,
    pub elapsed_ms: u64,
    pub clock_running: bool,
    /// Цикл часов: планировщик тиков привязывает к нему свои дельты.
    pub clock_cycle: u64,
    pub home_score: u32,
    pub away_score: u32,
    pub kickoff_team: Team,
    pub home_color: TeamColor,
    pub away_color: TeamColor,
    pub events: Vec<EventDto>,
}

/// Итоги одной команды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamSummaryDto {
    pub team: Team,
    pub goals: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

/// Краткая сводка матча.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchSummaryDto {
    pub phase: Phase,
    pub home: TeamSummaryDto,
    pub away: TeamSummaryDto,
    pub events_logged: usize,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Команда применена.
    Applied {
        view: MatchViewDto,
        signals: Vec<MatchSignal>,
    },

    /// Команда отклонена, состояние прежнее.
    Rejected { reason: String, view: MatchViewDto },
}

/// Помощник: Transition ядра -> ответ API.
pub fn map_transition_to_response(transition: &Transition) -> CommandResponse {
    let view = build_match_view(&transition.state);
    match transition.outcome {
        CommandOutcome::Applied => CommandResponse::Applied {
            view,
            signals: transition.signals.clone(),
        },
        CommandOutcome::Rejected(reason) => CommandResponse::Rejected {
            reason: reason.to_string(),
            view,
        },
    }
}
