use serde::{Deserialize, Serialize};

use crate::domain::{CardType, Team};
use crate::engine::{MatchEvent, MatchEventKind, MatchState};
use crate::time_ctrl::format_game_time;

use super::dto::{EventDto, MatchSummaryDto, MatchViewDto, TeamSummaryDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Полное состояние матча для экрана.
    GetMatch,

    /// Журнал в виде строк.
    GetEventLog,

    /// Итоги по командам.
    GetSummary,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Match(MatchViewDto),
    EventLog(Vec<String>),
    Summary(MatchSummaryDto),
}

pub fn run_query(state: &MatchState, query: &Query) -> QueryResponse {
    match query {
        Query::GetMatch => QueryResponse::Match(build_match_view(state)),
        Query::GetEventLog => QueryResponse::EventLog(state.log().render_display_strings().collect()),
        Query::GetSummary => QueryResponse::Summary(build_summary(state)),
    }
}

/// Сформировать DTO матча.
pub fn build_match_view(state: &MatchState) -> MatchViewDto {
    let clock = state.clock();
    let settings = state.settings();

    MatchViewDto {
        phase: state.phase(),
        clock_display: format_game_time(clock.remaining_ms),
        remaining_ms: clock.remaining_ms,
        elapsed_ms: clock.elapsed_ms,
        clock_running: clock.running,
        clock_cycle: clock.cycle,
        home_score: state.home_score(),
        away_score: state.away_score(),
        kickoff_team: state.kickoff_team(),
        home_color: settings.home_color,
        away_color: settings.away_color,
        events: state.log().iter().map(event_to_dto).collect(),
    }
}

fn event_to_dto(event: &MatchEvent) -> EventDto {
    EventDto {
        id: event.id,
        phase: event.phase,
        game_time: format_game_time(event.game_time_ms),
        text: event.display_string(),
    }
}

/// Сводка: голы берём из счёта, карточки считаем по журналу.
pub fn build_summary(state: &MatchState) -> MatchSummaryDto {
    MatchSummaryDto {
        phase: state.phase(),
        home: team_summary(state, Team::Home),
        away: team_summary(state, Team::Away),
        events_logged: state.log().len(),
    }
}

fn team_summary(state: &MatchState, team: Team) -> TeamSummaryDto {
    let mut yellow_cards = 0;
    let mut red_cards = 0;

    for event in state.log() {
        if let MatchEventKind::CardIssued {
            team: card_team,
            card_type,
            ..
        } = &event.kind
        {
            if *card_team != team {
                continue;
            }
            match card_type {
                CardType::Yellow => yellow_cards += 1,
                CardType::Red => red_cards += 1,
            }
        }
    }

    TeamSummaryDto {
        team,
        goals: state.score().goals_of(team),
        yellow_cards,
        red_cards,
    }
}
