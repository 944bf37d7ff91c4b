use serde::{Deserialize, Serialize};

use crate::domain::{CardType, PlayerNumber, SettingsPatch, Team, TimestampMs};
use crate::engine::{MatchError, MatchState, Transition};

/// Команда верхнего уровня.
///
/// Это тот же API, что и методы `MatchState`, но в виде данных:
/// хост может класть команды в очередь и применять строго по одной.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// PRE_GAME -> FIRST_HALF.
    ConfirmAndStart,

    /// Старт/пауза часов.
    ToggleClock,

    /// Протекание времени.
    ///
    /// `cycle` - цикл часов, для которого тик посчитан планировщиком.
    /// `None` = применить без проверки (ручной вызов, тесты).
    AdvanceTick { delta_ms: i64, cycle: Option<u64> },

    /// Гол.
    AddGoal { team: Team },

    /// Карточка.
    AddCard {
        team: Team,
        player_number: PlayerNumber,
        card_type: CardType,
    },

    /// Досрочно закончить текущую фазу.
    AdvanceEarly,

    /// Частичное обновление настроек.
    UpdateSettings(SettingsPatch),

    /// Сброс матча в PRE_GAME.
    Reset,
}

impl Command {
    /// Короткое имя команды (для логов).
    pub fn name(&self) -> &'static str {
        match self {
            Command::ConfirmAndStart => "confirm_and_start",
            Command::ToggleClock => "toggle_clock",
            Command::AdvanceTick { .. } => "advance_tick",
            Command::AddGoal { .. } => "add_goal",
            Command::AddCard { .. } => "add_card",
            Command::AdvanceEarly => "advance_early",
            Command::UpdateSettings(_) => "update_settings",
            Command::Reset => "reset",
        }
    }

    /// Применить команду к снапшоту.
    pub fn apply_to(&self, state: &MatchState, now_ms: TimestampMs) -> Result<Transition, MatchError> {
        match self {
            Command::ConfirmAndStart => Ok(state.confirm_and_start(now_ms)),
            Command::ToggleClock => Ok(state.toggle_clock()),
            Command::AdvanceTick {
                delta_ms,
                cycle: Some(cycle),
            } => state.advance_tick_in_cycle(*cycle, *delta_ms, now_ms),
            Command::AdvanceTick {
                delta_ms,
                cycle: None,
            } => state.advance_tick(*delta_ms, now_ms),
            Command::AddGoal { team } => Ok(state.add_goal(*team, now_ms)),
            Command::AddCard {
                team,
                player_number,
                card_type,
            } => state.add_card(*team, *player_number, *card_type, now_ms),
            Command::AdvanceEarly => Ok(state.advance_early(now_ms)),
            Command::UpdateSettings(patch) => state.update_settings(patch),
            Command::Reset => Ok(state.reset()),
        }
    }
}
