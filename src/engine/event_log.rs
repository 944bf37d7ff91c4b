use serde::{Deserialize, Serialize};

use crate::domain::{CardType, EventId, Phase, PlayerNumber, Team, TimestampMs};
use crate::time_ctrl::format_game_time;

/// Тип события матча.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEventKind {
    /// Гол. Счёт хранится уже *после* гола.
    GoalScored {
        team: Team,
        home_score_after: u32,
        away_score_after: u32,
    },

    /// Карточка игроку.
    CardIssued {
        team: Team,
        player_number: PlayerNumber,
        card_type: CardType,
    },

    /// Смена фазы.
    PhaseChanged {
        new_phase: Phase,
        prior_phase_elapsed_ms: u64,
    },
}

/// Событие в журнале матча: общие поля + сам вариант.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchEvent {
    pub id: EventId,
    /// Время по часам хоста в момент события.
    pub wall_clock_ms: TimestampMs,
    /// Игровое время внутри фазы (elapsed часов).
    pub game_time_ms: u64,
    /// В какой фазе событие записано (для PhaseChanged - завершённая фаза).
    pub phase: Phase,
    pub kind: MatchEventKind,
}

impl MatchEvent {
    /// Строка для экрана, например `Goal: HOME (1-0) at 12:34`.
    pub fn display_string(&self) -> String {
        let at = format_game_time(self.game_time_ms);
        match &self.kind {
            MatchEventKind::GoalScored {
                team,
                home_score_after,
                away_score_after,
            } => format!("Goal: {team} ({home_score_after}-{away_score_after}) at {at}"),
            MatchEventKind::CardIssued {
                team,
                player_number,
                card_type,
            } => format!("Card: {team} #{player_number} {card_type} at {at}"),
            MatchEventKind::PhaseChanged {
                new_phase,
                prior_phase_elapsed_ms,
            } => format!(
                "Phase: {new_phase} after {}",
                format_game_time(*prior_phase_elapsed_ms)
            ),
        }
    }
}

/// Журнал матча: только добавление в конец, порядок = порядок вставки.
///
/// Удаления и перестановки нет намеренно: журнал используется для аудита.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<MatchEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Вернуть журнал с `event` в хвосте. Старые записи не трогаются.
    pub fn append(mut self, event: MatchEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &MatchEvent> {
        self.events.iter()
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&MatchEvent> {
        self.events.last()
    }

    /// Ленивая последовательность строк для экрана, по одной на событие.
    pub fn render_display_strings(&self) -> impl Iterator<Item = String> + '_ {
        self.events.iter().map(MatchEvent::display_string)
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a MatchEvent;
    type IntoIter = std::slice::Iter<'a, MatchEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
