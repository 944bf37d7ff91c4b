use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{
    CardType, EventId, MatchSettings, Phase, PlayerNumber, SettingsPatch, Team, TimestampMs,
};
use crate::engine::errors::{MatchError, RejectReason};
use crate::engine::event_log::{EventLog, MatchEvent, MatchEventKind};
use crate::engine::phase_controller::{apply_transition, PhaseTrigger};
use crate::engine::scoreboard::ScoreBoard;
use crate::engine::validation::{validate_player_number, validate_tick_delta};
use crate::time_ctrl::{MatchClock, TickOutcome};

/// Сигнал для слоя представления (вибрация, звук).
/// Ядро его только отдаёт, само с устройством не работает.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchSignal {
    /// Время фазы вышло естественным образом (не досрочный переход).
    PeriodExpired { ended: Phase, entered: Phase },
}

/// Чем закончилась команда.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// Команда молча отклонена, снапшот прежний.
    Rejected(RejectReason),
}

/// Результат команды: новый снапшот + исход + сигналы для хоста.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: MatchState,
    pub outcome: CommandOutcome,
    pub signals: Vec<MatchSignal>,
}

impl Transition {
    fn applied(state: MatchState) -> Self {
        Self {
            state,
            outcome: CommandOutcome::Applied,
            signals: Vec::new(),
        }
    }

    fn rejected(state: &MatchState, reason: RejectReason) -> Self {
        debug!(phase = %state.phase, %reason, "command rejected");
        Self {
            state: state.clone(),
            outcome: CommandOutcome::Rejected(reason),
            signals: Vec::new(),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self.outcome, CommandOutcome::Applied)
    }

    pub fn rejection(&self) -> Option<RejectReason> {
        match self.outcome {
            CommandOutcome::Applied => None,
            CommandOutcome::Rejected(reason) => Some(reason),
        }
    }

    pub fn into_state(self) -> MatchState {
        self.state
    }
}

/// Агрегат матча: единственный источник правды.
///
/// Все команды берут `&self` и возвращают новый снапшот в `Transition`.
/// Сохраняется и восстанавливается целиком.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchState {
    pub(crate) settings: MatchSettings,
    pub(crate) phase: Phase,
    pub(crate) clock: MatchClock,
    pub(crate) score: ScoreBoard,
    pub(crate) log: EventLog,
    /// Кто разыгрывает мяч в текущем периоде.
    pub(crate) kickoff_team: Team,
    /// Счётчик id событий. Переживает reset, чтобы id не повторялись за сессию.
    pub(crate) next_event_id: EventId,
}

impl MatchState {
    /// Новый матч в PRE_GAME.
    pub fn new(settings: MatchSettings) -> Result<Self, MatchError> {
        settings.validate().map_err(MatchError::InvalidArgument)?;
        Ok(Self::baseline(settings))
    }

    /// В PRE_GAME часы показывают длительность первого тайма (превью),
    /// но запустить их нельзя: у самой фазы длительность 0.
    fn baseline(settings: MatchSettings) -> Self {
        let clock = MatchClock::new(settings.durations.half_ms);
        let kickoff_team = settings.initial_kickoff;
        Self {
            settings,
            phase: Phase::PreGame,
            clock,
            score: ScoreBoard::new(),
            log: EventLog::new(),
            kickoff_team,
            next_event_id: 1,
        }
    }

    // ------------------------------------------------------------
    // Чтение
    // ------------------------------------------------------------

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn clock(&self) -> &MatchClock {
        &self.clock
    }

    pub fn score(&self) -> ScoreBoard {
        self.score
    }

    pub fn home_score(&self) -> u32 {
        self.score.home
    }

    pub fn away_score(&self) -> u32 {
        self.score.away
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn kickoff_team(&self) -> Team {
        self.kickoff_team
    }

    pub fn next_event_id(&self) -> EventId {
        self.next_event_id
    }

    /// Настроенная длительность текущей фазы.
    pub fn current_phase_duration_ms(&self) -> u64 {
        self.settings.durations.duration_for(self.phase)
    }

    // ------------------------------------------------------------
    // Команды
    // ------------------------------------------------------------

    /// PRE_GAME -> FIRST_HALF, часы первого тайма сразу идут.
    pub fn confirm_and_start(&self, now_ms: TimestampMs) -> Transition {
        let mut next = self.clone();
        if let Err(reason) = apply_transition(&mut next, PhaseTrigger::Confirm, now_ms) {
            return Transition::rejected(self, reason);
        }
        let duration = next.current_phase_duration_ms();
        next.clock.start(duration);
        Transition::applied(next)
    }

    /// Старт/пауза часов.
    pub fn toggle_clock(&self) -> Transition {
        let mut next = self.clone();
        if next.clock.pause() {
            return Transition::applied(next);
        }

        let duration = next.current_phase_duration_ms();
        if next.clock.start(duration) {
            Transition::applied(next)
        } else {
            Transition::rejected(self, RejectReason::ClockNotStartable(self.phase))
        }
    }

    /// Продвинуть часы на `delta_ms`. При истечении - автоматический переход
    /// фазы и сигнал `PeriodExpired`.
    pub fn advance_tick(&self, delta_ms: i64, now_ms: TimestampMs) -> Result<Transition, MatchError> {
        let delta_ms = validate_tick_delta(delta_ms)?;
        Ok(self.apply_tick(delta_ms, now_ms))
    }

    /// То же, что `advance_tick`, но тик привязан к циклу часов, для которого
    /// он был посчитан. Если с тех пор была пауза/смена фазы - тик отбрасывается.
    pub fn advance_tick_in_cycle(
        &self,
        cycle: u64,
        delta_ms: i64,
        now_ms: TimestampMs,
    ) -> Result<Transition, MatchError> {
        let delta_ms = validate_tick_delta(delta_ms)?;
        if cycle != self.clock.cycle {
            return Ok(Transition::rejected(
                self,
                RejectReason::StaleTick {
                    tick_cycle: cycle,
                    clock_cycle: self.clock.cycle,
                },
            ));
        }
        Ok(self.apply_tick(delta_ms, now_ms))
    }

    fn apply_tick(&self, delta_ms: u64, now_ms: TimestampMs) -> Transition {
        let mut next = self.clone();
        match next.clock.tick(delta_ms) {
            TickOutcome::Idle => Transition::rejected(self, RejectReason::ClockNotRunning),
            TickOutcome::Ongoing => Transition::applied(next),
            TickOutcome::Expired => match apply_transition(&mut next, PhaseTrigger::Expiry, now_ms) {
                Ok(change) => {
                    let mut transition = Transition::applied(next);
                    transition.signals.push(MatchSignal::PeriodExpired {
                        ended: change.from,
                        entered: change.to,
                    });
                    transition
                }
                Err(reason) => Transition::rejected(self, reason),
            },
        }
    }

    /// Гол команды `team` (только в игровой фазе).
    pub fn add_goal(&self, team: Team, now_ms: TimestampMs) -> Transition {
        let mut next = self.clone();
        match next.score.record_goal(self.phase, team) {
            Ok(kind) => {
                let game_time_ms = next.clock.elapsed_ms;
                next.record_event(kind, self.phase, game_time_ms, now_ms);
                Transition::applied(next)
            }
            Err(reason) => Transition::rejected(self, reason),
        }
    }

    /// Карточка игроку (только в игровой фазе). Нулевой номер - ошибка аргумента.
    pub fn add_card(
        &self,
        team: Team,
        player_number: PlayerNumber,
        card_type: CardType,
        now_ms: TimestampMs,
    ) -> Result<Transition, MatchError> {
        let player_number = validate_player_number(player_number)?;
        let mut next = self.clone();
        let transition = match next
            .score
            .record_card(self.phase, team, player_number, card_type)
        {
            Ok(kind) => {
                let game_time_ms = next.clock.elapsed_ms;
                next.record_event(kind, self.phase, game_time_ms, now_ms);
                Transition::applied(next)
            }
            Err(reason) => Transition::rejected(self, reason),
        };
        Ok(transition)
    }

    /// Досрочный переход: пауза, затем тот же переход, что и при истечении,
    /// но с текущим (частичным) elapsed.
    pub fn advance_early(&self, now_ms: TimestampMs) -> Transition {
        let mut next = self.clone();
        match apply_transition(&mut next, PhaseTrigger::EarlyAdvance, now_ms) {
            Ok(_) => Transition::applied(next),
            Err(reason) => Transition::rejected(self, reason),
        }
    }

    /// Обновить настройки.
    ///
    /// Длительности и начальный розыгрыш меняются только в PRE_GAME. Цвета
    /// меняются в любой фазе и часы не трогают.
    ///
    /// После старта из смешанного патча применяются только цвета, замороженные
    /// поля отбрасываются. Патч, где нет ничего, кроме замороженных полей,
    /// отклоняется как `SettingsLocked`.
    pub fn update_settings(&self, patch: &SettingsPatch) -> Result<Transition, MatchError> {
        patch.validate().map_err(MatchError::InvalidArgument)?;

        if self.phase != Phase::PreGame && patch.touches_locked_fields() {
            let colors = patch.colors_only();
            if colors.is_empty() {
                return Ok(Transition::rejected(
                    self,
                    RejectReason::SettingsLocked(self.phase),
                ));
            }
            debug!(phase = %self.phase, "locked settings fields dropped, colors applied");
            let mut next = self.clone();
            next.settings = colors.apply_to(&self.settings);
            return Ok(Transition::applied(next));
        }

        let mut next = self.clone();
        next.settings = patch.apply_to(&self.settings);

        if self.phase == Phase::PreGame && patch.touches_locked_fields() {
            next.clock.reset_to(next.settings.durations.half_ms);
            next.kickoff_team = next.settings.initial_kickoff;
        }

        Ok(Transition::applied(next))
    }

    /// Возврат в PRE_GAME: счёт, журнал и часы чистые, настройки (цвета и
    /// длительности) сохраняются.
    pub fn reset(&self) -> Transition {
        let mut next = Self::baseline(self.settings.clone());
        next.next_event_id = self.next_event_id;
        // Цикл часов не откатываем: тики, посчитанные до reset, должны протухнуть.
        next.clock.cycle = self.clock.cycle + 1;

        info!(from = %self.phase, events_dropped = self.log.len(), "match reset");
        Transition::applied(next)
    }

    // ------------------------------------------------------------
    // Внутреннее
    // ------------------------------------------------------------

    pub(crate) fn record_event(
        &mut self,
        kind: MatchEventKind,
        phase: Phase,
        game_time_ms: u64,
        now_ms: TimestampMs,
    ) {
        let event = MatchEvent {
            id: self.next_event_id,
            wall_clock_ms: now_ms,
            game_time_ms,
            phase,
            kind,
        };
        self.next_event_id += 1;
        self.log = std::mem::take(&mut self.log).append(event);
    }
}
