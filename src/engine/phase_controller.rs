//! Машина фаз матча.
//!
//! Таблица переходов:
//!   PRE_GAME    -> FIRST_HALF   (только явный confirm)
//!   FIRST_HALF  -> HALF_TIME    (истечение времени или досрочно)
//!   HALF_TIME   -> SECOND_HALF  (истечение времени или досрочно)
//!   SECOND_HALF -> FULL_TIME    (истечение времени или досрочно)
//!   FULL_TIME   -> -            (только reset)
//!
//! Истечение и досрочный переход используют одну и ту же функцию,
//! разница только в том, сколько времени успело пройти.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{MatchSettings, Phase, Team, TimestampMs};
use crate::engine::errors::RejectReason;
use crate::engine::event_log::MatchEventKind;
use crate::engine::match_state::MatchState;

/// Что вызвало переход.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PhaseTrigger {
    /// Судья подтвердил старт матча.
    Confirm,
    /// Часы фазы дошли до нуля.
    Expiry,
    /// Судья закончил фазу досрочно.
    EarlyAdvance,
}

/// Итог перехода (для логов и сигналов).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
    pub prior_phase_elapsed_ms: u64,
    pub trigger: PhaseTrigger,
}

/// Следующая фаза для пары (фаза, триггер), `None` = перехода нет.
pub fn next_phase(phase: Phase, trigger: PhaseTrigger) -> Option<Phase> {
    match (phase, trigger) {
        (Phase::PreGame, PhaseTrigger::Confirm) => Some(Phase::FirstHalf),
        (Phase::PreGame, _) => None,
        (_, PhaseTrigger::Confirm) => None,
        (Phase::FirstHalf, _) => Some(Phase::HalfTime),
        (Phase::HalfTime, _) => Some(Phase::SecondHalf),
        (Phase::SecondHalf, _) => Some(Phase::FullTime),
        (Phase::FullTime, _) => None,
    }
}

/// Кто разыгрывает мяч в новой фазе.
///
/// Во втором тайме - соперник той команды, что начинала матч
/// (считаем от настроек, а не от текущего значения).
pub fn kickoff_team_for(phase: Phase, settings: &MatchSettings, current: Team) -> Team {
    match phase {
        Phase::PreGame | Phase::FirstHalf => settings.initial_kickoff,
        Phase::SecondHalf => settings.initial_kickoff.opposite(),
        Phase::HalfTime | Phase::FullTime => current,
    }
}

/// Применить переход к состоянию (на месте).
///
/// Порядок: пауза часов -> фиксируем elapsed завершённой фазы ->
/// новая фаза -> сброс часов на её длительность -> розыгрыш -> PhaseChanged в журнал.
///
/// Невалидный переход ничего не меняет.
pub(crate) fn apply_transition(
    state: &mut MatchState,
    trigger: PhaseTrigger,
    now_ms: TimestampMs,
) -> Result<PhaseChange, RejectReason> {
    let from = state.phase;
    let to = match next_phase(from, trigger) {
        Some(to) => to,
        None if trigger == PhaseTrigger::Confirm => return Err(RejectReason::NotInPreGame(from)),
        None => return Err(RejectReason::NoTransitionFrom(from)),
    };

    state.clock.pause();
    let prior_phase_elapsed_ms = state.clock.elapsed_ms;

    state.phase = to;
    state.clock.reset_to(state.settings.durations.duration_for(to));
    state.kickoff_team = kickoff_team_for(to, &state.settings, state.kickoff_team);

    state.record_event(
        MatchEventKind::PhaseChanged {
            new_phase: to,
            prior_phase_elapsed_ms,
        },
        from,
        prior_phase_elapsed_ms,
        now_ms,
    );

    info!(
        from = %from,
        to = %to,
        ?trigger,
        prior_phase_elapsed_ms,
        "phase changed"
    );

    Ok(PhaseChange {
        from,
        to,
        prior_phase_elapsed_ms,
        trigger,
    })
}
