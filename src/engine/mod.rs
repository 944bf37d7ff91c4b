//! Ядро матча: машина фаз, счёт, журнал событий.
//!
//! Высокоуровневый объект: `MatchState`
//! Основные операции:
//!   - `confirm_and_start` – начать матч
//!   - `advance_tick` – протекание времени (с каскадом смены фазы)
//!   - `add_goal` / `add_card` – события в игровых фазах
//!   - `advance_early` – досрочная смена фазы
//!   - `update_settings` / `reset`

pub mod errors;
pub mod event_log;
pub mod match_state;
pub mod phase_controller;
pub mod scoreboard;
pub mod validation;

pub use errors::{MatchError, RejectReason};
pub use event_log::{EventLog, MatchEvent, MatchEventKind};
pub use match_state::{CommandOutcome, MatchSignal, MatchState, Transition};
pub use phase_controller::{kickoff_team_for, next_phase, PhaseChange, PhaseTrigger};
pub use scoreboard::ScoreBoard;
