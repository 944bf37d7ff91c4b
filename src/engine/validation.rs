use crate::domain::{Phase, PlayerNumber};
use crate::engine::errors::{MatchError, RejectReason};

/// Голы и карточки принимаются только в игровых фазах.
pub fn ensure_playable(phase: Phase) -> Result<(), RejectReason> {
    if phase.is_playable() {
        Ok(())
    } else {
        Err(RejectReason::PhaseNotPlayable(phase))
    }
}

/// Дельта тика от хоста: отрицательная = ошибка программиста.
pub fn validate_tick_delta(delta_ms: i64) -> Result<u64, MatchError> {
    u64::try_from(delta_ms).map_err(|_| {
        MatchError::InvalidArgument(format!("tick delta must be >= 0, got {delta_ms}"))
    })
}

pub fn validate_player_number(player_number: PlayerNumber) -> Result<PlayerNumber, MatchError> {
    if player_number == 0 {
        return Err(MatchError::InvalidArgument(
            "player number must be positive".into(),
        ));
    }
    Ok(player_number)
}
