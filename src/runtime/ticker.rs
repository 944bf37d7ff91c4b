// src/runtime/ticker.rs
//! Планировщик тиков на стороне хоста.
//!
//! Ядро само время не читает: раз в `period` этот цикл меряет реальную дельту
//! и отправляет `AdvanceTick`, привязанный к циклу часов. Если между двумя
//! срабатываниями была пауза или смена фазы, цикл часов уже другой:
//! старую дельту не применяем, а новый цикл меряем от момента его старта.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::api::Command;
use crate::domain::TimestampMs;
use crate::infra::MatchStorage;

use super::session::SharedSession;

/// Период по умолчанию.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(250);

/// Точка отсчёта: цикл часов + момент последнего учтённого тика.
type Anchor = Option<(u64, Instant)>;

/// Крутить тики до `shutdown == true` (или пока отправитель не закрыт).
///
/// `wall_clock` отдаёт текущее время хоста для поля `wall_clock_ms` событий.
pub async fn run_ticker<S, F>(
    session: SharedSession<S>,
    period: Duration,
    wall_clock: F,
    mut shutdown: watch::Receiver<bool>,
) where
    S: MatchStorage + Send + 'static,
    F: Fn() -> TimestampMs,
{
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut anchor: Anchor = None;

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    debug!("ticker stopped");
                    break;
                }
                continue;
            }
        }

        anchor = on_interval(&session, anchor, Instant::now(), wall_clock());
    }
}

/// Одно срабатывание интервала. Мьютекс держим только внутри этой функции,
/// через `.await` он не переживает.
///
/// Новый цикл часов меряем от момента, когда он начался в сессии
/// (`running_since`), иначе время между стартом часов и ближайшим
/// срабатыванием интервала терялось бы на каждом возобновлении.
fn on_interval<S: MatchStorage>(
    session: &SharedSession<S>,
    anchor: Anchor,
    now: Instant,
    wall_now: TimestampMs,
) -> Anchor {
    let mut guard = session.lock();
    let clock = guard.state().clock().clone();

    if !clock.running {
        return None;
    }

    let since = match anchor {
        Some((cycle, at)) if cycle == clock.cycle => at,
        _ => match guard.running_since() {
            Some((cycle, at)) if cycle == clock.cycle => at,
            _ => now,
        },
    };

    // Целые миллисекунды; остаток остаётся до следующего срабатывания.
    let delta = now.saturating_duration_since(since);
    let delta_ms = i64::try_from(delta.as_millis()).unwrap_or(i64::MAX);
    if delta_ms == 0 {
        return Some((clock.cycle, since));
    }
    let consumed = Duration::from_millis(delta_ms.unsigned_abs());

    let command = Command::AdvanceTick {
        delta_ms,
        cycle: Some(clock.cycle),
    };
    if let Err(err) = guard.dispatch(command, wall_now) {
        warn!(error = %err, "tick dispatch failed");
    }

    let after = guard.state().clock();
    if after.running {
        Some((after.cycle, since + consumed))
    } else {
        None
    }
}
