// src/time_ctrl/clock.rs
//! Часы текущей фазы: обратный отсчёт + прошедшее время.

use serde::{Deserialize, Serialize};

/// Состояние часов фазы.
///
/// Инвариант: `remaining_ms + elapsed_ms` = длительность фазы,
/// пока часы идут или только что сброшены.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchClock {
    /// Сколько осталось до конца фазы.
    pub remaining_ms: u64,
    /// Сколько прошло с начала фазы (не больше длительности фазы).
    pub elapsed_ms: u64,
    /// Идут ли часы прямо сейчас.
    pub running: bool,
    /// Номер "отрезка" хода часов. Растёт на каждом start/pause/reset/expiry,
    /// так хост понимает, что его запланированный тик уже неактуален.
    pub cycle: u64,
}

/// Результат "протекания" времени.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TickOutcome {
    /// Часы стоят, ничего не изменилось.
    Idle,
    /// Время ещё не вышло.
    Ongoing,
    /// Время фазы только что закончилось (сигнал ровно один раз).
    Expired,
}

impl MatchClock {
    /// Часы, сброшенные на `duration_ms`.
    pub fn new(duration_ms: u64) -> Self {
        Self {
            remaining_ms: duration_ms,
            elapsed_ms: 0,
            running: false,
            cycle: 0,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ms == 0
    }

    /// Запустить отсчёт. Возвращает `true`, если часы действительно пошли.
    ///
    /// Ничего не делает, если:
    /// - у фазы нет длительности (`duration_ms == 0`);
    /// - часы уже идут;
    /// - время уже вышло.
    ///
    /// После паузы отсчёт продолжается с текущего `remaining_ms`,
    /// после reset он равен `duration_ms`.
    pub fn start(&mut self, duration_ms: u64) -> bool {
        if duration_ms == 0 || self.running || self.is_expired() {
            return false;
        }
        self.running = true;
        self.cycle += 1;
        true
    }

    /// Протекание `delta_ms` времени.
    ///
    /// Отрицательной дельты тут быть не может (u64): проверка на входе
    /// делается уровнем выше (`MatchState::advance_tick`).
    pub fn tick(&mut self, delta_ms: u64) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        let consumed = delta_ms.min(self.remaining_ms);
        self.remaining_ms -= consumed;
        self.elapsed_ms += consumed;

        if self.remaining_ms == 0 {
            self.running = false;
            self.cycle += 1;
            TickOutcome::Expired
        } else {
            TickOutcome::Ongoing
        }
    }

    /// Остановить часы, сохранив remaining/elapsed. Возвращает `true`, если часы шли.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.cycle += 1;
        true
    }

    /// Сброс на новую длительность (используется при каждой смене фазы).
    pub fn reset_to(&mut self, duration_ms: u64) {
        self.remaining_ms = duration_ms;
        self.elapsed_ms = 0;
        self.running = false;
        self.cycle += 1;
    }
}
