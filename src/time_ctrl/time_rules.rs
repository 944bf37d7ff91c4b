// src/time_ctrl/time_rules.rs
//! Длительности фаз матча.
//!
//! Здесь описываем только "правила", без состояния часов.

use serde::{Deserialize, Serialize};

use crate::domain::Phase;

const MS_PER_MINUTE: u64 = 60_000;

/// Сколько длится каждая "таймированная" фаза.
///
/// PreGame и FullTime всегда имеют длительность 0.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseDurations {
    /// Длительность одного тайма, мс.
    pub half_ms: u64,
    /// Длительность перерыва, мс.
    pub halftime_ms: u64,
}

impl PhaseDurations {
    pub const fn new(half_ms: u64, halftime_ms: u64) -> Self {
        Self {
            half_ms,
            halftime_ms,
        }
    }

    /// Только для встроенных профилей. Ввод извне идёт через `checked_mul` в конфиге.
    pub(crate) const fn from_minutes(half_minutes: u64, halftime_minutes: u64) -> Self {
        Self {
            half_ms: half_minutes * MS_PER_MINUTE,
            halftime_ms: halftime_minutes * MS_PER_MINUTE,
        }
    }

    /// Стандарт: 2 x 45 минут, перерыв 15 минут.
    pub const fn standard() -> Self {
        Self::from_minutes(45, 15)
    }

    /// Настроенная длительность фазы.
    pub const fn duration_for(&self, phase: Phase) -> u64 {
        match phase {
            Phase::FirstHalf | Phase::SecondHalf => self.half_ms,
            Phase::HalfTime => self.halftime_ms,
            Phase::PreGame | Phase::FullTime => 0,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.half_ms == 0 {
            return Err("PhaseDurations: half_ms = 0".into());
        }
        if self.halftime_ms == 0 {
            return Err("PhaseDurations: halftime_ms = 0".into());
        }
        Ok(())
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self::standard()
    }
}
