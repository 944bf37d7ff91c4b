// src/domain/settings.rs

use serde::{Deserialize, Serialize};

use crate::domain::team::{Team, TeamColor};
use crate::time_ctrl::PhaseDurations;

/// Готовые профили настроек матча.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SettingsProfile {
    /// 2 x 45 минут, перерыв 15.
    Standard,
    /// 2 x 30 минут, перерыв 10 (юношеские матчи).
    Youth,
}

/// Настройки матча.
///
/// Длительности и команда, начинающая матч, меняются только в PreGame.
/// Цвета формы можно менять когда угодно.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchSettings {
    pub durations: PhaseDurations,
    pub home_color: TeamColor,
    pub away_color: TeamColor,
    /// Кто разыгрывает мяч в первом тайме.
    pub initial_kickoff: Team,
}

impl MatchSettings {
    pub fn new(
        durations: PhaseDurations,
        home_color: TeamColor,
        away_color: TeamColor,
        initial_kickoff: Team,
    ) -> Self {
        Self {
            durations,
            home_color,
            away_color,
            initial_kickoff,
        }
    }

    pub fn standard() -> Self {
        Self {
            durations: PhaseDurations::standard(),
            home_color: TeamColor::Blue,
            away_color: TeamColor::Red,
            initial_kickoff: Team::Home,
        }
    }

    pub fn youth() -> Self {
        Self {
            durations: PhaseDurations::from_minutes(30, 10),
            ..Self::standard()
        }
    }

    pub fn from_profile(profile: SettingsProfile) -> Self {
        match profile {
            SettingsProfile::Standard => Self::standard(),
            SettingsProfile::Youth => Self::youth(),
        }
    }

    pub fn color_of(&self, team: Team) -> TeamColor {
        match team {
            Team::Home => self.home_color,
            Team::Away => self.away_color,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.durations.validate()
    }
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self::standard()
    }
}

/// Частичное обновление настроек: `None` = поле не трогаем.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsPatch {
    pub half_ms: Option<u64>,
    pub halftime_ms: Option<u64>,
    pub home_color: Option<TeamColor>,
    pub away_color: Option<TeamColor>,
    pub initial_kickoff: Option<Team>,
}

impl SettingsPatch {
    pub fn colors(home: Option<TeamColor>, away: Option<TeamColor>) -> Self {
        Self {
            home_color: home,
            away_color: away,
            ..Self::default()
        }
    }

    pub fn durations(half_ms: u64, halftime_ms: u64) -> Self {
        Self {
            half_ms: Some(half_ms),
            halftime_ms: Some(halftime_ms),
            ..Self::default()
        }
    }

    /// Тот же патч без замороженных полей (только цвета).
    pub fn colors_only(&self) -> Self {
        Self::colors(self.home_color, self.away_color)
    }

    /// Трогает ли патч поля, которые после старта матча заморожены.
    pub fn touches_locked_fields(&self) -> bool {
        self.half_ms.is_some() || self.halftime_ms.is_some() || self.initial_kickoff.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.touches_locked_fields() && self.home_color.is_none() && self.away_color.is_none()
    }

    /// Нулевая длительность для таймированной фазы недопустима.
    pub fn validate(&self) -> Result<(), String> {
        if self.half_ms == Some(0) {
            return Err("SettingsPatch: half_ms = 0".into());
        }
        if self.halftime_ms == Some(0) {
            return Err("SettingsPatch: halftime_ms = 0".into());
        }
        Ok(())
    }

    /// Применить патч к копии настроек.
    pub fn apply_to(&self, settings: &MatchSettings) -> MatchSettings {
        let mut next = settings.clone();
        if let Some(half_ms) = self.half_ms {
            next.durations.half_ms = half_ms;
        }
        if let Some(halftime_ms) = self.halftime_ms {
            next.durations.halftime_ms = halftime_ms;
        }
        if let Some(color) = self.home_color {
            next.home_color = color;
        }
        if let Some(color) = self.away_color {
            next.away_color = color;
        }
        if let Some(team) = self.initial_kickoff {
            next.initial_kickoff = team;
        }
        next
    }
}
