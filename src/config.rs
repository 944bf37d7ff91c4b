use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::domain::{MatchSettings, Team, TeamColor};
use crate::runtime::DEFAULT_TICK_PERIOD;
use crate::time_ctrl::PhaseDurations;

/// Конфигурация хоста, читается из переменных окружения (и `.env`).
#[derive(Debug, Clone)]
pub struct RefereeConfig {
    /// Начальные настройки матча.
    pub settings: MatchSettings,

    /// Как часто планировщик шлёт тики.
    pub tick_period: Duration,

    /// Куда сохранять снапшот. `None` = только в памяти.
    pub snapshot_path: Option<PathBuf>,
}

impl RefereeConfig {
    /// Собрать конфиг из окружения; незаданные переменные берут значения по умолчанию.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = MatchSettings::standard();

        let half_minutes: u64 = parse_var("REFEREE_HALF_MINUTES", "45")?;
        let halftime_minutes: u64 = parse_var("REFEREE_HALFTIME_MINUTES", "15")?;
        let tick_millis: u64 = parse_var(
            "REFEREE_TICK_MILLIS",
            &DEFAULT_TICK_PERIOD.as_millis().to_string(),
        )?;

        let home_color: TeamColor = parse_with("REFEREE_HOME_COLOR", defaults.home_color.label())?;
        let away_color: TeamColor = parse_with("REFEREE_AWAY_COLOR", defaults.away_color.label())?;
        let initial_kickoff: Team = parse_with("REFEREE_KICKOFF", defaults.initial_kickoff.label())?;

        if tick_millis == 0 {
            return Err(anyhow!("REFEREE_TICK_MILLIS must be positive"));
        }

        let settings = MatchSettings::new(
            PhaseDurations::new(
                minutes_to_ms("REFEREE_HALF_MINUTES", half_minutes)?,
                minutes_to_ms("REFEREE_HALFTIME_MINUTES", halftime_minutes)?,
            ),
            home_color,
            away_color,
            initial_kickoff,
        );
        settings
            .validate()
            .map_err(|msg| anyhow!(msg))
            .context("invalid match durations")?;

        Ok(RefereeConfig {
            settings,
            tick_period: Duration::from_millis(tick_millis),
            snapshot_path: env::var("REFEREE_SNAPSHOT_PATH").ok().map(PathBuf::from),
        })
    }
}

fn minutes_to_ms(name: &str, minutes: u64) -> Result<u64> {
    minutes
        .checked_mul(60_000)
        .ok_or_else(|| anyhow!("{name} is too large: {minutes} minutes"))
}

fn parse_var(name: &str, default: &str) -> Result<u64> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .with_context(|| format!("{name} must be a valid number"))
}

fn parse_with<T>(name: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|msg: String| anyhow!(msg))
        .with_context(|| format!("{name} has an invalid value"))
}
