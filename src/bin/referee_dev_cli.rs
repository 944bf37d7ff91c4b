// src/bin/referee_dev_cli.rs
//
// Прогон матча "по сценарию" без реального времени: все тики подаём руками.
// Удобно смотреть журнал, сводку и то, что уходит в хранилище.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use referee_engine::api::{build_summary, Command};
use referee_engine::config::RefereeConfig;
use referee_engine::domain::{CardType, Team, TimestampMs};
use referee_engine::engine::MatchSignal;
use referee_engine::infra::{FileMatchStorage, InMemoryMatchStorage, MatchStorage};
use referee_engine::runtime::{MatchSession, SignalSink};
use referee_engine::time_ctrl::format_game_time;

/// "Вибрация" в консоль.
struct ConsoleSink;

impl SignalSink for ConsoleSink {
    fn on_signal(&mut self, signal: &MatchSignal) {
        match signal {
            MatchSignal::PeriodExpired { ended, entered } => {
                println!("  *** BZZZ *** {ended} закончился, начинается {entered}");
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "referee_engine=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RefereeConfig::from_env().context("failed to load referee config")?;

    println!("=== REFEREE DEV CLI ===\n");
    println!(
        "Тайм: {} | перерыв: {} | тик: {:?}",
        format_game_time(config.settings.durations.half_ms),
        format_game_time(config.settings.durations.halftime_ms),
        config.tick_period
    );

    match config.snapshot_path.clone() {
        Some(path) => {
            println!("Снапшоты пишем в {}\n", path.display());
            run_scripted_match(FileMatchStorage::new(path), &config)
        }
        None => {
            println!("Снапшоты только в памяти\n");
            run_scripted_match(InMemoryMatchStorage::new(), &config)
        }
    }
}

fn run_scripted_match<S: MatchStorage>(storage: S, config: &RefereeConfig) -> Result<()> {
    // "Часы хоста" для wall_clock_ms - просто счётчик от условного нуля.
    let mut now: TimestampMs = 1_700_000_000_000;

    let (session, resumed_signals) = MatchSession::restore(storage, config.settings.clone(), now)?;
    let mut session = session.with_signal_sink(Box::new(ConsoleSink));
    if !resumed_signals.is_empty() {
        println!("При восстановлении накопились сигналы: {resumed_signals:?}");
    }

    let half = config.settings.durations.half_ms as i64;
    let halftime = config.settings.durations.halftime_ms as i64;
    let tick = config.tick_period.as_millis() as i64;

    let script: Vec<Command> = vec![
        Command::Reset,
        Command::ConfirmAndStart,
        Command::AdvanceTick { delta_ms: half / 3, cycle: None },
        Command::AddGoal { team: Team::Home },
        Command::AdvanceTick { delta_ms: tick * 40, cycle: None },
        Command::AddCard {
            team: Team::Away,
            player_number: 7,
            card_type: CardType::Yellow,
        },
        // Гол в перерыве должен быть отклонён.
        Command::AdvanceTick { delta_ms: half, cycle: None },
        Command::AddGoal { team: Team::Away },
        Command::ToggleClock,
        Command::AdvanceTick { delta_ms: halftime, cycle: None },
        Command::ToggleClock,
        Command::AdvanceTick { delta_ms: half / 2, cycle: None },
        Command::AddGoal { team: Team::Away },
        Command::AddCard {
            team: Team::Home,
            player_number: 4,
            card_type: CardType::Red,
        },
        Command::AdvanceEarly,
    ];

    for command in script {
        let name = command.name();
        let report = session.dispatch(command, now)?;
        println!("> {:<18} -> {:?}", name, report.outcome);
        if let Some(err) = &report.persistence_warning {
            println!("  ! снапшот не сохранился: {err}");
        }
        now += 1_000;
    }

    let state = session.state();
    println!("\nЖурнал матча:");
    for line in state.log().render_display_strings() {
        println!("  {line}");
    }

    let summary = build_summary(state);
    println!(
        "\nИтог: {} {} - {} {} ({})",
        Team::Home,
        summary.home.goals,
        summary.away.goals,
        Team::Away,
        summary.phase
    );
    println!(
        "Карточки: HOME {}Y/{}R, AWAY {}Y/{}R",
        summary.home.yellow_cards,
        summary.home.red_cards,
        summary.away.yellow_cards,
        summary.away.red_cards
    );

    println!("\n=== REFEREE DEV CLI DONE ===");
    Ok(())
}
