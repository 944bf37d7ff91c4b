// tests/api_tests.rs
//
// Внешний слой:
//  - Command как данные (serde) и apply_to;
//  - DTO экрана и сводка;
//  - маппинг ошибок в ApiError.

use referee_engine::api::{
    build_match_view, build_summary, map_transition_to_response, run_query, ApiError, Command,
    CommandResponse, Query, QueryResponse,
};
use referee_engine::domain::{CardType, MatchSettings, Phase, SettingsPatch, Team, TeamColor};
use referee_engine::engine::{MatchError, MatchState, RejectReason};
use referee_engine::infra::PersistenceError;

const NOW: u64 = 1_700_000_000_000;

fn run(state: MatchState, commands: &[Command]) -> MatchState {
    commands.iter().fold(state, |state, command| {
        command.apply_to(&state, NOW).unwrap().into_state()
    })
}

fn played_match() -> MatchState {
    run(
        MatchState::new(MatchSettings::standard()).unwrap(),
        &[
            Command::ConfirmAndStart,
            Command::AdvanceTick {
                delta_ms: 600_000,
                cycle: None,
            },
            Command::AddGoal { team: Team::Away },
            Command::AddCard {
                team: Team::Home,
                player_number: 5,
                card_type: CardType::Yellow,
            },
            Command::AddCard {
                team: Team::Home,
                player_number: 5,
                card_type: CardType::Yellow,
            },
            Command::AddCard {
                team: Team::Away,
                player_number: 11,
                card_type: CardType::Red,
            },
        ],
    )
}

#[test]
fn commands_survive_json() {
    let commands = vec![
        Command::ConfirmAndStart,
        Command::AdvanceTick {
            delta_ms: 250,
            cycle: Some(3),
        },
        Command::AddCard {
            team: Team::Away,
            player_number: 7,
            card_type: CardType::Red,
        },
        Command::UpdateSettings(SettingsPatch::colors(Some(TeamColor::SkyBlue), None)),
        Command::Reset,
    ];

    let json = serde_json::to_string(&commands).unwrap();
    let back: Vec<Command> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, commands);
}

#[test]
fn command_with_stale_cycle_is_rejected() {
    let state = run(
        MatchState::new(MatchSettings::standard()).unwrap(),
        &[Command::ConfirmAndStart],
    );
    let stale = state.clock().cycle - 1;

    let t = Command::AdvanceTick {
        delta_ms: 1_000,
        cycle: Some(stale),
    }
    .apply_to(&state, NOW)
    .unwrap();

    assert_eq!(
        t.rejection(),
        Some(RejectReason::StaleTick {
            tick_cycle: stale,
            clock_cycle: state.clock().cycle
        })
    );
}

#[test]
fn match_view_reflects_state() {
    let state = played_match();
    let view = build_match_view(&state);

    assert_eq!(view.phase, Phase::FirstHalf);
    assert_eq!(view.clock_display, "35:00");
    assert_eq!(view.elapsed_ms, 600_000);
    assert!(view.clock_running);
    assert_eq!(view.clock_cycle, state.clock().cycle);
    assert_eq!((view.home_score, view.away_score), (0, 1));
    assert_eq!(view.home_color, TeamColor::Blue);
    assert_eq!(view.events.len(), 5);
    assert_eq!(view.events[1].text, "Goal: AWAY (0-1) at 10:00");
    assert_eq!(view.events[1].game_time, "10:00");
}

#[test]
fn summary_counts_cards_per_team() {
    let summary = build_summary(&played_match());

    assert_eq!(summary.phase, Phase::FirstHalf);
    assert_eq!(summary.events_logged, 5);
    assert_eq!(summary.home.goals, 0);
    assert_eq!(summary.home.yellow_cards, 2);
    assert_eq!(summary.home.red_cards, 0);
    assert_eq!(summary.away.goals, 1);
    assert_eq!(summary.away.yellow_cards, 0);
    assert_eq!(summary.away.red_cards, 1);
}

#[test]
fn event_log_query_returns_display_strings() {
    let state = played_match();

    match run_query(&state, &Query::GetEventLog) {
        QueryResponse::EventLog(lines) => {
            assert_eq!(lines.len(), 5);
            assert_eq!(lines[0], "Phase: FIRST_HALF after 00:00");
            assert_eq!(lines[4], "Card: AWAY #11 RED at 10:00");
        }
        other => panic!("ожидали EventLog, получили {other:?}"),
    }

    assert!(matches!(
        run_query(&state, &Query::GetSummary),
        QueryResponse::Summary(_)
    ));
    assert!(matches!(
        run_query(&state, &Query::GetMatch),
        QueryResponse::Match(_)
    ));
}

#[test]
fn transition_maps_to_response() {
    let state = played_match();

    let applied = state.add_goal(Team::Home, NOW);
    match map_transition_to_response(&applied) {
        CommandResponse::Applied { view, signals } => {
            assert_eq!(view.home_score, 1);
            assert!(signals.is_empty());
        }
        other => panic!("ожидали Applied, получили {other:?}"),
    }

    let rejected = state.confirm_and_start(NOW);
    match map_transition_to_response(&rejected) {
        CommandResponse::Rejected { reason, view } => {
            assert!(reason.contains("PRE_GAME"));
            assert_eq!(view.phase, Phase::FirstHalf);
        }
        other => panic!("ожидали Rejected, получили {other:?}"),
    }
}

#[test]
fn errors_map_to_api_errors() {
    let bad = MatchError::InvalidArgument("player number must be positive".into());
    assert_eq!(
        ApiError::from(bad),
        ApiError::BadRequest("player number must be positive".into())
    );

    let invalid: MatchError = RejectReason::ClockNotRunning.into();
    assert!(matches!(ApiError::from(invalid), ApiError::InvalidCommand(_)));

    let persistence = PersistenceError::Unavailable("offline".into());
    assert!(matches!(
        ApiError::from(persistence),
        ApiError::Persistence(msg) if msg.contains("offline")
    ));
}
