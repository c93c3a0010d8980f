use props_terminal::api::{PropsSource, StatType};
use props_terminal::chart::ChartGeometry;
use props_terminal::demo::DemoSource;
use props_terminal::provider::handle_command;
use props_terminal::state::{AppState, Delta, FetchState, ProviderCommand, Screen, apply_delta};

#[test]
fn today_only_roster_excludes_players_without_a_game() {
    let source = DemoSource::new();
    let all = source.players(false).expect("roster");
    let today = source.players(true).expect("roster");
    assert_eq!(all.len(), 16);
    assert_eq!(today.len(), 15);
    assert!(all.iter().any(|p| p.name == "Alperen Sengun"));
    assert!(!today.iter().any(|p| p.name == "Alperen Sengun"));
}

#[test]
fn player_picks_carry_the_matchup() {
    let source = DemoSource::new();
    let picks = source.player_picks("nikola jokic").expect("jokic has picks");
    assert_eq!(picks.predictions.len(), 3);
    assert_eq!(picks.event_info.home_team, "Denver Nuggets");
    assert_eq!(picks.event_info.away_team, "Oklahoma City Thunder");
    assert!(picks.event_info.has_schedule());
    let stats: Vec<&StatType> = picks.predictions.iter().map(|p| &p.stat_type).collect();
    assert_eq!(stats, vec![&StatType::Pts, &StatType::Reb, &StatType::Ast]);
}

#[test]
fn unknown_players_get_an_application_error() {
    let source = DemoSource::new();
    let err = source.player_picks("Nobody").expect_err("no such player");
    assert!(err.user_message().starts_with("No predictions found for Nobody."));
}

#[test]
fn hit_rates_agree_with_the_chart() {
    let source = DemoSource::new();
    let top = source.top_picks(50, 0.0).expect("top picks");
    for pick in &top.picks {
        let p = &pick.prediction;
        assert_eq!(p.recent_games.len(), 10);
        let geometry = ChartGeometry::compute(&p.recent_games, p.line, p.pick, 100.0, 100.0);
        let observed = geometry.observed_hit_rate().expect("history present");
        assert!((observed - p.hit_rate).abs() < 0.05, "{}", pick.player_name);
    }
}

#[test]
fn top_picks_respect_limit_and_threshold() {
    let source = DemoSource::new();
    let top = source.top_picks(5, 0.0).expect("top picks");
    assert_eq!(top.picks.len(), 5);
    assert_eq!(top.count, 5);
    assert_eq!(top.total_analyzed, 45);
    assert!(
        top.picks
            .windows(2)
            .all(|w| w[0].prediction.confidence >= w[1].prediction.confidence)
    );

    let none = source.top_picks(5, 101.0).expect("top picks");
    assert!(none.picks.is_empty());
}

#[test]
fn same_seed_same_slate() {
    let a = DemoSource::with_seed(7).top_picks(10, 0.0).expect("top picks");
    let b = DemoSource::with_seed(7).top_picks(10, 0.0).expect("top picks");
    assert_eq!(a, b);
}

#[test]
fn provider_commands_drive_the_state() {
    let source = DemoSource::new();
    let mut state = AppState::new();
    for cmd in state.mount(Screen::Players) {
        let delta = handle_command(&source, cmd);
        apply_delta(&mut state, delta);
    }
    assert!(matches!(state.players.state, FetchState::Success(_)));
    assert_eq!(state.roster().len(), 15);
    assert_eq!(state.id_cache().map(|cache| cache.len()), Some(16));
    assert!(state.headshot_for("Alperen Sengun").is_some());
}

#[test]
fn player_ids_command_requests_the_full_roster() {
    let source = DemoSource::new();
    let delta = handle_command(
        &source,
        ProviderCommand::FetchPlayerIds {
            id: props_terminal::state::RequestId(1),
        },
    );
    let Delta::PlayerIds { result, .. } = delta else {
        panic!("expected player ids delta");
    };
    assert_eq!(result.map(|players| players.len()), Ok(16));
}
