use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;

use props_terminal::api::{
    CONNECT_ERROR_MESSAGE, FetchError, Pick, StatType, Trend, parse_games_json,
    parse_player_picks_json, parse_players_json, parse_top_picks_json, sanitize_non_finite,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_games_fixture() {
    let today = parse_games_json(&read_fixture("games_today.json")).expect("fixture should parse");
    assert_eq!(today.date, "2026-01-05");
    assert_eq!(today.games.len(), 2);
    assert_eq!(today.games[0].game_code, "20260105/BOSNYK");
    assert_eq!(today.games[0].status_text, "7:30 pm ET");
    assert_eq!(today.games[0].arena_name, "Madison Square Garden");
}

#[test]
fn parses_players_fixture() {
    let players =
        parse_players_json(&read_fixture("all_players.json")).expect("fixture should parse");
    assert_eq!(players.len(), 4);
    assert_eq!(players[0].jersey, "0");
    assert_eq!(players[1].jersey, "11");
    assert!(!players[1].has_picks);
    assert!(players[2].has_picks);
    assert_eq!(players[3].jersey, "");
    assert_relative_eq!(players[2].pts, 29.1);
}

#[test]
fn parses_player_picks_fixture() {
    let picks =
        parse_player_picks_json(&read_fixture("player_picks.json")).expect("fixture should parse");
    assert_eq!(picks.player, "Jayson Tatum");
    assert!(picks.event_info.has_schedule());
    assert_eq!(picks.event_info.away_team, "Boston Celtics");
    assert_eq!(picks.predictions.len(), 4);

    let ast = &picks.predictions[0];
    assert_eq!(ast.stat_type, StatType::Ast);
    assert_eq!(ast.pick, Pick::Under);
    assert_eq!(ast.std_dev, None);
    assert_eq!(ast.trend, Trend::Down);
    assert_eq!(ast.recent_games.len(), 10);

    let pts = &picks.predictions[1];
    assert_eq!(pts.stat_type, StatType::Pts);
    assert_relative_eq!(pts.line, 25.0);
    assert_eq!(pts.recent_games, vec![30.0, 28.0, 22.0, 35.0, 19.0]);

    let other = &picks.predictions[2];
    assert_eq!(other.stat_type, StatType::Other("TOV".to_string()));
    assert_eq!(other.average, None);
    assert_eq!(other.last_5_avg, None);
    assert_eq!(other.trend, Trend::Neutral);
    assert!(other.recent_games.is_empty());
}

#[test]
fn parses_top_picks_fixture() {
    let top = parse_top_picks_json(&read_fixture("top_picks.json")).expect("fixture should parse");
    assert_eq!(top.count, 3);
    assert_eq!(top.total_analyzed, 142);
    assert_eq!(top.cache_age_seconds, Some(330.0));
    assert_eq!(top.picks[0].player_name, "Nikola Jokic");
    assert_eq!(top.picks[0].prediction.stat_type, StatType::Reb);
    assert_relative_eq!(top.picks[0].prediction.confidence, 84.2);
}

#[test]
fn application_errors_carry_the_server_message() {
    let err = parse_top_picks_json(&read_fixture("no_props_today.json"))
        .expect_err("success false should fail");
    assert_eq!(err, FetchError::Application("No props today".to_string()));
    assert_eq!(err.user_message(), "No props today");
}

#[test]
fn missing_error_text_uses_the_endpoint_fallback() {
    let err = parse_games_json(r#"{"success": false}"#).expect_err("should fail");
    assert_eq!(err.user_message(), "Failed to fetch games");

    let err = parse_player_picks_json(r#"{"success": false, "error": ""}"#)
        .expect_err("should fail");
    assert_eq!(err.user_message(), "No picks found for this player.");

    let err = parse_players_json(r#"{"success": false, "error": 404}"#).expect_err("should fail");
    assert_eq!(err.user_message(), "Failed to fetch players");
}

#[test]
fn server_error_text_is_not_trimmed() {
    let err = parse_top_picks_json(r#"{"success": false, "error": "  No props today  "}"#)
        .expect_err("success false should fail");
    assert_eq!(err.user_message(), "  No props today  ");
}

#[test]
fn malformed_bodies_are_transport_failures() {
    let err = parse_players_json("<html>502 Bad Gateway</html>").expect_err("not json");
    assert!(matches!(err, FetchError::Transport(_)));
    assert_eq!(err.user_message(), CONNECT_ERROR_MESSAGE);
}

#[test]
fn sanitizer_only_rewrites_tokens_outside_strings() {
    let raw = r#"{"a": NaN, "b": -Infinity, "c": "NaN stays", "d": "esc\"NaN", "e": [Infinity]}"#;
    assert_eq!(
        sanitize_non_finite(raw),
        r#"{"a": null, "b": null, "c": "NaN stays", "d": "esc\"NaN", "e": [null]}"#
    );
}
