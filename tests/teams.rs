use props_terminal::api::Game;
use props_terminal::teams::{ALL_TEAMS, Team, TeamBadge, resolve_matchup, ticker_text};

fn game(code: &str, status: &str) -> Game {
    Game {
        game_code: code.to_string(),
        status_text: status.to_string(),
        status_id: 1,
        arena_name: "Arena".to_string(),
    }
}

#[test]
fn splits_away_and_home_after_the_slash() {
    let matchup = resolve_matchup("20260105/BOSNYK");
    assert_eq!(matchup.away_code, "BOS");
    assert_eq!(matchup.home_code, "NYK");
    assert_eq!(matchup.away_full_name, "Boston Celtics");
    assert_eq!(matchup.home_full_name, "New York Knicks");
}

#[test]
fn prefix_content_is_ignored() {
    for code in ["x/DENLAL", "0000/DENLAL", "/DENLAL", "weird prefix!/DENLAL"] {
        let matchup = resolve_matchup(code);
        assert_eq!(matchup.away_code, "DEN", "{code}");
        assert_eq!(matchup.home_code, "LAL", "{code}");
    }
}

#[test]
fn unknown_codes_fall_back_to_the_raw_code() {
    let matchup = resolve_matchup("20260105/XYZLAL");
    assert_eq!(matchup.away_code, "XYZ");
    assert_eq!(matchup.away_full_name, "XYZ");
    assert_eq!(matchup.home_full_name, "LA Lakers");
}

#[test]
fn code_lookup_is_case_sensitive() {
    let matchup = resolve_matchup("0022400001/bosnyk");
    assert_eq!(matchup.away_code, "bos");
    assert_eq!(matchup.away_full_name, "bos");
    assert_eq!(matchup.home_full_name, "nyk");
    assert_eq!(Team::from_code("bos"), None);
    assert_eq!(Team::from_code(" BOS"), None);
    assert_eq!(TeamBadge::for_code("nyk"), TeamBadge::Unknown);
}

#[test]
fn malformed_codes_do_not_panic() {
    let no_slash = resolve_matchup("BOSNYK");
    assert_eq!(no_slash.away_code, "");
    assert_eq!(no_slash.home_code, "");

    let short = resolve_matchup("1/BO");
    assert_eq!(short.away_code, "BO");
    assert_eq!(short.home_code, "");
}

#[test]
fn every_team_round_trips_through_its_code_and_name() {
    for team in ALL_TEAMS {
        assert_eq!(Team::from_code(team.code()), Some(team));
        assert_eq!(Team::from_display_name(&team.full_name()), Some(team));
    }
}

#[test]
fn display_names_resolve_by_nickname_or_unique_city() {
    assert_eq!(Team::from_display_name("Los Angeles Lakers"), Some(Team::LAL));
    assert_eq!(Team::from_display_name("Los Angeles Clippers"), Some(Team::LAC));
    assert_eq!(Team::from_display_name("Philadelphia 76ers"), Some(Team::PHI));
    assert_eq!(Team::from_display_name("celtics"), Some(Team::BOS));
    assert_eq!(Team::from_display_name("Seattle SuperSonics"), None);
    assert_eq!(Team::from_display_name(""), None);
}

#[test]
fn unknown_badges_use_the_neutral_fallback() {
    assert_eq!(TeamBadge::for_code("XYZ"), TeamBadge::Unknown);
    assert_eq!(TeamBadge::Unknown.rgb(), (90, 90, 90));
    assert_eq!(TeamBadge::Unknown.label(), "");

    let boston = TeamBadge::for_display_name("Boston Celtics");
    assert_eq!(boston, TeamBadge::Known(Team::BOS));
    assert_eq!(boston.label(), "BOS");
}

#[test]
fn ticker_joins_games_and_defaults_blank_status() {
    let games = vec![game("1/BOSNYK", "7:30 pm ET"), game("1/DENLAL", "  ")];
    assert_eq!(
        ticker_text(&games),
        "BOS vs NYK @ 7:30 pm ET  |  DEN vs LAL @ TBD"
    );
    assert_eq!(ticker_text(&[]), "");
}
