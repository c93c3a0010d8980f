use props_terminal::api::Player;
use props_terminal::filter::{Facets, FilterState};

fn player(name: &str, team: &str, position: &str, pts: f64) -> Player {
    Player {
        id: 1,
        name: name.to_string(),
        team: team.to_string(),
        jersey: String::new(),
        position: position.to_string(),
        pts,
        reb: 0.0,
        ast: 0.0,
        has_picks: true,
    }
}

fn roster() -> Vec<Player> {
    vec![
        player("Jayson Tatum", "BOS", "SF", 26.8),
        player("Luke Kornet", "BOS", "C", 5.0),
        player("Jalen Brunson", "NYK", "PG", 27.9),
        player("Nikola Jokic", "DEN", "C", 29.1),
        player("Chet Holmgren", "OKC", "F-C", 16.7),
        player("Jamal Murray", "DEN", "PG", 21.0),
    ]
}

fn names<'a>(players: &[&'a Player]) -> Vec<&'a str> {
    players.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn empty_filter_is_the_identity() {
    let players = roster();
    let filter = FilterState::new();
    assert!(!filter.has_active_filters());
    assert_eq!(filter.apply_indices(&players), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn criteria_combine_with_and() {
    let players = vec![player("A", "BOS", "SF", 25.0), player("B", "BOS", "SF", 5.0)];
    let mut filter = FilterState::new();
    filter.toggle_team("BOS");
    filter.set_min_text("10");
    assert_eq!(names(&filter.apply(&players)), vec!["A"]);
}

#[test]
fn search_matches_name_team_or_position_case_insensitively() {
    let players = roster();
    let mut filter = FilterState::new();

    filter.search_text = "  jOkIc ".to_string();
    assert_eq!(names(&filter.apply(&players)), vec!["Nikola Jokic"]);

    filter.search_text = "den".to_string();
    assert_eq!(names(&filter.apply(&players)), vec!["Nikola Jokic", "Jamal Murray"]);

    filter.search_text = "pg".to_string();
    assert_eq!(names(&filter.apply(&players)), vec!["Jalen Brunson", "Jamal Murray"]);
}

#[test]
fn sets_within_one_facet_are_unions() {
    let players = roster();
    let mut filter = FilterState::new();
    filter.toggle_position("PG");
    filter.toggle_position("C");
    assert_eq!(
        names(&filter.apply(&players)),
        vec!["Luke Kornet", "Jalen Brunson", "Nikola Jokic", "Jamal Murray"]
    );

    filter.toggle_team("DEN");
    assert_eq!(names(&filter.apply(&players)), vec!["Nikola Jokic", "Jamal Murray"]);

    filter.toggle_position("C");
    assert_eq!(names(&filter.apply(&players)), vec!["Jamal Murray"]);
}

#[test]
fn range_bounds_are_inclusive_and_blank_text_unsets_them() {
    let players = roster();
    let mut filter = FilterState::new();
    filter.set_min_text("21");
    filter.set_max_text("27.9");
    assert_eq!(
        names(&filter.apply(&players)),
        vec!["Jayson Tatum", "Jalen Brunson", "Jamal Murray"]
    );

    filter.set_min_text("");
    filter.set_max_text("abc");
    assert_eq!(filter.min_value, None);
    assert_eq!(filter.max_value, None);
    assert_eq!(filter.apply(&players).len(), players.len());
}

#[test]
fn clearing_restores_the_original_order() {
    let players = roster();
    let mut filter = FilterState::new();
    filter.search_text = "a".to_string();
    filter.toggle_team("BOS");
    filter.set_min_text("20");
    assert!(filter.has_active_filters());
    assert_eq!(names(&filter.apply(&players)), vec!["Jayson Tatum"]);

    filter.clear();
    assert!(!filter.has_active_filters());
    assert_eq!(filter, FilterState::default());
    assert_eq!(filter.apply_indices(&players), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn whitespace_search_is_not_an_active_filter() {
    let mut filter = FilterState::new();
    filter.search_text = "   ".to_string();
    assert!(!filter.has_active_filters());
}

#[test]
fn facets_are_sorted_teams_and_canonical_positions() {
    let mut players = roster();
    players.push(player("Two Way", "", "G-F", 2.0));
    let facets = Facets::from_players(&players);
    assert_eq!(facets.teams, vec!["BOS", "DEN", "NYK", "OKC"]);
    assert_eq!(facets.positions, vec!["PG", "SF", "C", "F-C", "G-F"]);
}

#[test]
fn facets_of_an_empty_roster_are_empty() {
    assert_eq!(Facets::from_players(&[]), Facets::default());
}
