use std::collections::BTreeSet;

use crate::api::Player;

pub const POSITION_ORDER: [&str; 5] = ["PG", "SG", "SF", "PF", "C"];

/// Roster filter; a player passes only when every active criterion passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search_text: String,
    pub selected_teams: BTreeSet<String>,
    pub selected_positions: BTreeSet<String>,
    /// Bounds over season points per game.
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matches(&self, player: &Player) -> bool {
        self.matches_search(player)
            && set_allows(&self.selected_teams, &player.team)
            && set_allows(&self.selected_positions, &player.position)
            && self.matches_range(player.pts)
    }

    pub fn apply<'a>(&self, players: &'a [Player]) -> Vec<&'a Player> {
        players.iter().filter(|p| self.matches(p)).collect()
    }

    pub fn apply_indices(&self, players: &[Player]) -> Vec<usize> {
        players
            .iter()
            .enumerate()
            .filter(|(_, p)| self.matches(p))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search_text.trim().is_empty()
            || !self.selected_teams.is_empty()
            || !self.selected_positions.is_empty()
            || self.min_value.is_some()
            || self.max_value.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn toggle_team(&mut self, team: &str) {
        toggle(&mut self.selected_teams, team);
    }

    pub fn toggle_position(&mut self, position: &str) {
        toggle(&mut self.selected_positions, position);
    }

    /// Numeric text entry: blank or unparseable input unsets the bound.
    pub fn set_min_text(&mut self, raw: &str) {
        self.min_value = parse_bound(raw);
    }

    pub fn set_max_text(&mut self, raw: &str) {
        self.max_value = parse_bound(raw);
    }

    fn matches_search(&self, player: &Player) -> bool {
        let query = self.search_text.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        player.name.to_lowercase().contains(&query)
            || player.team.to_lowercase().contains(&query)
            || player.position.to_lowercase().contains(&query)
    }

    fn matches_range(&self, value: f64) -> bool {
        self.min_value.is_none_or(|min| value >= min)
            && self.max_value.is_none_or(|max| value <= max)
    }
}

fn set_allows(set: &BTreeSet<String>, value: &str) -> bool {
    set.is_empty() || set.contains(value)
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Distinct facet values of the current roster. Always derived, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub teams: Vec<String>,
    pub positions: Vec<String>,
}

impl Facets {
    pub fn from_players(players: &[Player]) -> Self {
        let teams: BTreeSet<&str> = players
            .iter()
            .map(|p| p.team.as_str())
            .filter(|t| !t.is_empty())
            .collect();
        let positions: BTreeSet<&str> = players
            .iter()
            .map(|p| p.position.as_str())
            .filter(|pos| !pos.is_empty())
            .collect();

        let mut positions: Vec<String> = positions.into_iter().map(str::to_string).collect();
        // BTreeSet already sorted alphabetically, so the stable sort keeps unknown
        // positions alphabetical after the canonical ones.
        positions.sort_by_key(|pos| position_rank(pos));

        Self {
            teams: teams.into_iter().map(str::to_string).collect(),
            positions,
        }
    }
}

pub fn position_rank(position: &str) -> usize {
    POSITION_ORDER
        .iter()
        .position(|p| *p == position)
        .unwrap_or(POSITION_ORDER.len())
}
