use std::collections::VecDeque;
use std::sync::Arc;

use crate::api::{FetchError, GamesToday, Player, PlayerPicks, Prediction, TopPicks};
use crate::chart::{ChartGeometry, Hover, HoverState};
use crate::config::Settings;
use crate::filter::{Facets, FilterState};
use crate::headshots::{self, PlayerIdCache};
use crate::rankings;

/// Abstract chart extent; the renderer maps it onto whatever cells it gets.
pub const CHART_WIDTH: f64 = 100.0;
pub const CHART_HEIGHT: f64 = 100.0;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Games,
    Players,
    TopPicks,
    PlayerPicks { player: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// Fetch lifecycle of one logical resource. Only the latest issued request may resolve it.
#[derive(Debug, Clone, PartialEq)]
pub struct Remote<T> {
    pub state: FetchState<T>,
    key: String,
    latest: Option<RequestId>,
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Idle,
            key: String::new(),
            latest: None,
        }
    }
}

impl<T> Remote<T> {
    /// `false` when a request for the same key is already in flight.
    fn begin(&mut self, key: &str, id: RequestId) -> bool {
        if self.state.is_loading() && self.key == key {
            return false;
        }
        self.key = key.to_string();
        self.latest = Some(id);
        self.state = FetchState::Loading;
        true
    }

    /// Returns `false` and leaves the state untouched for a superseded response.
    fn resolve(&mut self, id: RequestId, result: Result<T, FetchError>) -> bool {
        if self.latest != Some(id) {
            return false;
        }
        self.state = match result {
            Ok(data) => FetchState::Success(data),
            Err(err) => FetchState::Error(err.user_message()),
        };
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCommand {
    FetchGames {
        id: RequestId,
    },
    FetchPlayers {
        id: RequestId,
        today_only: bool,
    },
    FetchPlayerIds {
        id: RequestId,
    },
    FetchPlayerPicks {
        id: RequestId,
        player: String,
    },
    FetchTopPicks {
        id: RequestId,
        limit: u32,
        min_confidence: f64,
    },
}

#[derive(Debug, Clone)]
pub enum Delta {
    Games {
        id: RequestId,
        result: Result<GamesToday, FetchError>,
    },
    Players {
        id: RequestId,
        result: Result<Vec<Player>, FetchError>,
    },
    PlayerIds {
        id: RequestId,
        result: Result<Vec<Player>, FetchError>,
    },
    PlayerPicks {
        id: RequestId,
        result: Result<PlayerPicks, FetchError>,
    },
    TopPicks {
        id: RequestId,
        result: Result<TopPicks, FetchError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayersFocus {
    #[default]
    Table,
    Positions,
    Teams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Search,
    MinPts,
    MaxPts,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayersView {
    pub filter: FilterState,
    pub min_text: String,
    pub max_text: String,
    pub focus: PlayersFocus,
    pub input: Option<InputField>,
    pub selected: usize,
    pub position_cursor: usize,
    pub team_cursor: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PicksView {
    pub selected: usize,
    pub hover: HoverState,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub back: Screen,
    pub top_limit: u32,
    pub min_confidence: f64,
    pub today_only: bool,
    pub headshot_cdn: String,
    pub games: Remote<GamesToday>,
    pub players: Remote<Vec<Player>>,
    pub player_ids: Remote<Arc<PlayerIdCache>>,
    pub top_picks: Remote<TopPicks>,
    pub player_picks: Remote<PlayerPicks>,
    pub games_selected: usize,
    pub players_view: PlayersView,
    pub picks_view: PicksView,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    next_request: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            screen: Screen::Games,
            back: Screen::Players,
            top_limit: settings.top_limit,
            min_confidence: settings.min_confidence,
            today_only: settings.today_only,
            headshot_cdn: settings.headshot_cdn.clone(),
            games: Remote::default(),
            players: Remote::default(),
            player_ids: Remote::default(),
            top_picks: Remote::default(),
            player_picks: Remote::default(),
            games_selected: 0,
            players_view: PlayersView::default(),
            picks_view: PicksView::default(),
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
            next_request: 0,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        if self.logs.len() >= MAX_LOGS {
            self.logs.pop_front();
        }
        self.logs.push_back(msg.into());
    }

    fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    /// Switches screens, resets the new screen's view state, and returns the fetches to issue.
    pub fn mount(&mut self, screen: Screen) -> Vec<ProviderCommand> {
        if let Screen::PlayerPicks { .. } = &screen {
            if !matches!(self.screen, Screen::PlayerPicks { .. }) {
                self.back = self.screen.clone();
            }
        }
        self.screen = screen;
        self.help_overlay = false;
        self.load_current()
    }

    /// Re-enters the current screen's `Loading` state after an error.
    pub fn retry(&mut self) -> Vec<ProviderCommand> {
        if self.current_error().is_none() {
            return Vec::new();
        }
        self.push_log("[INFO] Retrying");
        self.load_current()
    }

    pub fn go_back(&mut self) -> Vec<ProviderCommand> {
        match self.screen {
            Screen::PlayerPicks { .. } => {
                let back = self.back.clone();
                self.mount(back)
            }
            _ => Vec::new(),
        }
    }

    fn load_current(&mut self) -> Vec<ProviderCommand> {
        let mut cmds = Vec::new();
        match self.screen.clone() {
            Screen::Games => {
                self.games_selected = 0;
                let id = self.next_request_id();
                if self.games.begin("", id) {
                    cmds.push(ProviderCommand::FetchGames { id });
                }
            }
            Screen::Players => {
                self.players_view = PlayersView::default();
                let id = self.next_request_id();
                let key = if self.today_only { "today" } else { "all" };
                if self.players.begin(key, id) {
                    cmds.push(ProviderCommand::FetchPlayers {
                        id,
                        today_only: self.today_only,
                    });
                }
                cmds.extend(self.ensure_player_ids());
            }
            Screen::TopPicks => {
                self.picks_view = PicksView::default();
                let id = self.next_request_id();
                if self.top_picks.begin("", id) {
                    cmds.push(ProviderCommand::FetchTopPicks {
                        id,
                        limit: self.top_limit,
                        min_confidence: self.min_confidence,
                    });
                }
                cmds.extend(self.ensure_player_ids());
            }
            Screen::PlayerPicks { player } => {
                self.picks_view = PicksView::default();
                let id = self.next_request_id();
                if self.player_picks.begin(&player, id) {
                    cmds.push(ProviderCommand::FetchPlayerPicks { id, player });
                }
                cmds.extend(self.ensure_player_ids());
            }
        }
        cmds
    }

    /// The id lookup is fetched once per session; a failed attempt is retried on the next mount.
    fn ensure_player_ids(&mut self) -> Option<ProviderCommand> {
        if matches!(
            self.player_ids.state,
            FetchState::Success(_) | FetchState::Loading
        ) {
            return None;
        }
        let id = self.next_request_id();
        self.player_ids
            .begin("", id)
            .then_some(ProviderCommand::FetchPlayerIds { id })
    }

    pub fn current_error(&self) -> Option<&str> {
        match &self.screen {
            Screen::Games => self.games.state.error(),
            Screen::Players => self.players.state.error(),
            Screen::TopPicks => self.top_picks.state.error(),
            Screen::PlayerPicks { .. } => self.player_picks.state.error(),
        }
    }

    pub fn current_loading(&self) -> bool {
        match &self.screen {
            Screen::Games => self.games.state.is_loading(),
            Screen::Players => self.players.state.is_loading(),
            Screen::TopPicks => self.top_picks.state.is_loading(),
            Screen::PlayerPicks { .. } => self.player_picks.state.is_loading(),
        }
    }

    pub fn id_cache(&self) -> Option<&PlayerIdCache> {
        self.player_ids.state.data().map(|cache| cache.as_ref())
    }

    pub fn headshot_for(&self, name: &str) -> Option<String> {
        headshots::headshot_for(self.id_cache(), &self.headshot_cdn, name)
    }

    // Games

    pub fn games_list(&self) -> &[crate::api::Game] {
        self.games
            .state
            .data()
            .map(|g| g.games.as_slice())
            .unwrap_or(&[])
    }

    pub fn select_game_next(&mut self) {
        self.games_selected = step_index(self.games_selected, self.games_list().len(), true);
    }

    pub fn select_game_prev(&mut self) {
        self.games_selected = step_index(self.games_selected, self.games_list().len(), false);
    }

    // Players

    pub fn roster(&self) -> &[Player] {
        self.players.state.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn facets(&self) -> Facets {
        Facets::from_players(self.roster())
    }

    pub fn filtered_players(&self) -> Vec<&Player> {
        self.players_view.filter.apply(self.roster())
    }

    pub fn selected_player(&self) -> Option<&Player> {
        self.filtered_players()
            .get(self.players_view.selected)
            .copied()
    }

    pub fn cycle_players_focus(&mut self) {
        self.players_view.focus = match self.players_view.focus {
            PlayersFocus::Table => PlayersFocus::Positions,
            PlayersFocus::Positions => PlayersFocus::Teams,
            PlayersFocus::Teams => PlayersFocus::Table,
        };
    }

    pub fn players_move(&mut self, forward: bool) {
        match self.players_view.focus {
            PlayersFocus::Table => {
                let total = self.filtered_players().len();
                self.players_view.selected =
                    step_index(self.players_view.selected, total, forward);
            }
            PlayersFocus::Positions => {
                let total = self.facets().positions.len();
                self.players_view.position_cursor =
                    step_index(self.players_view.position_cursor, total, forward);
            }
            PlayersFocus::Teams => {
                let total = self.facets().teams.len();
                self.players_view.team_cursor =
                    step_index(self.players_view.team_cursor, total, forward);
            }
        }
    }

    /// Toggles the facet value under the cursor of the focused facet list.
    pub fn toggle_focused_facet(&mut self) {
        let facets = self.facets();
        match self.players_view.focus {
            PlayersFocus::Table => return,
            PlayersFocus::Positions => {
                let Some(pos) = facets.positions.get(self.players_view.position_cursor) else {
                    return;
                };
                self.players_view.filter.toggle_position(pos);
            }
            PlayersFocus::Teams => {
                let Some(team) = facets.teams.get(self.players_view.team_cursor) else {
                    return;
                };
                self.players_view.filter.toggle_team(team);
            }
        }
        self.clamp_players_selection();
    }

    pub fn begin_input(&mut self, field: InputField) {
        self.players_view.input = Some(field);
    }

    pub fn finish_input(&mut self) {
        self.players_view.input = None;
    }

    pub fn input_char(&mut self, ch: char) {
        let Some(field) = self.players_view.input else {
            return;
        };
        match field {
            InputField::Search => self.players_view.filter.search_text.push(ch),
            InputField::MinPts | InputField::MaxPts => {
                if !(ch.is_ascii_digit() || ch == '.') {
                    return;
                }
                self.input_buffer_mut(field).push(ch);
            }
        }
        self.sync_range_bounds();
        self.clamp_players_selection();
    }

    pub fn input_backspace(&mut self) {
        let Some(field) = self.players_view.input else {
            return;
        };
        match field {
            InputField::Search => {
                self.players_view.filter.search_text.pop();
            }
            InputField::MinPts | InputField::MaxPts => {
                self.input_buffer_mut(field).pop();
            }
        }
        self.sync_range_bounds();
        self.clamp_players_selection();
    }

    fn input_buffer_mut(&mut self, field: InputField) -> &mut String {
        match field {
            InputField::MaxPts => &mut self.players_view.max_text,
            _ => &mut self.players_view.min_text,
        }
    }

    fn sync_range_bounds(&mut self) {
        let view = &mut self.players_view;
        view.filter.set_min_text(&view.min_text);
        view.filter.set_max_text(&view.max_text);
    }

    pub fn clear_filters(&mut self) {
        let view = &mut self.players_view;
        view.filter.clear();
        view.min_text.clear();
        view.max_text.clear();
        view.input = None;
        view.selected = 0;
    }

    fn clamp_players_selection(&mut self) {
        let total = self.filtered_players().len();
        self.players_view.selected = clamp_index(self.players_view.selected, total);
    }

    // Picks

    /// Predictions on the current picks screen, in display order.
    pub fn visible_predictions(&self) -> Vec<&Prediction> {
        match &self.screen {
            Screen::TopPicks => self
                .top_picks
                .state
                .data()
                .map(|top| top.picks.iter().map(|p| &p.prediction).collect())
                .unwrap_or_default(),
            Screen::PlayerPicks { .. } => self
                .player_picks
                .state
                .data()
                .map(|picks| rankings::order_player_predictions(&picks.predictions))
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    pub fn focused_prediction(&self) -> Option<&Prediction> {
        self.visible_predictions()
            .get(self.picks_view.selected)
            .copied()
    }

    pub fn focused_geometry(&self) -> Option<ChartGeometry> {
        self.focused_prediction()
            .map(|p| chart_geometry(p, CHART_WIDTH, CHART_HEIGHT))
    }

    pub fn select_card(&mut self, forward: bool) {
        let total = self.visible_predictions().len();
        self.picks_view.selected = step_index(self.picks_view.selected, total, forward);
        self.picks_view.hover.clear();
    }

    /// `x` in chart units; outside the chart clears the hover.
    pub fn hover_chart_at(&mut self, x: f64) -> Option<Hover> {
        let geometry = self.focused_geometry()?;
        self.picks_view.hover.hover_at(&geometry, x)
    }

    pub fn step_hover(&mut self, forward: bool) -> Option<Hover> {
        let geometry = self.focused_geometry()?;
        self.picks_view.hover.step(&geometry, forward)
    }

    pub fn clear_hover(&mut self) {
        self.picks_view.hover.clear();
    }

    pub fn current_hover(&self) -> Option<Hover> {
        let geometry = self.focused_geometry()?;
        self.picks_view.hover.current(&geometry)
    }

    /// Player to open from the current selection, if any.
    pub fn selected_player_name(&self) -> Option<String> {
        match &self.screen {
            Screen::Players => self.selected_player().map(|p| p.name.clone()),
            Screen::TopPicks => self
                .top_picks
                .state
                .data()
                .and_then(|top| top.picks.get(self.picks_view.selected))
                .map(|p| p.player_name.clone()),
            _ => None,
        }
    }
}

pub fn chart_geometry(prediction: &Prediction, width: f64, height: f64) -> ChartGeometry {
    ChartGeometry::compute(
        &prediction.recent_games,
        prediction.line,
        prediction.pick,
        width,
        height,
    )
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::Games { id, result } => {
            let failure = failure_detail(&result);
            let applied = state.games.resolve(id, result);
            log_outcome(state, "games", applied, failure);
            state.games_selected = clamp_index(state.games_selected, state.games_list().len());
        }
        Delta::Players { id, result } => {
            let failure = failure_detail(&result);
            let applied = state.players.resolve(id, result);
            log_outcome(state, "players", applied, failure);
            state.clamp_players_selection();
        }
        Delta::PlayerIds { id, result } => {
            let failure = failure_detail(&result);
            let result = result.map(|players| PlayerIdCache::shared(&players));
            let applied = state.player_ids.resolve(id, result);
            if applied && failure.is_none() {
                let count = state.id_cache().map(PlayerIdCache::len).unwrap_or(0);
                tracing::info!(count, "player id cache populated");
            }
            // Headshots degrade silently; the failure only reaches the console.
            log_outcome(state, "player ids", applied, failure);
        }
        Delta::PlayerPicks { id, result } => {
            let failure = failure_detail(&result);
            let applied = state.player_picks.resolve(id, result);
            log_outcome(state, "player picks", applied, failure);
        }
        Delta::TopPicks { id, result } => {
            let failure = failure_detail(&result);
            let applied = state.top_picks.resolve(id, result);
            log_outcome(state, "top picks", applied, failure);
        }
    }
}

fn failure_detail<T>(result: &Result<T, FetchError>) -> Option<String> {
    result.as_ref().err().map(|err| err.to_string())
}

fn log_outcome(state: &mut AppState, resource: &str, applied: bool, failure: Option<String>) {
    if !applied {
        tracing::debug!(resource, "discarded superseded response");
        state.push_log(format!("[INFO] Discarded stale {resource} response"));
        return;
    }
    if let Some(detail) = failure {
        tracing::warn!(resource, %detail, "fetch failed");
        state.push_log(format!("[WARN] {resource} fetch failed: {detail}"));
    }
}

fn step_index(current: usize, total: usize, forward: bool) -> usize {
    if total == 0 {
        return 0;
    }
    if forward {
        (current + 1) % total
    } else if current == 0 || current >= total {
        total - 1
    } else {
        current - 1
    }
}

fn clamp_index(current: usize, total: usize) -> usize {
    if total == 0 { 0 } else { current.min(total - 1) }
}
