use std::fmt;

use reqwest::Url;
use reqwest::blocking::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::config::Settings;
use crate::http_client::http_client;

pub const CONNECT_ERROR_MESSAGE: &str = "Could not connect to the server";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never completed, or the body could not be read as a payload.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The backend answered `{success: false, error}`.
    #[error("{0}")]
    Application(String),
}

impl FetchError {
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Transport(_) => CONNECT_ERROR_MESSAGE.to_string(),
            FetchError::Application(msg) => msg.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatType {
    Pts,
    Reb,
    Ast,
    Blk,
    Stl,
    Fg3m,
    Other(String),
}

impl StatType {
    pub fn code(&self) -> &str {
        match self {
            StatType::Pts => "PTS",
            StatType::Reb => "REB",
            StatType::Ast => "AST",
            StatType::Blk => "BLK",
            StatType::Stl => "STL",
            StatType::Fg3m => "FG3M",
            StatType::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StatType::Pts => "Points",
            StatType::Reb => "Rebounds",
            StatType::Ast => "Assists",
            StatType::Blk => "Blocks",
            StatType::Stl => "Steals",
            StatType::Fg3m => "3-Pointers",
            StatType::Other(raw) => raw,
        }
    }
}

impl From<String> for StatType {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PTS" => StatType::Pts,
            "REB" => StatType::Reb,
            "AST" => StatType::Ast,
            "BLK" => StatType::Blk,
            "STL" => StatType::Stl,
            "FG3M" => StatType::Fg3m,
            _ => StatType::Other(raw),
        }
    }
}

impl<'de> Deserialize<'de> for StatType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(StatType::from)
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pick {
    Over,
    Under,
}

impl Pick {
    pub fn label(self) -> &'static str {
        match self {
            Pick::Over => "OVER",
            Pick::Under => "UNDER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trend {
    Up,
    Down,
    #[default]
    Neutral,
}

impl<'de> Deserialize<'de> for Trend {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "up" => Trend::Up,
            "down" => Trend::Down,
            _ => Trend::Neutral,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub stat_type: StatType,
    pub pick: Pick,
    #[serde(default)]
    pub line: f64,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default, deserialize_with = "finite_or_none")]
    pub average: Option<f64>,
    #[serde(default, deserialize_with = "finite_or_none")]
    pub last_5_avg: Option<f64>,
    #[serde(default, deserialize_with = "finite_or_none")]
    pub std_dev: Option<f64>,
    #[serde(default)]
    pub hit_rate: f64,
    #[serde(default)]
    pub trend: Trend,
    /// Most recent game first.
    #[serde(default)]
    pub recent_games: Vec<f64>,
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    #[serde(default)]
    pub commence_time: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RankedPrediction {
    pub player_name: String,
    #[serde(flatten)]
    pub prediction: Prediction,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopPicks {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub total_analyzed: usize,
    #[serde(default, deserialize_with = "finite_or_none")]
    pub cache_age_seconds: Option<f64>,
    #[serde(default)]
    pub picks: Vec<RankedPrediction>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EventInfo {
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    #[serde(default)]
    pub commence_time: String,
}

impl EventInfo {
    /// The backend fills `N/A` when it has no event for the player.
    pub fn has_schedule(&self) -> bool {
        let time = self.commence_time.trim();
        !time.is_empty() && time != "N/A"
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerPicks {
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub event_info: EventInfo,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub jersey: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub pts: f64,
    #[serde(default)]
    pub reb: f64,
    #[serde(default)]
    pub ast: f64,
    #[serde(default = "default_true")]
    pub has_picks: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Game {
    #[serde(rename = "GAMECODE")]
    pub game_code: String,
    #[serde(rename = "GAME_STATUS_TEXT", default)]
    pub status_text: String,
    #[serde(rename = "GAME_STATUS_ID", default)]
    pub status_id: i64,
    #[serde(rename = "ARENA_NAME", default)]
    pub arena_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GamesToday {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub games: Vec<Game>,
}

#[derive(Debug, Deserialize)]
struct PlayersEnvelope {
    #[serde(default)]
    players: Vec<Player>,
}

fn default_true() -> bool {
    true
}

fn finite_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite()))
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

pub fn parse_games_json(raw: &str) -> Result<GamesToday, FetchError> {
    parse_envelope(raw, "Failed to fetch games")
}

pub fn parse_players_json(raw: &str) -> Result<Vec<Player>, FetchError> {
    parse_envelope::<PlayersEnvelope>(raw, "Failed to fetch players").map(|env| env.players)
}

pub fn parse_player_picks_json(raw: &str) -> Result<PlayerPicks, FetchError> {
    parse_envelope(raw, "No picks found for this player.")
}

pub fn parse_top_picks_json(raw: &str) -> Result<TopPicks, FetchError> {
    parse_envelope(raw, "Could not load top picks.")
}

fn parse_envelope<T: serde::de::DeserializeOwned>(
    raw: &str,
    fallback_error: &str,
) -> Result<T, FetchError> {
    let cleaned = sanitize_non_finite(raw.trim());
    let root: Value = serde_json::from_str(&cleaned)
        .map_err(|err| FetchError::Transport(format!("invalid json: {err}")))?;
    let success = root
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !success {
        let message = root
            .get("error")
            .and_then(Value::as_str)
            .filter(|msg| !msg.is_empty())
            .unwrap_or(fallback_error);
        return Err(FetchError::Application(message.to_string()));
    }
    serde_json::from_value(root)
        .map_err(|err| FetchError::Transport(format!("unexpected payload: {err}")))
}

/// Python backends serialise missing floats as bare `NaN`/`Infinity`, which is not JSON.
/// Rewrites those tokens to `null` outside string literals.
pub fn sanitize_non_finite(raw: &str) -> String {
    const TOKENS: [&str; 4] = ["-Infinity", "Infinity", "-NaN", "NaN"];

    let mut out = String::with_capacity(raw.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = raw;

    while let Some(ch) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
            continue;
        }

        if ch == '"' {
            in_string = true;
            out.push(ch);
            rest = &rest[1..];
            continue;
        }

        if let Some(token) = TOKENS.iter().find(|token| rest.starts_with(**token)) {
            out.push_str("null");
            rest = &rest[token.len()..];
            continue;
        }

        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}

/// Read-side contract of the prediction backend.
pub trait PropsSource: Send {
    fn games_today(&self) -> Result<GamesToday, FetchError>;
    fn players(&self, today_only: bool) -> Result<Vec<Player>, FetchError>;
    fn player_picks(&self, player_name: &str) -> Result<PlayerPicks, FetchError>;
    fn top_picks(&self, limit: u32, min_confidence: f64) -> Result<TopPicks, FetchError>;
}

pub struct ApiClient {
    base: Url,
    client: &'static Client,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let client = http_client(settings.http_timeout)?;
        let base = parse_base_url(&settings.api_url)?;
        Ok(Self { base, client })
    }

    pub fn games_url(&self) -> Url {
        self.endpoint(&["api", "games", "today"])
    }

    pub fn players_url(&self, today_only: bool) -> Url {
        let mut url = self.endpoint(&["api", "allPlayers"]);
        if today_only {
            url.query_pairs_mut().append_pair("today_only", "true");
        }
        url
    }

    pub fn player_picks_url(&self, player_name: &str) -> Url {
        self.endpoint(&["api", "picks", "player", player_name])
    }

    pub fn top_picks_url(&self, limit: u32, min_confidence: f64) -> Url {
        let mut url = self.endpoint(&["api", "picks", "top"]);
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("min_confidence", &format_confidence(min_confidence));
        url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get_text(&self, url: Url) -> Result<String, FetchError> {
        tracing::debug!(%url, "GET");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|err| FetchError::Transport(format!("request failed: {err}")))?;
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|err| FetchError::Transport(format!("failed reading body: {err}")))?;
        if !status.is_success() {
            // Error payloads arrive with 4xx/5xx; only treat the status as a transport
            // failure when the body carries no envelope.
            tracing::debug!(%url, %status, "non-success status");
            if serde_json::from_str::<Value>(&sanitize_non_finite(&body)).is_err() {
                return Err(FetchError::Transport(format!("http {status}")));
            }
        }
        Ok(body)
    }
}

impl PropsSource for ApiClient {
    fn games_today(&self) -> Result<GamesToday, FetchError> {
        let body = self.get_text(self.games_url())?;
        parse_games_json(&body)
    }

    fn players(&self, today_only: bool) -> Result<Vec<Player>, FetchError> {
        let body = self.get_text(self.players_url(today_only))?;
        parse_players_json(&body)
    }

    fn player_picks(&self, player_name: &str) -> Result<PlayerPicks, FetchError> {
        let body = self.get_text(self.player_picks_url(player_name))?;
        parse_player_picks_json(&body)
    }

    fn top_picks(&self, limit: u32, min_confidence: f64) -> Result<TopPicks, FetchError> {
        let body = self.get_text(self.top_picks_url(limit, min_confidence))?;
        parse_top_picks_json(&body)
    }
}

fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    use anyhow::Context;

    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).with_context(|| format!("invalid api url: {raw}"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("api url cannot be a base: {raw}");
    }
    Ok(url)
}

fn format_confidence(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
