use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5001";
pub const DEFAULT_HEADSHOT_CDN: &str = "https://cdn.nba.com/headshots/nba/latest/260x190";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    Api,
    Demo,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub top_limit: u32,
    pub min_confidence: f64,
    pub today_only: bool,
    pub headshot_cdn: String,
    pub source: SourceMode,
    pub http_timeout: Duration,
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            top_limit: 5,
            min_confidence: 65.0,
            today_only: true,
            headshot_cdn: DEFAULT_HEADSHOT_CDN.to_string(),
            source: SourceMode::Api,
            http_timeout: Duration::from_secs(10),
            log_dir: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup; blank or malformed values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|val| !val.trim().is_empty());

        let api_url = get("PROPS_API_URL")
            .map(|val| val.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);
        let top_limit = get("PROPS_TOP_LIMIT")
            .and_then(|val| val.trim().parse::<u32>().ok())
            .unwrap_or(defaults.top_limit)
            .clamp(1, 50);
        let min_confidence = get("PROPS_MIN_CONFIDENCE")
            .and_then(|val| val.trim().parse::<f64>().ok())
            .filter(|val| val.is_finite())
            .unwrap_or(defaults.min_confidence)
            .clamp(0.0, 100.0);
        let today_only = get("PROPS_TODAY_ONLY")
            .and_then(|val| parse_bool(&val))
            .unwrap_or(defaults.today_only);
        let headshot_cdn = get("PROPS_HEADSHOT_CDN")
            .map(|val| val.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.headshot_cdn);
        let source = match get("PROPS_SOURCE")
            .map(|val| val.trim().to_lowercase())
            .as_deref()
        {
            Some("demo") | Some("offline") => SourceMode::Demo,
            _ => defaults.source,
        };
        let http_timeout = get("PROPS_HTTP_TIMEOUT_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .map(|secs| Duration::from_secs(secs.clamp(1, 120)))
            .unwrap_or(defaults.http_timeout);
        let log_dir = get("PROPS_LOG_DIR").map(|val| PathBuf::from(val.trim()));

        Self {
            api_url,
            top_limit,
            min_confidence,
            today_only,
            headshot_cdn,
            source,
            http_timeout,
            log_dir,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
