use chrono::{DateTime, Local, NaiveDateTime};

use crate::api::{Pick, Trend};

pub const MISSING: &str = "—";

pub fn fmt_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1}"),
        _ => MISSING.to_string(),
    }
}

/// Plain number as the backend sent it: `70`, `66.7`.
pub fn fmt_number(value: f64) -> String {
    if value.is_finite() {
        format!("{value}")
    } else {
        MISSING.to_string()
    }
}

pub fn fmt_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{value}%")
    } else {
        MISSING.to_string()
    }
}

pub fn trend_label(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "▲ Trending up",
        Trend::Down => "▼ Trending down",
        Trend::Neutral => "— Neutral",
    }
}

pub fn pick_line(line: f64, stat_code: &str, pick: Pick) -> String {
    format!("{} {stat_code} {}", fmt_number(line), pick.label())
}

/// Text gauge, e.g. `[██████····]`.
pub fn confidence_gauge(confidence: f64, cells: usize) -> String {
    let pct = if confidence.is_finite() {
        confidence.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let filled = ((pct / 100.0) * cells as f64).round() as usize;
    let filled = filled.min(cells);
    format!("[{}{}]", "█".repeat(filled), "·".repeat(cells - filled))
}

/// Local-time rendering of an ISO timestamp; unparseable input is returned as-is.
pub fn format_commence_time(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt
            .with_timezone(&Local)
            .format("%a, %b %-d, %-I:%M %p")
            .to_string();
    }
    const FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return format!("{} UTC", dt.format("%a, %b %-d, %-I:%M %p"));
        }
    }
    trimmed.to_string()
}

pub fn format_game_date(raw: &str) -> String {
    match chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%A, %B %-d, %Y").to_string(),
        Err(_) => raw.trim().to_string(),
    }
}

pub fn games_scheduled_label(count: usize) -> String {
    if count == 1 {
        "1 game scheduled".to_string()
    } else {
        format!("{count} games scheduled")
    }
}
