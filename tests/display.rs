use props_terminal::api::{Pick, Trend};
use props_terminal::display::{
    MISSING, confidence_gauge, fmt_number, fmt_percent, fmt_stat, format_commence_time,
    format_game_date, games_scheduled_label, pick_line, trend_label,
};

#[test]
fn missing_numbers_render_as_a_dash() {
    assert_eq!(fmt_stat(None), MISSING);
    assert_eq!(fmt_stat(Some(f64::NAN)), MISSING);
    assert_eq!(fmt_stat(Some(26.84)), "26.8");
    assert_eq!(fmt_stat(Some(0.0)), "0.0");
    assert_eq!(fmt_number(f64::INFINITY), MISSING);
    assert_eq!(fmt_percent(f64::NAN), MISSING);
}

#[test]
fn numbers_keep_the_backend_precision() {
    assert_eq!(fmt_number(70.0), "70");
    assert_eq!(fmt_number(72.5), "72.5");
    assert_eq!(fmt_percent(60.0), "60%");
    assert_eq!(pick_line(25.0, "PTS", Pick::Over), "25 PTS OVER");
    assert_eq!(pick_line(5.5, "AST", Pick::Under), "5.5 AST UNDER");
}

#[test]
fn gauge_fills_proportionally() {
    assert_eq!(confidence_gauge(50.0, 10), "[█████·····]");
    assert_eq!(confidence_gauge(150.0, 4), "[████]");
    assert_eq!(confidence_gauge(f64::NAN, 3), "[···]");
}

#[test]
fn trend_labels() {
    assert_eq!(trend_label(Trend::Up), "▲ Trending up");
    assert_eq!(trend_label(Trend::Down), "▼ Trending down");
    assert_eq!(trend_label(Trend::Neutral), "— Neutral");
}

#[test]
fn dates_and_times() {
    assert_eq!(format_game_date("2026-01-05"), "Monday, January 5, 2026");
    assert_eq!(format_game_date("soon"), "soon");
    assert_eq!(
        format_commence_time("2026-01-06T00:30:00"),
        "Tue, Jan 6, 12:30 AM UTC"
    );
    assert_eq!(format_commence_time(" N/A "), "N/A");
    assert_eq!(games_scheduled_label(1), "1 game scheduled");
    assert_eq!(games_scheduled_label(0), "0 games scheduled");
}
