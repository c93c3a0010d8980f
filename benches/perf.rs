use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use props_terminal::api::{Pick, Player, PropsSource, parse_player_picks_json, parse_top_picks_json};
use props_terminal::chart::ChartGeometry;
use props_terminal::demo::DemoSource;
use props_terminal::filter::{Facets, FilterState};

const POSITIONS: [&str; 6] = ["PG", "SG", "SF", "PF", "C", "G-F"];
const TEAMS: [&str; 6] = ["BOS", "NYK", "DEN", "OKC", "LAL", "GSW"];

fn sample_roster(count: u32) -> Vec<Player> {
    (0..count)
        .map(|id| Player {
            id,
            name: format!("Player {id}"),
            team: TEAMS[id as usize % TEAMS.len()].to_string(),
            jersey: (id % 99).to_string(),
            position: POSITIONS[id as usize % POSITIONS.len()].to_string(),
            pts: f64::from(id % 35),
            reb: f64::from(id % 13),
            ast: f64::from(id % 11),
            has_picks: id % 3 != 0,
        })
        .collect()
}

fn bench_roster_filter(c: &mut Criterion) {
    let roster = sample_roster(500);
    let mut filter = FilterState::new();
    filter.search_text = "1".to_string();
    filter.toggle_team("BOS");
    filter.toggle_team("DEN");
    filter.toggle_position("PG");
    filter.set_min_text("10");

    c.bench_function("roster_filter", |b| {
        b.iter(|| {
            let rows = filter.apply(black_box(&roster));
            black_box(rows.len());
        })
    });
}

fn bench_facets(c: &mut Criterion) {
    let roster = sample_roster(500);
    c.bench_function("roster_facets", |b| {
        b.iter(|| {
            let facets = Facets::from_players(black_box(&roster));
            black_box(facets.positions.len());
        })
    });
}

fn bench_chart_geometry(c: &mut Criterion) {
    let values: Vec<f64> = (0..20).map(|i| f64::from((i * 7) % 31)).collect();
    c.bench_function("chart_geometry", |b| {
        b.iter(|| {
            let geometry =
                ChartGeometry::compute(black_box(&values), 17.5, Pick::Over, 100.0, 100.0);
            black_box(geometry.hit_count());
        })
    });
}

fn bench_picks_parse(c: &mut Criterion) {
    c.bench_function("player_picks_parse", |b| {
        b.iter(|| {
            let picks = parse_player_picks_json(black_box(PLAYER_PICKS_JSON)).unwrap();
            black_box(picks.predictions.len());
        })
    });
    c.bench_function("top_picks_parse", |b| {
        b.iter(|| {
            let top = parse_top_picks_json(black_box(TOP_PICKS_JSON)).unwrap();
            black_box(top.picks.len());
        })
    });
}

fn bench_demo_top_picks(c: &mut Criterion) {
    let source = DemoSource::new();
    c.bench_function("demo_top_picks", |b| {
        b.iter(|| {
            let top = source.top_picks(black_box(10), 60.0).unwrap();
            black_box(top.count);
        })
    });
}

criterion_group!(
    perf,
    bench_roster_filter,
    bench_facets,
    bench_chart_geometry,
    bench_picks_parse,
    bench_demo_top_picks
);
criterion_main!(perf);

static PLAYER_PICKS_JSON: &str = include_str!("../tests/fixtures/player_picks.json");
static TOP_PICKS_JSON: &str = include_str!("../tests/fixtures/top_picks.json");
