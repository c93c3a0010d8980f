//! Seeded offline backend, selected with `PROPS_SOURCE=demo`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::api::{
    EventInfo, FetchError, Game, GamesToday, Pick, Player, PlayerPicks, Prediction,
    PropsSource, RankedPrediction, StatType, TopPicks, Trend,
};
use crate::teams::Team;

const DEMO_SEED: u64 = 0x5eed_2026;
const RECENT_GAMES: usize = 10;

struct SeedPlayer {
    id: u32,
    name: &'static str,
    team: Team,
    jersey: &'static str,
    position: &'static str,
    pts: f64,
    reb: f64,
    ast: f64,
}

const SEED_PLAYERS: &[SeedPlayer] = &[
    SeedPlayer {
        id: 1628369,
        name: "Jayson Tatum",
        team: Team::BOS,
        jersey: "0",
        position: "SF",
        pts: 26.8,
        reb: 8.4,
        ast: 5.1,
    },
    SeedPlayer {
        id: 1627759,
        name: "Jaylen Brown",
        team: Team::BOS,
        jersey: "7",
        position: "SG",
        pts: 23.1,
        reb: 5.6,
        ast: 3.7,
    },
    SeedPlayer {
        id: 1628973,
        name: "Jalen Brunson",
        team: Team::NYK,
        jersey: "11",
        position: "PG",
        pts: 27.9,
        reb: 3.5,
        ast: 6.9,
    },
    SeedPlayer {
        id: 1626157,
        name: "Karl-Anthony Towns",
        team: Team::NYK,
        jersey: "32",
        position: "C",
        pts: 24.4,
        reb: 12.1,
        ast: 3.2,
    },
    SeedPlayer {
        id: 203999,
        name: "Nikola Jokic",
        team: Team::DEN,
        jersey: "15",
        position: "C",
        pts: 29.1,
        reb: 12.7,
        ast: 10.2,
    },
    SeedPlayer {
        id: 1627750,
        name: "Jamal Murray",
        team: Team::DEN,
        jersey: "27",
        position: "PG",
        pts: 21.0,
        reb: 4.1,
        ast: 6.2,
    },
    SeedPlayer {
        id: 1628983,
        name: "Shai Gilgeous-Alexander",
        team: Team::OKC,
        jersey: "2",
        position: "PG",
        pts: 31.4,
        reb: 5.3,
        ast: 6.1,
    },
    SeedPlayer {
        id: 1631096,
        name: "Chet Holmgren",
        team: Team::OKC,
        jersey: "7",
        position: "PF",
        pts: 16.7,
        reb: 8.1,
        ast: 2.3,
    },
    SeedPlayer {
        id: 2544,
        name: "LeBron James",
        team: Team::LAL,
        jersey: "23",
        position: "SF",
        pts: 24.2,
        reb: 7.6,
        ast: 8.3,
    },
    SeedPlayer {
        id: 1629029,
        name: "Luka Doncic",
        team: Team::LAL,
        jersey: "77",
        position: "PG",
        pts: 28.6,
        reb: 8.5,
        ast: 8.0,
    },
    SeedPlayer {
        id: 201939,
        name: "Stephen Curry",
        team: Team::GSW,
        jersey: "30",
        position: "PG",
        pts: 25.3,
        reb: 4.4,
        ast: 6.0,
    },
    SeedPlayer {
        id: 1641705,
        name: "Victor Wembanyama",
        team: Team::SAS,
        jersey: "1",
        position: "C",
        pts: 24.0,
        reb: 11.0,
        ast: 3.8,
    },
    SeedPlayer {
        id: 1630162,
        name: "Anthony Edwards",
        team: Team::MIN,
        jersey: "5",
        position: "SG",
        pts: 27.2,
        reb: 5.7,
        ast: 4.5,
    },
    SeedPlayer {
        id: 203507,
        name: "Giannis Antetokounmpo",
        team: Team::MIL,
        jersey: "34",
        position: "PF",
        pts: 30.1,
        reb: 11.8,
        ast: 6.3,
    },
    SeedPlayer {
        id: 1630595,
        name: "Cade Cunningham",
        team: Team::DET,
        jersey: "2",
        position: "PG",
        pts: 25.9,
        reb: 6.2,
        ast: 9.1,
    },
    SeedPlayer {
        id: 1630578,
        name: "Alperen Sengun",
        team: Team::HOU,
        jersey: "28",
        position: "C",
        pts: 19.4,
        reb: 10.3,
        ast: 4.9,
    },
];

/// Tonight's demo slate as `<date>/<AWAY><HOME>` game codes.
const SEED_GAMES: &[(&str, &str, &str)] = &[
    ("20260105/BOSNYK", "7:30 pm ET", "Madison Square Garden"),
    ("20260105/OKCDEN", "9:00 pm ET", "Ball Arena"),
    ("20260105/GSWLAL", "10:30 pm ET", "Crypto.com Arena"),
    ("20260105/MINSAS", "8:00 pm ET", "Frost Bank Center"),
    ("20260105/MILDET", "7:00 pm ET", "Little Caesars Arena"),
];

pub struct DemoSource {
    predictions: Vec<RankedPrediction>,
    games: GamesToday,
    roster: Vec<Player>,
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoSource {
    pub fn new() -> Self {
        Self::with_seed(DEMO_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let games = seed_games();
        let roster: Vec<Player> = SEED_PLAYERS
            .iter()
            .map(|p| Player {
                id: p.id,
                name: p.name.to_string(),
                team: p.team.code().to_string(),
                jersey: p.jersey.to_string(),
                position: p.position.to_string(),
                pts: p.pts,
                reb: p.reb,
                ast: p.ast,
                has_picks: true,
            })
            .collect();

        let mut predictions = Vec::new();
        for player in SEED_PLAYERS {
            let Some((away, home)) = opponents_for(player.team, &games.games) else {
                continue;
            };
            for (stat, mean) in [
                (StatType::Pts, player.pts),
                (StatType::Reb, player.reb),
                (StatType::Ast, player.ast),
            ] {
                predictions.push(RankedPrediction {
                    player_name: player.name.to_string(),
                    prediction: seed_prediction(&mut rng, stat, mean, away, home),
                });
            }
        }

        Self {
            predictions,
            games,
            roster,
        }
    }
}

impl PropsSource for DemoSource {
    fn games_today(&self) -> Result<GamesToday, FetchError> {
        Ok(self.games.clone())
    }

    fn players(&self, today_only: bool) -> Result<Vec<Player>, FetchError> {
        if !today_only {
            return Ok(self.roster.clone());
        }
        Ok(self
            .roster
            .iter()
            .filter(|p| {
                self.predictions
                    .iter()
                    .any(|pred| pred.player_name.eq_ignore_ascii_case(&p.name))
            })
            .cloned()
            .collect())
    }

    fn player_picks(&self, player_name: &str) -> Result<PlayerPicks, FetchError> {
        let predictions: Vec<Prediction> = self
            .predictions
            .iter()
            .filter(|p| p.player_name.eq_ignore_ascii_case(player_name))
            .map(|p| p.prediction.clone())
            .collect();
        let Some(first) = predictions.first() else {
            return Err(FetchError::Application(format!(
                "No predictions found for {player_name}. Player may not have odds today or had insufficient game data."
            )));
        };
        let event_info = EventInfo {
            home_team: first.home_team.clone(),
            away_team: first.away_team.clone(),
            commence_time: first.commence_time.clone(),
        };
        Ok(PlayerPicks {
            player: player_name.to_string(),
            event_info,
            predictions,
        })
    }

    fn top_picks(&self, limit: u32, min_confidence: f64) -> Result<TopPicks, FetchError> {
        // Stand-in for the backend ranker.
        let mut eligible: Vec<&RankedPrediction> = self
            .predictions
            .iter()
            .filter(|p| p.prediction.confidence >= min_confidence)
            .collect();
        eligible.sort_by(|a, b| {
            b.prediction
                .confidence
                .partial_cmp(&a.prediction.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let picks: Vec<RankedPrediction> = eligible
            .into_iter()
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(TopPicks {
            count: picks.len(),
            total_analyzed: self.predictions.len(),
            cache_age_seconds: Some(240.0),
            picks,
        })
    }
}

fn seed_games() -> GamesToday {
    GamesToday {
        date: "2026-01-05".to_string(),
        games: SEED_GAMES
            .iter()
            .map(|(code, status, arena)| Game {
                game_code: code.to_string(),
                status_text: status.to_string(),
                status_id: 1,
                arena_name: arena.to_string(),
            })
            .collect(),
    }
}

fn opponents_for(team: Team, games: &[Game]) -> Option<(Team, Team)> {
    games.iter().find_map(|game| {
        let matchup = crate::teams::resolve_matchup(&game.game_code);
        let away = Team::from_code(&matchup.away_code)?;
        let home = Team::from_code(&matchup.home_code)?;
        (away == team || home == team).then_some((away, home))
    })
}

fn seed_prediction(
    rng: &mut StdRng,
    stat_type: StatType,
    mean: f64,
    away: Team,
    home: Team,
) -> Prediction {
    let spread = (mean * 0.3).max(1.0);
    let recent_games: Vec<f64> = (0..RECENT_GAMES)
        .map(|_| (mean + rng.gen_range(-spread..=spread)).round().max(0.0))
        .collect();
    let line = ((mean + rng.gen_range(-1.5..=1.5)) * 2.0).round() / 2.0;
    let line = line.max(0.5);

    let average = recent_games.iter().sum::<f64>() / recent_games.len() as f64;
    let last_5 = &recent_games[..5];
    let last_5_avg = last_5.iter().sum::<f64>() / last_5.len() as f64;
    let variance = recent_games
        .iter()
        .map(|v| (v - average).powi(2))
        .sum::<f64>()
        / recent_games.len() as f64;
    let pick = if average > line { Pick::Over } else { Pick::Under };
    let hits = recent_games
        .iter()
        .filter(|v| crate::chart::is_hit(**v, line, pick))
        .count();
    let hit_rate = round1(hits as f64 / recent_games.len() as f64 * 100.0);
    let trend = if last_5_avg > average * 1.05 {
        Trend::Up
    } else if last_5_avg < average * 0.95 {
        Trend::Down
    } else {
        Trend::Neutral
    };
    let confidence = round1((hit_rate * 0.6 + rng.gen_range(25.0..40.0)).min(95.0));

    Prediction {
        stat_type,
        pick,
        line,
        confidence,
        average: Some(round1(average)),
        last_5_avg: Some(round1(last_5_avg)),
        std_dev: Some((variance.sqrt() * 100.0).round() / 100.0),
        hit_rate,
        trend,
        recent_games,
        home_team: home.full_name(),
        away_team: away.full_name(),
        commence_time: "2026-01-06T00:30:00Z".to_string(),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
