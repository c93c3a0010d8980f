use crate::api::Game;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Team {
    ATL,
    BOS,
    BKN,
    CHA,
    CHI,
    CLE,
    DAL,
    DEN,
    DET,
    GSW,
    HOU,
    IND,
    LAC,
    LAL,
    MEM,
    MIA,
    MIL,
    MIN,
    NOP,
    NYK,
    OKC,
    ORL,
    PHI,
    PHX,
    POR,
    SAC,
    SAS,
    TOR,
    UTA,
    WAS,
}

pub const ALL_TEAMS: [Team; 30] = [
    Team::ATL,
    Team::BOS,
    Team::BKN,
    Team::CHA,
    Team::CHI,
    Team::CLE,
    Team::DAL,
    Team::DEN,
    Team::DET,
    Team::GSW,
    Team::HOU,
    Team::IND,
    Team::LAC,
    Team::LAL,
    Team::MEM,
    Team::MIA,
    Team::MIL,
    Team::MIN,
    Team::NOP,
    Team::NYK,
    Team::OKC,
    Team::ORL,
    Team::PHI,
    Team::PHX,
    Team::POR,
    Team::SAC,
    Team::SAS,
    Team::TOR,
    Team::UTA,
    Team::WAS,
];

impl Team {
    /// Exact, case-sensitive directory lookup: `bos` is not a known code.
    pub fn from_code(code: &str) -> Option<Team> {
        ALL_TEAMS.iter().copied().find(|team| team.code() == code)
    }

    /// Resolves a display name such as "Boston Celtics" or "Celtics".
    pub fn from_display_name(name: &str) -> Option<Team> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        if let Some(team) = ALL_TEAMS
            .iter()
            .copied()
            .find(|team| team.full_name().eq_ignore_ascii_case(name))
        {
            return Some(team);
        }
        // Feeds disagree on the city ("LA Clippers" vs "Los Angeles Clippers"),
        // the nickname is the stable part.
        if let Some(team) = ALL_TEAMS
            .iter()
            .copied()
            .find(|team| ends_with_ci(name, team.nickname()))
        {
            return Some(team);
        }
        // "Philadelphia 76ers": fall back to the city when exactly one team has it.
        let mut by_city = ALL_TEAMS
            .iter()
            .copied()
            .filter(|team| starts_with_ci(name, team.city()));
        match (by_city.next(), by_city.next()) {
            (Some(team), None) => Some(team),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Team::ATL => "ATL",
            Team::BOS => "BOS",
            Team::BKN => "BKN",
            Team::CHA => "CHA",
            Team::CHI => "CHI",
            Team::CLE => "CLE",
            Team::DAL => "DAL",
            Team::DEN => "DEN",
            Team::DET => "DET",
            Team::GSW => "GSW",
            Team::HOU => "HOU",
            Team::IND => "IND",
            Team::LAC => "LAC",
            Team::LAL => "LAL",
            Team::MEM => "MEM",
            Team::MIA => "MIA",
            Team::MIL => "MIL",
            Team::MIN => "MIN",
            Team::NOP => "NOP",
            Team::NYK => "NYK",
            Team::OKC => "OKC",
            Team::ORL => "ORL",
            Team::PHI => "PHI",
            Team::PHX => "PHX",
            Team::POR => "POR",
            Team::SAC => "SAC",
            Team::SAS => "SAS",
            Team::TOR => "TOR",
            Team::UTA => "UTA",
            Team::WAS => "WAS",
        }
    }

    pub fn city(self) -> &'static str {
        match self {
            Team::ATL => "Atlanta",
            Team::BOS => "Boston",
            Team::BKN => "Brooklyn",
            Team::CHA => "Charlotte",
            Team::CHI => "Chicago",
            Team::CLE => "Cleveland",
            Team::DAL => "Dallas",
            Team::DEN => "Denver",
            Team::DET => "Detroit",
            Team::GSW => "Golden State",
            Team::HOU => "Houston",
            Team::IND => "Indiana",
            Team::LAC => "LA",
            Team::LAL => "LA",
            Team::MEM => "Memphis",
            Team::MIA => "Miami",
            Team::MIL => "Milwaukee",
            Team::MIN => "Minnesota",
            Team::NOP => "New Orleans",
            Team::NYK => "New York",
            Team::OKC => "Oklahoma City",
            Team::ORL => "Orlando",
            Team::PHI => "Philadelphia",
            Team::PHX => "Phoenix",
            Team::POR => "Portland",
            Team::SAC => "Sacramento",
            Team::SAS => "San Antonio",
            Team::TOR => "Toronto",
            Team::UTA => "Utah",
            Team::WAS => "Washington",
        }
    }

    pub fn nickname(self) -> &'static str {
        match self {
            Team::ATL => "Hawks",
            Team::BOS => "Celtics",
            Team::BKN => "Nets",
            Team::CHA => "Hornets",
            Team::CHI => "Bulls",
            Team::CLE => "Cavaliers",
            Team::DAL => "Mavericks",
            Team::DEN => "Nuggets",
            Team::DET => "Pistons",
            Team::GSW => "Warriors",
            Team::HOU => "Rockets",
            Team::IND => "Pacers",
            Team::LAC => "Clippers",
            Team::LAL => "Lakers",
            Team::MEM => "Grizzlies",
            Team::MIA => "Heat",
            Team::MIL => "Bucks",
            Team::MIN => "Timberwolves",
            Team::NOP => "Pelicans",
            Team::NYK => "Knicks",
            Team::OKC => "Thunder",
            Team::ORL => "Magic",
            Team::PHI => "Sixers",
            Team::PHX => "Suns",
            Team::POR => "Trail Blazers",
            Team::SAC => "Kings",
            Team::SAS => "Spurs",
            Team::TOR => "Raptors",
            Team::UTA => "Jazz",
            Team::WAS => "Wizards",
        }
    }

    pub fn full_name(self) -> String {
        format!("{} {}", self.city(), self.nickname())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    pub away_code: String,
    pub home_code: String,
    pub away_full_name: String,
    pub home_full_name: String,
}

/// Parses a game code of the form `<prefix>/<AWAY><HOME>`, e.g. `20260105/BOSNYK`.
pub fn resolve_matchup(game_code: &str) -> Matchup {
    let teams = game_code.split('/').nth(1).unwrap_or("");
    let split = teams
        .char_indices()
        .nth(3)
        .map(|(idx, _)| idx)
        .unwrap_or(teams.len());
    let (away, home) = teams.split_at(split);
    Matchup {
        away_code: away.to_string(),
        home_code: home.to_string(),
        away_full_name: full_name_or_code(away),
        home_full_name: full_name_or_code(home),
    }
}

fn ends_with_ci(haystack: &str, suffix: &str) -> bool {
    haystack.len() >= suffix.len()
        && haystack
            .get(haystack.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

fn starts_with_ci(haystack: &str, prefix: &str) -> bool {
    haystack
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn full_name_or_code(code: &str) -> String {
    Team::from_code(code)
        .map(Team::full_name)
        .unwrap_or_else(|| code.to_string())
}

pub fn ticker_text(games: &[Game]) -> String {
    games
        .iter()
        .map(|game| {
            let matchup = resolve_matchup(&game.game_code);
            let status = game.status_text.trim();
            let status = if status.is_empty() { "TBD" } else { status };
            format!("{} vs {} @ {}", matchup.away_code, matchup.home_code, status)
        })
        .collect::<Vec<_>>()
        .join("  |  ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamBadge {
    Known(Team),
    Unknown,
}

impl TeamBadge {
    pub fn for_code(code: &str) -> Self {
        Team::from_code(code)
            .map(TeamBadge::Known)
            .unwrap_or(TeamBadge::Unknown)
    }

    pub fn for_display_name(name: &str) -> Self {
        Team::from_display_name(name)
            .map(TeamBadge::Known)
            .unwrap_or(TeamBadge::Unknown)
    }

    pub fn label(self) -> &'static str {
        match self {
            TeamBadge::Known(team) => team.code(),
            TeamBadge::Unknown => "",
        }
    }

    /// Primary colour as RGB.
    pub fn rgb(self) -> (u8, u8, u8) {
        let TeamBadge::Known(team) = self else {
            return (90, 90, 90);
        };
        match team {
            Team::ATL => (225, 68, 52),
            Team::BOS => (0, 122, 51),
            Team::BKN => (160, 160, 160),
            Team::CHA => (0, 120, 140),
            Team::CHI => (206, 17, 65),
            Team::CLE => (134, 0, 56),
            Team::DAL => (0, 83, 188),
            Team::DEN => (254, 197, 36),
            Team::DET => (200, 16, 46),
            Team::GSW => (255, 199, 44),
            Team::HOU => (206, 17, 65),
            Team::IND => (253, 187, 48),
            Team::LAC => (200, 16, 46),
            Team::LAL => (85, 37, 130),
            Team::MEM => (93, 118, 169),
            Team::MIA => (152, 0, 46),
            Team::MIL => (0, 71, 27),
            Team::MIN => (35, 97, 146),
            Team::NOP => (180, 151, 90),
            Team::NYK => (245, 132, 38),
            Team::OKC => (0, 125, 195),
            Team::ORL => (0, 125, 197),
            Team::PHI => (0, 107, 182),
            Team::PHX => (229, 95, 32),
            Team::POR => (224, 58, 62),
            Team::SAC => (91, 43, 130),
            Team::SAS => (196, 206, 211),
            Team::TOR => (206, 17, 65),
            Team::UTA => (249, 160, 27),
            Team::WAS => (227, 24, 55),
        }
    }
}
