pub mod client;
pub mod espn;

use chrono::{DateTime, NaiveDate, Utc};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of ESPN wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum League {
    #[default]
    Mlb,
    Nfl,
    Nba,
}

impl League {
    /// URL path segment under ESPN's site v2 sports root.
    pub fn path(&self) -> &'static str {
        match self {
            League::Mlb => "baseball/mlb",
            League::Nfl => "football/nfl",
            League::Nba => "basketball/nba",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            League::Mlb => "MLB",
            League::Nfl => "NFL",
            League::Nba => "NBA",
        }
    }

    pub const ALL: [League; 3] = [League::Mlb, League::Nfl, League::Nba];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Scheduled,
    InProgress,
    Final,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,  // "New York Yankees"
    pub abbr: String,  // "NYY"
    pub record: String, // "52-30", free text
    pub score: u32,
    /// Ordered logo URLs; empty means no logo to show.
    pub logos: Vec<String>,
}

impl Team {
    pub fn primary_logo(&self) -> Option<&str> {
        self.logos.first().map(String::as_str)
    }

    /// Abbreviation when present, full name otherwise.
    pub fn short_label(&self) -> &str {
        if self.abbr.is_empty() { &self.name } else { &self.abbr }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub id: String,
    pub league: League,
    pub name: String,
    pub venue: String,
    /// Scheduled first pitch / kickoff / tip-off.
    pub start: Option<DateTime<Utc>>,
    /// Calendar date of `start` (UTC), copied from the event, never generated.
    pub date: Option<NaiveDate>,
    pub status: GameStatus,
    /// Upstream detail text, passed through verbatim ("Top 5th", "Q3 4:12", ...).
    pub status_detail: String,
    pub away: Team,
    pub home: Team,
    /// Per-period scores per side. Lengths may differ mid-game; padding to
    /// equal length is a presentation concern, never done here.
    pub linescores_away: Vec<String>,
    pub linescores_home: Vec<String>,
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.status == GameStatus::InProgress
    }
}

// ---------------------------------------------------------------------------
// Live situation — per-league variant, fetched on demand for live games
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseballSituation {
    pub inning: u8,
    pub inning_state: String, // "Top", "Bottom", "Middle", "End"
    pub is_top_inning: bool,
    pub balls: u8,
    pub strikes: u8,
    pub outs: u8,
    pub on_first: bool,
    pub on_second: bool,
    pub on_third: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FootballSituation {
    pub period: Option<u8>,
    pub clock: Option<String>,
    pub possession: Option<String>, // team id, resolved against home/away at render
    pub down: Option<u8>,
    pub distance: Option<u32>, // yards to go
    pub yard_line: Option<u32>,
    pub is_red_zone: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasketballSituation {
    pub period: Option<u8>,
    pub clock: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Situation {
    Baseball(BaseballSituation),
    Football(FootballSituation),
    Basketball(BasketballSituation),
}
