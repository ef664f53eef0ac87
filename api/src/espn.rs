/// ESPN API raw wire types — serde shapes for deserializing ESPN responses.
/// These map to our clean domain types via the mapping functions in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API, shared shape across all three leagues)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>, // ISO 8601
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub competitors: Option<Vec<EspnCompetitor>>,
    pub venue: Option<EspnVenue>,
    pub status: Option<EspnStatus>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
    pub period: Option<u8>,
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatusType {
    pub name: Option<String>, // "STATUS_SCHEDULED", "STATUS_IN_PROGRESS", "STATUS_FINAL"
    pub detail: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetitor {
    pub id: Option<String>,
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<String>, // ESPN sends scores as strings
    pub records: Option<Vec<EspnRecord>>,
    pub linescores: Option<Vec<EspnLinescore>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeam {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    /// Legacy single-logo field, only consulted when `logos` is empty.
    pub logo: Option<String>,
    pub logos: Option<Vec<EspnLogo>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnLogo {
    pub href: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnRecord {
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnLinescore {
    pub value: Option<f64>,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnVenue {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Game summary  (site v2 API, per-league shapes)
//
// The three leagues share one serde struct: baseball carries the count/bases
// block under `situation`, football spreads period/clock across the header
// status and down/distance under `situation`, basketball only has the header
// status. Fields a league never sends simply deserialize to None.
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SummaryResponse {
    pub header: Option<SummaryHeader>,
    /// Some payloads carry competitions at the top level instead of in the header.
    pub competitions: Option<Vec<SummaryCompetition>>,
    pub situation: Option<EspnSituation>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SummaryHeader {
    pub competitions: Option<Vec<SummaryCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SummaryCompetition {
    pub status: Option<EspnStatus>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnSituation {
    // Baseball
    pub inning: Option<u8>,
    #[serde(rename = "inningState")]
    pub inning_state: Option<String>,
    #[serde(rename = "isTopInning")]
    pub is_top_inning: Option<bool>,
    pub balls: Option<u8>,
    pub strikes: Option<u8>,
    pub outs: Option<u8>,
    #[serde(rename = "onFirst")]
    pub on_first: Option<bool>,
    #[serde(rename = "onSecond")]
    pub on_second: Option<bool>,
    #[serde(rename = "onThird")]
    pub on_third: Option<bool>,
    // Football
    pub possession: Option<String>, // team id
    pub down: Option<u8>,
    pub distance: Option<u32>,
    #[serde(rename = "yardLine")]
    pub yard_line: Option<u32>,
    #[serde(rename = "isRedZone")]
    pub is_red_zone: Option<bool>,
}
