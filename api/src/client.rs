use crate::espn::{EspnCompetitor, EspnEvent, EspnStatus, ScoreboardResponse, SummaryResponse};
use crate::{
    BaseballSituation, BasketballSituation, FootballSituation, Game, GameStatus, League,
    Situation, Team,
};
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const ESPN_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports";

/// Scores API client backed by ESPN's public site v2 endpoints.
#[derive(Debug, Clone)]
pub struct ScoresApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for ScoresApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("scorebox/0.1 (terminal scoreboard viewer)")
                .build()
                .unwrap_or_default(),
            base_url: ESPN_SITE_V2.to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl ScoresApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different base URL (tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Fetch the scoreboard for one league and calendar date.
    pub async fn fetch_scoreboard(&self, league: League, date: NaiveDate) -> ApiResult<Vec<Game>> {
        let url = format!(
            "{}/{}/scoreboard?dates={}",
            self.base_url,
            league.path(),
            espn_date_param(date)
        );
        let raw: ScoreboardResponse = self.get(&url).await?;
        let games = raw
            .events
            .unwrap_or_default()
            .iter()
            .map(|e| map_event(e, league))
            .collect();
        Ok(games)
    }

    /// Fetch the live situation for one game. `None` means the summary payload
    /// carried no situation block (between innings, pregame, data lag).
    pub async fn fetch_situation(
        &self,
        league: League,
        game_id: &str,
    ) -> ApiResult<Option<Situation>> {
        let url = format!("{}/{}/summary?event={game_id}", self.base_url, league.path());
        let raw: SummaryResponse = self.get(&url).await?;
        Ok(map_situation(league, &raw))
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

/// `YYYY-MM-DD` → `YYYYMMDD`, the format ESPN's `dates` parameter wants.
pub fn espn_date_param(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

/// Map one scoreboard event into a canonical Game. Total over the documented
/// wire shape: missing optional fields degrade to defaults, never to errors.
pub fn map_event(event: &EspnEvent, league: League) -> Game {
    let competitions = event.competitions.as_deref().unwrap_or_default();
    let competition = competitions.first();

    let status_type = competition
        .and_then(|c| c.status.as_ref())
        .and_then(|s| s.status_type.as_ref());
    let status = status_type
        .and_then(|t| t.name.as_deref())
        .map(parse_status)
        .unwrap_or_default();
    let status_detail = status_type
        .and_then(|t| t.detail.clone())
        .unwrap_or_default();

    let competitors = competition
        .and_then(|c| c.competitors.as_deref())
        .unwrap_or_default();
    let (away, home) = split_competitors(competitors);

    let start = event
        .date
        .as_deref()
        .and_then(|d| chrono::DateTime::parse_from_rfc3339(d).ok())
        .map(|dt| dt.with_timezone(&Utc));

    Game {
        id: event.id.clone().unwrap_or_default(),
        league,
        name: event.name.clone().unwrap_or_default(),
        venue: competition
            .and_then(|c| c.venue.as_ref())
            .and_then(|v| v.full_name.clone())
            .unwrap_or_default(),
        start,
        date: start.map(|dt| dt.date_naive()),
        status,
        status_detail,
        away: away.map(|c| map_team(c, "Away")).unwrap_or_else(|| Team {
            name: "Away".into(),
            ..Team::default()
        }),
        home: home.map(|c| map_team(c, "Home")).unwrap_or_else(|| Team {
            name: "Home".into(),
            ..Team::default()
        }),
        linescores_away: away.map(map_linescores).unwrap_or_default(),
        linescores_home: home.map(map_linescores).unwrap_or_default(),
    }
}

/// Partition competitors by their home/away designation: away first, home
/// second, independent of upstream array order. Entries without a designation
/// fall back to array position.
fn split_competitors(competitors: &[EspnCompetitor]) -> (Option<&EspnCompetitor>, Option<&EspnCompetitor>) {
    let away = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("away"))
        .or_else(|| competitors.first());
    let home = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("home"))
        .or_else(|| competitors.get(1));
    (away, home)
}

fn map_team(c: &EspnCompetitor, fallback_name: &str) -> Team {
    let team = c.team.as_ref();

    // Prefer the logos list; fall back to the legacy single-logo field.
    let mut logos: Vec<String> = team
        .and_then(|t| t.logos.as_ref())
        .into_iter()
        .flatten()
        .filter_map(|l| l.href.clone())
        .filter(|href| !href.is_empty())
        .collect();
    if logos.is_empty()
        && let Some(legacy) = team.and_then(|t| t.logo.clone()).filter(|l| !l.is_empty())
    {
        logos = vec![legacy];
    }

    Team {
        id: team.and_then(|t| t.id.clone()).unwrap_or_default(),
        name: team
            .and_then(|t| t.display_name.clone().or_else(|| t.name.clone()))
            .unwrap_or_else(|| fallback_name.to_owned()),
        abbr: team.and_then(|t| t.abbreviation.clone()).unwrap_or_default(),
        record: c
            .records
            .as_ref()
            .and_then(|r| r.first())
            .and_then(|r| r.summary.clone())
            .unwrap_or_default(),
        score: c
            .score
            .as_deref()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(0),
        logos,
    }
}

/// Per-period entries: numeric value when present, display string otherwise,
/// empty string as the last resort. Each side's vector is built independently.
fn map_linescores(c: &EspnCompetitor) -> Vec<String> {
    c.linescores
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|l| {
            l.value
                .map(format_linescore_value)
                .or_else(|| l.display_value.clone())
                .unwrap_or_default()
        })
        .collect()
}

fn format_linescore_value(v: f64) -> String {
    if v.fract() == 0.0 {
        (v as i64).to_string()
    } else {
        v.to_string()
    }
}

pub fn parse_status(s: &str) -> GameStatus {
    match s {
        "STATUS_SCHEDULED" => GameStatus::Scheduled,
        // ESPN emits halftime/end-of-period as distinct names mid-game.
        "STATUS_IN_PROGRESS" | "STATUS_HALFTIME" | "STATUS_END_PERIOD" => GameStatus::InProgress,
        "STATUS_FINAL" | "STATUS_FINAL_OT" => GameStatus::Final,
        _ => GameStatus::Other,
    }
}

/// Map a summary payload into the league's Situation variant.
pub fn map_situation(league: League, raw: &SummaryResponse) -> Option<Situation> {
    match league {
        League::Mlb => map_baseball_situation(raw),
        League::Nfl => Some(map_football_situation(raw)),
        League::Nba => Some(map_basketball_situation(raw)),
    }
}

/// Baseball: everything lives under `situation`; absent means no live count.
fn map_baseball_situation(raw: &SummaryResponse) -> Option<Situation> {
    let sit = raw.situation.as_ref()?;
    Some(Situation::Baseball(BaseballSituation {
        inning: sit.inning.unwrap_or(1),
        inning_state: sit.inning_state.clone().unwrap_or_default(),
        is_top_inning: sit.is_top_inning.unwrap_or(false),
        balls: sit.balls.unwrap_or(0),
        strikes: sit.strikes.unwrap_or(0),
        outs: sit.outs.unwrap_or(0),
        on_first: sit.on_first.unwrap_or(false),
        on_second: sit.on_second.unwrap_or(false),
        on_third: sit.on_third.unwrap_or(false),
    }))
}

fn map_football_situation(raw: &SummaryResponse) -> Situation {
    let st = summary_status(raw);
    let sit = raw.situation.as_ref();
    Situation::Football(FootballSituation {
        period: st.and_then(|s| s.period),
        clock: st.and_then(|s| s.display_clock.clone()),
        possession: sit.and_then(|s| s.possession.clone()),
        down: sit.and_then(|s| s.down),
        distance: sit.and_then(|s| s.distance),
        yard_line: sit.and_then(|s| s.yard_line),
        is_red_zone: sit.and_then(|s| s.is_red_zone).unwrap_or(false),
    })
}

fn map_basketball_situation(raw: &SummaryResponse) -> Situation {
    let st = summary_status(raw);
    Situation::Basketball(BasketballSituation {
        period: st.and_then(|s| s.period),
        clock: st.and_then(|s| s.display_clock.clone()),
    })
}

/// Period/clock live on the header competition's status; some payloads put
/// the competitions array at the top level instead.
fn summary_status(raw: &SummaryResponse) -> Option<&EspnStatus> {
    raw.header
        .as_ref()
        .and_then(|h| h.competitions.as_ref())
        .and_then(|c| c.first())
        .or_else(|| raw.competitions.as_ref().and_then(|c| c.first()))
        .and_then(|c| c.status.as_ref())
}
