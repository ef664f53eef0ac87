use crate::state::network::LoadingState;
use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use scorebox_api::{Game, League, Situation};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadScoreboard { league: League, date: NaiveDate },
    LoadSituation { league: League, game_id: String },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged {
        loading_state: LoadingState,
    },
    /// Whole-snapshot replacement; league/date echo the request so stale
    /// responses can be discarded after a selection change.
    ScoreboardLoaded {
        league: League,
        date: NaiveDate,
        games: Vec<Game>,
    },
    ScoreboardFailed {
        message: String,
    },
    /// `situation` is None when the summary carried no live block; the result
    /// still lands in the cache so the game is not refetched every render.
    SituationLoaded {
        league: League,
        game_id: String,
        situation: Option<Situation>,
    },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    /// 7s rotation timer fired: advance the display index.
    RotateTick,
    /// 30s live-refresh timer fired: reload the current scoreboard.
    RefreshTick,
}
