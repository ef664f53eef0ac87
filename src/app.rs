use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::NetworkRequest;
use crate::state::scheduler::TimerPlan;
use chrono::{Days, Local, NaiveDate};
use scorebox_api::{Game, League, Situation};
use std::time::Instant;

/// The scoreboard session: current snapshot, display index, the three
/// situation caches and the user's selection, owned by the single logical
/// thread of the UI loop. Timer handles live in the Scheduler next to the
/// loop; everything here is data.
pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        Self {
            settings: AppSettings::load(),
            state: AppState::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from the main UI loop
    // -----------------------------------------------------------------------

    /// Apply a loaded scoreboard. Returns false (and changes nothing) when the
    /// response no longer matches the current selection — a reply that raced a
    /// league or date change is simply discarded.
    pub fn on_scoreboard_loaded(
        &mut self,
        league: League,
        date: NaiveDate,
        games: Vec<Game>,
    ) -> bool {
        let sb = &mut self.state.scoreboard;
        if league != sb.league || date != sb.date {
            return false;
        }
        sb.replace(games);
        true
    }

    pub fn on_scoreboard_failed(&mut self, message: String) {
        self.state.scoreboard.fail(message);
    }

    /// Store a resolved situation in its league's cache. Returns true when the
    /// result belongs to the currently displayed game, i.e. a redraw is worth
    /// it; stale results are cached but trigger nothing.
    pub fn on_situation_loaded(
        &mut self,
        league: League,
        game_id: String,
        situation: Option<Situation>,
        now: Instant,
    ) -> bool {
        let matches_displayed = self
            .state
            .scoreboard
            .current()
            .is_some_and(|g| g.id == game_id);
        self.state
            .situations
            .for_league_mut(league)
            .store(game_id, situation, now);
        matches_displayed
    }

    // -----------------------------------------------------------------------
    // Render-time cache consultation
    // -----------------------------------------------------------------------

    /// The situation to draw for the current game: only live games have one,
    /// and only when the cache holds a fresh entry.
    pub fn displayed_situation(&self, now: Instant) -> Option<&Situation> {
        let game = self.state.scoreboard.current()?;
        if !game.is_live() {
            return None;
        }
        self.state
            .situations
            .for_league(game.league)
            .fresh(&game.id, now)?
            .as_ref()
    }

    /// The fetch the current render pass needs, if any: current game is live
    /// and its cache entry is missing or past the freshness window.
    pub fn situation_request(&self, now: Instant) -> Option<NetworkRequest> {
        let game = self.state.scoreboard.current()?;
        if !game.is_live() {
            return None;
        }
        let cache = self.state.situations.for_league(game.league);
        if cache.fresh(&game.id, now).is_some() {
            return None;
        }
        Some(NetworkRequest::LoadSituation {
            league: game.league,
            game_id: game.id.clone(),
        })
    }

    // -----------------------------------------------------------------------
    // Selection + navigation
    // -----------------------------------------------------------------------

    pub fn load_request(&self) -> NetworkRequest {
        NetworkRequest::LoadScoreboard {
            league: self.state.scoreboard.league,
            date: self.state.scoreboard.date,
        }
    }

    /// Returns true when the selection actually changed (and a reload is due).
    pub fn select_league(&mut self, league: League) -> bool {
        if self.state.scoreboard.league == league {
            return false;
        }
        self.state.scoreboard.league = league;
        true
    }

    pub fn shift_date(&mut self, days_forward: bool) {
        let date = self.state.scoreboard.date;
        self.state.scoreboard.date = if days_forward {
            date.checked_add_days(Days::new(1)).unwrap_or(date)
        } else {
            date.checked_sub_days(Days::new(1)).unwrap_or(date)
        };
    }

    pub fn reset_date_today(&mut self) {
        self.state.scoreboard.date = Local::now().date_naive();
    }

    pub fn next_game(&mut self) {
        self.state.scoreboard.advance();
    }

    pub fn prev_game(&mut self) {
        self.state.scoreboard.retreat();
    }

    pub fn toggle_autorotate(&mut self) {
        self.settings.autorotate = !self.settings.autorotate;
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    /// The timer plan for the current snapshot and settings. Evaluated after
    /// every load, selection change and autorotate toggle; the caller applies
    /// it to the Scheduler only after this state is fully in place.
    pub fn timer_plan(&self) -> TimerPlan {
        TimerPlan::for_snapshot(&self.state.scoreboard.games, self.settings.autorotate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorebox_api::{BaseballSituation, GameStatus};

    fn live_game(id: &str, league: League) -> Game {
        Game {
            id: id.to_owned(),
            league,
            status: GameStatus::InProgress,
            ..Game::default()
        }
    }

    fn baseball_situation() -> Option<Situation> {
        Some(Situation::Baseball(BaseballSituation::default()))
    }

    fn app_with_games(games: Vec<Game>) -> App {
        let mut app = App {
            settings: AppSettings::default(),
            state: AppState::default(),
        };
        app.state.scoreboard.replace(games);
        app
    }

    #[test]
    fn mismatched_scoreboard_response_is_discarded() {
        let mut app = app_with_games(vec![live_game("a", League::Mlb)]);
        let date = app.state.scoreboard.date;

        // League changed while the fetch was in flight.
        let applied = app.on_scoreboard_loaded(League::Nfl, date, vec![]);
        assert!(!applied);
        assert_eq!(app.state.scoreboard.games.len(), 1);

        // Same for a stale date.
        let stale_date = date.pred_opt().unwrap();
        assert!(!app.on_scoreboard_loaded(League::Mlb, stale_date, vec![]));

        // Matching response applies.
        assert!(app.on_scoreboard_loaded(League::Mlb, date, vec![]));
        assert!(app.state.scoreboard.games.is_empty());
    }

    #[test]
    fn situation_for_other_game_is_cached_but_not_displayed() {
        let mut app = app_with_games(vec![
            live_game("shown", League::Mlb),
            live_game("hidden", League::Mlb),
        ]);
        let now = Instant::now();

        let redraw = app.on_situation_loaded(League::Mlb, "hidden".into(), baseball_situation(), now);
        assert!(!redraw);
        assert!(app.displayed_situation(now).is_none());

        let redraw = app.on_situation_loaded(League::Mlb, "shown".into(), baseball_situation(), now);
        assert!(redraw);
        assert!(app.displayed_situation(now).is_some());
    }

    #[test]
    fn situation_request_only_for_live_and_stale() {
        let now = Instant::now();

        // Not live: no request even with an empty cache.
        let scheduled = Game { id: "s".into(), ..Game::default() };
        let app = app_with_games(vec![scheduled]);
        assert!(app.situation_request(now).is_none());

        // Live + cold cache: request.
        let mut app = app_with_games(vec![live_game("g", League::Nba)]);
        assert!(matches!(
            app.situation_request(now),
            Some(NetworkRequest::LoadSituation { league: League::Nba, ref game_id }) if game_id == "g"
        ));

        // Live + fresh entry: no second fetch inside the window.
        app.on_situation_loaded(League::Nba, "g".into(), None, now);
        assert!(app.situation_request(now).is_none());

        // Past the window: fetch again.
        let later = now + crate::state::situations::FRESHNESS_WINDOW;
        assert!(app.situation_request(later).is_some());
    }

    #[test]
    fn non_live_game_never_displays_a_situation() {
        let mut app = app_with_games(vec![Game { id: "g".into(), ..Game::default() }]);
        let now = Instant::now();
        // Cache contents are irrelevant for non-live games.
        app.state
            .situations
            .for_league_mut(League::Mlb)
            .store("g".into(), baseball_situation(), now);
        assert!(app.displayed_situation(now).is_none());
    }

    #[test]
    fn date_shift_moves_one_day_each_way() {
        let mut app = app_with_games(vec![]);
        let start = app.state.scoreboard.date;
        app.shift_date(true);
        assert_eq!(app.state.scoreboard.date, start.succ_opt().unwrap());
        app.shift_date(false);
        app.shift_date(false);
        assert_eq!(app.state.scoreboard.date, start.pred_opt().unwrap());
    }
}
