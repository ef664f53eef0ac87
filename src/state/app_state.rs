use crate::state::situations::SituationCaches;
use chrono::{Local, NaiveDate};
use scorebox_api::{Game, League};

// ---------------------------------------------------------------------------
// Scoreboard state — current snapshot + display index
// ---------------------------------------------------------------------------

/// The ordered game list for one (league, date) selection and the index of the
/// game currently on screen. Snapshots are replaced whole; the index is clamped
/// on replacement and wrapped on manual/auto advance.
#[derive(Debug)]
pub struct ScoreboardState {
    pub league: League,
    pub date: NaiveDate,
    pub games: Vec<Game>,
    pub index: usize,
    pub last_error: Option<String>,
}

impl Default for ScoreboardState {
    fn default() -> Self {
        Self {
            league: League::default(),
            date: Local::now().date_naive(),
            games: Vec::new(),
            index: 0,
            last_error: None,
        }
    }
}

impl ScoreboardState {
    /// Replace the whole snapshot. The index is clamped into range, never
    /// reset to 0 unless it falls out of bounds.
    pub fn replace(&mut self, games: Vec<Game>) {
        self.last_error = None;
        self.games = games;
        self.index = if self.games.is_empty() {
            0
        } else {
            self.index.min(self.games.len() - 1)
        };
    }

    /// A failed load fully replaces content: no partial data survives.
    pub fn fail(&mut self, message: String) {
        self.games.clear();
        self.index = 0;
        self.last_error = Some(message);
    }

    pub fn current(&self) -> Option<&Game> {
        self.games.get(self.index)
    }

    pub fn advance(&mut self) {
        if !self.games.is_empty() {
            self.index = (self.index + 1) % self.games.len();
        }
    }

    pub fn retreat(&mut self) {
        if !self.games.is_empty() {
            self.index = (self.index + self.games.len() - 1) % self.games.len();
        }
    }

    pub fn any_live(&self) -> bool {
        self.games.iter().any(Game::is_live)
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub scoreboard: ScoreboardState,
    pub situations: SituationCaches,
    pub show_logs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorebox_api::GameStatus;

    fn game(id: &str, status: GameStatus) -> Game {
        Game {
            id: id.to_owned(),
            status,
            ..Game::default()
        }
    }

    fn sched(id: &str) -> Game {
        game(id, GameStatus::Scheduled)
    }

    #[test]
    fn index_clamps_when_snapshot_shrinks() {
        let mut state = ScoreboardState::default();
        state.replace(vec![sched("a"), sched("b"), sched("c")]);
        state.index = 2;
        state.replace(vec![sched("a"), sched("b")]);
        assert_eq!(state.index, 1);
        assert_eq!(state.current().unwrap().id, "b");
    }

    #[test]
    fn index_survives_reload_when_still_in_range() {
        let mut state = ScoreboardState::default();
        state.replace(vec![sched("a"), sched("b"), sched("c")]);
        state.index = 1;
        state.replace(vec![sched("x"), sched("y"), sched("z")]);
        assert_eq!(state.index, 1);
    }

    #[test]
    fn advance_and_retreat_wrap() {
        let mut state = ScoreboardState::default();
        state.replace(vec![sched("a"), sched("b"), sched("c")]);
        state.index = 2;
        state.advance();
        assert_eq!(state.index, 0);
        state.retreat();
        assert_eq!(state.index, 2);
    }

    #[test]
    fn navigation_on_empty_snapshot_is_a_no_op() {
        let mut state = ScoreboardState::default();
        state.advance();
        state.retreat();
        assert_eq!(state.index, 0);
        assert!(state.current().is_none());
    }

    #[test]
    fn failure_clears_snapshot_and_records_message() {
        let mut state = ScoreboardState::default();
        state.replace(vec![sched("a")]);
        state.fail("boom".into());
        assert!(state.games.is_empty());
        assert_eq!(state.last_error.as_deref(), Some("boom"));
        // Next successful load clears the error.
        state.replace(vec![sched("b")]);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn any_live_detects_in_progress_games() {
        let mut state = ScoreboardState::default();
        state.replace(vec![sched("a"), game("b", GameStatus::InProgress)]);
        assert!(state.any_live());
        state.replace(vec![sched("a"), game("b", GameStatus::Final)]);
        assert!(!state.any_live());
    }
}
