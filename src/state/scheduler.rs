use crate::state::messages::UiEvent;
use scorebox_api::Game;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::interval;

pub const ROTATION_PERIOD: Duration = Duration::from_secs(7);
pub const REFRESH_PERIOD: Duration = Duration::from_secs(30);

/// Which timers should run for a given snapshot. The pure transition function
/// of the scheduler: computed after every load, selection change and
/// auto-rotate toggle, then applied wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerPlan {
    /// Advance the display index every 7s.
    pub rotate: bool,
    /// Reload the game list every 30s while any game is live.
    pub refresh: bool,
}

impl TimerPlan {
    pub const IDLE: TimerPlan = TimerPlan { rotate: false, refresh: false };

    pub fn for_snapshot(games: &[Game], autorotate: bool) -> Self {
        Self {
            rotate: autorotate && games.len() > 1,
            refresh: games.iter().any(Game::is_live),
        }
    }
}

/// Owns the rotation and refresh timer tasks. Timers are schedule handles,
/// not data: `apply` always cancels both before arming anything, so two
/// instances of the same timer can never run concurrently.
#[derive(Debug, Default)]
pub struct Scheduler {
    rotation: Option<JoinHandle<()>>,
    refresh: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Cancel both timers, then start the ones the plan calls for. Must be
    /// called only after the snapshot it was planned from is in place, so a
    /// tick can never observe an out-of-range index.
    pub fn apply(&mut self, plan: TimerPlan, ui_events: &mpsc::Sender<UiEvent>) {
        self.cancel_all();

        if plan.rotate {
            self.rotation = Some(spawn_ticker(
                ROTATION_PERIOD,
                UiEvent::RotateTick,
                ui_events.clone(),
            ));
        }
        if plan.refresh {
            self.refresh = Some(spawn_ticker(
                REFRESH_PERIOD,
                UiEvent::RefreshTick,
                ui_events.clone(),
            ));
        }
    }

    pub fn cancel_all(&mut self) {
        if let Some(handle) = self.rotation.take() {
            handle.abort();
        }
        if let Some(handle) = self.refresh.take() {
            handle.abort();
        }
    }

    pub fn shutdown(&mut self) {
        self.cancel_all();
    }
}

fn spawn_ticker(
    period: Duration,
    event: UiEvent,
    ui_events: mpsc::Sender<UiEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval(period);
        // Skip the interval's immediate first tick; the first real tick lands
        // one full period after arming.
        ticks.tick().await;
        loop {
            ticks.tick().await;
            if ui_events.send(event.clone()).await.is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorebox_api::GameStatus;

    fn game(status: GameStatus) -> Game {
        Game { status, ..Game::default() }
    }

    #[test]
    fn empty_snapshot_stays_idle() {
        // Scenario A: zero events, no timers.
        assert_eq!(TimerPlan::for_snapshot(&[], true), TimerPlan::IDLE);
    }

    #[test]
    fn two_scheduled_games_rotate_without_refresh() {
        // Scenario B: 2 games, none live.
        let games = vec![game(GameStatus::Scheduled), game(GameStatus::Scheduled)];
        let plan = TimerPlan::for_snapshot(&games, true);
        assert!(plan.rotate);
        assert!(!plan.refresh);
    }

    #[test]
    fn single_live_game_refreshes_without_rotating() {
        // Scenario C: 1 live game.
        let games = vec![game(GameStatus::InProgress)];
        let plan = TimerPlan::for_snapshot(&games, true);
        assert!(!plan.rotate);
        assert!(plan.refresh);
    }

    #[test]
    fn autorotate_off_suppresses_rotation_only() {
        let games = vec![game(GameStatus::InProgress), game(GameStatus::Scheduled)];
        let plan = TimerPlan::for_snapshot(&games, false);
        assert!(!plan.rotate);
        assert!(plan.refresh);
    }

    #[test]
    fn final_games_do_not_refresh() {
        let games = vec![game(GameStatus::Final), game(GameStatus::Final)];
        let plan = TimerPlan::for_snapshot(&games, true);
        assert!(plan.rotate);
        assert!(!plan.refresh);
    }

    #[tokio::test]
    async fn apply_idle_cancels_running_timers() {
        let (tx, _rx) = mpsc::channel(8);
        let mut scheduler = Scheduler::default();
        scheduler.apply(TimerPlan { rotate: true, refresh: true }, &tx);
        assert!(scheduler.rotation.is_some());
        assert!(scheduler.refresh.is_some());

        scheduler.apply(TimerPlan::IDLE, &tx);
        assert!(scheduler.rotation.is_none());
        assert!(scheduler.refresh.is_none());
    }
}
