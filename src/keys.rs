use crate::app::App;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use scorebox_api::League;

/// What the main loop should do after a key was handled. Selection changes
/// reload (which cancels timers first); the autorotate toggle only re-plans
/// timers from the snapshot already held.
pub enum KeyAction {
    Nothing,
    Redraw,
    Reload,
    Replan,
}

pub fn handle_key_bindings(key_event: KeyEvent, app: &mut App) -> KeyAction {
    match (key_event.code, key_event.modifiers) {
        // Quit
        (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // League selection
        (Char('1'), _) => select_league(app, League::Mlb),
        (Char('2'), _) => select_league(app, League::Nfl),
        (Char('3'), _) => select_league(app, League::Nba),

        // Game navigation — manual advance never resets the rotation phase.
        (KeyCode::Left | Char('h'), _) => {
            app.prev_game();
            KeyAction::Redraw
        }
        (KeyCode::Right | Char('l'), _) => {
            app.next_game();
            KeyAction::Redraw
        }

        // Date selection
        (Char('['), _) => {
            app.shift_date(false);
            KeyAction::Reload
        }
        (Char(']'), _) => {
            app.shift_date(true);
            KeyAction::Reload
        }
        (Char('t'), _) => {
            app.reset_date_today();
            KeyAction::Reload
        }

        // Auto-rotate toggle
        (Char('a'), _) => {
            app.toggle_autorotate();
            KeyAction::Replan
        }

        // Manual reload
        (Char('r'), _) => KeyAction::Reload,

        // Log pane
        (Char('"'), _) => {
            app.toggle_show_logs();
            KeyAction::Redraw
        }

        _ => KeyAction::Nothing,
    }
}

fn select_league(app: &mut App, league: League) -> KeyAction {
    if app.select_league(league) {
        KeyAction::Reload
    } else {
        KeyAction::Nothing
    }
}
