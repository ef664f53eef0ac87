mod app;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::keys::KeyAction;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::scheduler::Scheduler;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::error;
use std::io::Stdout;
use std::sync::Arc;
use std::time::Instant;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(log::LevelFilter::Debug)?;
    tui_logger::set_default_level(log::LevelFilter::Debug);

    let app = Arc::new(Mutex::new(App::new()));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Trigger the first scoreboard load (today, default league)
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(
        terminal,
        app,
        ui_event_rx,
        ui_event_tx,
        network_req_tx,
        network_resp_rx,
    )
    .await;

    input_handler.abort();
    network_task.abort();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("scorebox {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "scorebox - MLB / NFL / NBA terminal scoreboard

Usage:
  scorebox
  scorebox --help
  scorebox --version

Keys:
  1/2/3  league    [ ]  date -/+    t  today
  \u{2190}/\u{2192}    game      a    auto-rotate  r  reload  q  quit

Environment:
  SCOREBOX_AUTOROTATE   Set to 0 to start with auto-rotation off"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    ui_event_tx: mpsc::Sender<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();
    let mut scheduler = Scheduler::default();

    loop {
        let should_redraw = tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                handle_ui_event(ui_event, &app, &mut scheduler, &ui_event_tx, &network_requests).await
            }

            Some(response) = network_responses.recv() => {
                handle_network_response(response, &app, &mut scheduler, &ui_event_tx, &mut loading).await
            }

            else => break,
        };

        if should_redraw {
            let guard = app.lock().await;
            let now = Instant::now();
            // Render-pass cache consult: a live game with a stale entry gets
            // a fetch queued; this pass draws without it (or with the stale
            // display left as-is) until the response lands.
            if let Some(request) = guard.situation_request(now) {
                let _ = network_requests.send(request).await;
            }
            draw::draw(&mut terminal, &guard, loading, now);
        }
    }

    scheduler.shutdown();
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    scheduler: &mut Scheduler,
    ui_event_tx: &mpsc::Sender<UiEvent>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let request = app.lock().await.load_request();
            let _ = network_requests.send(request).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            let mut guard = app.lock().await;
            match keys::handle_key_bindings(key_event, &mut guard) {
                KeyAction::Nothing => false,
                KeyAction::Redraw => true,
                KeyAction::Reload => {
                    // Cancel unconditionally before the reload; the load
                    // result decides which timers come back.
                    scheduler.cancel_all();
                    let request = guard.load_request();
                    drop(guard);
                    let _ = network_requests.send(request).await;
                    true
                }
                KeyAction::Replan => {
                    let plan = guard.timer_plan();
                    drop(guard);
                    scheduler.apply(plan, ui_event_tx);
                    true
                }
            }
        }
        UiEvent::Resize => true,
        UiEvent::RotateTick => {
            app.lock().await.next_game();
            true
        }
        UiEvent::RefreshTick => {
            scheduler.cancel_all();
            let request = app.lock().await.load_request();
            let _ = network_requests.send(request).await;
            false
        }
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    scheduler: &mut Scheduler,
    ui_event_tx: &mpsc::Sender<UiEvent>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            true
        }
        NetworkResponse::ScoreboardLoaded { league, date, games } => {
            let mut guard = app.lock().await;
            if !guard.on_scoreboard_loaded(league, date, games) {
                // Raced a selection change; a newer load is already on its way.
                return false;
            }
            let plan = guard.timer_plan();
            drop(guard);
            // Timers are armed only after the snapshot is fully in place and
            // the index is clamped.
            scheduler.apply(plan, ui_event_tx);
            true
        }
        NetworkResponse::ScoreboardFailed { message } => {
            error!("scoreboard load failed: {message}");
            app.lock().await.on_scoreboard_failed(message);
            scheduler.cancel_all();
            true
        }
        NetworkResponse::SituationLoaded { league, game_id, situation } => {
            app.lock()
                .await
                .on_situation_loaded(league, game_id, situation, Instant::now())
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide).unwrap();
    execute!(stdout, terminal::EnterAlternateScreen).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    terminal::enable_raw_mode().unwrap();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0)).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    execute!(stdout, terminal::LeaveAlternateScreen).unwrap();
    execute!(stdout, cursor::Show).unwrap();
    terminal::disable_raw_mode().unwrap();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
