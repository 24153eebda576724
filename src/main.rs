use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::cursor::Show;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
use grid_snake::config::{GameConfig, SpawnPolicy};
use grid_snake::error::AppError;
use grid_snake::game::GameSession;
use grid_snake::input::{GameInput, map_key};
use grid_snake::progression::GameStatus;
use grid_snake::renderer::{self, FrameInfo};
use grid_snake::scheduler::TickScheduler;
use grid_snake::terminal_runtime::{ResizeAction, TerminalSession, resize_action};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Longest wait for input while no tick is pending.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file overriding game settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement, for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,

    /// Place food anywhere on the board, even on the snake or other food.
    #[arg(long = "legacy-food")]
    legacy_food: bool,

    /// Write logs to this file (filtered by RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    init_logging(cli.log_file.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if cli.legacy_food {
        config.spawn_policy = SpawnPolicy::Legacy;
    }

    install_panic_hook();
    let mut terminal = TerminalSession::enter()?;
    let grid = terminal.viewport_grid()?;
    let mut session = match cli.seed {
        Some(seed) => GameSession::new_with_seed(grid, config, seed),
        None => GameSession::new(grid, config),
    };

    game_loop(&mut terminal, &mut session)
}

fn game_loop(terminal: &mut TerminalSession, session: &mut GameSession) -> Result<(), AppError> {
    let mut scheduler = TickScheduler::new();
    let mut suspended = false;

    loop {
        let view = session.view();
        let info = FrameInfo {
            waiting_for_input: !scheduler.is_armed() && view.status == GameStatus::Running,
            viewport_too_small: suspended,
        };
        terminal
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &view, info))?;

        let timeout = scheduler
            .time_until_due(Instant::now())
            .map_or(IDLE_POLL_INTERVAL, |due| due.min(IDLE_POLL_INTERVAL));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match map_key(key) {
                    Some(GameInput::Quit) => break,
                    Some(GameInput::Confirm)
                        if !suspended && session.status() == GameStatus::Finished =>
                    {
                        let action = terminal.current_resize_action()?;
                        suspended = apply_resize(session, &mut scheduler, action);
                    }
                    Some(GameInput::Direction(direction))
                        if !suspended && session.status() == GameStatus::Running =>
                    {
                        session.set_heading(direction);
                        if !scheduler.is_armed() {
                            scheduler.arm(session.speed(), Instant::now());
                        }
                    }
                    _ => {}
                },
                Event::Resize(width, height) => {
                    let action = resize_action(width, height);
                    suspended = apply_resize(session, &mut scheduler, action);
                }
                _ => {}
            }
        }

        if scheduler.poll(Instant::now()) {
            let report = session.tick();
            if let Some(speed) = report.speed_changed {
                scheduler.rearm(speed, Instant::now());
            }
            if report.finished.is_some() {
                scheduler.cancel();
            }
        }
    }

    info!(score = session.score(), "quit");
    Ok(())
}

/// Stops the tick timer and either restarts on the new grid or leaves the
/// session untouched. Returns true while play is suspended.
fn apply_resize(
    session: &mut GameSession,
    scheduler: &mut TickScheduler,
    action: ResizeAction,
) -> bool {
    scheduler.cancel();
    match action {
        ResizeAction::Restart(grid) => {
            session.restart(grid);
            false
        }
        ResizeAction::Suspend => true,
    }
}

fn init_logging(path: Option<&Path>) -> Result<(), AppError> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grid_snake=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .map_err(|error| AppError::Logging(error.to_string()))
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_after_panic();
        default_hook(panic_info);
    }));
}

fn restore_terminal_after_panic() {
    let _ = disable_raw_mode();

    let mut stdout = io::stdout();
    let _ = execute!(stdout, Show, LeaveAlternateScreen);
}
