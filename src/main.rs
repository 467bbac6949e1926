//! Duel Pong - headless runner
//!
//! Runs the game loop against an off-screen surface for a fixed time, logging
//! status and score notifications. Optionally resumes from and writes back a
//! saved state file.

use std::error::Error;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;

use duel_pong::notify::{Notification, Notifier};
use duel_pong::persistence::MemoryStore;
use duel_pong::platform::{PointerEvent, PointerTracker};
use duel_pong::renderer::HeadlessHost;
use duel_pong::{Game, GameLoop, LoopError, LoopHandle, Settings};

#[derive(Parser)]
#[command(about, long_about = None)]
struct Cli {
    /// JSON settings file. Missing fields take their defaults.
    #[arg(long, short, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Surface width in pixels
    #[arg(long, default_value_t = 480)]
    width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 320)]
    height: u32,

    /// How long to run before stopping the loop
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,

    /// Resume from a state file written by `--save`
    #[arg(long, short, value_name = "PATH")]
    restore: Option<PathBuf>,

    /// Write the final state to this file
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Drag the human paddle after the ball
    #[arg(long, short)]
    autoplay: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let (notifier, notifications) = Notifier::channel();
    let mut game = Game::new(settings, notifier)?;
    game.resize(cli.width, cli.height);

    let restored = match &cli.restore {
        Some(path) => {
            let store = MemoryStore::load_from_path(path)?;
            game.restore_state(&store)?;
            true
        }
        None => false,
    };

    let host = HeadlessHost::new();
    let mut handle = GameLoop::spawn(game, host.clone())?;
    if !restored {
        handle.start()?;
    }
    log::info!("Duel Pong running for {}s on a {}x{} surface", cli.seconds, cli.width, cli.height);

    let mut tracker = PointerTracker::new();
    let deadline = Instant::now() + Duration::from_secs_f64(cli.seconds.max(0.0));
    while Instant::now() < deadline {
        for notification in notifications.try_iter() {
            match notification {
                Notification::Status { text, visible: true } => log::info!("Status: {text}"),
                Notification::Status { visible: false, .. } => log::debug!("Status hidden"),
                Notification::Score(score) => log::info!("Score: {score}"),
            }
        }
        drive_pointer(&mut handle, &mut tracker, cli.autoplay)?;
        thread::sleep(Duration::from_millis(10));
    }

    let game = handle.stop()?;
    if let Some(path) = &cli.save {
        let mut store = MemoryStore::new();
        game.save_state(&mut store);
        store.save_to_path(path)?;
    }

    let stats = host.stats();
    log::info!(
        "Final score {}-{}, {} frames drawn, {} surfaces unavailable",
        game.human().score,
        game.computer().score,
        stats.released,
        stats.skipped
    );
    Ok(())
}

/// Tap to start the next round; with `autoplay`, hold the paddle and follow the ball
fn drive_pointer(
    handle: &mut LoopHandle,
    tracker: &mut PointerTracker,
    autoplay: bool,
) -> Result<(), LoopError> {
    let probe = handle.probe()?;
    let paddle_x = probe.human.left + probe.human.width / 2.0;

    if probe.mode.is_between_rounds() {
        tracker.handle(PointerEvent::Up, handle);
        tracker.handle(
            PointerEvent::Down {
                x: paddle_x,
                y: probe.human.center_y(),
            },
            handle,
        );
        return Ok(());
    }
    if !autoplay {
        return Ok(());
    }

    if !tracker.is_dragging() {
        tracker.handle(
            PointerEvent::Down {
                x: paddle_x,
                y: probe.human.center_y(),
            },
            handle,
        );
    }
    tracker.handle(
        PointerEvent::Move {
            x: paddle_x,
            y: probe.ball.y,
        },
        handle,
    );
    Ok(())
}
