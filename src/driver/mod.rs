//! Game loop driver
//!
//! The loop thread owns the [`Game`] outright. Everything else talks to it
//! through a [`LoopHandle`], whose calls become [`Command`]s drained at the
//! start of every tick, before physics.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};
use glam::Vec2;

use crate::persistence::Snapshot;
use crate::renderer::{SurfaceGuard, SurfaceHost, draw_frame};
use crate::sim::{Game, GameMode, Rect};

/// Errors raised while talking to the loop thread
#[derive(thiserror::Error, Debug)]
pub enum LoopError {
    #[error("game loop is not running")]
    Stopped,

    #[error("could not spawn the game loop thread : {0}")]
    Spawn(#[from] io::Error),

    #[error("game loop thread panicked")]
    Panicked,
}

/// Shared stop flag. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Point-in-time view of the parts an input layer cares about
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub mode: GameMode,
    pub human: Rect,
    pub ball: Vec2,
}

impl Probe {
    fn of(game: &Game) -> Self {
        Self {
            mode: game.mode(),
            human: game.human().bounds(),
            ball: game.ball().pos,
        }
    }
}

/// Requests queued for the loop thread
#[derive(Debug)]
pub enum Command {
    Start,
    Pause,
    Resume,
    NewGame,
    SetMode(GameMode),
    Resize { width: u32, height: u32 },
    MoveHumanTo(f32),
    MoveHumanBy(f32),
    Restore(Snapshot),
    Snapshot(Sender<Snapshot>),
    Probe(Sender<Probe>),
}

impl Command {
    fn apply(self, game: &mut Game) {
        match self {
            Command::Start => game.start(),
            Command::Pause => game.pause(),
            Command::Resume => game.resume(),
            Command::NewGame => game.new_game(),
            Command::SetMode(mode) => game.set_mode(mode),
            Command::Resize { width, height } => game.resize(width, height),
            Command::MoveHumanTo(y) => game.move_human_paddle_to(y),
            Command::MoveHumanBy(dy) => game.move_human_paddle_by(dy),
            Command::Restore(snapshot) => game.restore(&snapshot),
            // the caller may have given up waiting
            Command::Snapshot(reply) => {
                let _ = reply.send(game.snapshot());
            }
            Command::Probe(reply) => {
                let _ = reply.send(Probe::of(game));
            }
        }
    }
}

/// Spawns the fixed-tick loop thread
pub struct GameLoop;

impl GameLoop {
    /// Move `game` onto a new loop thread drawing through `host`
    pub fn spawn<H>(game: Game, host: H) -> Result<LoopHandle, LoopError>
    where
        H: SurfaceHost + Send + 'static,
    {
        let (commands, inbox) = crossbeam_channel::unbounded();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let thread = thread::Builder::new()
            .name("game-loop".to_string())
            .spawn(move || run(game, host, inbox, token))?;

        Ok(LoopHandle {
            commands,
            cancel,
            thread: Some(thread),
        })
    }
}

fn run<H: SurfaceHost>(
    mut game: Game,
    mut host: H,
    inbox: Receiver<Command>,
    cancel: CancellationToken,
) -> Game {
    log::info!("Game loop started at {} ticks per second", game.frames_per_second());
    let mut ticks: u64 = 0;
    let mut next_tick = Instant::now();

    while !cancel.is_cancelled() {
        for command in inbox.try_iter() {
            command.apply(&mut game);
        }

        {
            let mut surface = SurfaceGuard::acquire(&mut host);
            if game.mode() == GameMode::Running {
                game.update_physics();
            }
            if !cancel.is_cancelled() {
                if let Some(canvas) = surface.canvas() {
                    draw_frame(&game, canvas);
                }
            }
        }
        ticks += 1;

        next_tick += game.tick_interval();
        let now = Instant::now();
        match next_tick.checked_duration_since(now) {
            Some(remaining) if !remaining.is_zero() => thread::sleep(remaining),
            _ => log::trace!("Tick {ticks} overran its budget by {:?}", now - next_tick),
        }
    }

    log::info!("Game loop stopped after {ticks} ticks");
    game
}

/// Caller side of a running loop.
///
/// Dropping the handle stops the loop and waits for the thread to exit.
pub struct LoopHandle {
    commands: Sender<Command>,
    cancel: CancellationToken,
    thread: Option<JoinHandle<Game>>,
}

impl LoopHandle {
    fn send(&self, command: Command) -> Result<(), LoopError> {
        self.commands.send(command).map_err(|_| LoopError::Stopped)
    }

    pub fn start(&self) -> Result<(), LoopError> {
        self.send(Command::Start)
    }

    pub fn pause(&self) -> Result<(), LoopError> {
        self.send(Command::Pause)
    }

    pub fn resume(&self) -> Result<(), LoopError> {
        self.send(Command::Resume)
    }

    pub fn new_game(&self) -> Result<(), LoopError> {
        self.send(Command::NewGame)
    }

    pub fn set_mode(&self, mode: GameMode) -> Result<(), LoopError> {
        self.send(Command::SetMode(mode))
    }

    pub fn resize(&self, width: u32, height: u32) -> Result<(), LoopError> {
        self.send(Command::Resize { width, height })
    }

    pub fn move_human_paddle_to(&self, y: f32) -> Result<(), LoopError> {
        self.send(Command::MoveHumanTo(y))
    }

    pub fn move_human_paddle_by(&self, dy: f32) -> Result<(), LoopError> {
        self.send(Command::MoveHumanBy(dy))
    }

    pub fn restore(&self, snapshot: Snapshot) -> Result<(), LoopError> {
        self.send(Command::Restore(snapshot))
    }

    /// Snapshot taken at the start of the next tick
    pub fn snapshot(&self) -> Result<Snapshot, LoopError> {
        let (reply, answer) = crossbeam_channel::bounded(1);
        self.send(Command::Snapshot(reply))?;
        answer.recv().map_err(|_| LoopError::Stopped)
    }

    pub fn probe(&self) -> Result<Probe, LoopError> {
        let (reply, answer) = crossbeam_channel::bounded(1);
        self.send(Command::Probe(reply))?;
        answer.recv().map_err(|_| LoopError::Stopped)
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop the loop, wait for it and take the game back
    pub fn stop(mut self) -> Result<Game, LoopError> {
        self.shutdown().ok_or(LoopError::Stopped)?
    }

    fn shutdown(&mut self) -> Option<Result<Game, LoopError>> {
        self.cancel.cancel();
        let thread = self.thread.take()?;
        Some(thread.join().map_err(|_| {
            log::error!("Game loop thread panicked");
            LoopError::Panicked
        }))
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
