//! Duel Pong - one human paddle against one computer paddle
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (entities, physics, round state machine)
//! - `driver`: Game loop thread, command queue and shutdown
//! - `renderer`: Drawing surface collaborator and frame painting
//! - `platform`: Pointer input translation
//! - `persistence`: Snapshot/restore into a key-value store
//! - `notify`: Status and score notifications for the host UI
//! - `settings`: Construction-time configuration

pub mod driver;
pub mod notify;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{CancellationToken, GameLoop, LoopError, LoopHandle};
pub use notify::{Notification, Notifier};
pub use settings::{ConfigError, Settings};
pub use sim::{Game, GameMode};

/// Default tuning values
pub mod consts {
    /// Ticks per second
    pub const FPS_INIT: u32 = 60;

    /// Paddle defaults
    pub const PADDLE_WIDTH: u32 = 25;
    pub const PADDLE_HEIGHT: u32 = 85;
    /// Paddle travel per tick (pixels)
    pub const PADDLE_SPEED: f32 = 12.0;
    /// Gap kept between a paddle and its side wall
    pub const PADDLE_WALL_MARGIN: f32 = 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: u32 = 15;
    /// Ball travel per tick (pixels), constant between collisions
    pub const BALL_SPEED: f32 = 8.0;

    /// 75 degrees
    pub const MAX_BOUNCE_ANGLE: f32 = 5.0 * std::f32::consts::PI / 12.0;

    /// Chance per tick that the computer paddle reacts
    pub const AI_MOVE_PROBABILITY: f64 = 0.6;
    /// Frames a paddle stays highlighted after a hit
    pub const HIT_FLASH_FRAMES: u32 = 5;
}
