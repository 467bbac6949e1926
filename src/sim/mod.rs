//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only, one physics update per tick
//! - Seeded RNG for the computer paddle's reactions
//! - No rendering, threading or platform dependencies

pub mod collision;
pub mod game;
pub mod state;
pub mod tick;

pub use game::Game;
pub use state::{Arena, Ball, EntryAction, GameMode, Paddle, Rect, Side, StatusKind};
pub use tick::TickOutcome;
