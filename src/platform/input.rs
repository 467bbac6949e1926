//! Pointer input: turns down/move/up events into paddle commands

use crate::driver::{LoopError, LoopHandle};
use crate::sim::Game;

/// Raw pointer events in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
}

/// What pointer input may do to a game, owned or behind a loop
pub trait PaddleControl {
    fn is_between_rounds(&self) -> bool;

    fn is_point_in_human_paddle(&self, x: f32, y: f32) -> bool;

    /// Center the human paddle on `y`
    fn move_human_paddle_to(&mut self, y: f32);

    fn move_human_paddle_by(&mut self, dy: f32);

    fn resume(&mut self);
}

impl PaddleControl for Game {
    fn is_between_rounds(&self) -> bool {
        Game::is_between_rounds(self)
    }

    fn is_point_in_human_paddle(&self, x: f32, y: f32) -> bool {
        Game::is_point_in_human_paddle(self, x, y)
    }

    fn move_human_paddle_to(&mut self, y: f32) {
        Game::move_human_paddle_to(self, y);
    }

    fn move_human_paddle_by(&mut self, dy: f32) {
        Game::move_human_paddle_by(self, dy);
    }

    fn resume(&mut self) {
        Game::resume(self);
    }
}

fn report(result: Result<(), LoopError>) {
    if let Err(e) = result {
        log::warn!("Dropped pointer input: {e}");
    }
}

impl PaddleControl for LoopHandle {
    fn is_between_rounds(&self) -> bool {
        match self.probe() {
            Ok(probe) => probe.mode.is_between_rounds(),
            Err(e) => {
                log::warn!("Could not query game mode: {e}");
                false
            }
        }
    }

    fn is_point_in_human_paddle(&self, x: f32, y: f32) -> bool {
        match self.probe() {
            Ok(probe) => probe.human.contains(x, y),
            Err(e) => {
                log::warn!("Could not query paddle position: {e}");
                false
            }
        }
    }

    fn move_human_paddle_to(&mut self, y: f32) {
        report(LoopHandle::move_human_paddle_to(self, y));
    }

    fn move_human_paddle_by(&mut self, dy: f32) {
        report(LoopHandle::move_human_paddle_by(self, dy));
    }

    fn resume(&mut self) {
        report(LoopHandle::resume(self));
    }
}

/// Drag state for the human paddle
#[derive(Debug, Default)]
pub struct PointerTracker {
    dragging: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Apply one pointer event to `target`
    pub fn handle<C: PaddleControl + ?Sized>(&mut self, event: PointerEvent, target: &mut C) {
        match event {
            PointerEvent::Down { x, y } => {
                if target.is_between_rounds() {
                    target.resume();
                } else if target.is_point_in_human_paddle(x, y) {
                    self.dragging = true;
                }
            }
            PointerEvent::Move { y, .. } => {
                if self.dragging {
                    target.move_human_paddle_to(y);
                }
            }
            PointerEvent::Up => self.dragging = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notifier;
    use crate::settings::Settings;
    use crate::sim::GameMode;

    fn running_game() -> Game {
        let settings = Settings {
            seed: Some(9),
            ..Settings::default()
        };
        let mut game = Game::new(settings, Notifier::disabled()).unwrap();
        game.resize(480, 320);
        game.start();
        game
    }

    #[test]
    fn drag_moves_paddle() {
        let mut game = running_game();
        let mut tracker = PointerTracker::new();

        tracker.handle(PointerEvent::Down { x: 10.0, y: 160.0 }, &mut game);
        assert!(tracker.is_dragging());
        tracker.handle(PointerEvent::Move { x: 12.0, y: 100.0 }, &mut game);
        assert_eq!(game.human().top, 100.0 - 42.5);

        tracker.handle(PointerEvent::Up, &mut game);
        assert!(!tracker.is_dragging());
        tracker.handle(PointerEvent::Move { x: 12.0, y: 250.0 }, &mut game);
        assert_eq!(game.human().top, 57.5);
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut game = running_game();
        let mut tracker = PointerTracker::new();
        tracker.handle(PointerEvent::Down { x: 300.0, y: 160.0 }, &mut game);
        assert!(!tracker.is_dragging());
        tracker.handle(PointerEvent::Move { x: 300.0, y: 20.0 }, &mut game);
        assert_eq!(game.human().top, 117.5);
    }

    #[test]
    fn tap_between_rounds_resumes() {
        let mut game = running_game();
        game.set_mode(GameMode::Lose);
        let mut tracker = PointerTracker::new();
        tracker.handle(PointerEvent::Down { x: 300.0, y: 160.0 }, &mut game);
        assert_eq!(game.mode(), GameMode::Running);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn drag_clamps_to_arena() {
        let mut game = running_game();
        let mut tracker = PointerTracker::new();
        tracker.handle(PointerEvent::Down { x: 10.0, y: 160.0 }, &mut game);
        tracker.handle(PointerEvent::Move { x: 10.0, y: 5000.0 }, &mut game);
        assert_eq!(game.human().top, 320.0 - 85.0 - 1.0);
        tracker.handle(PointerEvent::Move { x: 10.0, y: -5000.0 }, &mut game);
        assert_eq!(game.human().top, 0.0);
    }
}
