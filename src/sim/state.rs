//! Entities, arena bounds and the game mode table
//!
//! Plain state records. Everything that survives a snapshot lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PADDLE_WALL_MARGIN;
use crate::renderer::Color;

/// Axis-aligned rectangle in canvas pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle spanning `center ± half_extent` on both axes
    pub fn around(center: Vec2, half_extent: f32) -> Self {
        Self::new(
            center.x - half_extent,
            center.y - half_extent,
            2.0 * half_extent,
            2.0 * half_extent,
        )
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }

    /// Point test, edges included
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    /// Overlap test; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }
}

/// Canvas dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    pub width: u32,
    pub height: u32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
        }
    }
}

impl Arena {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Confine a paddle's top-left corner to the arena:
    /// `left` into `[2, width - paddle_width - 2]`, `top` into `[0, height - paddle_height - 1]`.
    ///
    /// When the arena is too small for the paddle the lower bound wins.
    pub fn clamp_paddle(
        &self,
        left: f32,
        top: f32,
        paddle_width: f32,
        paddle_height: f32,
    ) -> (f32, f32) {
        let max_left = self.width as f32 - paddle_width - PADDLE_WALL_MARGIN;
        let max_top = self.height as f32 - paddle_height - 1.0;
        (
            left.min(max_left).max(PADDLE_WALL_MARGIN),
            top.min(max_top).max(0.0),
        )
    }
}

/// Which player a paddle, point or outcome belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Left paddle, driven by input
    Human,
    /// Right paddle, driven by the AI
    Computer,
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    radius: f32,
    pub color: Color,
}

impl Ball {
    pub fn new(radius: u32, color: Color) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: radius as f32,
            color,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Bounding box of the ball
    pub fn bounds(&self) -> Rect {
        Rect::around(self.pos, self.radius)
    }
}

/// A player's paddle and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub left: f32,
    pub top: f32,
    width: f32,
    height: f32,
    pub score: u32,
    /// Frames left of the "just hit" highlight, 0 when idle
    pub hit_countdown: u32,
    pub color: Color,
}

impl Paddle {
    pub fn new(width: u32, height: u32, color: Color) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: width as f32,
            height: height as f32,
            score: 0,
            hit_countdown: 0,
            color,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }

    /// Move the paddle, keeping it inside the arena
    pub fn move_to(&mut self, left: f32, top: f32, arena: &Arena) {
        (self.left, self.top) = arena.clamp_paddle(left, top, self.width, self.height);
    }

    pub fn is_flashing(&self) -> bool {
        self.hit_countdown > 0
    }

    /// Count the hit highlight down by one frame
    pub fn decay_hit(&mut self) {
        self.hit_countdown = self.hit_countdown.saturating_sub(1);
    }
}

/// Status line shown on entering a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Win,
    Lose,
    Paused,
}

/// Side effect performed when a mode is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    /// Center the ball and both paddles
    ResetRound,
    HideStatus,
    ShowStatus(StatusKind),
    AwardPoint(Side),
}

impl EntryAction {
    /// Whether the action only affects what the host displays
    pub fn is_presentational(&self) -> bool {
        matches!(self, EntryAction::HideStatus | EntryAction::ShowStatus(_))
    }
}

/// Current mode of the round state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Paused,
    Ready,
    Running,
    Lose,
    Win,
}

impl GameMode {
    /// Entry actions, applied in order
    pub fn entry_actions(self) -> &'static [EntryAction] {
        use EntryAction::*;
        match self {
            GameMode::Ready => &[ResetRound],
            GameMode::Running => &[HideStatus],
            GameMode::Win => &[ShowStatus(StatusKind::Win), AwardPoint(Side::Human), ResetRound],
            GameMode::Lose => &[
                ShowStatus(StatusKind::Lose),
                AwardPoint(Side::Computer),
                ResetRound,
            ],
            GameMode::Paused => &[ShowStatus(StatusKind::Paused)],
        }
    }

    /// Every mode except Running: physics does not tick
    pub fn is_between_rounds(self) -> bool {
        self != GameMode::Running
    }

    /// Stable integer code used by the persistence store
    pub fn code(self) -> i32 {
        match self {
            GameMode::Paused => 0,
            GameMode::Ready => 1,
            GameMode::Running => 2,
            GameMode::Lose => 3,
            GameMode::Win => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(GameMode::Paused),
            1 => Some(GameMode::Ready),
            2 => Some(GameMode::Running),
            3 => Some(GameMode::Lose),
            4 => Some(GameMode::Win),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges_touching_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Rect::new(9.5, 9.5, 1.0, 1.0)));
        assert!(a.contains(10.0, 10.0));
        assert!(!a.contains(10.1, 5.0));
    }

    #[test]
    fn clamp_keeps_paddle_inside() {
        let arena = Arena::new(480, 320);
        assert_eq!(arena.clamp_paddle(-50.0, -50.0, 25.0, 85.0), (2.0, 0.0));
        assert_eq!(arena.clamp_paddle(900.0, 900.0, 25.0, 85.0), (453.0, 234.0));
        assert_eq!(arena.clamp_paddle(100.0, 100.0, 25.0, 85.0), (100.0, 100.0));
    }

    #[test]
    fn clamp_in_tiny_arena_prefers_lower_bound() {
        let arena = Arena::default();
        assert_eq!(arena.clamp_paddle(40.0, 40.0, 25.0, 85.0), (2.0, 0.0));
    }

    #[test]
    fn hit_countdown_floors_at_zero() {
        let mut paddle = Paddle::new(25, 85, Color::BLUE);
        paddle.hit_countdown = 1;
        paddle.decay_hit();
        assert!(!paddle.is_flashing());
        paddle.decay_hit();
        assert_eq!(paddle.hit_countdown, 0);
    }

    #[test]
    fn mode_codes_round_trip() {
        for mode in [
            GameMode::Paused,
            GameMode::Ready,
            GameMode::Running,
            GameMode::Lose,
            GameMode::Win,
        ] {
            assert_eq!(GameMode::from_code(mode.code()), Some(mode));
        }
        assert_eq!(GameMode::from_code(9), None);
    }

    #[test]
    fn entry_table() {
        assert_eq!(GameMode::Ready.entry_actions(), &[EntryAction::ResetRound]);
        assert_eq!(GameMode::Running.entry_actions(), &[EntryAction::HideStatus]);
        assert_eq!(
            GameMode::Win.entry_actions(),
            &[
                EntryAction::ShowStatus(StatusKind::Win),
                EntryAction::AwardPoint(Side::Human),
                EntryAction::ResetRound
            ]
        );
        assert!(
            GameMode::Paused
                .entry_actions()
                .iter()
                .all(EntryAction::is_presentational)
        );
        assert!(!GameMode::Running.is_between_rounds());
        assert!(GameMode::Ready.is_between_rounds());
    }
}
