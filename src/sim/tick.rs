//! Fixed timestep physics tick
//!
//! One call advances the simulation by exactly one frame. Only meaningful while
//! the game is Running; the loop skips it otherwise.

use rand::Rng;

use super::collision;
use super::game::Game;
use super::state::{GameMode, Side};

/// What a single tick resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ball bounced off a paddle
    PaddleHit(Side),
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// Ball passed a side wall; the given side scored and the round was reset
    RoundOver { winner: Side },
    /// Nothing was hit
    Clear,
}

impl Game {
    /// Advance the simulation by one tick.
    ///
    /// Checks run in a fixed order and at most one of them fires: human paddle,
    /// computer paddle, horizontal walls, right wall (human scores), left wall
    /// (computer scores), otherwise the computer paddle may react. A scoring
    /// tick ends right after the transition.
    pub fn update_physics(&mut self) -> TickOutcome {
        self.human.decay_hit();
        self.computer.decay_hit();

        let speed = self.settings.ball_speed;
        let max_angle = self.settings.max_bounce_angle;
        let radius = self.ball.radius();

        let outcome = if collision::ball_hits_paddle(&self.ball, &self.human.bounds()) {
            self.ball.vel = collision::paddle_bounce(&self.ball, &self.human.bounds(), speed, max_angle);
            self.ball.pos.x = self.human.bounds().right() + radius;
            self.human.hit_countdown = self.settings.hit_flash_frames;
            TickOutcome::PaddleHit(Side::Human)
        } else if collision::ball_hits_paddle(&self.ball, &self.computer.bounds()) {
            self.ball.vel =
                collision::paddle_bounce(&self.ball, &self.computer.bounds(), speed, max_angle);
            self.ball.pos.x = self.computer.left - radius;
            self.computer.hit_countdown = self.settings.hit_flash_frames;
            TickOutcome::PaddleHit(Side::Computer)
        } else if collision::touches_horizontal_wall(&self.ball, &self.arena) {
            self.ball.vel.y = -self.ball.vel.y;
            TickOutcome::WallBounce
        } else if collision::passes_right_wall(&self.ball, &self.arena) {
            log::debug!("Ball passed the right wall");
            self.set_mode(GameMode::Win);
            return TickOutcome::RoundOver {
                winner: Side::Human,
            };
        } else if collision::passes_left_wall(&self.ball) {
            log::debug!("Ball passed the left wall");
            self.set_mode(GameMode::Lose);
            return TickOutcome::RoundOver {
                winner: Side::Computer,
            };
        } else {
            if self.rng.random_bool(self.settings.ai_move_probability) {
                self.track_ball();
            }
            TickOutcome::Clear
        };

        self.advance_ball();
        log::trace!("Tick {:?}, ball at {}", outcome, self.ball.pos);
        outcome
    }

    /// Step the computer paddle toward the ball's height
    fn track_ball(&mut self) {
        let step = self.settings.paddle_speed;
        let ball_y = self.ball.pos.y;
        let paddle = self.computer.bounds();

        let top = if paddle.top > ball_y {
            paddle.top - step
        } else if paddle.bottom() < ball_y {
            paddle.top + step
        } else {
            return;
        };
        let arena = self.arena;
        self.computer.move_to(paddle.left, top, &arena);
    }

    fn advance_ball(&mut self) {
        self.ball.pos += self.ball.vel;
        self.ball.pos.y = collision::clamp_ball_y(self.ball.pos.y, self.ball.radius(), &self.arena);
    }
}
