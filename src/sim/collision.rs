//! Collision detection and response
//!
//! Pure functions over the entities: no state is mutated here.

use glam::Vec2;

use super::state::{Arena, Ball, Rect};

/// Whether the ball's bounding box overlaps the paddle
pub fn ball_hits_paddle(ball: &Ball, paddle: &Rect) -> bool {
    paddle.intersects(&ball.bounds())
}

/// Where on the paddle the ball struck, in `[-1, 1]`:
/// +1 at the top edge, 0 at the center, -1 at the bottom edge.
pub fn intersect_offset(paddle: &Rect, ball_y: f32) -> f32 {
    let half_height = paddle.height / 2.0;
    ((paddle.center_y() - ball_y) / half_height).clamp(-1.0, 1.0)
}

/// Outgoing angle for a normalized intersect offset
#[inline]
pub fn bounce_angle(offset: f32, max_angle: f32) -> f32 {
    offset * max_angle
}

/// New ball velocity after a paddle hit. Horizontal direction flips, speed is
/// exactly `speed`; a positive angle sends the ball up the screen.
pub fn deflect(vel: Vec2, angle: f32, speed: f32) -> Vec2 {
    Vec2::new(
        -vel.x.signum() * speed * angle.cos(),
        speed * -angle.sin(),
    )
}

/// Ball velocity after striking `paddle`
pub fn paddle_bounce(ball: &Ball, paddle: &Rect, speed: f32, max_angle: f32) -> Vec2 {
    let angle = bounce_angle(intersect_offset(paddle, ball.pos.y), max_angle);
    deflect(ball.vel, angle, speed)
}

/// Ball touches the top or bottom wall
pub fn touches_horizontal_wall(ball: &Ball, arena: &Arena) -> bool {
    let r = ball.radius();
    ball.pos.y <= r || ball.pos.y + r >= arena.height as f32 - 1.0
}

/// Ball reached the right wall: the human scores
pub fn passes_right_wall(ball: &Ball, arena: &Arena) -> bool {
    ball.pos.x + ball.radius() >= arena.width as f32 - 1.0
}

/// Ball reached the left wall: the computer scores
pub fn passes_left_wall(ball: &Ball) -> bool {
    ball.pos.x <= ball.radius()
}

/// Keep the ball center within `[r, height - r - 1]` vertically
pub fn clamp_ball_y(y: f32, radius: f32, arena: &Arena) -> f32 {
    y.min(arena.height as f32 - radius - 1.0).max(radius)
}
