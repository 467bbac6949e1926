//! Paints the current game state onto a canvas

use glam::Vec2;

use super::canvas::{Canvas, Color};
use crate::sim::{Game, Paddle};

/// Corner radius of the paddle rectangles
const PADDLE_CORNER_RADIUS: f32 = 5.0;
/// Stroke width of the median line
const MEDIAN_LINE_WIDTH: f32 = 5.0;

/// Draw the arena, both paddles and the ball
pub fn draw_frame<C: Canvas + ?Sized>(game: &Game, canvas: &mut C) {
    let palette = game.palette();
    let arena = game.arena();

    canvas.clear(palette.background);

    let middle = (arena.width / 2) as f32;
    canvas.line(
        Vec2::new(middle, 1.0),
        Vec2::new(middle, arena.height as f32 - 1.0),
        MEDIAN_LINE_WIDTH,
        palette.median_line,
    );

    for paddle in [game.human(), game.computer()] {
        let color = if paddle.is_flashing() {
            palette.hit
        } else {
            paddle.color
        };
        draw_paddle(paddle, color, canvas);
    }

    let ball = game.ball();
    canvas.fill_circle(ball.pos, ball.radius(), ball.color);
}

fn draw_paddle<C: Canvas + ?Sized>(paddle: &Paddle, color: Color, canvas: &mut C) {
    canvas.fill_round_rect(paddle.bounds(), PADDLE_CORNER_RADIUS, color);
}
