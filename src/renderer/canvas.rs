//! Drawing surface collaborator
//!
//! The host owns the real surface. The loop borrows it once per tick through a
//! [`SurfaceGuard`], which always hands it back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Rect;

/// RGBA colour, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Draw primitives issued during the draw step
pub trait Canvas {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);

    fn fill_round_rect(&mut self, rect: Rect, corner_radius: f32, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
}

/// Source of per-tick drawing surfaces
pub trait SurfaceHost {
    type Surface: Canvas;

    /// Lock a surface for drawing. `None` means nothing can be drawn this tick.
    fn acquire(&mut self) -> Option<Self::Surface>;

    /// Unlock and post a surface previously returned by [`SurfaceHost::acquire`]
    fn release(&mut self, surface: Self::Surface);
}

/// Scoped surface lock: the surface goes back to the host when the guard drops,
/// including during unwinding.
pub struct SurfaceGuard<'a, H: SurfaceHost> {
    host: &'a mut H,
    surface: Option<H::Surface>,
}

impl<'a, H: SurfaceHost> SurfaceGuard<'a, H> {
    pub fn acquire(host: &'a mut H) -> Self {
        let surface = host.acquire();
        if surface.is_none() {
            log::trace!("No drawing surface this tick");
        }
        Self { host, surface }
    }

    /// The locked surface, if the host provided one
    pub fn canvas(&mut self) -> Option<&mut H::Surface> {
        self.surface.as_mut()
    }
}

impl<H: SurfaceHost> Drop for SurfaceGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(surface) = self.surface.take() {
            self.host.release(surface);
        }
    }
}
