//! Headless surface host that records draw calls instead of painting them

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::Vec2;

use super::canvas::{Canvas, Color, SurfaceHost};
use crate::sim::Rect;

/// One recorded draw primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    RoundRect {
        rect: Rect,
        corner_radius: f32,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
}

/// Canvas that keeps every command it receives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl From<Vec<DrawCommand>> for RecordingCanvas {
    fn from(commands: Vec<DrawCommand>) -> Self {
        Self { commands }
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_round_rect(&mut self, rect: Rect, corner_radius: f32, color: Color) {
        self.commands.push(DrawCommand::RoundRect {
            rect,
            corner_radius,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}

/// Counters shared between a [`HeadlessHost`] and its clones
#[derive(Debug, Clone, Default)]
pub struct HostStats {
    /// Surfaces handed out
    pub acquired: u64,
    /// Surfaces handed back
    pub released: u64,
    /// Acquisitions that produced no surface
    pub skipped: u64,
    /// Most recently released frame
    pub last_frame: Option<RecordingCanvas>,
}

/// Surface host with no display. Clones share the same counters, so a test can
/// keep one clone while the loop owns another.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    stats: Arc<Mutex<HostStats>>,
    attempts: u64,
    unavailable_every: Option<u64>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose every `n`th acquisition fails
    pub fn unavailable_every(n: u64) -> Self {
        Self {
            unavailable_every: Some(n.max(1)),
            ..Self::default()
        }
    }

    /// Copy of the current counters
    pub fn stats(&self) -> HostStats {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, HostStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SurfaceHost for HeadlessHost {
    type Surface = RecordingCanvas;

    fn acquire(&mut self) -> Option<RecordingCanvas> {
        self.attempts += 1;
        let unavailable = self
            .unavailable_every
            .is_some_and(|n| self.attempts.is_multiple_of(n));

        let mut stats = self.lock();
        if unavailable {
            stats.skipped += 1;
            None
        } else {
            stats.acquired += 1;
            Some(RecordingCanvas::default())
        }
    }

    fn release(&mut self, surface: RecordingCanvas) {
        let mut stats = self.lock();
        stats.released += 1;
        stats.last_frame = Some(surface);
    }
}
