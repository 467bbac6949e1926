//! Rendering collaborator
//!
//! The core never owns a window. It paints through the [`Canvas`] trait onto
//! surfaces lent by a [`SurfaceHost`].

pub mod canvas;
pub mod headless;
pub mod scene;

pub use canvas::{Canvas, Color, SurfaceGuard, SurfaceHost};
pub use headless::{DrawCommand, HeadlessHost, HostStats, RecordingCanvas};
pub use scene::draw_frame;
