//! Platform glue
//!
//! Translates host input events into game calls. Windowing, menus and
//! persistence scheduling stay with the host.

pub mod input;

pub use input::{PaddleControl, PointerEvent, PointerTracker};
