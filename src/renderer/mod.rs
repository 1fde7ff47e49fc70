//! Draw-side glue
//!
//! The simulation never owns rendering state. Objects draw themselves through
//! the `Painter` trait using an immutable `Style` built once by whoever owns
//! the screen. `ShapeBatch` is the bundled painter: it tessellates everything
//! into a triangle list ready for upload as a vertex buffer.

pub mod shapes;
pub mod vertex;

pub use shapes::ShapeBatch;
pub use vertex::{Vertex, colors};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Sink for the few primitives the board needs
pub trait Painter {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]);
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: [f32; 4]);
    /// Straight line with square ends, `width` measured across the line
    fn stroke_line(&mut self, a: Vec2, b: Vec2, width: f32, color: [f32; 4]);
}

/// Palette handed to every draw call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub marble: [f32; 4],
    pub obstacle: [f32; 4],
    pub goal: [f32; 4],
    pub hole: [f32; 4],
    pub background: [f32; 4],
    /// Triangle fan segments per circle
    pub circle_segments: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            marble: colors::MARBLE,
            obstacle: colors::OBSTACLE,
            goal: colors::GOAL,
            hole: colors::HOLE,
            background: colors::BACKGROUND,
            circle_segments: 32,
        }
    }
}
