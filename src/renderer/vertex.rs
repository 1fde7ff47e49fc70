//! Vertex format shared by every tessellated shape

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Board-space vertex: pixel position plus RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Bytes between consecutive vertices in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
    /// Byte offset of `color` within a vertex
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 2]>();

    pub fn at(pos: Vec2, color: [f32; 4]) -> Self {
        Self {
            position: pos.to_array(),
            color,
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::from(self.position)
    }
}

/// Default palette
pub mod colors {
    pub const MARBLE: [f32; 4] = [0.0, 1.0, 0.6, 1.0];
    pub const OBSTACLE: [f32; 4] = [0.6, 0.0, 1.0, 1.0];
    pub const GOAL: [f32; 4] = [0.0, 0.4, 1.0, 1.0];
    pub const HOLE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}
