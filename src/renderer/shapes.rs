//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::Painter;
use super::vertex::Vertex;

/// Triangle fan for a filled circle, unrolled into a triangle list
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let rim = |i: u32| center + Vec2::from_angle(i as f32 / segments as f32 * TAU) * radius;

    (0..segments)
        .flat_map(|i| {
            [
                Vertex::at(center, color),
                Vertex::at(rim(i), color),
                Vertex::at(rim(i + 1), color),
            ]
        })
        .collect()
}

/// Two triangles covering the quad a-b-c-d (in winding order)
fn quad(a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [a, b, c, c, d, a].map(|p| Vertex::at(p, color))
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    quad(
        min,
        Vec2::new(max.x, min.y),
        max,
        Vec2::new(min.x, max.y),
        color,
    )
}

/// Generate vertices for a thick line with square ends
pub fn thick_line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> [Vertex; 6] {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);
    quad(a + perp, b + perp, b - perp, a - perp, color)
}

/// Painter that accumulates a triangle list
#[derive(Debug, Clone, Default)]
pub struct ShapeBatch {
    vertices: Vec<Vertex>,
    circle_segments: u32,
}

impl ShapeBatch {
    pub fn new(circle_segments: u32) -> Self {
        Self {
            vertices: Vec::new(),
            circle_segments,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

impl Painter for ShapeBatch {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.vertices
            .extend(circle(center, radius, color, self.circle_segments));
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: [f32; 4]) {
        self.vertices.extend(rect(min, size, color));
    }

    fn stroke_line(&mut self, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
        self.vertices.extend(thick_line(a, b, width, color));
    }
}
