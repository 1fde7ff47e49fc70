//! Geometry primitives for circle-vs-board tests
//!
//! Screen coordinates: x grows right, y grows down. "Top" means smaller y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Excess ratio above which a corner-region contact snaps to a pure side.
///
/// tan(67.5°): contacts within 22.5° of a diagonal count as corners, which
/// splits the plane around a rectangle into eight equal octants.
const CORNER_RATIO: f32 = 1.0 + std::f32::consts::SQRT_2;

/// Which edge or corner region of a rectangle a point lies in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    None,
    Left,
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
}

impl Side {
    /// Whether an impact on this side reverses horizontal velocity
    pub fn reflects_x(self) -> bool {
        !matches!(self, Side::Top | Side::Bottom)
    }

    /// Whether an impact on this side reverses vertical velocity
    pub fn reflects_y(self) -> bool {
        !matches!(self, Side::Left | Side::Right)
    }

    /// True for the four diagonal regions
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Side::TopLeft | Side::TopRight | Side::BottomRight | Side::BottomLeft
        )
    }

    fn corner(horizontal: Side, vertical: Side) -> Side {
        match (horizontal, vertical) {
            (Side::Left, Side::Top) => Side::TopLeft,
            (Side::Right, Side::Top) => Side::TopRight,
            (Side::Left, Side::Bottom) => Side::BottomLeft,
            (Side::Right, Side::Bottom) => Side::BottomRight,
            _ => Side::None,
        }
    }
}

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Point inside or on the edge
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }

    /// Nearest point of the rectangle to `p` (p itself when inside)
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max())
    }
}

/// Euclidean distance
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

#[inline]
pub fn point_in_circle(p: Vec2, center: Vec2, radius: f32) -> bool {
    distance(p, center) <= radius
}

/// Check whether segment `a`-`b` touches a circle
///
/// Either endpoint inside the circle counts. Otherwise the circle center is
/// projected onto the segment's line; the projection may overhang either end
/// by `tolerance` units so contacts right at a segment tip are not lost to
/// float error.
pub fn segment_circle_intersect(
    a: Vec2,
    b: Vec2,
    center: Vec2,
    radius: f32,
    tolerance: f32,
) -> bool {
    if point_in_circle(a, center, radius) || point_in_circle(b, center, radius) {
        return true;
    }

    let line = b - a;
    let len_sq = line.length_squared();
    if len_sq < 1e-6 {
        return false;
    }

    let t = (center - a).dot(line) / len_sq;
    let slack = tolerance / len_sq.sqrt();
    if t < -slack || t > 1.0 + slack {
        return false;
    }

    let closest = a + line * t;
    distance(closest, center) <= radius
}

/// Clamp-based rectangle vs circle test. A center inside the rectangle
/// is at distance zero and always collides.
pub fn rect_circle_intersect(rect: &Rect, center: Vec2, radius: f32) -> bool {
    distance(rect.closest_point(center), center) <= radius
}

/// Classify a direction into one of eight octants
///
/// A vector along one axis gives that pure side. Otherwise it is a corner
/// unless one component dominates (see `CORNER_RATIO`), in which case the
/// larger component wins. The zero vector gives `None`.
pub fn direction_side(d: Vec2) -> Side {
    let horizontal = if d.x < 0.0 {
        Some(Side::Left)
    } else if d.x > 0.0 {
        Some(Side::Right)
    } else {
        None
    };
    let vertical = if d.y < 0.0 {
        Some(Side::Top)
    } else if d.y > 0.0 {
        Some(Side::Bottom)
    } else {
        None
    };

    let (ex, ey) = (d.x.abs(), d.y.abs());
    match (horizontal, vertical) {
        (Some(h), Some(v)) => {
            if ex > ey * CORNER_RATIO {
                h
            } else if ey > ex * CORNER_RATIO {
                v
            } else {
                Side::corner(h, v)
            }
        }
        (Some(h), None) => h,
        (None, Some(v)) => v,
        (None, None) => Side::None,
    }
}

/// Classify which side of `rect` the point is on
///
/// Outside the rectangle, the offset from the nearest point of the rectangle
/// is classified with [`direction_side`]. A point inside (or on the edge)
/// maps to the edge with the smallest overlap. Degenerate rectangles give
/// `None`.
pub fn rect_side(rect: &Rect, p: Vec2) -> Side {
    if rect.size.x <= 0.0 || rect.size.y <= 0.0 {
        return Side::None;
    }
    if rect.contains(p) {
        return nearest_edge(rect, p);
    }
    direction_side(p - rect.closest_point(p))
}

fn nearest_edge(rect: &Rect, p: Vec2) -> Side {
    let max = rect.max();
    let candidates = [
        (Side::Left, p.x - rect.min.x),
        (Side::Top, p.y - rect.min.y),
        (Side::Right, max.x - p.x),
        (Side::Bottom, max.y - p.y),
    ];

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    best.0
}
