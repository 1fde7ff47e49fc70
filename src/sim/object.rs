//! Board geometry: walls, holes, goals and rectangular obstacles
//!
//! Every object is validated at construction and immutable afterwards. The
//! integrator only asks two questions of an object: does the marble touch it,
//! and from which side.

use glam::Vec2;

use super::error::SimError;
use super::geometry::{
    Rect, Side, direction_side, point_in_circle, rect_circle_intersect, rect_side,
    segment_circle_intersect,
};
use crate::consts::SEGMENT_TOLERANCE;
use crate::is_finite_vec;
use crate::renderer::{Painter, Style};

/// What an object means to the game when the marble touches it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Wall,
    Hole,
    Goal,
    Obstacle,
}

/// Orientation of an axis-aligned wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallAxis {
    Horizontal,
    Vertical,
}

/// A thick, axis-aligned line segment with rounded end caps
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    start: Vec2,
    end: Vec2,
    half_thickness: f32,
    axis: WallAxis,
}

impl Wall {
    /// Build a wall between two points. Endpoints are reordered so that
    /// `start` is the left/top end.
    pub fn new(a: Vec2, b: Vec2, half_thickness: f32) -> Result<Self, SimError> {
        if !is_finite_vec(a) || !is_finite_vec(b) || !half_thickness.is_finite() {
            return Err(SimError::NonFiniteGeometry);
        }
        if half_thickness <= 0.0 {
            return Err(SimError::InvalidObjectSize);
        }
        if a == b {
            return Err(SimError::DegenerateWall);
        }

        let axis = if a.y == b.y {
            WallAxis::Horizontal
        } else if a.x == b.x {
            WallAxis::Vertical
        } else {
            return Err(SimError::DiagonalWall);
        };

        let (start, end) = match axis {
            WallAxis::Horizontal if a.x > b.x => (b, a),
            WallAxis::Vertical if a.y > b.y => (b, a),
            _ => (a, b),
        };

        Ok(Self {
            start,
            end,
            half_thickness,
            axis,
        })
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Vec2 {
        self.end
    }

    pub fn half_thickness(&self) -> f32 {
        self.half_thickness
    }

    pub fn axis(&self) -> WallAxis {
        self.axis
    }

    pub fn is_horizontal(&self) -> bool {
        self.axis == WallAxis::Horizontal
    }

    /// The wall's thickened footprint (without end caps)
    pub fn bounds(&self) -> Rect {
        let h = self.half_thickness;
        match self.axis {
            WallAxis::Horizontal => Rect::new(
                Vec2::new(self.start.x, self.start.y - h),
                Vec2::new(self.end.x - self.start.x, 2.0 * h),
            ),
            WallAxis::Vertical => Rect::new(
                Vec2::new(self.start.x - h, self.start.y),
                Vec2::new(2.0 * h, self.end.y - self.start.y),
            ),
        }
    }

    /// Contact test for a moving marble
    ///
    /// A marble touching either tip always hits. Along the wall's length the
    /// band test is one-sided: the marble must sit on one side of the wall's
    /// line and be moving toward it, so a marble leaving a wall it already
    /// bounced off is not caught again.
    pub fn collides_with(&self, pos: Vec2, radius: f32, vel: Vec2) -> bool {
        if point_in_circle(self.start, pos, radius) || point_in_circle(self.end, pos, radius) {
            return true;
        }

        let reach = self.half_thickness + radius - SEGMENT_TOLERANCE;
        // (position along the wall, offset across it, velocity across it)
        let (along, across, line, v_across, lo, hi) = match self.axis {
            WallAxis::Horizontal => (pos.x, pos.y, self.start.y, vel.y, self.start.x, self.end.x),
            WallAxis::Vertical => (pos.y, pos.x, self.start.x, vel.x, self.start.y, self.end.y),
        };

        if along < lo || along > hi {
            return false;
        }

        if across < line {
            v_across > 0.0 && across > line - reach
        } else if across > line {
            v_across < 0.0 && across < line + reach
        } else {
            true
        }
    }

    /// Direction-free overlap, for placement checks
    pub fn overlaps(&self, pos: Vec2, radius: f32) -> bool {
        segment_circle_intersect(
            self.start,
            self.end,
            pos,
            radius + self.half_thickness,
            SEGMENT_TOLERANCE,
        )
    }

    /// Side of the wall the marble struck
    ///
    /// Past either end the marble can only have touched the rounded cap, so
    /// the side comes from the direction of the marble as seen from that tip.
    pub fn side_of_impact(&self, pos: Vec2) -> Side {
        let along = match self.axis {
            WallAxis::Horizontal => pos.x,
            WallAxis::Vertical => pos.y,
        };
        let (lo, hi) = match self.axis {
            WallAxis::Horizontal => (self.start.x, self.end.x),
            WallAxis::Vertical => (self.start.y, self.end.y),
        };

        if along < lo {
            direction_side(pos - self.start)
        } else if along > hi {
            direction_side(pos - self.end)
        } else {
            rect_side(&self.bounds(), pos)
        }
    }
}

/// A circular trigger region (hole or goal)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Vec2,
    radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Result<Self, SimError> {
        if !is_finite_vec(center) {
            return Err(SimError::NonFiniteGeometry);
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Circle-circle overlap (strict)
    pub fn collides_with(&self, pos: Vec2, radius: f32) -> bool {
        let reach = self.radius + radius;
        (self.center - pos).length_squared() < reach * reach
    }
}

/// A solid rectangular block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectObstacle {
    rect: Rect,
}

impl RectObstacle {
    pub fn new(min: Vec2, size: Vec2) -> Result<Self, SimError> {
        if !is_finite_vec(min) || !is_finite_vec(size) {
            return Err(SimError::NonFiniteGeometry);
        }
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(SimError::InvalidObjectSize);
        }
        Ok(Self {
            rect: Rect::new(min, size),
        })
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn collides_with(&self, pos: Vec2, radius: f32) -> bool {
        rect_circle_intersect(&self.rect, pos, radius)
    }

    pub fn side_of_impact(&self, pos: Vec2) -> Side {
        rect_side(&self.rect, pos)
    }
}

/// Any piece of board geometry
#[derive(Debug, Clone, PartialEq)]
pub enum WorldObject {
    Wall(Wall),
    Hole(Circle),
    Goal(Circle),
    Rect(RectObstacle),
}

impl WorldObject {
    pub fn wall(a: Vec2, b: Vec2, half_thickness: f32) -> Result<Self, SimError> {
        Wall::new(a, b, half_thickness).map(WorldObject::Wall)
    }

    pub fn hole(center: Vec2, radius: f32) -> Result<Self, SimError> {
        Circle::new(center, radius).map(WorldObject::Hole)
    }

    pub fn goal(center: Vec2, radius: f32) -> Result<Self, SimError> {
        Circle::new(center, radius).map(WorldObject::Goal)
    }

    pub fn rect(min: Vec2, size: Vec2) -> Result<Self, SimError> {
        RectObstacle::new(min, size).map(WorldObject::Rect)
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            WorldObject::Wall(_) => ObjectKind::Wall,
            WorldObject::Hole(_) => ObjectKind::Hole,
            WorldObject::Goal(_) => ObjectKind::Goal,
            WorldObject::Rect(_) => ObjectKind::Obstacle,
        }
    }

    /// Contact test against a marble at `pos` moving with `vel`
    pub fn collides_with(&self, pos: Vec2, radius: f32, vel: Vec2) -> bool {
        match self {
            WorldObject::Wall(wall) => wall.collides_with(pos, radius, vel),
            WorldObject::Hole(circle) | WorldObject::Goal(circle) => {
                circle.collides_with(pos, radius)
            }
            WorldObject::Rect(rect) => rect.collides_with(pos, radius),
        }
    }

    /// Overlap test that ignores velocity
    pub fn overlaps(&self, pos: Vec2, radius: f32) -> bool {
        match self {
            WorldObject::Wall(wall) => wall.overlaps(pos, radius),
            WorldObject::Hole(circle) | WorldObject::Goal(circle) => {
                circle.collides_with(pos, radius)
            }
            WorldObject::Rect(rect) => rect.collides_with(pos, radius),
        }
    }

    /// Which side the marble struck. Holes and goals have no sides.
    pub fn side_of_impact(&self, pos: Vec2) -> Side {
        match self {
            WorldObject::Wall(wall) => wall.side_of_impact(pos),
            WorldObject::Rect(rect) => rect.side_of_impact(pos),
            WorldObject::Hole(_) | WorldObject::Goal(_) => Side::None,
        }
    }

    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P, style: &Style) {
        match self {
            WorldObject::Wall(wall) => {
                // Extend by the half thickness so corners of joined walls are filled
                let h = wall.half_thickness;
                let (a, b) = match wall.axis {
                    WallAxis::Horizontal => {
                        (wall.start - Vec2::new(h, 0.0), wall.end + Vec2::new(h, 0.0))
                    }
                    WallAxis::Vertical => {
                        (wall.start - Vec2::new(0.0, h), wall.end + Vec2::new(0.0, h))
                    }
                };
                painter.stroke_line(a, b, 2.0 * h, style.obstacle);
            }
            WorldObject::Hole(circle) => {
                painter.fill_circle(circle.center, circle.radius, style.hole);
            }
            WorldObject::Goal(circle) => {
                painter.fill_circle(circle.center, circle.radius, style.goal);
            }
            WorldObject::Rect(rect) => {
                painter.fill_rect(rect.rect.min, rect.rect.size, style.obstacle);
            }
        }
    }
}
