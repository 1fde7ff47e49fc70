//! The board: canvas bounds plus an ordered list of objects
//!
//! Built once per level (or restart) and only ever replaced wholesale.
//! Object order matters: the integrator resolves the first object that
//! reports contact, not the nearest.

use glam::Vec2;

use super::error::SimError;
use super::object::{ObjectKind, WorldObject};

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    size: Vec2,
    objects: Vec<WorldObject>,
}

impl Board {
    /// Empty board of the given canvas size
    pub fn new(width: f32, height: f32) -> Result<Self, SimError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SimError::InvalidBounds { width, height });
        }
        Ok(Self {
            size: Vec2::new(width, height),
            objects: Vec::new(),
        })
    }

    /// Board with objects, kept in the given order
    pub fn with_objects(
        width: f32,
        height: f32,
        objects: impl IntoIterator<Item = WorldObject>,
    ) -> Result<Self, SimError> {
        let mut board = Self::new(width, height)?;
        board.objects.extend(objects);
        Ok(board)
    }

    /// Append an object; it resolves after every object already present
    pub fn push(&mut self, object: WorldObject) {
        self.objects.push(object);
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    pub fn count(&self, kind: ObjectKind) -> usize {
        self.objects.iter().filter(|o| o.kind() == kind).count()
    }

    /// Whether a marble of `radius` fits at `pos` without touching the
    /// border. Exactly touching the edge is allowed.
    pub fn contains_marble(&self, pos: Vec2, radius: f32) -> bool {
        pos.x >= radius
            && pos.x <= self.size.x - radius
            && pos.y >= radius
            && pos.y <= self.size.y - radius
    }

    /// First object a resting marble at `pos` would overlap
    pub fn first_overlap(&self, pos: Vec2, radius: f32) -> Option<&WorldObject> {
        self.objects.iter().find(|o| o.overlaps(pos, radius))
    }
}
