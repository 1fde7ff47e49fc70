//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives as a `dt` argument; nothing here reads a clock
//! - Stable iteration order (board order decides ties)
//! - No rendering state beyond the `Painter` passed into `draw`

pub mod board;
pub mod error;
pub mod geometry;
pub mod levels;
pub mod marble;
pub mod object;
pub mod session;

pub use board::Board;
pub use error::SimError;
pub use geometry::{
    Rect, Side, direction_side, distance, point_in_circle, rect_circle_intersect, rect_side,
    segment_circle_intersect,
};
pub use levels::{Level, LevelLayout, build_board};
pub use marble::{HitOutcome, Marble};
pub use object::{Circle, ObjectKind, RectObstacle, Wall, WallAxis, WorldObject};
pub use session::{GamePhase, GameSession, TickInput, tick};
