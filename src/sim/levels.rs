//! Level layouts
//!
//! Most levels are laid out on a grid of square cells, `LAYOUT_COLUMNS` wide and
//! `LAYOUT_ROWS` tall, centered on the canvas. Every level has the goal in
//! the top-left corner and starts the marble in the bottom-right corner.

use glam::Vec2;

use super::board::Board;
use super::error::SimError;
use super::object::WorldObject;
use crate::consts::{BLOCK_SIZE, LAYOUT_COLUMNS, LEVEL_COUNT};

/// Grid rows used by the layouts
const LAYOUT_ROWS: f32 = 12.0;

/// Grid measurements for one canvas size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelLayout {
    pub marble_radius: f32,
    pub wall_width: f32,
    /// Cell size (minimum distance between parallel walls)
    pub spacing: f32,
    pub x_padding: f32,
    pub y_padding: f32,
}

impl LevelLayout {
    /// Fit the grid inside a canvas, leaving a marble radius of margin
    pub fn for_canvas(
        width: f32,
        height: f32,
        marble_radius: f32,
        wall_width: f32,
    ) -> Result<Self, SimError> {
        if !(marble_radius.is_finite() && marble_radius > 0.0) {
            return Err(SimError::InvalidRadius(marble_radius));
        }
        if !(wall_width.is_finite() && wall_width > 0.0) {
            return Err(SimError::InvalidObjectSize);
        }

        let spacing = ((width - 2.0 * marble_radius) / LAYOUT_COLUMNS)
            .min((height - 2.0 * marble_radius) / LAYOUT_ROWS);
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(SimError::InvalidBounds { width, height });
        }

        Ok(Self {
            marble_radius,
            wall_width,
            spacing,
            x_padding: (width - LAYOUT_COLUMNS * spacing) / 2.0,
            y_padding: (height - LAYOUT_ROWS * spacing) / 2.0,
        })
    }

    /// Canvas position of grid line (`col`, `row`)
    fn at(&self, col: f32, row: f32) -> Vec2 {
        Vec2::new(
            self.x_padding + col * self.spacing,
            self.y_padding + row * self.spacing,
        )
    }

    /// Canvas position of the center of cell (`col`, `row`)
    fn cell(&self, col: f32, row: f32) -> Vec2 {
        self.at(col + 0.5, row + 0.5)
    }

    fn wall(&self, from: (f32, f32), to: (f32, f32)) -> Result<WorldObject, SimError> {
        WorldObject::wall(
            self.at(from.0, from.1),
            self.at(to.0, to.1),
            self.wall_width / 2.0,
        )
    }

    fn hole(&self, col: f32, row: f32) -> Result<WorldObject, SimError> {
        WorldObject::hole(self.cell(col, row), self.marble_radius)
    }
}

/// A built level: the board plus where the marble starts
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub id: u32,
    pub board: Board,
    pub start: Vec2,
}

/// Build the board for `level_id` (1-based). Unknown ids fall back to level 1.
pub fn build_board(
    level_id: u32,
    width: f32,
    height: f32,
    layout: &LevelLayout,
) -> Result<Level, SimError> {
    let id = if (1..=LEVEL_COUNT).contains(&level_id) {
        level_id
    } else {
        log::warn!("Unknown level {}, falling back to level 1", level_id);
        1
    };

    let r = layout.marble_radius;
    let mut board = Board::new(width, height)?;
    // Goal first so it wins any overlap with later objects
    board.push(WorldObject::goal(Vec2::new(r, r), r)?);

    let objects = match id {
        2 => center_box(layout)?,
        3 => diagonal_holes(layout)?,
        4 => {
            let mut objects = lower_box(layout)?;
            objects.extend(rising_holes(layout)?);
            objects
        }
        5 => channels(layout)?,
        6 => center_block(width, height, r)?,
        _ => Vec::new(),
    };
    for object in objects {
        board.push(object);
    }

    let start = Vec2::new(width - r, height - r);
    log::info!(
        "Built level {} ({}x{}, {} objects)",
        id,
        width,
        height,
        board.objects().len()
    );

    Ok(Level { id, board, start })
}

/// Level 2: a closed box across the middle of the board
fn center_box(layout: &LevelLayout) -> Result<Vec<WorldObject>, SimError> {
    let top = LAYOUT_ROWS / 2.0 - 0.5;
    let bottom = LAYOUT_ROWS / 2.0 + 0.5;
    boxed(layout, 1.0, LAYOUT_COLUMNS - 1.0, top, bottom)
}

/// Level 4: the same box, moved to the lower part of the board
fn lower_box(layout: &LevelLayout) -> Result<Vec<WorldObject>, SimError> {
    boxed(layout, 1.0, LAYOUT_COLUMNS - 1.0, 10.0, 11.0)
}

fn boxed(
    layout: &LevelLayout,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
) -> Result<Vec<WorldObject>, SimError> {
    Ok(vec![
        layout.wall((left, top), (left, bottom))?,
        layout.wall((left, top), (right, top))?,
        layout.wall((right, top), (right, bottom))?,
        layout.wall((left, bottom), (right, bottom))?,
    ])
}

/// Level 3: four holes on a diagonal through the middle
fn diagonal_holes(layout: &LevelLayout) -> Result<Vec<WorldObject>, SimError> {
    (1..=4)
        .map(|i| layout.hole(i as f32, 8.0 - i as f32))
        .collect()
}

/// Level 4 holes: the diagonal shifted up
fn rising_holes(layout: &LevelLayout) -> Result<Vec<WorldObject>, SimError> {
    (1..=4)
        .map(|i| layout.hole(i as f32, 5.0 - i as f32))
        .collect()
}

/// Level 5: a channel hanging from the top, a channel rising from the
/// bottom, and holes guarding the gap between them
fn channels(layout: &LevelLayout) -> Result<Vec<WorldObject>, SimError> {
    Ok(vec![
        layout.wall((2.0, 0.0), (2.0, 5.0))?,
        layout.wall((3.0, 0.0), (3.0, 5.0))?,
        layout.wall((2.0, 5.0), (3.0, 5.0))?,
        layout.wall((3.0, 7.0), (3.0, LAYOUT_ROWS))?,
        layout.wall((3.0, 7.0), (4.0, 7.0))?,
        layout.wall((4.0, 7.0), (4.0, LAYOUT_ROWS))?,
        layout.hole(2.0, 5.0)?,
        layout.hole(2.0, 7.0)?,
        layout.hole(4.0, 6.0)?,
        layout.hole(4.0, 7.0)?,
    ])
}

/// Level 6: a solid block in the middle of the canvas, with a hole in the
/// top-right corner opposite the goal
fn center_block(width: f32, height: f32, r: f32) -> Result<Vec<WorldObject>, SimError> {
    let size = Vec2::splat(BLOCK_SIZE);
    let center = Vec2::new(width, height) / 2.0;
    Ok(vec![
        WorldObject::rect(center - size / 2.0, size)?,
        WorldObject::hole(Vec2::new(width - r, r), r)?,
    ])
}
