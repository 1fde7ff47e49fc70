//! Game session state and the per-frame driver
//!
//! The session turns integrator outcomes into game state: reaching the goal
//! wins, falling into a hole loses, and either one freezes the marble until
//! the level is restarted.

use glam::Vec2;

use super::board::Board;
use super::error::SimError;
use super::levels::{Level, LevelLayout, build_board};
use super::marble::{HitOutcome, Marble};
use crate::renderer::{Painter, Style};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Marble is live
    Playing,
    /// Game is paused
    Paused,
    /// Marble reached the goal
    Won,
    /// Marble fell into a hole
    Lost,
}

impl GamePhase {
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Gravity from device tilt
    pub gravity: Vec2,
    /// Pause toggle
    pub pause: bool,
}

/// One attempt at one level
#[derive(Debug, Clone)]
pub struct GameSession {
    level_id: u32,
    layout: LevelLayout,
    tuning: Tuning,
    board: Board,
    marble: Marble,
    phase: GamePhase,
    /// Ticks simulated since the level was (re)built
    pub ticks: u64,
    /// Bounces (edges, walls, obstacles) since the level was (re)built
    pub bounces: u32,
}

impl GameSession {
    /// Build level `level_id` for a canvas of the given size
    pub fn new(level_id: u32, width: f32, height: f32, settings: &Settings) -> Result<Self, SimError> {
        let layout =
            LevelLayout::for_canvas(width, height, settings.marble_radius, settings.wall_width)?;
        let tuning = settings.tuning;
        let Level { id, board, start } = build_board(level_id, width, height, &layout)?;
        let marble = Marble::at_rest(start, layout.marble_radius, tuning)?;

        Ok(Self {
            level_id: id,
            layout,
            tuning,
            board,
            marble,
            phase: GamePhase::Playing,
            ticks: 0,
            bounces: 0,
        })
    }

    /// Throw away the board and marble and build the level again
    pub fn restart(&mut self) -> Result<(), SimError> {
        let Level { board, start, .. } =
            build_board(self.level_id, self.board.width(), self.board.height(), &self.layout)?;
        self.marble = Marble::at_rest(start, self.layout.marble_radius, self.tuning)?;
        self.board = board;
        self.phase = GamePhase::Playing;
        self.ticks = 0;
        self.bounces = 0;
        log::info!("Level {} restarted", self.level_id);
        Ok(())
    }

    pub fn level_id(&self) -> u32 {
        self.level_id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn marble(&self) -> &Marble {
        &self.marble
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Draw the background, the board, then the marble on top
    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P, style: &Style) {
        painter.fill_rect(Vec2::ZERO, self.board.size(), style.background);
        for object in self.board.objects() {
            object.draw(painter, style);
        }
        self.marble.draw(painter, style);
    }
}

/// Advance the session by one timestep
///
/// Returns the integrator outcome for this tick, or `HitOutcome::None` when
/// the session is paused or already over.
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) -> Result<HitOutcome, SimError> {
    if input.pause {
        match session.phase {
            GamePhase::Playing => {
                session.phase = GamePhase::Paused;
                return Ok(HitOutcome::None);
            }
            GamePhase::Paused => session.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if session.phase != GamePhase::Playing {
        return Ok(HitOutcome::None);
    }

    let outcome = session.marble.advance(dt, input.gravity, &session.board)?;
    session.ticks += 1;

    match outcome {
        HitOutcome::Goal => {
            session.phase = GamePhase::Won;
            log::info!(
                "Level {} won after {} ticks ({} bounces)",
                session.level_id,
                session.ticks,
                session.bounces
            );
        }
        HitOutcome::Hole => {
            session.phase = GamePhase::Lost;
            log::info!("Level {} lost after {} ticks", session.level_id, session.ticks);
        }
        o if o.is_bounce() => session.bounces += 1,
        _ => {}
    }

    Ok(outcome)
}
