//! Precondition failures for the simulation core
//!
//! None of these are retried. They signal that a caller handed the core bad
//! geometry or bad per-tick inputs, and the core refused before any state
//! was touched.

/// Errors raised by board construction and the marble integrator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// Timestep was zero, negative or not finite.
    #[error("invalid timestep: {0}")]
    InvalidTimestep(f32),

    /// Gravity or the integrated state was NaN/Inf.
    #[error("non-finite simulation input")]
    NonFiniteInput,

    /// Marble or circle radius was zero, negative or not finite.
    #[error("invalid radius: {0}")]
    InvalidRadius(f32),

    /// Board dimensions were not positive.
    #[error("invalid board bounds {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },

    /// Wall endpoints coincide.
    #[error("wall has zero length")]
    DegenerateWall,

    /// Wall is neither horizontal nor vertical.
    #[error("wall is not axis-aligned")]
    DiagonalWall,

    /// Rectangle width/height or wall thickness was not positive.
    #[error("object size must be positive")]
    InvalidObjectSize,

    /// A coordinate was NaN/Inf.
    #[error("geometry contains non-finite coordinates")]
    NonFiniteGeometry,

    /// Marble does not fit on the board it was placed on.
    #[error("marble does not fit inside the board")]
    MarbleOutOfBounds,
}
