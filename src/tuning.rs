//! Data-driven physics tuning
//!
//! The integrator is frame-rate sensitive: displacement is `v * dt` times a
//! fixed scale, not a normalized unit system. Changing any of these changes
//! how every level feels.

use serde::{Deserialize, Serialize};

use crate::consts::{ACCEL_SCALE, RESTITUTION, SPEED_SCALE};
use crate::settings::SettingsError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fraction of speed kept, reversed, on impact
    pub restitution: f32,
    /// Gravity-to-velocity scale
    pub accel_scale: f32,
    /// Velocity-to-pixels scale
    pub speed_scale: f32,
    /// Per-axis cap on displacement per tick (pixels), `None` for uncapped
    pub max_step: Option<f32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            restitution: RESTITUTION,
            accel_scale: ACCEL_SCALE,
            speed_scale: SPEED_SCALE,
            max_step: None,
        }
    }
}

impl Tuning {
    /// Reject values that would break the integrator's invariants
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SettingsError::Invalid(format!(
                "restitution {} outside [0, 1]",
                self.restitution
            )));
        }
        if !(self.accel_scale.is_finite() && self.accel_scale > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "accel_scale {} must be positive",
                self.accel_scale
            )));
        }
        if !(self.speed_scale.is_finite() && self.speed_scale > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "speed_scale {} must be positive",
                self.speed_scale
            )));
        }
        if let Some(step) = self.max_step {
            if !(step.is_finite() && step > 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "max_step {} must be positive",
                    step
                )));
            }
        }
        Ok(())
    }

    /// Displacement along one axis for velocity `v` over `dt`, capped by `max_step`
    #[inline]
    pub fn step(&self, v: f32, dt: f32) -> f32 {
        let d = v * dt * self.speed_scale;
        match self.max_step {
            Some(cap) => d.clamp(-cap, cap),
            None => d,
        }
    }

    /// Velocity change along one axis for gravity `g` over `dt`
    #[inline]
    pub fn accelerate(&self, g: f32, dt: f32) -> f32 {
        g * dt * self.accel_scale
    }
}
