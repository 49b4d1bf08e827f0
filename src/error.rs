//! Error type shared by configuration, generation and the per-tick update.

use bevy::prelude::Vec2;
use thiserror::Error;

use crate::math::Bounds;

/// Errors surfaced by the simulation core.
///
/// Both variants are contract violations: a bad configuration value, or a
/// cell whose stored geometry no longer agrees with the grid it lives in.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// A configuration value is outside its accepted range.
    #[error("invalid configuration: {field} = {value} ({reason})")]
    InvalidConfiguration {
        /// Name of the rejected option.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// What the option requires.
        reason: &'static str,
    },

    /// A dead plant sits outside the grid bounds when it is due to revert to ground.
    #[error("cell {index} at ({}, {}) lies outside grid bounds {bounds}", position.x, position.y)]
    OutOfBoundsConversion {
        /// Storage index of the offending cell.
        index: usize,
        /// Stored pixel center of the offending cell.
        position: Vec2,
        /// Grid bounds the position was checked against (before margin).
        bounds: Bounds,
    },
}

impl SimError {
    /// Shorthand for a probability that fell outside `[0, 1]`.
    pub fn probability(field: &'static str, value: f32) -> Self {
        Self::InvalidConfiguration {
            field,
            value: f64::from(value),
            reason: "must be within [0, 1]",
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;

/// Checks that `value` is a probability, naming `field` on failure.
pub fn check_probability(field: &'static str, value: f32) -> Result<f32> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SimError::probability(field, value))
    }
}
