// SPDX-License-Identifier: AGPL-3.0-only

//! Typed errors for driving-mode generation.
//!
//! Configuration problems are rejected before any mode is written, so a
//! caller can pattern-match on the failure mode (bad box, bad shell, bad
//! solenoidal mix) rather than parsing opaque strings. Capacity overflow is
//! deliberately *not* an error: it truncates and is recorded in the report.

use std::fmt;

/// Errors arising from driving-mode configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum StirError {
    /// A box extent is zero, negative, or non-finite.
    InvalidExtent {
        /// Which axis (`'x'`, `'y'`, `'z'`).
        axis: char,
        /// The offending extent.
        value: f64,
    },

    /// The stirring shell is empty or inverted (`stir_min >= stir_max`
    /// or a non-positive bound).
    InvalidShell {
        /// Lower wavenumber bound.
        stir_min: f64,
        /// Upper wavenumber bound.
        stir_max: f64,
    },

    /// Dimensionality outside `1..=3`.
    InvalidDimension(usize),

    /// `energy` or `decay_time` is non-positive, so the forcing variance
    /// `sqrt(energy / decay_time)` is undefined.
    InvalidDriving {
        /// Energy input rate.
        energy: f64,
        /// Autocorrelation (decay) time.
        decay_time: f64,
    },

    /// The solenoidal-weight normalization denominator
    /// `1 - 2w + ndim w²` is non-positive for this `(w, ndim)`.
    SolenoidalWeightRange {
        /// Configured solenoidal weight.
        weight: f64,
        /// Configured dimensionality.
        ndim: usize,
    },

    /// The caller-supplied table was not preallocated to match the
    /// configuration (dimensionality or capacity differ).
    TableShape {
        /// `ndim` the configuration expects.
        expected_ndim: usize,
        /// Capacity the configuration expects.
        expected_capacity: usize,
        /// `ndim` the table was built with.
        ndim: usize,
        /// Capacity the table was built with.
        capacity: usize,
    },
}

impl fmt::Display for StirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidExtent { axis, value } => {
                write!(f, "Box extent L{axis} = {value} must be positive and finite")
            }
            Self::InvalidShell { stir_min, stir_max } => {
                write!(
                    f,
                    "Stirring shell [{stir_min}, {stir_max}] must satisfy 0 < stir_min < stir_max"
                )
            }
            Self::InvalidDimension(ndim) => {
                write!(f, "Dimensionality {ndim} outside supported range 1..=3")
            }
            Self::InvalidDriving { energy, decay_time } => {
                write!(
                    f,
                    "Driving energy {energy} and decay time {decay_time} must both be positive"
                )
            }
            Self::SolenoidalWeightRange { weight, ndim } => {
                write!(
                    f,
                    "Solenoidal weight {weight} is outside the valid range for ndim = {ndim} \
                     (normalization denominator is non-positive)"
                )
            }
            Self::TableShape {
                expected_ndim,
                expected_capacity,
                ndim,
                capacity,
            } => {
                write!(
                    f,
                    "Mode table shape (ndim = {ndim}, capacity = {capacity}) does not match \
                     configuration (ndim = {expected_ndim}, capacity = {expected_capacity})"
                )
            }
        }
    }
}

impl std::error::Error for StirError {}
