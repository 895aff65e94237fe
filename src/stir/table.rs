// SPDX-License-Identifier: AGPL-3.0-only

//! Preallocated driving-mode storage.
//!
//! Flat `Vec<f64>` layout matching the host simulation's particle arrays:
//! mode `i` occupies `modes[ndim·i .. ndim·(i+1)]` and `amplitudes[i]`.
//! The table is allocated once to capacity and fully overwritten by each
//! generation call; entries at `n_modes..` are zero padding.

use crate::stir::config::StirConfig;

/// Driving-mode table, owned by the caller and filled in place.
#[derive(Debug, Clone)]
#[must_use]
pub struct ModeTable {
    /// Components per mode vector.
    pub ndim: usize,
    /// Maximum number of modes the storage holds.
    pub capacity: usize,
    /// Forcing variance `sqrt(energy / decay_time)`.
    pub variance: f64,
    /// RMS normalization of the solenoidal/compressive mix.
    pub sol_weight: f64,
    /// Number of valid entries; `amplitudes[0..n_modes]` and
    /// `modes[0..ndim·n_modes]` are meaningful.
    pub n_modes: usize,
    /// Per-mode amplitudes, length `capacity`.
    pub amplitudes: Vec<f64>,
    /// Flat mode vectors, length `ndim · capacity`.
    pub modes: Vec<f64>,
}

impl ModeTable {
    /// Allocate a table matching `config` (`ndim`, `max_modes`).
    pub fn new(config: &StirConfig) -> Self {
        Self::with_shape(config.ndim, config.max_modes)
    }

    /// Allocate a table with explicit shape.
    pub fn with_shape(ndim: usize, capacity: usize) -> Self {
        Self {
            ndim,
            capacity,
            variance: 0.0,
            sol_weight: 0.0,
            n_modes: 0,
            amplitudes: vec![0.0; capacity],
            modes: vec![0.0; ndim * capacity],
        }
    }

    /// Wavevector of mode `i` as a slice of `ndim` components.
    ///
    /// # Panics
    ///
    /// Panics if `i` is outside the allocated capacity.
    #[must_use]
    pub fn mode(&self, i: usize) -> &[f64] {
        &self.modes[self.ndim * i..self.ndim * (i + 1)]
    }

    /// Magnitude `|k|` of mode `i`.
    #[must_use]
    pub fn wavenumber(&self, i: usize) -> f64 {
        self.mode(i).iter().map(|c| c * c).sum::<f64>().sqrt()
    }

    /// Whether any modes have been written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.n_modes == 0
    }

    /// Clear all derived fields ahead of a generation pass.
    pub(crate) fn reset(&mut self) {
        self.variance = 0.0;
        self.sol_weight = 0.0;
        self.n_modes = 0;
        self.amplitudes.fill(0.0);
        self.modes.fill(0.0);
    }

    /// Append one mode; the capacity guard runs before this is called.
    pub(crate) fn push(&mut self, k: &[f64; 3], amplitude: f64) {
        debug_assert!(self.n_modes < self.capacity);
        let base = self.ndim * self.n_modes;
        self.modes[base..base + self.ndim].copy_from_slice(&k[..self.ndim]);
        self.amplitudes[self.n_modes] = amplitude;
        self.n_modes += 1;
    }
}
