// SPDX-License-Identifier: AGPL-3.0-only

//! Driving-mode configuration.
//!
//! All inputs to mode generation in one serializable struct, validated
//! before any mode is written. Wavenumbers are in box units: the smallest
//! nonzero mode of a periodic box of side `L` sits at `k = 2π/L`.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::error::StirError;

/// Which energy-spectrum shape the generated modes approximate.
///
/// Mutually exclusive; selected once per generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectralForm {
    /// Flat amplitude across the stirring shell.
    Band,
    /// Parabola peaking at the shell midpoint, vanishing at the edges.
    Parabolic,
    /// Power-law `(k/kc)^power_law_exp` with stochastic angular sampling;
    /// the only form that consumes the sequential RNG.
    PowerLaw,
}

/// Configuration for driving-mode generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct StirConfig {
    /// Box extent along x.
    pub lx: f64,
    /// Box extent along y.
    pub ly: f64,
    /// Box extent along z.
    pub lz: f64,
    /// Mode-table capacity the caller preallocates; generation truncates
    /// rather than fails when the spectrum produces more modes than this.
    pub max_modes: usize,
    /// Energy input rate of the forcing.
    pub energy: f64,
    /// Autocorrelation time of the OU phase process.
    pub decay_time: f64,
    /// Lower wavenumber bound of the stirring shell.
    pub stir_min: f64,
    /// Upper wavenumber bound of the stirring shell.
    pub stir_max: f64,
    /// Spatial dimensionality, 1..=3.
    pub ndim: usize,
    /// Spectrum shape.
    pub spect_form: SpectralForm,
    /// Power-law exponent (PowerLaw only). −2 is Burgers scaling,
    /// −5/3 Kolmogorov.
    pub power_law_exp: f64,
    /// Angular sampling density exponent (PowerLaw only): each integer
    /// shell `ik` receives `2^ndim · ⌈ik^angles_exp⌉` samples. At 2.0 the
    /// sampling approaches full shell coverage.
    pub angles_exp: f64,
    /// Solenoidal weight `w ∈ [0, 1]`: 1 is divergence-free forcing,
    /// 0 fully compressive, 0.5 the natural mix.
    pub sol_weight: f64,
    /// Upper bound on the enumerated integer wavenumber index per axis
    /// for the Band/Parabolic lattice passes.
    pub lattice_kmax: usize,
}

impl Default for StirConfig {
    /// Classic driven-turbulence box: unit cube, parabolic spectrum over
    /// the 1–3 lattice-shell band, natural solenoidal mix.
    fn default() -> Self {
        Self {
            lx: 1.0,
            ly: 1.0,
            lz: 1.0,
            max_modes: 100_000,
            energy: 5.0e-3,
            decay_time: 0.05,
            stir_min: 6.28,
            stir_max: 18.86,
            ndim: 3,
            spect_form: SpectralForm::Parabolic,
            power_law_exp: -2.0,
            angles_exp: 1.0,
            sol_weight: 0.5,
            lattice_kmax: 256,
        }
    }
}

impl StirConfig {
    /// Check every precondition of mode generation.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: non-positive or non-finite
    /// box extent, empty/inverted stirring shell, unsupported
    /// dimensionality, non-positive driving scalars, or a solenoidal
    /// weight whose normalization denominator is non-positive.
    pub fn validate(&self) -> Result<(), StirError> {
        for (axis, value) in [('x', self.lx), ('y', self.ly), ('z', self.lz)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(StirError::InvalidExtent { axis, value });
            }
        }
        if self.ndim < 1 || self.ndim > 3 {
            return Err(StirError::InvalidDimension(self.ndim));
        }
        if !(self.stir_min > 0.0 && self.stir_min < self.stir_max) {
            return Err(StirError::InvalidShell {
                stir_min: self.stir_min,
                stir_max: self.stir_max,
            });
        }
        if self.energy <= 0.0 || self.decay_time <= 0.0 {
            return Err(StirError::InvalidDriving {
                energy: self.energy,
                decay_time: self.decay_time,
            });
        }
        if self.sol_weight_denominator() <= 0.0 {
            return Err(StirError::SolenoidalWeightRange {
                weight: self.sol_weight,
                ndim: self.ndim,
            });
        }
        Ok(())
    }

    /// Forcing variance `sqrt(energy / decay_time)`.
    #[must_use]
    pub fn variance(&self) -> f64 {
        (self.energy / self.decay_time).sqrt()
    }

    /// Characteristic wavenumber the amplitude rescale normalizes to:
    /// the shell midpoint for `Parabolic`, `stir_min` otherwise.
    #[must_use]
    pub fn characteristic_wavenumber(&self) -> f64 {
        match self.spect_form {
            SpectralForm::Parabolic => 0.5 * (self.stir_min + self.stir_max),
            SpectralForm::Band | SpectralForm::PowerLaw => self.stir_min,
        }
    }

    /// RMS normalization for the solenoidal/compressive mix:
    /// `sqrt(3)·sqrt(3/ndim)/sqrt(1 − 2w + ndim·w²)`.
    ///
    /// Keeps the rms force constant as `w` varies. Only meaningful on a
    /// configuration that passes [`Self::validate`]; outside the valid
    /// weight range the denominator goes non-positive and the result is
    /// NaN.
    #[must_use]
    pub fn sol_weight_norm(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let nd = self.ndim as f64;
        3.0_f64.sqrt() * (3.0 / nd).sqrt() / self.sol_weight_denominator().sqrt()
    }

    /// Number of modes one accepted lattice point expands to: the point
    /// itself plus its independent `−ky`/`−kz` sign flips (1, 2, or 4).
    #[must_use]
    pub const fn mirror_group(&self) -> usize {
        1 << (self.ndim - 1)
    }

    /// Smallest nonzero wavenumber of the periodic box, `2π/Lx`.
    #[must_use]
    pub fn base_wavenumber(&self) -> f64 {
        TAU / self.lx
    }

    fn sol_weight_denominator(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let nd = self.ndim as f64;
        1.0 - 2.0 * self.sol_weight + nd * self.sol_weight * self.sol_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tolerances::EXACT_F64;

    #[test]
    fn default_config_is_valid() {
        assert!(StirConfig::default().validate().is_ok());
    }

    #[test]
    fn sol_weight_norm_closed_form() {
        // ndim=3, w=0.5: sqrt(3)·sqrt(1)/sqrt(0.75) = 2 exactly.
        let config = StirConfig {
            ndim: 3,
            sol_weight: 0.5,
            ..StirConfig::default()
        };
        assert!((config.sol_weight_norm() - 2.0).abs() < EXACT_F64);
    }

    #[test]
    fn variance_closed_form() {
        let config = StirConfig {
            energy: 5.0e-3,
            decay_time: 0.05,
            ..StirConfig::default()
        };
        assert!((config.variance() - 0.316_227_766_016_837_94).abs() < EXACT_F64);
    }

    #[test]
    fn characteristic_wavenumber_per_form() {
        let mut config = StirConfig {
            stir_min: 6.0,
            stir_max: 6.5,
            ..StirConfig::default()
        };
        config.spect_form = SpectralForm::Band;
        assert!((config.characteristic_wavenumber() - 6.0).abs() < EXACT_F64);
        config.spect_form = SpectralForm::PowerLaw;
        assert!((config.characteristic_wavenumber() - 6.0).abs() < EXACT_F64);
        config.spect_form = SpectralForm::Parabolic;
        assert!((config.characteristic_wavenumber() - 6.25).abs() < EXACT_F64);
    }

    #[test]
    fn rejects_bad_extent() {
        let config = StirConfig { ly: 0.0, ..StirConfig::default() };
        assert_eq!(
            config.validate(),
            Err(StirError::InvalidExtent { axis: 'y', value: 0.0 })
        );
    }

    #[test]
    fn rejects_inverted_shell() {
        let config = StirConfig {
            stir_min: 10.0,
            stir_max: 5.0,
            ..StirConfig::default()
        };
        assert!(matches!(config.validate(), Err(StirError::InvalidShell { .. })));
    }

    #[test]
    fn rejects_bad_dimension() {
        for ndim in [0, 4] {
            let config = StirConfig { ndim, ..StirConfig::default() };
            assert_eq!(config.validate(), Err(StirError::InvalidDimension(ndim)));
        }
    }

    #[test]
    fn rejects_degenerate_solenoidal_weight() {
        // ndim=1, w=1: denominator (1-w)² = 0.
        let config = StirConfig {
            ndim: 1,
            sol_weight: 1.0,
            ..StirConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StirError::SolenoidalWeightRange { .. })
        ));
    }

    #[test]
    fn mirror_group_by_dimension() {
        for (ndim, group) in [(1, 1), (2, 2), (3, 4)] {
            let config = StirConfig { ndim, ..StirConfig::default() };
            assert_eq!(config.mirror_group(), group);
        }
    }

    #[test]
    fn serde_round_trip() {
        let config = StirConfig {
            spect_form: SpectralForm::PowerLaw,
            power_law_exp: -5.0 / 3.0,
            ..StirConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: StirConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.spect_form, SpectralForm::PowerLaw);
        assert!((back.power_law_exp - config.power_law_exp).abs() < f64::EPSILON);
        assert_eq!(back.max_modes, config.max_modes);
    }
}
