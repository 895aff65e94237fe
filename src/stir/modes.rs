// SPDX-License-Identifier: AGPL-3.0-only

//! Driving-mode enumeration and sampling.
//!
//! Two generation strategies fill the same [`ModeTable`]:
//!
//! - **Lattice enumeration** (`Band`, `Parabolic`): a dry counting pass over
//!   the non-negative integer wavevector lattice, then a write pass that
//!   appends each accepted point with its `−ky`/`−kz` mirror copies. Fully
//!   deterministic, lexicographic `(ikx, iky, ikz)` order.
//! - **Shell sampling** (`PowerLaw`): integer wavenumber shells are sampled
//!   with seed-driven angles instead of enumerated — the population of a
//!   shell grows as `k^(ndim−1)` and full enumeration becomes wasteful at
//!   high wavenumber. One mode per accepted sample, no mirrors: sampling
//!   `theta` over the whole sphere already covers both hemispheres.
//!
//! Amplitudes are rescaled by `(kc/k)^((ndim−1)/2)` so that `amplitude²`
//! integrates to the intended power spectrum despite the growing
//! phase-space volume of a k-shell with dimensionality; the sampled branch
//! additionally compensates for visiting only `nang` of the full shell.
//!
//! Capacity overflow is not an error: the first failed headroom check sets
//! the `truncated` flag and stops generation, leaving a fully consistent
//! prefix in the table.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::error::StirError;
use crate::rng::SequentialRng;
use crate::stir::config::{SpectralForm, StirConfig};
use crate::stir::table::ModeTable;

/// Sampling statistics for one integer wavenumber shell (PowerLaw branch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellStat {
    /// Integer shell index `ik` (`|k| ≈ 2π·ik/Lx`).
    pub ik: usize,
    /// Angular samples drawn for this shell, `2^ndim · ⌈ik^angles_exp⌉`.
    pub n_angles: usize,
    /// Samples that landed inside the stirring shell and were written.
    pub accepted: usize,
}

/// Structured outcome of a generation call; replaces interleaved progress
/// printing. The host's logging layer renders it however it likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StirReport {
    /// Modes a full lattice enumeration of the shell would produce,
    /// mirrors included (the dry counting pass; for `PowerLaw` this is the
    /// full-sampling equivalent, not the number written).
    pub total_candidates: usize,
    /// Modes actually written to the table.
    pub written: usize,
    /// Whether the capacity guard stopped generation early.
    pub truncated: bool,
    /// Per-shell sampling statistics; empty for the lattice branch.
    pub shells: Vec<ShellStat>,
}

/// Generate driving modes into `table` according to `config`.
///
/// Always computes the spectrum-independent scalars first (`variance`,
/// `sol_weight`), then dispatches once on the spectral form. The RNG is
/// only consumed by the `PowerLaw` branch; its state after the call is the
/// resume point for subsequent phase updates.
///
/// # Errors
///
/// Any [`StirConfig::validate`] failure, or [`StirError::TableShape`] if
/// `table` was not allocated to match `config`. Capacity overflow is not
/// an error — see [`StirReport::truncated`].
pub fn generate(
    table: &mut ModeTable,
    config: &StirConfig,
    rng: &mut SequentialRng,
) -> Result<StirReport, StirError> {
    config.validate()?;
    if table.ndim != config.ndim || table.capacity != config.max_modes {
        return Err(StirError::TableShape {
            expected_ndim: config.ndim,
            expected_capacity: config.max_modes,
            ndim: table.ndim,
            capacity: table.capacity,
        });
    }

    table.reset();
    table.variance = config.variance();
    table.sol_weight = config.sol_weight_norm();

    let mut report = StirReport {
        total_candidates: count_lattice_candidates(config),
        written: 0,
        truncated: false,
        shells: Vec::new(),
    };

    match config.spect_form {
        SpectralForm::Band | SpectralForm::Parabolic => {
            enumerate_lattice(table, config, &mut report);
        }
        SpectralForm::PowerLaw => sample_shells(table, config, rng, &mut report),
    }

    report.written = table.n_modes;
    Ok(report)
}

/// Dry counting pass: how many modes (mirrors included) full lattice
/// enumeration of the stirring shell would produce. Useful for sizing
/// `max_modes` before allocating the table.
#[must_use]
pub fn count_lattice_candidates(config: &StirConfig) -> usize {
    let [bx, by, bz] = lattice_bounds(config);
    let group = config.mirror_group();
    let mut total = 0;
    for ikx in 0..=bx {
        let kx = axis_wavenumber(ikx, config.lx);
        for iky in 0..=by {
            let ky = axis_wavenumber(iky, config.ly);
            for ikz in 0..=bz {
                let kz = axis_wavenumber(ikz, config.lz);
                let k = (kx * kx + ky * ky + kz * kz).sqrt();
                if k >= config.stir_min && k <= config.stir_max {
                    total += group;
                }
            }
        }
    }
    total
}

/// Write pass for the deterministic forms: same traversal and acceptance
/// test as the counting pass, plus amplitude assignment and mirroring.
fn enumerate_lattice(table: &mut ModeTable, config: &StirConfig, report: &mut StirReport) {
    let [bx, by, bz] = lattice_bounds(config);
    let group = config.mirror_group();
    let kc = config.characteristic_wavenumber();
    let half = shell_volume_exponent(config.ndim);
    let parabolic = matches!(config.spect_form, SpectralForm::Parabolic);
    // Parabola normalized to 1 at kc, vanishing at the shell edges.
    let shell_width = config.stir_max - config.stir_min;
    let parab_prefact = -4.0 / (shell_width * shell_width);

    'lattice: for ikx in 0..=bx {
        let kx = axis_wavenumber(ikx, config.lx);
        for iky in 0..=by {
            let ky = axis_wavenumber(iky, config.ly);
            for ikz in 0..=bz {
                let kz = axis_wavenumber(ikz, config.lz);
                let k = (kx * kx + ky * ky + kz * kz).sqrt();
                if k < config.stir_min || k > config.stir_max {
                    continue;
                }
                if table.n_modes + group > table.capacity {
                    // Guard is monotone: no later point can fit either.
                    report.truncated = true;
                    break 'lattice;
                }

                let shape = if parabolic {
                    (parab_prefact * (k - kc) * (k - kc) + 1.0).abs()
                } else {
                    1.0
                };
                // Power spectrum ~ amplitude² (1D), ·2πk (2D), ·4πk² (3D).
                let amplitude = 2.0 * shape.sqrt() * (kc / k).powf(half);

                table.push(&[kx, ky, kz], amplitude);
                if config.ndim > 1 {
                    table.push(&[kx, -ky, kz], amplitude);
                }
                if config.ndim > 2 {
                    table.push(&[kx, ky, -kz], amplitude);
                    table.push(&[kx, -ky, -kz], amplitude);
                }
            }
        }
    }
}

/// Stochastic write pass for the power-law form.
///
/// Draw order per sample attempt is fixed and seed-reproducible:
/// azimuth, then (3-D only) polar angle, then radial jitter. Reordering
/// would change every table generated from a given seed.
fn sample_shells(
    table: &mut ModeTable,
    config: &StirConfig,
    rng: &mut SequentialRng,
    report: &mut StirReport,
) {
    let group = config.mirror_group();
    let kc = config.characteristic_wavenumber();
    let half = shell_volume_exponent(config.ndim);

    // Integer shell range covering the stirring band, round-half-up.
    let base = config.base_wavenumber();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let ik_min = ((config.stir_min / base + 0.5) as usize).max(1);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let ik_max = (config.stir_max / base + 0.5) as usize;

    'shells: for ik in ik_min..=ik_max {
        #[allow(clippy::cast_precision_loss)]
        let ik_f = ik as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n_angles = (1_usize << config.ndim) * ik_f.powf(config.angles_exp).ceil() as usize;
        let mut accepted = 0;

        for _ in 0..n_angles {
            let mut phi = TAU * rng.uniform();
            if config.ndim == 1 {
                // No azimuth on a line; collapse to ±x.
                phi = if phi < PI { 0.0 } else { PI };
            }
            let theta = if config.ndim > 2 {
                // Uniform over the sphere surface.
                (1.0 - 2.0 * rng.uniform()).acos()
            } else {
                FRAC_PI_2
            };
            // Radial jitter avoids exact-lattice aliasing of the samples.
            let jitter = ik_f + rng.uniform() - 0.5;

            // Snap back onto the integer lattice of the periodic box.
            let kx = TAU * (jitter * theta.sin() * phi.cos()).round() / config.lx;
            let ky = if config.ndim > 1 {
                TAU * (jitter * theta.sin() * phi.sin()).round() / config.ly
            } else {
                0.0
            };
            let kz = if config.ndim > 2 {
                TAU * (jitter * theta.cos()).round() / config.lz
            } else {
                0.0
            };

            let k = (kx * kx + ky * ky + kz * kz).sqrt();
            if k < config.stir_min || k > config.stir_max {
                continue;
            }
            if table.n_modes + group > table.capacity {
                report.truncated = true;
                report.shells.push(ShellStat { ik, n_angles, accepted });
                break 'shells;
            }

            let shape = (k / kc).powf(config.power_law_exp);
            // Correct for sampling nang angles instead of the full shell
            // population (~k^(ndim−1) per shell).
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            let coverage = ik_f.powi(config.ndim as i32 - 1) * 4.0 * 3.0_f64.sqrt()
                / n_angles as f64;
            let amplitude = (shape * coverage).sqrt() * (kc / k).powf(half);

            table.push(&[kx, ky, kz], amplitude);
            accepted += 1;
        }

        report.shells.push(ShellStat { ik, n_angles, accepted });
    }
}

/// Per-axis lattice bounds: unused axes collapse to `{0}`.
const fn lattice_bounds(config: &StirConfig) -> [usize; 3] {
    [
        config.lattice_kmax,
        if config.ndim > 1 { config.lattice_kmax } else { 0 },
        if config.ndim > 2 { config.lattice_kmax } else { 0 },
    ]
}

/// Exponent of the `(kc/k)` rescale, `(ndim − 1)/2`.
#[allow(clippy::cast_precision_loss)]
fn shell_volume_exponent(ndim: usize) -> f64 {
    0.5 * (ndim as f64 - 1.0)
}

#[allow(clippy::cast_precision_loss)]
fn axis_wavenumber(ik: usize, extent: f64) -> f64 {
    TAU * ik as f64 / extent
}
