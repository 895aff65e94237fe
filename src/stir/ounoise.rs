// SPDX-License-Identifier: AGPL-3.0-only

//! Ornstein–Uhlenbeck phase refresh for the driving modes.
//!
//! Each mode carries one complex phase per spatial component; the host
//! evolves that buffer between force applications so the forcing stays
//! temporally correlated over `decay_time`. The exact discrete update is
//!
//! ```text
//! f = exp(−dt / decay_time)
//! p ← p·f + variance·sqrt(1 − f²)·N(0,1)
//! ```
//!
//! which preserves `N(0, variance²)` as the stationary distribution for
//! any step size. Gaussian draws come from the same sequential generator
//! as the shell sampler — two uniform draws per phase entry, in buffer
//! order, as part of the reproducibility contract.
//!
//! # Provenance
//!
//! Eswaran & Pope (1988), Comput. Fluids 16, 257 — stochastic forcing
//! Uhlenbeck & Ornstein (1930), Phys. Rev. 36, 823

use crate::rng::SequentialRng;

/// Length of the phase buffer for a table of `n_modes` modes:
/// one real/imaginary pair per spatial component per mode.
#[must_use]
pub const fn phase_count(ndim: usize, n_modes: usize) -> usize {
    2 * ndim * n_modes
}

/// Seed a phase buffer with its stationary distribution `N(0, variance²)`.
pub fn init_noise(phases: &mut [f64], variance: f64, rng: &mut SequentialRng) {
    for p in phases.iter_mut() {
        *p = variance * rng.standard_normal();
    }
}

/// Advance a phase buffer by `dt`.
///
/// `dt = 0` is a no-op (damping 1, diffusion 0); `dt ≫ decay_time`
/// decorrelates completely, equivalent to re-seeding.
pub fn update_noise(
    phases: &mut [f64],
    variance: f64,
    dt: f64,
    decay_time: f64,
    rng: &mut SequentialRng,
) {
    let damping = (-dt / decay_time).exp();
    let diffusion = variance * (1.0 - damping * damping).sqrt();
    for p in phases.iter_mut() {
        *p = *p * damping + diffusion * rng.standard_normal();
    }
}
