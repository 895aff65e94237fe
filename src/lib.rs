// SPDX-License-Identifier: AGPL-3.0-only

//! eddySpring — turbulence driving-mode generation for particle-based
//! hydrodynamics.
//!
//! Driven-turbulence simulations accelerate the fluid with a small set of
//! large-scale Fourier modes whose phases evolve as an Ornstein–Uhlenbeck
//! process. This crate builds that mode table: it enumerates or samples
//! wavevectors inside a spherical shell of k-space, assigns amplitudes
//! consistent with a target energy spectrum (band, parabolic, or power-law),
//! and refreshes the OU phases — bit-reproducibly for a given seed.
//!
//! Force application, neighbor search, and domain decomposition are the
//! host simulation's concern; this crate only produces the driving data.
//!
//! ## Active modules
//!   - `stir` — mode enumeration/sampling, mode table, OU phase refresh
//!   - `rng` — sequential minimal-standard PRNG (the reproducibility contract)
//!   - `tolerances` — validation thresholds with documented rationale
//!   - `validation` — pass/fail check harness for validation binaries
//!
//! ## Validation binaries
//!   - `validate_stirring` — closed-form scenarios, determinism, truncation

pub mod error;
pub mod rng;
pub mod stir;
pub mod tolerances;
pub mod validation;

pub use error::StirError;
pub use rng::SequentialRng;
pub use stir::{generate, ModeTable, SpectralForm, StirConfig, StirReport};
