// SPDX-License-Identifier: AGPL-3.0-only

//! Centralized validation tolerances with documented rationale.
//!
//! Every threshold used by the test suites and the `validate_stirring`
//! binary is defined here with its origin. No ad-hoc magic numbers.
//!
//! # Tolerance categories
//!
//! | Category | Basis | Example |
//! |----------|-------|---------|
//! | Machine precision | IEEE 754 f64 | closed-form amplitudes |
//! | Draw-sequence pin | exact integer recurrence | PRNG regression values |
//! | Statistical | finite-sample moments | OU phase variance |

/// Tolerance for closed-form f64 expressions (variance, solenoidal weight,
/// single-mode amplitudes). The formulas involve a handful of sqrt/pow
/// operations; 1e-10 leaves five orders of headroom above accumulated
/// rounding while catching any formula error.
pub const EXACT_F64: f64 = 1e-10;

/// Shell-membership slack for written modes.
///
/// Acceptance and verification compute `|k|` with the same expression, so
/// a recomputed magnitude differs only by non-associative summation order
/// in the test. A few ulps at `|k| ~ 20` is well below 1e-9.
pub const SHELL_BOUND_ABS: f64 = 1e-9;

/// Pin tolerance for the Park–Miller draw-sequence regression values.
///
/// The state recurrence is exact integer arithmetic; the only float op is
/// one multiply per draw. Reference values are computed with the identical
/// expression, so agreement is to the last bit; 1e-15 allows for a
/// different-but-correctly-rounded constant fold.
pub const DRAW_PIN_ABS: f64 = 1e-15;

/// Relative tolerance for finite-sample OU phase statistics.
///
/// With 10⁴–2·10⁴ Gaussian samples the sample variance has relative
/// standard error `sqrt(2/n)` ≈ 1–1.4%. 5% is a > 3σ acceptance band.
pub const OU_STATS_REL: f64 = 0.05;

/// Threshold below which an expected value is treated as zero by the
/// validation harness, falling back to absolute comparison rather than
/// dividing by a near-zero reference. Just above f64 epsilon (~2.2e-16)
/// to absorb rounding in the expected-value computation itself.
pub const NEAR_ZERO_EXPECTED: f64 = 1e-14;
