// SPDX-License-Identifier: AGPL-3.0-only

//! Validation harness for eddySpring binaries.
//!
//! Validation binaries follow one pattern: hardcoded expected values with
//! provenance comments, explicit pass/fail checks against the documented
//! tolerances in [`crate::tolerances`], a machine-readable summary on
//! stdout, and exit code 0 (all pass) or 1 (any failure). This module is
//! the shared plumbing.

use std::fmt::Write as _;
use std::process;

use crate::tolerances::NEAR_ZERO_EXPECTED;

/// How a tolerance threshold is applied.
#[derive(Debug, Clone, Copy)]
pub enum ToleranceMode {
    /// `|observed − expected| < tolerance`
    Absolute,
    /// `|observed − expected| / |expected| < tolerance`
    Relative,
    /// `observed < threshold`
    UpperBound,
    /// `observed > threshold`
    LowerBound,
}

impl std::fmt::Display for ToleranceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absolute => write!(f, "abs"),
            Self::Relative => write!(f, "rel"),
            Self::UpperBound => write!(f, "<"),
            Self::LowerBound => write!(f, ">"),
        }
    }
}

/// One validation check with its outcome.
#[derive(Debug, Clone)]
pub struct Check {
    /// Human-readable label.
    pub label: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Observed value.
    pub observed: f64,
    /// Expected value (or threshold for bound checks).
    pub expected: f64,
    /// Tolerance applied.
    pub tolerance: f64,
    /// How the tolerance was applied.
    pub mode: ToleranceMode,
}

/// Accumulates checks and produces a summary with exit code.
#[derive(Debug, Default)]
#[must_use]
pub struct ValidationHarness {
    /// Name of the validation binary.
    pub name: String,
    /// All checks performed so far.
    pub checks: Vec<Check>,
}

impl ValidationHarness {
    /// Create a harness for a named validation binary.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            checks: Vec::new(),
        }
    }

    /// Absolute check: `|observed − expected| < tolerance`.
    pub fn check_abs(&mut self, label: &str, observed: f64, expected: f64, tolerance: f64) {
        let passed = (observed - expected).abs() < tolerance;
        self.push(label, passed, observed, expected, tolerance, ToleranceMode::Absolute);
    }

    /// Relative check: `|observed − expected| / |expected| < tolerance`,
    /// falling back to absolute when the expected value is effectively zero.
    pub fn check_rel(&mut self, label: &str, observed: f64, expected: f64, tolerance: f64) {
        let passed = if expected.abs() > NEAR_ZERO_EXPECTED {
            ((observed - expected) / expected).abs() < tolerance
        } else {
            observed.abs() < tolerance
        };
        self.push(label, passed, observed, expected, tolerance, ToleranceMode::Relative);
    }

    /// Upper-bound check: `observed < threshold`.
    pub fn check_upper(&mut self, label: &str, observed: f64, threshold: f64) {
        let passed = observed < threshold;
        self.push(label, passed, observed, threshold, threshold, ToleranceMode::UpperBound);
    }

    /// Lower-bound check: `observed > threshold`.
    pub fn check_lower(&mut self, label: &str, observed: f64, threshold: f64) {
        let passed = observed > threshold;
        self.push(label, passed, observed, threshold, threshold, ToleranceMode::LowerBound);
    }

    /// Boolean pass/fail check.
    pub fn check_bool(&mut self, label: &str, passed: bool) {
        self.push(
            label,
            passed,
            f64::from(u8::from(passed)),
            1.0,
            0.0,
            ToleranceMode::Absolute,
        );
    }

    /// Number of checks that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Total number of checks.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.checks.len()
    }

    /// Whether every check passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Render the per-check summary block.
    #[must_use]
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        let _ = writeln!(
            s,
            "═══ {} validation: {}/{} checks passed ═══",
            self.name,
            self.passed_count(),
            self.total_count()
        );
        for check in &self.checks {
            let icon = if check.passed { "✓" } else { "✗" };
            let _ = writeln!(
                s,
                "  {icon} {}: observed={:.6e}, expected={:.6e}, tol={:.2e} ({})",
                check.label, check.observed, check.expected, check.tolerance, check.mode
            );
        }
        s
    }

    /// Print the summary and exit 0 (all pass) or 1 (any failure).
    pub fn finish(&self) -> ! {
        println!();
        print!("{}", self.format_summary());
        if self.all_passed() {
            println!("ALL CHECKS PASSED");
            process::exit(0);
        }
        let failed: Vec<&str> = self
            .checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.label.as_str())
            .collect();
        println!("FAILED CHECKS: {}", failed.join(", "));
        process::exit(1);
    }

    fn push(
        &mut self,
        label: &str,
        passed: bool,
        observed: f64,
        expected: f64,
        tolerance: f64,
        mode: ToleranceMode,
    ) {
        self.checks.push(Check {
            label: label.to_string(),
            passed,
            observed,
            expected,
            tolerance,
            mode,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harness_tracks_pass_fail() {
        let mut h = ValidationHarness::new("test");
        h.check_abs("exact", 1.0, 1.0, 1e-10);
        h.check_abs("close", 1.0001, 1.0, 1e-3);
        h.check_abs("far", 2.0, 1.0, 1e-3);
        assert_eq!(h.passed_count(), 2);
        assert_eq!(h.total_count(), 3);
        assert!(!h.all_passed());
    }

    #[test]
    fn check_rel_handles_zero_expected() {
        let mut h = ValidationHarness::new("test");
        h.check_rel("small_obs", 1e-16, 0.0, 1e-10);
        h.check_rel("large_obs", 1.0, 0.0, 1e-10);
        assert!(h.checks[0].passed);
        assert!(!h.checks[1].passed);
    }

    #[test]
    fn bound_checks_fail_at_threshold() {
        let mut h = ValidationHarness::new("test");
        h.check_upper("upper_at", 1.0, 1.0);
        h.check_lower("lower_at", 1.0, 1.0);
        assert!(!h.checks[0].passed);
        assert!(!h.checks[1].passed);
    }

    #[test]
    fn summary_reports_counts_and_icons() {
        let mut h = ValidationHarness::new("stirring");
        h.check_bool("pass", true);
        h.check_bool("fail", false);
        let s = h.format_summary();
        assert!(s.contains("1/2"));
        assert!(s.contains('✓'));
        assert!(s.contains('✗'));
    }
}
