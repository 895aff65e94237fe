// SPDX-License-Identifier: AGPL-3.0-only

#![allow(clippy::unwrap_used)]

use std::f64::consts::TAU;

use crate::rng::SequentialRng;
use crate::stir::config::{SpectralForm, StirConfig};
use crate::stir::modes::{count_lattice_candidates, generate};
use crate::stir::table::ModeTable;
use crate::tolerances::{EXACT_F64, SHELL_BOUND_ABS};

/// Unit box, ndim=1, shell that admits exactly the `ikx = 1` lattice point
/// (`k = 2π ≈ 6.283`).
fn band_1d_config() -> StirConfig {
    StirConfig {
        lx: 1.0,
        ly: 1.0,
        lz: 1.0,
        max_modes: 10,
        stir_min: 6.0,
        stir_max: 6.5,
        ndim: 1,
        spect_form: SpectralForm::Band,
        ..StirConfig::default()
    }
}

/// Unit cube, shell admitting only the three |n| = 1 lattice points.
fn cube_config(form: SpectralForm, max_modes: usize) -> StirConfig {
    StirConfig {
        max_modes,
        stir_min: 6.0,
        stir_max: 7.0,
        ndim: 3,
        spect_form: form,
        lattice_kmax: 4,
        ..StirConfig::default()
    }
}

#[test]
fn band_1d_single_mode() {
    let config = band_1d_config();
    let mut table = ModeTable::new(&config);
    let mut rng = SequentialRng::new(140_281);
    let report = generate(&mut table, &config, &mut rng).unwrap();

    assert_eq!(report.total_candidates, 1);
    assert_eq!(report.written, 1);
    assert!(!report.truncated);
    assert_eq!(table.n_modes, 1);
    assert!((table.mode(0)[0] - TAU).abs() < EXACT_F64);
    // Band shape is 1 and the (kc/k) exponent is 0 in 1-D: amplitude 2.
    assert!((table.amplitudes[0] - 2.0).abs() < EXACT_F64);
    // Deterministic branch never touches the RNG.
    assert_eq!(rng.state(), 140_281);
}

#[test]
fn zero_capacity_truncates_without_error() {
    let config = StirConfig { max_modes: 0, ..band_1d_config() };
    let mut table = ModeTable::new(&config);
    let mut rng = SequentialRng::new(140_281);
    let report = generate(&mut table, &config, &mut rng).unwrap();

    assert_eq!(report.written, 0);
    assert!(report.truncated);
    assert!(table.is_empty());
}

#[test]
fn parabolic_1d_amplitude_closed_form() {
    let config = StirConfig {
        spect_form: SpectralForm::Parabolic,
        ..band_1d_config()
    };
    let mut table = ModeTable::new(&config);
    let mut rng = SequentialRng::new(140_281);
    let report = generate(&mut table, &config, &mut rng).unwrap();

    assert_eq!(report.written, 1);
    // kc = 6.25; parabola at k = 2π: |−4/0.25·(2π − 6.25)² + 1| ≈ 0.98238,
    // in (0, 1]; rescaled 2·√shape = 1.982301456588623 (hand-computed).
    assert!((table.amplitudes[0] - 1.982_301_456_588_623).abs() < EXACT_F64);
}

#[test]
fn parabolic_shape_stays_within_unit_interval() {
    let config = cube_config(SpectralForm::Parabolic, 1000);
    let mut table = ModeTable::new(&config);
    let mut rng = SequentialRng::new(140_281);
    generate(&mut table, &config, &mut rng).unwrap();

    let kc = config.characteristic_wavenumber();
    for i in 0..table.n_modes {
        let k = table.wavenumber(i);
        // Invert the phase-space rescale to recover the shape factor.
        let shape = (table.amplitudes[i] / (2.0 * (kc / k))).powi(2);
        assert!(shape > 0.0 && shape <= 1.0 + EXACT_F64, "shape = {shape}");
    }
}

#[test]
fn cube_band_mirror_groups() {
    let config = cube_config(SpectralForm::Band, 100);
    let mut table = ModeTable::new(&config);
    let mut rng = SequentialRng::new(140_281);
    let report = generate(&mut table, &config, &mut rng).unwrap();

    // Only the three |n| = 1 points are in shell; each expands to 4 modes.
    assert_eq!(report.total_candidates, 12);
    assert_eq!(table.n_modes, 12);

    // Lexicographic traversal: (0,0,1) then (0,1,0) then (1,0,0), each
    // followed by its (ky, kz) sign flips with a shared amplitude.
    let expected_primaries = [[0.0, 0.0, TAU], [0.0, TAU, 0.0], [TAU, 0.0, 0.0]];
    for (g, primary) in expected_primaries.iter().enumerate() {
        let base = 4 * g;
        let amp = table.amplitudes[base];
        for (offset, signs) in [(0, [1.0, 1.0]), (1, [-1.0, 1.0]), (2, [1.0, -1.0]), (3, [-1.0, -1.0])]
        {
            let mode = table.mode(base + offset);
            assert!((mode[0] - primary[0]).abs() < EXACT_F64);
            assert!((mode[1] - signs[0] * primary[1]).abs() < EXACT_F64);
            assert!((mode[2] - signs[1] * primary[2]).abs() < EXACT_F64);
            assert!((table.amplitudes[base + offset] - amp).abs() < EXACT_F64);
        }
    }
}

#[test]
fn truncation_keeps_whole_groups() {
    // ndim=2: two accepted points, groups of 2. Capacity 3 fits only one
    // whole group; the guard refuses to split the second.
    let config = StirConfig {
        max_modes: 3,
        stir_min: 6.0,
        stir_max: 7.0,
        ndim: 2,
        spect_form: SpectralForm::Band,
        lattice_kmax: 4,
        ..StirConfig::default()
    };
    let mut table = ModeTable::new(&config);
    let mut rng = SequentialRng::new(140_281);
    let report = generate(&mut table, &config, &mut rng).unwrap();

    assert_eq!(report.total_candidates, 4);
    assert_eq!(report.written, 2);
    assert!(report.truncated);
    // The surviving prefix is fully consistent.
    for i in 0..table.n_modes {
        let k = table.wavenumber(i);
        assert!(k >= config.stir_min - SHELL_BOUND_ABS);
        assert!(k <= config.stir_max + SHELL_BOUND_ABS);
        assert!(table.amplitudes[i] > 0.0);
    }
}

#[test]
fn exact_fit_capacity_is_not_truncation() {
    let config = StirConfig { max_modes: 4, ndim: 2, ..cube_config(SpectralForm::Band, 4) };
    let mut table = ModeTable::new(&config);
    let mut rng = SequentialRng::new(140_281);
    let report = generate(&mut table, &config, &mut rng).unwrap();
    assert_eq!(report.written, 4);
    assert!(!report.truncated);
}

#[test]
fn scalars_do_not_depend_on_spectral_form() {
    let mut results = Vec::new();
    for form in [SpectralForm::Band, SpectralForm::Parabolic, SpectralForm::PowerLaw] {
        let config = cube_config(form, 1000);
        let mut table = ModeTable::new(&config);
        let mut rng = SequentialRng::new(251_299);
        generate(&mut table, &config, &mut rng).unwrap();
        results.push((table.variance, table.sol_weight));
    }
    for (variance, sol_weight) in &results[1..] {
        assert!((variance - results[0].0).abs() < EXACT_F64);
        assert!((sol_weight - results[0].1).abs() < EXACT_F64);
    }
}

#[test]
fn power_law_shell_schedule() {
    // stir band [6, 13] on the unit cube: integer shells ik = 1, 2 with
    // 2³·⌈ik^1⌉ = 8 and 16 samples.
    let config = StirConfig {
        stir_min: 6.0,
        stir_max: 13.0,
        spect_form: SpectralForm::PowerLaw,
        lattice_kmax: 4,
        max_modes: 1000,
        ..StirConfig::default()
    };
    let mut table = ModeTable::new(&config);
    let mut rng = SequentialRng::new(140_281);
    let report = generate(&mut table, &config, &mut rng).unwrap();

    let schedule: Vec<(usize, usize)> = report.shells.iter().map(|s| (s.ik, s.n_angles)).collect();
    assert_eq!(schedule, vec![(1, 8), (2, 16)]);
    let accepted: usize = report.shells.iter().map(|s| s.accepted).sum();
    assert_eq!(accepted, report.written);
    assert!(rng.state() != 140_281, "sampler must advance the RNG");
}

#[test]
fn power_law_quadratic_angle_density() {
    let config = StirConfig {
        stir_min: 6.0,
        stir_max: 13.0,
        spect_form: SpectralForm::PowerLaw,
        angles_exp: 2.0,
        lattice_kmax: 4,
        max_modes: 1000,
        ..StirConfig::default()
    };
    let mut table = ModeTable::new(&config);
    let mut rng = SequentialRng::new(140_281);
    let report = generate(&mut table, &config, &mut rng).unwrap();
    for shell in &report.shells {
        assert_eq!(shell.n_angles, 8 * shell.ik * shell.ik);
    }
}

#[test]
fn power_law_modes_stay_in_shell() {
    let config = StirConfig {
        stir_min: 6.0,
        stir_max: 13.0,
        spect_form: SpectralForm::PowerLaw,
        lattice_kmax: 4,
        max_modes: 1000,
        ..StirConfig::default()
    };
    let mut table = ModeTable::new(&config);
    let mut rng = SequentialRng::new(977);
    generate(&mut table, &config, &mut rng).unwrap();

    assert!(table.n_modes > 0, "seed 977 should accept at least one sample");
    for i in 0..table.n_modes {
        let k = table.wavenumber(i);
        assert!(k >= config.stir_min - SHELL_BOUND_ABS, "mode {i}: |k| = {k}");
        assert!(k <= config.stir_max + SHELL_BOUND_ABS, "mode {i}: |k| = {k}");
        assert!(table.amplitudes[i].is_finite() && table.amplitudes[i] > 0.0);
    }
}

#[test]
fn power_law_is_seed_reproducible() {
    let config = StirConfig {
        stir_min: 6.0,
        stir_max: 13.0,
        spect_form: SpectralForm::PowerLaw,
        lattice_kmax: 4,
        max_modes: 1000,
        ..StirConfig::default()
    };
    let run = |seed: i64| {
        let mut table = ModeTable::new(&config);
        let mut rng = SequentialRng::new(seed);
        let report = generate(&mut table, &config, &mut rng).unwrap();
        (table, report, rng.state())
    };
    let (ta, ra, sa) = run(251_299);
    let (tb, rb, sb) = run(251_299);
    assert_eq!(ta.n_modes, tb.n_modes);
    assert_eq!(ta.modes, tb.modes);
    assert_eq!(ta.amplitudes, tb.amplitudes);
    assert_eq!(ra, rb);
    assert_eq!(sa, sb);

    // A different seed draws a different angular sample.
    let (tc, _, _) = run(977);
    assert!(tc.modes != ta.modes || tc.n_modes != ta.n_modes);
}

#[test]
fn table_shape_mismatch_is_rejected() {
    let config = band_1d_config();
    let mut table = ModeTable::with_shape(2, config.max_modes);
    let mut rng = SequentialRng::new(1);
    assert!(generate(&mut table, &config, &mut rng).is_err());
}

#[test]
fn invalid_config_leaves_table_untouched() {
    let mut config = band_1d_config();
    config.stir_min = -1.0;
    let mut table = ModeTable::new(&config);
    table.variance = 123.0;
    let mut rng = SequentialRng::new(1);
    assert!(generate(&mut table, &config, &mut rng).is_err());
    // Fail-fast: validation error precedes any mutation.
    assert!((table.variance - 123.0).abs() < EXACT_F64);
}

#[test]
fn count_matches_write_pass_when_unconstrained() {
    for form in [SpectralForm::Band, SpectralForm::Parabolic] {
        let config = cube_config(form, 1000);
        let mut table = ModeTable::new(&config);
        let mut rng = SequentialRng::new(1);
        let report = generate(&mut table, &config, &mut rng).unwrap();
        assert_eq!(count_lattice_candidates(&config), report.written);
    }
}
