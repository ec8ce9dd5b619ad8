//! Differential oracle and metamorphic tests for the transform surface.
//!
//! - §1: naive summation vs radix-2 across lengths 1..=2048.
//! - §2: known closed-form spectra.
//! - §3: 2D separability and axis-order independence.
//! - §4: Parseval energy relation.
//!
//! All tests produce structured JSON log lines.

use std::f64::consts::PI;

use fourier_fft::{
    BackendKind, ComplexNumber, FftOptions, fast_transform, fftfreq, fftshift_1d,
    magnitude_spectrum, slow_transform, total_energy, transform, transform_2d, transform_real,
};
use fourier_runtime::{TestLogEntry, TestResult, assert_close, max_abs_error};

fn log_case(test_id: &str, input_summary: &str, max_abs_error: f64, pass: bool) {
    TestLogEntry::new(test_id, "fourier_fft::differential", input_summary)
        .with_result(TestResult::from_pass(pass))
        .with_max_abs_error(max_abs_error)
        .emit();
}

/// Deterministic pseudo-random samples in [-1, 1).
fn lcg_signal(n: usize, seed: u64) -> Vec<ComplexNumber> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
    };
    (0..n).map(|_| ComplexNumber::new(next(), next())).collect()
}

fn transpose(data: &[ComplexNumber], width: usize, height: usize) -> Vec<ComplexNumber> {
    let mut out = vec![ComplexNumber::zero(); data.len()];
    for i in 0..height {
        for j in 0..width {
            out[i + j * height] = data[j + i * width];
        }
    }
    out
}

// ── §1 Differential oracle ───────────────────────────────────────

#[test]
fn diff_naive_vs_radix2_power_of_two_lengths() {
    for exp in 0..=11 {
        let n = 1usize << exp;
        let input = lcg_signal(n, 0xF0F0 + exp as u64);
        let slow = slow_transform(&input).expect("naive");
        let fast = fast_transform(&input).expect("radix2");
        let err = max_abs_error(&slow, &fast);
        let pass = err < 1e-9;
        log_case(&format!("diff_pow2_{n}"), &format!("n={n}"), err, pass);
        assert!(pass, "n = {n}: max abs error {err}");
    }
}

#[test]
fn diff_auto_backend_matches_naive_for_every_small_length() {
    let naive = FftOptions::default().with_backend(BackendKind::NaiveDft);
    let auto = FftOptions::default();
    for n in 1..=40 {
        let input = lcg_signal(n, n as u64);
        let reference = transform(&input, &naive).expect("naive");
        let candidate = transform(&input, &auto).expect("auto");
        let err = max_abs_error(&reference, &candidate);
        assert!(err < 1e-10, "n = {n}: max abs error {err}");
    }
}

// ── §2 Known values ──────────────────────────────────────────────

#[test]
fn known_impulse_and_constant_spectra() {
    let opts = FftOptions::default();
    let impulse = transform_real(&[1.0, 0.0, 0.0, 0.0], &opts).expect("impulse");
    let ones = transform_real(&[1.0, 1.0, 1.0, 1.0], &opts).expect("constant");

    let flat = [ComplexNumber::from_real(1.0); 4];
    let dc = [
        ComplexNumber::from_real(4.0),
        ComplexNumber::zero(),
        ComplexNumber::zero(),
        ComplexNumber::zero(),
    ];
    let impulse_err = max_abs_error(&impulse, &flat);
    let ones_err = max_abs_error(&ones, &dc);
    log_case("known_impulse", "[1,0,0,0]", impulse_err, impulse_err < 1e-12);
    log_case("known_constant", "[1,1,1,1]", ones_err, ones_err < 1e-12);
    assert!(impulse_err < 1e-12);
    assert!(ones_err < 1e-12);
}

#[test]
fn known_single_tone_lands_in_one_bin() {
    let n = 16;
    let bin = 3;
    let signal: Vec<ComplexNumber> = (0..n)
        .map(|t| ComplexNumber::from_polar(1.0, 2.0 * PI * (bin * t) as f64 / n as f64))
        .collect();
    let spectrum = transform(&signal, &FftOptions::default()).expect("tone");
    for (k, value) in spectrum.iter().enumerate() {
        let expected = if k == bin { n as f64 } else { 0.0 };
        assert_close(value.abs(), expected, 1e-9, 0.0);
    }
}

#[test]
fn known_tone_peak_maps_to_its_frequency() {
    let (n, spacing) = (20usize, 0.05);
    let cycles = 4;
    let signal: Vec<f64> = (0..n)
        .map(|t| (2.0 * PI * (cycles * t) as f64 / n as f64).cos())
        .collect();
    let spectrum = transform_real(&signal, &FftOptions::default()).expect("tone");
    let magnitudes = magnitude_spectrum(&spectrum);
    let freqs = fftfreq(n, spacing).expect("fftfreq");

    // A real cosine splits into the +f and -f bins; after the shift the
    // negative frequencies come first and the axis is ascending.
    let shifted_freqs = fftshift_1d(&freqs);
    let shifted_mags = fftshift_1d(&magnitudes);
    assert!(shifted_freqs.windows(2).all(|pair| pair[0] < pair[1]));

    let expected_hz = cycles as f64 / (n as f64 * spacing);
    for (&freq, &mag) in shifted_freqs.iter().zip(&shifted_mags) {
        let on_tone = (freq.abs() - expected_hz).abs() < 1e-9;
        let expected = if on_tone { n as f64 / 2.0 } else { 0.0 };
        assert_close(mag, expected, 1e-9, 0.0);
    }
}

#[test]
fn known_single_sample_base_case() {
    let sample = ComplexNumber::new(0.25, -9.5);
    assert_eq!(fast_transform(&[sample]).expect("n = 1"), vec![sample]);
}

// ── §3 Separability ──────────────────────────────────────────────

#[test]
fn separable_2d_equals_rows_then_columns() {
    let (width, height) = (8, 5);
    let input = lcg_signal(width * height, 99);
    let opts = FftOptions::default();
    let spectrum = transform_2d(&input, (width, height), &opts).expect("2d");

    let mut rows = Vec::with_capacity(input.len());
    for row in input.chunks_exact(width) {
        rows.extend(transform(row, &opts).expect("row"));
    }
    let columns_major = transpose(&rows, width, height);
    let mut by_hand_t = Vec::with_capacity(input.len());
    for column in columns_major.chunks_exact(height) {
        by_hand_t.extend(transform(column, &opts).expect("column"));
    }
    let by_hand = transpose(&by_hand_t, height, width);

    let err = max_abs_error(&spectrum, &by_hand);
    log_case("separable_rows_columns", "8x5", err, err < 1e-10);
    assert!(err < 1e-10);
}

#[test]
fn separable_2d_is_axis_order_independent() {
    let (width, height) = (4, 6);
    let input = lcg_signal(width * height, 7);
    let opts = FftOptions::default();

    // Column-then-row is a row-then-column pass over the transposed buffer.
    let direct = transform_2d(&input, (width, height), &opts).expect("rows first");
    let transposed = transform_2d(&transpose(&input, width, height), (height, width), &opts)
        .expect("columns first");
    let err = max_abs_error(&direct, &transpose(&transposed, height, width));
    assert!(err < 1e-10, "axis order changed the result by {err}");
}

// ── §4 Parseval ──────────────────────────────────────────────────

#[test]
fn parseval_energy_scales_by_length() {
    for n in [8usize, 12, 64] {
        let input = lcg_signal(n, 1234 + n as u64);
        let spectrum = transform(&input, &FftOptions::default()).expect("forward");
        let time_energy = total_energy(&input);
        let freq_energy = total_energy(&spectrum);
        assert_close(freq_energy, n as f64 * time_energy, 1e-9, 1e-10);
    }
}

#[test]
fn parseval_holds_for_2d() {
    let input = lcg_signal(32, 5);
    let spectrum = transform_2d(&input, (8, 4), &FftOptions::default()).expect("2d");
    assert_close(total_energy(&spectrum), 32.0 * total_energy(&input), 1e-9, 1e-10);
}
