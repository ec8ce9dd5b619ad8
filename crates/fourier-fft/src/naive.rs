//! O(n²) direct-summation DFT.
//!
//! Serves as the correctness oracle for the radix-2 kernel and as the
//! backend for lengths that are not powers of two.

use std::f64::consts::PI;

use crate::complex::ComplexNumber;
use crate::transforms::FftError;

/// Forward DFT by direct summation: `X[k] = Σ_j x[j]·exp(−2πi·k·j/n)`.
///
/// Accepts any length `n >= 1`.
pub fn slow_transform(input: &[ComplexNumber]) -> Result<Vec<ComplexNumber>, FftError> {
    if input.is_empty() {
        return Err(FftError::EmptyInput);
    }
    Ok(naive_dft(input))
}

pub(crate) fn naive_dft(input: &[ComplexNumber]) -> Vec<ComplexNumber> {
    let n = input.len();
    let mut output = vec![ComplexNumber::zero(); n];
    for (k, out) in output.iter_mut().enumerate() {
        let mut acc = ComplexNumber::zero();
        for (j, &value) in input.iter().enumerate() {
            // Reduce k·j modulo n so the angle stays small for large n.
            let phase = (k * j) % n;
            let angle = -2.0 * PI * (phase as f64) / (n as f64);
            acc += value * ComplexNumber::from_polar(1.0, angle);
        }
        *out = acc;
    }
    output
}
