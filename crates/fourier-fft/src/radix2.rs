//! Recursive radix-2 decimation-in-time FFT.

use std::f64::consts::PI;

use crate::complex::ComplexNumber;
use crate::transforms::FftError;

/// Forward DFT in O(n log n). The input length must be a power of two.
pub fn fast_transform(input: &[ComplexNumber]) -> Result<Vec<ComplexNumber>, FftError> {
    if input.is_empty() {
        return Err(FftError::EmptyInput);
    }
    if !input.len().is_power_of_two() {
        return Err(FftError::NotPowerOfTwo { len: input.len() });
    }
    Ok(radix2_dft(input))
}

/// Caller guarantees `input.len()` is a non-zero power of two.
pub(crate) fn radix2_dft(input: &[ComplexNumber]) -> Vec<ComplexNumber> {
    let n = input.len();
    debug_assert!(n.is_power_of_two());

    if n == 1 {
        return vec![input[0]];
    }

    let half_n = n / 2;
    let (even_fft, odd_fft) = {
        let evens: Vec<ComplexNumber> = input.iter().step_by(2).copied().collect();
        let odds: Vec<ComplexNumber> = input.iter().skip(1).step_by(2).copied().collect();
        (radix2_dft(&evens), radix2_dft(&odds))
    };

    let mut output = vec![ComplexNumber::zero(); n];
    for (k, (&even, &odd)) in even_fft.iter().zip(&odd_fft).enumerate() {
        let twiddle = ComplexNumber::from_polar(1.0, -2.0 * PI * (k as f64) / (n as f64));
        let rotated = twiddle * odd;
        output[k] = even + rotated;
        output[k + half_n] = even - rotated;
    }
    output
}
