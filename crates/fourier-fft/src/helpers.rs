use crate::complex::ComplexNumber;
use crate::transforms::{FftError, validate_shape_2d};

/// Sample frequencies for a length-`n` transform, in output bin order.
pub fn fftfreq(n: usize, sample_spacing: f64) -> Result<Vec<f64>, FftError> {
    validate_frequency_args(n, sample_spacing)?;
    let scale = 1.0 / (n as f64 * sample_spacing);
    let split = n.div_ceil(2);

    let mut freqs = Vec::with_capacity(n);
    for idx in 0..n {
        if idx < split {
            freqs.push(idx as f64 * scale);
        } else {
            freqs.push(-((n - idx) as f64) * scale);
        }
    }
    Ok(freqs)
}

/// Shift zero-frequency component to the center for 1D input.
#[must_use]
pub fn fftshift_1d<T: Clone>(input: &[T]) -> Vec<T> {
    rotate_left_owned(input, input.len().div_ceil(2))
}

/// Inverse shift for [`fftshift_1d`] over 1D input.
#[must_use]
pub fn ifftshift_1d<T: Clone>(input: &[T]) -> Vec<T> {
    rotate_left_owned(input, input.len() / 2)
}

/// Center the zero-frequency bin of a `(width, height)` row-major spectrum.
pub fn fftshift_2d<T: Clone>(input: &[T], shape: (usize, usize)) -> Result<Vec<T>, FftError> {
    shift_2d(input, shape, shape.0.div_ceil(2), shape.1.div_ceil(2))
}

/// Inverse of [`fftshift_2d`].
pub fn ifftshift_2d<T: Clone>(input: &[T], shape: (usize, usize)) -> Result<Vec<T>, FftError> {
    shift_2d(input, shape, shape.0 / 2, shape.1 / 2)
}

/// `|X[k]|` for every bin.
#[must_use]
pub fn magnitude_spectrum(spectrum: &[ComplexNumber]) -> Vec<f64> {
    spectrum.iter().map(|value| value.abs()).collect()
}

/// `Σ |x|²`. Under backward normalization a spectrum carries `N` times the
/// energy of its signal.
#[must_use]
pub fn total_energy(samples: &[ComplexNumber]) -> f64 {
    samples.iter().map(|value| value.norm_sqr()).sum()
}

fn shift_2d<T: Clone>(
    input: &[T],
    (width, height): (usize, usize),
    column_shift: usize,
    row_shift: usize,
) -> Result<Vec<T>, FftError> {
    let expected = validate_shape_2d((width, height))?;
    if input.len() != expected {
        return Err(FftError::LengthMismatch {
            expected,
            actual: input.len(),
        });
    }

    let mut output = Vec::with_capacity(expected);
    for i in 0..height {
        let source_row = (i + row_shift) % height;
        let row = &input[source_row * width..(source_row + 1) * width];
        output.extend(rotate_left_owned(row, column_shift));
    }
    Ok(output)
}

fn validate_frequency_args(n: usize, sample_spacing: f64) -> Result<(), FftError> {
    if n == 0 {
        return Err(FftError::EmptyInput);
    }
    if !(sample_spacing.is_finite() && sample_spacing > 0.0) {
        return Err(FftError::NonPositiveSampleSpacing);
    }
    Ok(())
}

fn rotate_left_owned<T: Clone>(input: &[T], shift: usize) -> Vec<T> {
    if input.is_empty() {
        return Vec::new();
    }
    let split = shift % input.len();
    input[split..]
        .iter()
        .cloned()
        .chain(input[..split].iter().cloned())
        .collect()
}
