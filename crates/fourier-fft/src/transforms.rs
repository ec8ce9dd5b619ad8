use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use fourier_runtime::RuntimeMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::complex::ComplexNumber;
use crate::naive::naive_dft;
use crate::radix2::radix2_dft;
use crate::{Normalization, TransformKind};

/// Backend selection policy for the 1D kernel behind every transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Radix-2 for power-of-two lengths, naive summation otherwise.
    #[default]
    Auto,
    NaiveDft,
    /// Radix-2 only; other lengths are rejected.
    Radix2,
}

pub trait FftBackend {
    fn kind(&self) -> BackendKind;
    /// Unnormalized forward DFT. `input` is non-empty and valid for this backend.
    fn forward_unscaled(&self, input: &[ComplexNumber]) -> Vec<ComplexNumber>;
}

#[derive(Debug, Default)]
pub struct NaiveDftBackend;

impl FftBackend for NaiveDftBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::NaiveDft
    }

    fn forward_unscaled(&self, input: &[ComplexNumber]) -> Vec<ComplexNumber> {
        naive_dft(input)
    }
}

#[derive(Debug, Default)]
pub struct Radix2Backend;

impl FftBackend for Radix2Backend {
    fn kind(&self) -> BackendKind {
        BackendKind::Radix2
    }

    fn forward_unscaled(&self, input: &[ComplexNumber]) -> Vec<ComplexNumber> {
        radix2_dft(input)
    }
}

static NAIVE_BACKEND: NaiveDftBackend = NaiveDftBackend;
static RADIX2_BACKEND: Radix2Backend = Radix2Backend;

/// Common options shared by transform entrypoints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FftOptions {
    pub mode: RuntimeMode,
    pub normalization: Normalization,
    pub backend: BackendKind,
    pub check_finite: bool,
}

impl FftOptions {
    #[must_use]
    pub fn with_mode(mut self, mode: RuntimeMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    #[must_use]
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    #[must_use]
    pub fn with_check_finite(mut self, check_finite: bool) -> Self {
        self.check_finite = check_finite;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FftError {
    #[error("input length must be greater than zero")]
    EmptyInput,
    #[error("length {len} is not a power of two")]
    NotPowerOfTwo { len: usize },
    #[error("invalid shape: {detail}")]
    InvalidShape { detail: &'static str },
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("sample spacing must be finite and greater than zero")]
    NonPositiveSampleSpacing,
    #[error("non-finite input rejected by policy")]
    NonFiniteInput,
}

/// One record per completed transform call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformTrace {
    pub operation_id: String,
    pub kind: TransformKind,
    pub direction: &'static str,
    /// `[n]` for 1D calls, `[width, height]` for 2D calls.
    pub shape: Vec<usize>,
    /// Resolved backend per axis, in the order the passes ran.
    pub backends: Vec<BackendKind>,
    pub mode: RuntimeMode,
    pub normalization: Normalization,
    pub timing_ns: u128,
}

impl TransformTrace {
    #[must_use]
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

const TRACE_CAPACITY: usize = 1024;

static TRACE_LOG: OnceLock<Mutex<VecDeque<TransformTrace>>> = OnceLock::new();
static OPERATION_COUNTER: AtomicU64 = AtomicU64::new(1);

fn trace_log() -> &'static Mutex<VecDeque<TransformTrace>> {
    TRACE_LOG.get_or_init(|| Mutex::new(VecDeque::with_capacity(TRACE_CAPACITY)))
}

fn next_operation_id() -> String {
    let next = OPERATION_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("dft-op-{next:016x}")
}

fn record_trace(trace: TransformTrace) {
    if let Ok(mut log) = trace_log().lock() {
        if log.len() == TRACE_CAPACITY {
            let _ = log.pop_front();
        }
        log.push_back(trace);
    }
}

/// Drain every trace recorded so far, oldest first.
///
/// The log is process-global and observability-only: transform results never
/// read from it.
#[must_use]
pub fn take_transform_traces() -> Vec<TransformTrace> {
    if let Ok(mut log) = trace_log().lock() {
        return log.drain(..).collect();
    }
    Vec::new()
}

/// Copy of the recorded traces without draining them.
#[must_use]
pub fn recent_transform_traces() -> Vec<TransformTrace> {
    trace_log()
        .lock()
        .map_or_else(|_| Vec::new(), |log| log.iter().cloned().collect())
}

/// 1D forward transform of complex samples.
pub fn transform(
    input: &[ComplexNumber],
    options: &FftOptions,
) -> Result<Vec<ComplexNumber>, FftError> {
    run_complex_1d(TransformKind::Transform, input, options, false)
}

/// 1D forward transform of real samples, promoted to complex first.
pub fn transform_real(
    input: &[f64],
    options: &FftOptions,
) -> Result<Vec<ComplexNumber>, FftError> {
    let promoted = promote_real(input);
    run_complex_1d(TransformKind::TransformReal, &promoted, options, false)
}

/// 1D inverse transform via `conj(DFT(conj(x)))` and normalization.
pub fn inverse_transform(
    input: &[ComplexNumber],
    options: &FftOptions,
) -> Result<Vec<ComplexNumber>, FftError> {
    run_complex_1d(TransformKind::InverseTransform, input, options, true)
}

/// 2D forward transform: a pass over every row, then over every column.
///
/// `shape` is `(width, height)`; element (column `j`, row `i`) lives at
/// `j + i * width`.
pub fn transform_2d(
    input: &[ComplexNumber],
    shape: (usize, usize),
    options: &FftOptions,
) -> Result<Vec<ComplexNumber>, FftError> {
    run_complex_2d(TransformKind::Transform2d, input, shape, options, false)
}

/// 2D forward transform of real samples.
pub fn transform_2d_real(
    input: &[f64],
    shape: (usize, usize),
    options: &FftOptions,
) -> Result<Vec<ComplexNumber>, FftError> {
    let promoted = promote_real(input);
    run_complex_2d(TransformKind::Transform2dReal, &promoted, shape, options, false)
}

/// 2D inverse transform, scaled over all `width * height` samples.
pub fn inverse_transform_2d(
    input: &[ComplexNumber],
    shape: (usize, usize),
    options: &FftOptions,
) -> Result<Vec<ComplexNumber>, FftError> {
    run_complex_2d(TransformKind::InverseTransform2d, input, shape, options, true)
}

fn run_complex_1d(
    kind: TransformKind,
    input: &[ComplexNumber],
    options: &FftOptions,
    inverse: bool,
) -> Result<Vec<ComplexNumber>, FftError> {
    ensure_non_empty(input.len())?;
    validate_finite(input, options)?;
    let backend = resolve_backend(options.backend, input.len())?;

    let started = Instant::now();
    let mut output = if inverse {
        conjugated(&backend.forward_unscaled(&conjugated(input)))
    } else {
        backend.forward_unscaled(input)
    };
    apply_normalization(&mut output, options.normalization, input.len(), inverse);

    record_trace(TransformTrace {
        operation_id: next_operation_id(),
        kind,
        direction: direction_name(inverse),
        shape: vec![input.len()],
        backends: vec![backend.kind()],
        mode: options.mode,
        normalization: options.normalization,
        timing_ns: started.elapsed().as_nanos(),
    });

    Ok(output)
}

fn run_complex_2d(
    kind: TransformKind,
    input: &[ComplexNumber],
    shape: (usize, usize),
    options: &FftOptions,
    inverse: bool,
) -> Result<Vec<ComplexNumber>, FftError> {
    let expected_len = validate_shape_2d(shape)?;
    if input.len() != expected_len {
        return Err(FftError::LengthMismatch {
            expected: expected_len,
            actual: input.len(),
        });
    }
    validate_finite(input, options)?;

    let (width, height) = shape;
    let row_backend = resolve_backend(options.backend, width)?;
    let column_backend = resolve_backend(options.backend, height)?;

    let started = Instant::now();
    let mut output = if inverse {
        let spectrum =
            transform_2d_unscaled(row_backend, column_backend, &conjugated(input), shape);
        conjugated(&spectrum)
    } else {
        transform_2d_unscaled(row_backend, column_backend, input, shape)
    };
    apply_normalization(&mut output, options.normalization, expected_len, inverse);

    record_trace(TransformTrace {
        operation_id: next_operation_id(),
        kind,
        direction: direction_name(inverse),
        shape: vec![width, height],
        backends: vec![row_backend.kind(), column_backend.kind()],
        mode: options.mode,
        normalization: options.normalization,
        timing_ns: started.elapsed().as_nanos(),
    });

    Ok(output)
}

fn transform_2d_unscaled(
    row_backend: &dyn FftBackend,
    column_backend: &dyn FftBackend,
    input: &[ComplexNumber],
    (width, height): (usize, usize),
) -> Vec<ComplexNumber> {
    let mut rows = vec![ComplexNumber::zero(); width * height];
    for (source, target) in input.chunks_exact(width).zip(rows.chunks_exact_mut(width)) {
        target.copy_from_slice(&row_backend.forward_unscaled(source));
    }

    let mut output = vec![ComplexNumber::zero(); width * height];
    let mut column = vec![ComplexNumber::zero(); height];
    for j in 0..width {
        for (i, slot) in column.iter_mut().enumerate() {
            *slot = rows[j + i * width];
        }
        let transformed = column_backend.forward_unscaled(&column);
        for (i, &value) in transformed.iter().enumerate() {
            output[j + i * width] = value;
        }
    }
    output
}

fn resolve_backend(kind: BackendKind, n: usize) -> Result<&'static dyn FftBackend, FftError> {
    match kind {
        BackendKind::Auto if n.is_power_of_two() => Ok(&RADIX2_BACKEND),
        BackendKind::Auto | BackendKind::NaiveDft => Ok(&NAIVE_BACKEND),
        BackendKind::Radix2 if n.is_power_of_two() => Ok(&RADIX2_BACKEND),
        BackendKind::Radix2 => Err(FftError::NotPowerOfTwo { len: n }),
    }
}

fn promote_real(input: &[f64]) -> Vec<ComplexNumber> {
    input.iter().copied().map(ComplexNumber::from_real).collect()
}

fn conjugated(input: &[ComplexNumber]) -> Vec<ComplexNumber> {
    input.iter().map(|value| value.conj()).collect()
}

pub(crate) fn validate_shape_2d((width, height): (usize, usize)) -> Result<usize, FftError> {
    if width == 0 || height == 0 {
        return Err(FftError::InvalidShape {
            detail: "width and height must be greater than zero",
        });
    }
    width.checked_mul(height).ok_or(FftError::InvalidShape {
        detail: "width * height overflows",
    })
}

fn validate_finite(input: &[ComplexNumber], options: &FftOptions) -> Result<(), FftError> {
    let should_check = options.check_finite || options.mode.rejects_non_finite();
    if should_check && input.iter().any(|value| !value.is_finite()) {
        return Err(FftError::NonFiniteInput);
    }
    Ok(())
}

fn ensure_non_empty(len: usize) -> Result<(), FftError> {
    if len == 0 {
        return Err(FftError::EmptyInput);
    }
    Ok(())
}

fn normalization_scale(normalization: Normalization, n: usize, inverse: bool) -> f64 {
    let n_as_f64 = n as f64;
    match normalization {
        Normalization::Backward => {
            if inverse {
                1.0 / n_as_f64
            } else {
                1.0
            }
        }
        Normalization::Forward => {
            if inverse {
                1.0
            } else {
                1.0 / n_as_f64
            }
        }
        Normalization::Ortho => 1.0 / n_as_f64.sqrt(),
    }
}

fn apply_normalization(
    data: &mut [ComplexNumber],
    normalization: Normalization,
    n: usize,
    inverse: bool,
) {
    let scale = normalization_scale(normalization, n, inverse);
    if (scale - 1.0).abs() <= f64::EPSILON {
        return;
    }
    for value in data.iter_mut() {
        *value = value.scale(scale);
    }
}

fn direction_name(inverse: bool) -> &'static str {
    if inverse { "inverse" } else { "forward" }
}
