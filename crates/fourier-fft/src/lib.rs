#![forbid(unsafe_code)]

//! Discrete Fourier transforms over complex and real samples.
//!
//! - `complex`: the [`ComplexNumber`] value type
//! - `naive`: O(n²) summation, any length
//! - `radix2`: O(n log n) recursive radix-2, power-of-two lengths
//! - `transforms`: option-driven 1D/2D forward and inverse entrypoints
//! - `helpers`: frequency axes, spectrum shifts and energy for display

pub mod complex;
pub mod helpers;
pub mod naive;
pub mod radix2;
pub mod transforms;

pub use complex::ComplexNumber;
pub use helpers::{
    fftfreq, fftshift_1d, fftshift_2d, ifftshift_1d, ifftshift_2d, magnitude_spectrum,
    total_energy,
};
pub use naive::slow_transform;
pub use radix2::fast_transform;
pub use transforms::{
    BackendKind, FftBackend, FftError, FftOptions, NaiveDftBackend, Radix2Backend,
    TransformTrace, inverse_transform, inverse_transform_2d, recent_transform_traces,
    take_transform_traces, transform, transform_2d, transform_2d_real, transform_real,
};

use serde::{Deserialize, Serialize};

/// Scaling conventions for the forward/inverse pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Forward unscaled, inverse scaled by `1/N`.
    #[default]
    Backward,
    /// Forward scaled by `1/N`, inverse unscaled.
    Forward,
    /// Both directions scaled by `1/sqrt(N)`.
    Ortho,
}

/// Entrypoints recorded in [`TransformTrace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    Transform,
    TransformReal,
    InverseTransform,
    Transform2d,
    Transform2dReal,
    InverseTransform2d,
}
