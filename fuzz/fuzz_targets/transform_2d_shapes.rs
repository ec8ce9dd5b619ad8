#![no_main]

use arbitrary::Arbitrary;
use fourier_fft::{FftError, FftOptions, transform_2d_real};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct ShapeInput {
    width: u8,
    height: u8,
    samples: Vec<f64>,
}

fuzz_target!(|input: ShapeInput| {
    let shape = (usize::from(input.width), usize::from(input.height));
    let samples = input.samples.into_iter().take(1024).collect::<Vec<_>>();
    match transform_2d_real(&samples, shape, &FftOptions::default()) {
        Ok(spectrum) => assert_eq!(spectrum.len(), shape.0 * shape.1),
        Err(FftError::InvalidShape { .. }) => assert!(shape.0 == 0 || shape.1 == 0),
        Err(FftError::LengthMismatch { expected, actual }) => {
            assert_eq!(expected, shape.0 * shape.1);
            assert_ne!(expected, actual);
        }
        Err(other) => panic!("unexpected error for {shape:?}: {other}"),
    }
});
