#![no_main]

use arbitrary::Arbitrary;
use fourier_fft::{
    BackendKind, ComplexNumber, FftOptions, Normalization, inverse_transform, transform,
};
use fourier_runtime::RuntimeMode;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct RoundtripInput {
    hardened: bool,
    backend: u8,
    normalization: u8,
    samples: Vec<(f64, f64)>,
}

fuzz_target!(|input: RoundtripInput| {
    let mode = if input.hardened {
        RuntimeMode::Hardened
    } else {
        RuntimeMode::Strict
    };
    let backend = match input.backend % 3 {
        0 => BackendKind::Auto,
        1 => BackendKind::NaiveDft,
        _ => BackendKind::Radix2,
    };
    let normalization = match input.normalization % 3 {
        0 => Normalization::Backward,
        1 => Normalization::Forward,
        _ => Normalization::Ortho,
    };
    let opts = FftOptions::default()
        .with_mode(mode)
        .with_backend(backend)
        .with_normalization(normalization);

    let samples: Vec<ComplexNumber> = input
        .samples
        .into_iter()
        .take(256)
        .map(ComplexNumber::from)
        .collect();

    let Ok(spectrum) = transform(&samples, &opts) else {
        return;
    };
    assert_eq!(spectrum.len(), samples.len());

    let bounded = samples
        .iter()
        .all(|value| value.is_finite() && value.abs() < 1e6);
    let recovered = inverse_transform(&spectrum, &opts);
    if bounded {
        let recovered = recovered.expect("bounded spectrum must invert");
        for (&lhs, &rhs) in recovered.iter().zip(&samples) {
            assert!((lhs - rhs).abs() < 1e-3, "{lhs} !~= {rhs}");
        }
    }
});
