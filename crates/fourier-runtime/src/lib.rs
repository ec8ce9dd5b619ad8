#![forbid(unsafe_code)]

//! Shared runtime vocabulary for the fourier workspace.
//!
//! ## Module layout
//!
//! | Module | Contents                                         |
//! |--------|--------------------------------------------------|
//! | `mode` | [`RuntimeMode`] enum (Strict / Hardened)         |
//!
//! The crate root also carries the structured test log entry and the
//! tolerance assertions used by every test suite in the workspace.

pub mod mode;

pub use mode::RuntimeMode;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

#[must_use]
pub fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64)
}

// ═══════════════════════════════════════════════════════════════════
// Test Helpers — Shared assertion and logging utilities
// ═══════════════════════════════════════════════════════════════════

/// Structured test log entry for forensic comparison across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestLogEntry {
    pub test_id: String,
    pub timestamp_ms: u64,
    pub level: TestLogLevel,
    pub module: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TestResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_abs_error: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestLogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestResult {
    Pass,
    Fail,
}

impl TestResult {
    #[must_use]
    pub fn from_pass(pass: bool) -> Self {
        if pass { Self::Pass } else { Self::Fail }
    }
}

impl TestLogEntry {
    #[must_use]
    pub fn new(
        test_id: impl Into<String>,
        module: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            test_id: test_id.into(),
            timestamp_ms: now_unix_ms(),
            level: TestLogLevel::Info,
            module: module.into(),
            message: message.into(),
            result: None,
            max_abs_error: None,
        }
    }

    /// A failing result raises the entry to [`TestLogLevel::Error`].
    #[must_use]
    pub fn with_result(mut self, result: TestResult) -> Self {
        if result == TestResult::Fail {
            self.level = TestLogLevel::Error;
        }
        self.result = Some(result);
        self
    }

    #[must_use]
    pub fn with_max_abs_error(mut self, error: f64) -> Self {
        self.max_abs_error = Some(error);
        self
    }

    /// Serialize to JSON line for structured logging.
    #[must_use]
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }

    /// Write the JSON line to stderr, where the test harness captures it.
    pub fn emit(&self) {
        eprintln!("{}", self.to_json_line());
    }
}

/// Assert two f64 values are close within combined absolute and relative tolerance.
///
/// Uses the formula: |actual - expected| <= atol + rtol * |expected|
pub fn assert_close(actual: f64, expected: f64, atol: f64, rtol: f64) {
    let tol = atol + rtol * expected.abs();
    assert!(
        (actual - expected).abs() <= tol,
        "assert_close failed: actual={actual} expected={expected} diff={} tol={tol} (atol={atol}, rtol={rtol})",
        (actual - expected).abs()
    );
}

fn pair_distance((a_re, a_im): (f64, f64), (e_re, e_im): (f64, f64)) -> f64 {
    (a_re - e_re).hypot(a_im - e_im)
}

/// Largest modulus of the element-wise difference between two complex
/// sequences given as `(re, im)` pairs.
///
/// Panics when the lengths differ.
#[must_use]
pub fn max_abs_error<T: Copy + Into<(f64, f64)>>(actual: &[T], expected: &[T]) -> f64 {
    assert_eq!(
        actual.len(),
        expected.len(),
        "max_abs_error: length mismatch: actual={} expected={}",
        actual.len(),
        expected.len()
    );
    actual
        .iter()
        .zip(expected)
        .map(|(&a, &e)| pair_distance(a.into(), e.into()))
        .fold(0.0, f64::max)
}

/// Assert two complex sequences are element-wise close:
/// |actual - expected| <= atol + rtol * |expected|, measured as complex moduli.
pub fn assert_close_pairs<T: Copy + Into<(f64, f64)>>(
    actual: &[T],
    expected: &[T],
    atol: f64,
    rtol: f64,
) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "assert_close_pairs: length mismatch: actual={} expected={}",
        actual.len(),
        expected.len()
    );
    for (idx, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        let (a, e) = (a.into(), e.into());
        let tol = atol + rtol * e.0.hypot(e.1);
        let diff = pair_distance(a, e);
        assert!(
            diff <= tol,
            "assert_close_pairs[{idx}]: actual={a:?} expected={e:?} diff={diff} tol={tol}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_strict() {
        assert_eq!(RuntimeMode::default(), RuntimeMode::Strict);
        assert!(!RuntimeMode::Strict.rejects_non_finite());
        assert!(RuntimeMode::Hardened.rejects_non_finite());
    }

    #[test]
    fn log_entry_skips_unset_fields() {
        let json = TestLogEntry::new("t-1", "fourier_runtime::tests", "hello").to_json_line();
        assert!(json.contains("\"test_id\":\"t-1\""));
        assert!(json.contains("\"level\":\"info\""));
        assert!(!json.contains("result"));
        assert!(!json.contains("max_abs_error"));
    }

    #[test]
    fn failing_result_raises_level_and_roundtrips() {
        let entry = TestLogEntry::new("t-2", "fourier_runtime::tests", "roundtrip")
            .with_result(TestResult::from_pass(false))
            .with_max_abs_error(1e-3);
        let parsed: TestLogEntry =
            serde_json::from_str(&entry.to_json_line()).expect("entry must parse");
        assert_eq!(parsed.level, TestLogLevel::Error);
        assert_eq!(parsed.result, Some(TestResult::Fail));
        assert_eq!(parsed.max_abs_error, Some(1e-3));
    }

    #[test]
    fn max_abs_error_measures_complex_modulus() {
        let actual = [(1.0, 1.0), (3.0, 4.0)];
        let expected = [(1.0, 1.0), (0.0, 0.0)];
        assert_eq!(max_abs_error(&actual, &expected), 5.0);
        assert_eq!(max_abs_error::<(f64, f64)>(&[], &[]), 0.0);
    }

    #[test]
    fn close_pairs_use_absolute_and_relative_terms() {
        assert_close(2.0, 2.0 + 1e-12, 1e-9, 0.0);
        assert_close_pairs(&[(1.0 + 1e-10, 0.0)], &[(1.0, 0.0)], 1e-9, 0.0);
        assert_close_pairs(&[(1000.1, 0.0)], &[(1000.0, 0.0)], 0.0, 1e-3);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn close_pairs_reject_length_mismatch() {
        assert_close_pairs(&[(1.0, 0.0)], &[(1.0, 0.0), (2.0, 0.0)], 1e-9, 0.0);
    }

    #[test]
    #[should_panic(expected = "assert_close_pairs[0]")]
    fn close_pairs_report_first_offending_index() {
        assert_close_pairs(&[(1.1, 0.0)], &[(1.0, 0.0)], 1e-9, 1e-9);
    }
}
