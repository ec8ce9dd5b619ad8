#![forbid(unsafe_code)]

//! Runtime mode definitions for Strict and Hardened operation.

use serde::{Deserialize, Serialize};

/// Operational mode governing how strictly inputs are screened.
///
/// - **Strict**: plain IEEE 754 semantics; NaN and infinities flow through
///   the arithmetic untouched.
/// - **Hardened**: adds finite-check rejection of every sample before any
///   transform work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RuntimeMode {
    #[default]
    Strict,
    Hardened,
}

impl RuntimeMode {
    /// Whether non-finite samples must be rejected regardless of caller opt-in.
    #[must_use]
    pub const fn rejects_non_finite(self) -> bool {
        matches!(self, Self::Hardened)
    }
}
