//! Error taxonomy for the benchmarking engine (spec §7).

use std::fmt;

/// Failure modes that can surface from [`crate::execute`] or
/// [`crate::Results::summarize`].
///
/// `BudgetExhaustedBeforeSignal` from the taxonomy is deliberately not a
/// variant here: it is not an error, but a normal outcome visible through
/// [`crate::Results`]'s flags and [`crate::Summary::r_squared`].
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// The monotonic clock returned a non-advancing or decreasing reading
    /// while probing its resolution.
    #[error("monotonic clock did not advance, or moved backwards, during resolution probing")]
    NonMonotonicClock,

    /// Setup, the benchmarked expression itself, or teardown raised.
    #[error("benchmarked expression failed: {0}")]
    BenchmarkableFailure(BenchmarkableError),

    /// Attempted to derive a [`crate::Summary`] from a [`crate::Results`]
    /// with zero retained samples.
    ///
    /// This cannot arise from [`crate::execute`] itself: Phase A always
    /// records one row, even if Phase B immediately exits.
    #[error("cannot summarize a Results with zero retained samples")]
    InsufficientData,
}

/// The payload carried by [`BenchError::BenchmarkableFailure`].
///
/// Wraps whatever the benchmarked code panicked or returned as an error
/// with, reduced to a displayable message since panics can carry arbitrary
/// payloads.
#[derive(Debug)]
pub struct BenchmarkableError(pub String);

impl fmt::Display for BenchmarkableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for BenchmarkableError {}

impl BenchmarkableError {
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "benchmarked code panicked with a non-string payload".to_owned()
        };
        Self(message)
    }
}
