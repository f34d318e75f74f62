//! Clock-resolution probing (spec §4.2, Component 1).

use std::time::Instant;

use crate::error::BenchError;

/// The engine's model of the finest meaningful measurement: the minimum
/// observed positive gap between two immediately-successive monotonic
/// clock reads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockResolution {
    /// Nanoseconds. `f64::INFINITY` if every probed pair read back-to-back
    /// as identical (spec §9 open question: undefined on such hosts, made
    /// explicit here rather than silently treated as zero).
    pub nanos: f64,
}

impl ClockResolution {
    /// Default trial count from spec §4.2.
    pub const DEFAULT_TRIALS: u32 = 10_000;

    /// Probes using [`Self::DEFAULT_TRIALS`] trials.
    pub fn probe() -> Result<Self, BenchError> {
        Self::probe_with(Self::DEFAULT_TRIALS)
    }

    /// Reads the clock twice in immediate succession `trials` times and
    /// returns the minimum observed positive difference.
    ///
    /// Returns [`BenchError::NonMonotonicClock`] the first time a pair reads
    /// back as decreasing, since a clock that can move backwards can't be
    /// trusted to bound anything.
    pub fn probe_with(trials: u32) -> Result<Self, BenchError> {
        let mut min_positive_nanos: Option<f64> = None;

        for _ in 0..trials {
            let a = Instant::now();
            let b = Instant::now();

            match b.checked_duration_since(a) {
                None => return Err(BenchError::NonMonotonicClock),
                Some(delta) => {
                    let nanos = delta.as_nanos() as f64;
                    let is_new_min = match min_positive_nanos {
                        Some(m) => nanos < m,
                        None => true,
                    };
                    if nanos > 0.0 && is_new_min {
                        min_positive_nanos = Some(nanos);
                    }
                }
            }
        }

        Ok(Self { nanos: min_positive_nanos.unwrap_or(f64::INFINITY) })
    }
}
