//! Immutable benchmark outcomes and derived summaries (spec §3, §4.6,
//! Component 6).

use crate::error::BenchError;
use crate::ols;
use crate::sample_store::SampleStore;

/// The outcome of one [`crate::execute`] call.
#[derive(Debug, Clone)]
pub struct Results {
    /// `true` iff the first, potentially compilation-biased, sample was
    /// discarded before any retained sample was recorded.
    pub precompiled: bool,
    /// `true` iff more than one retained sample exists.
    pub multiple_samples: bool,
    /// `true` iff the geometric-search path (Phase E) ran.
    pub search_performed: bool,
    /// The retained samples.
    pub samples: SampleStore,
    /// Wall-clock seconds consumed by `execute`, end-to-end.
    pub time_used: f64,
}

/// A nullable interval: `None` means "no confidence interval computable",
/// distinct from a degenerate (zero-width) interval.
pub type Bound = Option<(f64, f64)>;

/// A derived, immutable view of a [`Results`].
#[derive(Debug, Clone)]
pub struct Summary {
    /// Retained sample count.
    pub n: usize,
    /// Sum of `evaluations` across retained samples.
    pub n_evaluations: f64,
    /// Center estimate of per-evaluation elapsed time, in nanoseconds.
    pub time_center: f64,
    /// `(lower, upper)` bound around `time_center`, if computable.
    pub time_bounds: Bound,
    /// Center estimate of percent time spent in GC, `0.0..=100.0`.
    pub gc_percent_center: f64,
    /// `(lower, upper)` bound around `gc_percent_center`, if computable.
    pub gc_percent_bounds: Bound,
    /// Per-evaluation bytes allocated, from the minimum-ratio sample.
    pub bytes_per_eval: u64,
    /// Per-evaluation allocation count, from the minimum-ratio sample.
    pub allocations_per_eval: u64,
    /// OLS `r²`, present iff [`Results::search_performed`].
    pub r_squared: Option<f64>,
}

/// Half-width multiplier used in place of the usual ~2-sigma interval, to
/// counter residual serial correlation between samples (spec §4.6).
const SIGMA_MULTIPLE: f64 = 6.0;

impl Results {
    /// Derives a [`Summary`].
    ///
    /// Fails with [`BenchError::InsufficientData`] if zero samples were
    /// retained. This cannot happen from a [`crate::execute`] call (Phase A
    /// always records one row), but a [`Results`] value could in principle
    /// be hand-constructed with an empty store.
    pub fn summarize(&self) -> Result<Summary, BenchError> {
        if self.samples.is_empty() {
            return Err(BenchError::InsufficientData);
        }

        let (bytes_per_eval, allocations_per_eval) = min_ratio_sample(&self.samples);
        let n = self.samples.len();
        let n_evaluations: f64 = self.samples.evaluations().iter().sum();

        if self.search_performed {
            let fit = ols::fit(self.samples.evaluations(), self.samples.elapsed_time());
            let time_center = fit.slope;
            let time_bounds = six_sigma_bound(time_center, fit.sem_slope, None);

            let (gc_center, gc_bounds) = gc_percent_stats(&self.samples);

            Ok(Summary {
                n,
                n_evaluations,
                time_center,
                time_bounds,
                gc_percent_center: gc_center,
                gc_percent_bounds: gc_bounds,
                bytes_per_eval,
                allocations_per_eval,
                r_squared: Some(fit.r_squared),
            })
        } else if self.multiple_samples {
            let elapsed = self.samples.elapsed_time();
            let mean = mean(elapsed);
            let sem = standard_error(elapsed, mean);
            let time_bounds = six_sigma_bound(mean, sem, None);

            let (gc_center, gc_bounds) = gc_percent_stats(&self.samples);

            Ok(Summary {
                n,
                n_evaluations,
                time_center: mean,
                time_bounds,
                gc_percent_center: gc_center,
                gc_percent_bounds: gc_bounds,
                bytes_per_eval,
                allocations_per_eval,
                r_squared: None,
            })
        } else {
            let elapsed = self.samples.elapsed_time()[0];
            let gc = self.samples.gc_time()[0];
            let gc_percent = if elapsed > 0.0 { 100.0 * gc / elapsed } else { 0.0 };

            Ok(Summary {
                n,
                n_evaluations,
                time_center: elapsed,
                time_bounds: None,
                gc_percent_center: gc_percent,
                gc_percent_bounds: None,
                bytes_per_eval,
                allocations_per_eval,
                r_squared: None,
            })
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn standard_error(values: &[f64], mean: f64) -> f64 {
    let n = values.len() as f64;
    if n < 2.0 {
        return 0.0;
    }
    let variance = values.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0);
    (variance / n).sqrt()
}

fn six_sigma_bound(center: f64, sem: f64, clip: Option<(f64, f64)>) -> Bound {
    let mut lower = center - SIGMA_MULTIPLE * sem;
    let mut upper = center + SIGMA_MULTIPLE * sem;

    lower = lower.max(0.0);

    if let Some((lo, hi)) = clip {
        lower = lower.max(lo);
        upper = upper.min(hi);
    }

    Some((lower, upper))
}

/// Per-sample GC-time ratio mean/bound, used identically for the
/// multi-sample and search-performed cases (spec §4.6: "the ratio is
/// assumed independent of `evaluations` and no OLS is fit to it").
fn gc_percent_stats(samples: &SampleStore) -> (f64, Bound) {
    let ratios: Vec<f64> = samples
        .elapsed_time()
        .iter()
        .zip(samples.gc_time())
        .map(|(&elapsed, &gc)| if elapsed > 0.0 { gc / elapsed } else { 0.0 })
        .collect();

    let mean_ratio = mean(&ratios);
    let sem_ratio = standard_error(&ratios, mean_ratio);

    let center = 100.0 * mean_ratio;
    let bounds = six_sigma_bound(center, 100.0 * sem_ratio, Some((0.0, 100.0)));

    (center, bounds)
}

/// Per-evaluation memory/allocation estimate from the sample with the
/// smallest `bytes_allocated / evaluations` ratio (spec §4.6): allocator
/// measurements are upward-biased by coincidental GC/reclamation activity
/// during a sample, never downward-biased below the true allocation cost.
fn min_ratio_sample(samples: &SampleStore) -> (u64, u64) {
    let mut best: Option<(f64, u64, u64)> = None;

    for row in samples.rows() {
        let ratio = row.bytes_allocated as f64 / row.evaluations;
        let is_better = match best {
            Some((best_ratio, ..)) => ratio < best_ratio,
            None => true,
        };
        if is_better {
            best = Some((
                ratio,
                (row.bytes_allocated as f64 / row.evaluations).floor() as u64,
                (row.allocations as f64 / row.evaluations).floor() as u64,
            ));
        }
    }

    match best {
        Some((_, bytes, allocations)) => (bytes, allocations),
        None => (0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_store::SampleRow;

    fn row(evaluations: f64, elapsed_time: f64, gc_time: f64, bytes: u64, allocations: u64) -> SampleRow {
        SampleRow { evaluations, elapsed_time, gc_time, bytes_allocated: bytes, allocations }
    }

    #[test]
    fn single_sample_has_no_bounds() {
        let mut samples = SampleStore::new();
        samples.push(row(1.0, 1_000_000.0, 50_000.0, 16, 1));

        let results =
            Results { precompiled: true, multiple_samples: false, search_performed: false, samples, time_used: 0.01 };

        let summary = results.summarize().unwrap();
        assert_eq!(summary.time_center, 1_000_000.0);
        assert!(summary.time_bounds.is_none());
        assert!((summary.gc_percent_center - 5.0).abs() < 1e-9);
        assert!(summary.gc_percent_bounds.is_none());
        assert!(summary.r_squared.is_none());
    }

    #[test]
    fn multi_sample_bounds_are_nonnegative() {
        let mut samples = SampleStore::new();
        for i in 0..10 {
            samples.push(row(1.0, 1_000.0 + i as f64, 0.0, 8, 1));
        }

        let results =
            Results { precompiled: true, multiple_samples: true, search_performed: false, samples, time_used: 0.01 };

        let summary = results.summarize().unwrap();
        let (lower, upper) = summary.time_bounds.unwrap();
        assert!(lower >= 0.0);
        assert!(upper >= lower);
    }

    /// P9: the mem estimate never exceeds the true minimum ratio.
    #[test]
    fn mem_estimate_is_floor_of_min_ratio() {
        let mut samples = SampleStore::new();
        samples.push(row(1.0, 100.0, 0.0, 100, 10));
        samples.push(row(2.0, 100.0, 0.0, 150, 11));

        let (bytes, allocations) = min_ratio_sample(&samples);

        let min_ratio = samples
            .rows()
            .map(|r| r.bytes_allocated as f64 / r.evaluations)
            .fold(f64::INFINITY, f64::min);

        assert!(bytes as f64 <= min_ratio);
        assert_eq!(bytes, 75);
        assert_eq!(allocations, 5);
    }

    #[test]
    fn empty_store_is_insufficient_data() {
        let results =
            Results { precompiled: false, multiple_samples: false, search_performed: false, samples: SampleStore::new(), time_used: 0.0 };

        assert!(matches!(results.summarize(), Err(BenchError::InsufficientData)));
    }
}
