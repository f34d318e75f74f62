//! JSON rendering of a [`crate::Results`]/[`crate::Summary`], grounded in
//! the teacher's `output::json` module but re-targeted from a multi-
//! benchmark `StatTree` to this system's single `Results` value.

use serde::Serialize;

use crate::results::{Results, Summary};

#[derive(Serialize)]
struct BoundJson {
    lower: f64,
    upper: f64,
}

#[derive(Serialize)]
struct SummaryJson {
    n: usize,
    n_evaluations: f64,
    time_center_ns: f64,
    time_bounds_ns: Option<BoundJson>,
    gc_percent_center: f64,
    gc_percent_bounds: Option<BoundJson>,
    bytes_per_eval: u64,
    allocations_per_eval: u64,
    r_squared: Option<f64>,
}

#[derive(Serialize)]
struct ResultsJson {
    precompiled: bool,
    multiple_samples: bool,
    search_performed: bool,
    sample_count: usize,
    time_used_secs: f64,
    summary: SummaryJson,
}

fn bound_json(bound: Option<(f64, f64)>) -> Option<BoundJson> {
    bound.map(|(lower, upper)| BoundJson { lower, upper })
}

fn summary_json(summary: &Summary) -> SummaryJson {
    SummaryJson {
        n: summary.n,
        n_evaluations: summary.n_evaluations,
        time_center_ns: summary.time_center,
        time_bounds_ns: bound_json(summary.time_bounds),
        gc_percent_center: summary.gc_percent_center,
        gc_percent_bounds: bound_json(summary.gc_percent_bounds),
        bytes_per_eval: summary.bytes_per_eval,
        allocations_per_eval: summary.allocations_per_eval,
        r_squared: summary.r_squared,
    }
}

/// Renders `results` (and its derived [`Summary`]) as a pretty-printed JSON
/// string.
pub fn to_json(results: &Results) -> Result<String, crate::error::BenchError> {
    let summary = results.summarize()?;

    let json = ResultsJson {
        precompiled: results.precompiled,
        multiple_samples: results.multiple_samples,
        search_performed: results.search_performed,
        sample_count: results.samples.len(),
        time_used_secs: results.time_used,
        summary: summary_json(&summary),
    };

    // `serde_json::to_string_pretty` only fails on types with non-string map
    // keys or unrepresentable floats (NaN/infinity), neither of which this
    // crate produces for `Results`/`Summary`.
    Ok(serde_json::to_string_pretty(&json).expect("Results/Summary is always representable as JSON"))
}
