#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! An adaptive micro-benchmarking harness: given a benchmarkable expression,
//! [`execute`] returns a statistically-grounded estimate of its
//! per-evaluation wall-clock time, GC/allocator overhead, allocation counts,
//! and a confidence interval (spec §1).

#[doc(inline)]
pub use benchkit_macros::bench;

// Used by `#[benchkit::bench]`'s generated code. Not public API and thus not
// subject to SemVer.
#[doc(hidden)]
#[path = "private.rs"]
pub mod __private;

mod alloc;
mod benchmarkable;
mod clock;
mod engine;
mod environment;
mod error;
mod ols;
mod sample_store;
mod results;

pub mod cli;
pub mod output;
pub mod tree_painter;

pub use alloc::AllocProfiler;
pub use benchmarkable::{Benchmark, Benchmarkable};
pub use clock::ClockResolution;
pub use engine::{execute, EngineConfig};
pub use environment::Environment;
pub use error::{BenchError, BenchmarkableError};
pub use ols::OlsFit;
pub use sample_store::{SampleRow, SampleStore};
pub use results::{Bound, Results, Summary};

/// Runs a single-expression benchmarkable under the default [`EngineConfig`]
/// (spec §6: "A convenience single-expression entry point `bench(expr)`
/// expands to a generated benchmarkable with empty setup/teardown and
/// immediately invokes `execute`").
///
/// # Examples
///
/// ```
/// let results = benchkit::bench_expr(|| std::hint::black_box(1) + std::hint::black_box(1)).unwrap();
/// let summary = results.summarize().unwrap();
/// println!("{summary:?}");
/// ```
pub fn bench_expr<F, O>(f: F) -> Result<Results, BenchError>
where
    F: FnMut() -> O,
{
    let mut benchmarkable = benchmarkable::from_expr(f);
    execute(&mut benchmarkable, EngineConfig::default())
}

/// Runs a single-expression benchmarkable under a caller-supplied
/// [`EngineConfig`].
pub fn bench_expr_with<F, O>(f: F, config: EngineConfig) -> Result<Results, BenchError>
where
    F: FnMut() -> O,
{
    let mut benchmarkable = benchmarkable::from_expr(f);
    execute(&mut benchmarkable, config)
}
