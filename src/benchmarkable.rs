//! The benchmarkable contract (spec §4.1, Component 3).

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use crate::alloc;
use crate::error::{BenchError, BenchmarkableError};
use crate::sample_store::{SampleRow, SampleStore};

/// A callable meeting the benchmarkable contract: given a plan
/// `(n_samples, n_evals)`, appends exactly `n_samples` rows to `store`, each
/// the result of `n_evals` back-to-back evaluations of a user expression.
pub trait Benchmarkable {
    /// Runs one invocation of the contract.
    ///
    /// Fails only if setup, the user expression, or teardown fail; on
    /// failure no partial rows from this call are guaranteed to have been
    /// discarded from `store` (callers that need a pristine store on error
    /// should not reuse it).
    fn run(&mut self, store: &mut SampleStore, n_samples: u32, n_evals: u32) -> Result<(), BenchError>;
}

/// The non-inlinable function-call barrier from spec §4.1: the compiler
/// cannot hoist, fold, or dead-code-eliminate the benchmarked call across
/// this boundary, and [`std::hint::black_box`] prevents the result from
/// being optimized away.
#[inline(never)]
fn consume<T>(value: T) {
    std::hint::black_box(value);
}

/// A benchmarkable built from setup, a core expression, and teardown
/// closures (the shape the `#[benchkit::bench]` attribute macro generates,
/// per spec §9's "Compile-time expression capture" notes).
pub struct Benchmark<Setup, Core, Teardown, S> {
    setup: Setup,
    core: Core,
    teardown: Teardown,
    _marker: std::marker::PhantomData<S>,
}

impl<Setup, Core, Teardown, S, O> Benchmark<Setup, Core, Teardown, S>
where
    Setup: FnMut() -> S,
    Core: FnMut(&mut S) -> O,
    Teardown: FnMut(S),
{
    /// Builds a benchmarkable from its three constituent closures.
    pub fn new(setup: Setup, core: Core, teardown: Teardown) -> Self {
        Self { setup, core, teardown, _marker: std::marker::PhantomData }
    }
}

impl<Setup, Core, Teardown, S, O> Benchmarkable for Benchmark<Setup, Core, Teardown, S>
where
    Setup: FnMut() -> S,
    Core: FnMut(&mut S) -> O,
    Teardown: FnMut(S),
{
    fn run(&mut self, store: &mut SampleStore, n_samples: u32, n_evals: u32) -> Result<(), BenchError> {
        // Pre-loop copy into a concretely-typed local: `core` is already
        // monomorphized (no trait objects, no dynamic dispatch), so the hot
        // loop below calls through a fixed, concrete path (spec §4.1 /
        // §9 "Non-constant binding capture").
        let core = &mut self.core;

        // Setup/teardown run once per invocation, not once per sample
        // (spec §4.1: "1. Perform setup once... 3. Perform teardown once").
        let result = catch_unwind(AssertUnwindSafe(|| (self.setup)()));
        let mut state = match result {
            Ok(state) => state,
            Err(payload) => return Err(BenchError::BenchmarkableFailure(BenchmarkableError::from_panic(payload))),
        };

        let run_result = catch_unwind(AssertUnwindSafe(|| {
            let mut rows = Vec::with_capacity(n_samples as usize);

            for _ in 0..n_samples {
                let (start_bytes, start_ops) = alloc::snapshot();
                let start = Instant::now();

                for _ in 0..n_evals {
                    consume(core(&mut state));
                }

                let elapsed = start.elapsed();
                let (bytes_allocated, allocations) = alloc::delta((start_bytes, start_ops));

                rows.push(SampleRow {
                    evaluations: n_evals as f64,
                    elapsed_time: elapsed.as_nanos() as f64,
                    gc_time: 0.0,
                    bytes_allocated,
                    allocations,
                });
            }

            rows
        }));

        let teardown_result = catch_unwind(AssertUnwindSafe(|| (self.teardown)(state)));

        let rows = match run_result {
            Ok(rows) => rows,
            Err(payload) => return Err(BenchError::BenchmarkableFailure(BenchmarkableError::from_panic(payload))),
        };
        if let Err(payload) = teardown_result {
            return Err(BenchError::BenchmarkableFailure(BenchmarkableError::from_panic(payload)));
        }

        for row in rows {
            store.push(row);
        }

        Ok(())
    }
}

/// Builds a benchmarkable around a plain expression, with empty setup and
/// teardown. This is what [`crate::bench`] expands a user expression into
/// (spec §6: "A convenience single-expression entry point `bench(expr)`").
pub fn from_expr<F, O>(f: F) -> impl Benchmarkable
where
    F: FnMut() -> O,
{
    let mut f = f;
    Benchmark::new(|| (), move |_: &mut ()| f(), |_: ()| {})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_one_row_per_sample() {
        let mut bench = from_expr(|| 1 + 1);
        let mut store = SampleStore::new();
        bench.run(&mut store, 3, 5).unwrap();
        assert_eq!(store.len(), 3);
        assert!(store.evaluations().iter().all(|&e| e == 5.0));
    }

    #[test]
    fn propagates_panics_as_errors() {
        let mut bench = from_expr(|| -> i32 { panic!("boom") });
        let mut store = SampleStore::new();
        let result = bench.run(&mut store, 1, 1);
        assert!(matches!(result, Err(BenchError::BenchmarkableFailure(_))));
    }

    /// spec §4.1: setup and teardown run once per `run` invocation, not once
    /// per sample.
    #[test]
    fn setup_and_teardown_run_once_per_invocation() {
        use std::cell::Cell;

        let setups = Cell::new(0);
        let teardowns = Cell::new(0);

        let mut bench = Benchmark::new(
            || {
                setups.set(setups.get() + 1);
            },
            |_: &mut ()| 42,
            |_| teardowns.set(teardowns.get() + 1),
        );

        let mut store = SampleStore::new();
        bench.run(&mut store, 4, 2).unwrap();

        assert_eq!(setups.get(), 1);
        assert_eq!(teardowns.get(), 1);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn state_persists_across_samples_within_one_invocation() {
        use std::cell::Cell;

        let counter = Cell::new(0_i32);

        let mut bench = Benchmark::new(
            || 0_i32,
            |state: &mut i32| {
                *state += 1;
                counter.set(*state);
            },
            |_| {},
        );

        let mut store = SampleStore::new();
        bench.run(&mut store, 3, 1).unwrap();

        assert_eq!(counter.get(), 3);
    }
}
