//! Used by `#[benchkit::bench]`'s generated code. Not public API and thus
//! not subject to SemVer.

pub use crate::benchmarkable::Benchmarkable;
use crate::benchmarkable::Benchmark;

/// Builds a [`Benchmarkable`] from a macro-generated `(setup, core,
/// teardown)` triple (spec §6: the benchmarkable factory's output).
pub fn benchmark_fn<Setup, Core, Teardown, S, O>(
    setup: Setup,
    core: Core,
    teardown: Teardown,
) -> Benchmark<Setup, Core, Teardown, S>
where
    Setup: FnMut() -> S,
    Core: FnMut(&mut S) -> O,
    Teardown: FnMut(S),
{
    Benchmark::new(setup, core, teardown)
}
