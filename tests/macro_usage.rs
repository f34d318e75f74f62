//! Exercises the `#[benchkit::bench]` attribute macro end-to-end (spec §6:
//! the benchmarkable factory).

use benchkit::EngineConfig;

#[benchkit::bench]
fn add() -> i32 {
    std::hint::black_box(1) + std::hint::black_box(2)
}

fn make_vec() -> Vec<i32> {
    Vec::with_capacity(64)
}

fn drop_vec(_v: Vec<i32>) {}

#[benchkit::bench(setup = make_vec, teardown = drop_vec)]
fn push_pop(v: &mut Vec<i32>) -> Option<i32> {
    v.push(1);
    v.pop()
}

#[test]
fn plain_bench_runs_to_completion() {
    let config = EngineConfig::default().with_samples(10).with_budget_seconds(1.0);
    let results = benchkit::execute(&mut add(), config).unwrap();
    assert!(results.samples.len() >= 1);
    assert!(results.summarize().is_ok());
}

#[test]
fn bench_with_setup_and_teardown_runs_to_completion() {
    let config = EngineConfig::default().with_samples(10).with_budget_seconds(1.0);
    let results = benchkit::execute(&mut push_pop(), config).unwrap();
    assert!(results.samples.len() >= 1);
    assert!(results.summarize().is_ok());
}
