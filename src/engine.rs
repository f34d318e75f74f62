//! The adaptive sampling engine (spec §4.5, Component 5): the phase-based
//! controller that decides the execution plan and drives a [`Benchmarkable`].

use std::time::Instant;

use crate::benchmarkable::Benchmarkable;
use crate::clock::ClockResolution;
use crate::error::BenchError;
use crate::ols;
use crate::results::Results;
use crate::sample_store::SampleStore;

/// Default ratio of debiased sample time to clock resolution above which a
/// single evaluation is considered directly measurable (spec §4.5 Phase D).
/// A policy choice, not a statistical bound, kept configurable per spec §9
/// ("The factor 1000 ... has no formal justification ... keep it
/// configurable").
const DEFAULT_DIRECT_SAMPLING_THRESHOLD: f64 = 1000.0;

/// Engine configuration, with the defaults from spec §4.5/§6.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Target number of retained samples.
    pub samples: u32,
    /// Wall-clock time budget, in seconds.
    pub budget_seconds: f64,
    /// `r²` threshold at which Phase E's geometric search is judged
    /// converged.
    pub tau: f64,
    /// Growth factor applied to `n_evals` each Phase E iteration.
    pub alpha: f64,
    /// Samples collected per Phase E iteration.
    pub ols_samples: u32,
    /// Ratio of debiased sample time to clock resolution above which Phase D
    /// (direct sampling) is used instead of Phase E (geometric search).
    pub direct_sampling_threshold: f64,
    /// Emit phase-by-phase diagnostics via the `log` crate.
    pub verbose: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            samples: 100,
            budget_seconds: 10.0,
            tau: 0.95,
            alpha: 1.1,
            ols_samples: 100,
            direct_sampling_threshold: DEFAULT_DIRECT_SAMPLING_THRESHOLD,
            verbose: false,
        }
    }
}

impl EngineConfig {
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_budget_seconds(mut self, budget_seconds: f64) -> Self {
        self.budget_seconds = budget_seconds;
        self
    }

    pub fn with_tau(mut self, tau: f64) -> Self {
        self.tau = tau;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_ols_samples(mut self, ols_samples: u32) -> Self {
        self.ols_samples = ols_samples;
        self
    }

    pub fn with_direct_sampling_threshold(mut self, direct_sampling_threshold: f64) -> Self {
        self.direct_sampling_threshold = direct_sampling_threshold;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Runs the adaptive sampling engine against `bench` under `config`,
/// returning an immutable [`Results`] (spec §6: `execute`).
pub fn execute<B: Benchmarkable>(bench: &mut B, config: EngineConfig) -> Result<Results, BenchError> {
    if config.verbose {
        maybe_init_stderr_logger();
    }

    let entry = Instant::now();
    let elapsed_secs = || entry.elapsed().as_secs_f64();

    let resolution = ClockResolution::probe()?;
    log::debug!("clock resolution estimate: {} ns", resolution.nanos);

    let mut store = SampleStore::new();

    // Phase A: first call, possibly compilation-biased.
    bench.run(&mut store, 1, 1)?;
    let biased_time = store.elapsed_time()[0];
    log::trace!("phase A: biased_time={biased_time} ns, elapsed={:.6}s", elapsed_secs());

    if elapsed_secs() > config.budget_seconds {
        return stop(false, false, false, store, elapsed_secs());
    }

    // Phase B: affordability check.
    let max_samples = remaining_sample_budget(config.budget_seconds, elapsed_secs(), biased_time);
    log::trace!("phase B: max_samples={max_samples}");
    if max_samples < 1 {
        return stop(false, false, false, store, elapsed_secs());
    }

    // Phase C: unbiased first sample.
    store.clear();
    bench.run(&mut store, 1, 1)?;
    let debiased_time = store.elapsed_time()[0];
    log::trace!("phase C: debiased_time={debiased_time} ns, elapsed={:.6}s", elapsed_secs());

    if elapsed_secs() > config.budget_seconds || config.samples == 1 {
        return stop(true, false, false, store, elapsed_secs());
    }

    // Phase D: direct sampling, if each evaluation is directly measurable.
    if debiased_time > config.direct_sampling_threshold * resolution.nanos {
        let max_samples = remaining_sample_budget(config.budget_seconds, elapsed_secs(), debiased_time);
        let extra_samples = max_samples.max(0).min(i64::from(config.samples - 1)) as u32;

        log::debug!("phase D: direct sampling, {extra_samples} additional samples");

        if extra_samples > 0 {
            bench.run(&mut store, extra_samples, 1)?;
        }

        return stop(true, true, false, store, elapsed_secs());
    }

    // Phase E: geometric search.
    log::debug!(
        "phase E: geometric search (expression faster than {}x clock resolution)",
        config.direct_sampling_threshold
    );

    let mut n_evals: f64 = 2.0;
    loop {
        let rounded_evals = n_evals.ceil().max(1.0) as u32;

        bench.run(&mut store, config.ols_samples, rounded_evals)?;

        let fit = ols::fit(store.evaluations(), store.elapsed_time());
        log::trace!(
            "phase E iteration: n_evals={rounded_evals} r2={:.4} elapsed={:.6}s",
            fit.r_squared,
            elapsed_secs()
        );

        if fit.r_squared > config.tau || elapsed_secs() > config.budget_seconds {
            break;
        }

        // P5: each iteration's ceiling must strictly exceed the previous.
        let grown = n_evals * config.alpha;
        n_evals = if (grown.ceil() as u32) <= rounded_evals { (rounded_evals + 1) as f64 } else { grown };
    }

    stop(true, true, true, store, elapsed_secs())
}

fn stop(
    precompiled: bool,
    multiple_samples: bool,
    search_performed: bool,
    samples: SampleStore,
    time_used: f64,
) -> Result<Results, BenchError> {
    Ok(Results { precompiled, multiple_samples, search_performed, samples, time_used })
}

/// `floor(remaining_ns / time_per_sample)`, saturating to `i64::MAX` when
/// `time_per_sample` is non-positive (a degenerate but possible measurement
/// for an expression faster than the timer can register as nonzero).
fn remaining_sample_budget(budget_seconds: f64, elapsed_seconds: f64, time_per_sample_nanos: f64) -> i64 {
    let remaining_ns = ((budget_seconds - elapsed_seconds).max(0.0)) * 1e9;

    if time_per_sample_nanos <= 0.0 {
        return i64::MAX;
    }

    (remaining_ns / time_per_sample_nanos).floor() as i64
}

/// Installs a bare stderr logger if the caller hasn't already set one up, so
/// that `verbose=true` produces visible output without extra setup. Never
/// overrides a logger a library consumer already installed.
fn maybe_init_stderr_logger() {
    struct StderrLogger;

    impl log::Log for StderrLogger {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Trace
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                eprintln!("[{}] {}", record.level(), record.args());
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: StderrLogger = StderrLogger;

    // `set_logger` fails if a logger is already installed; that's the
    // expected outcome when a caller wired up their own `log` backend, so
    // the error is intentionally discarded.
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(log::LevelFilter::Trace));
}
