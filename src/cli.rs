//! CLI surface for the engine's configuration knobs (SPEC_FULL §2.4),
//! grounded in `divan`'s `clap`-derived `src/cli.rs` but reduced to the
//! handful of flags `EngineConfig` exposes (no filters, no thread counts,
//! no counters: spec §1 Non-goals).

use clap::Parser;

use crate::engine::EngineConfig;

/// Process-level flags mirroring [`EngineConfig`]'s fields, for a binary
/// that wants `--samples`, `--budget-seconds`, etc. as ordinary `clap`
/// arguments.
#[derive(Debug, Parser)]
#[command(name = "benchkit", about = "Adaptive micro-benchmarking harness")]
pub struct CliArgs {
    /// Target number of retained samples.
    #[arg(long, default_value_t = EngineConfig::default().samples)]
    pub samples: u32,

    /// Wall-clock time budget, in seconds.
    #[arg(long, default_value_t = EngineConfig::default().budget_seconds)]
    pub budget_seconds: f64,

    /// r² threshold at which Phase E's geometric search is judged converged.
    #[arg(long, default_value_t = EngineConfig::default().tau)]
    pub tau: f64,

    /// Growth factor applied to `n_evals` each Phase E iteration.
    #[arg(long, default_value_t = EngineConfig::default().alpha)]
    pub alpha: f64,

    /// Samples collected per Phase E iteration.
    #[arg(long, default_value_t = EngineConfig::default().ols_samples)]
    pub ols_samples: u32,

    /// Ratio of debiased sample time to clock resolution above which direct
    /// sampling (Phase D) is used instead of geometric search (Phase E).
    #[arg(long, default_value_t = EngineConfig::default().direct_sampling_threshold)]
    pub direct_sampling_threshold: f64,

    /// Emit phase-by-phase engine diagnostics via the `log` crate.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

impl CliArgs {
    /// Parses `std::env::args`.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Converts parsed flags into an [`EngineConfig`].
    pub fn into_config(self) -> EngineConfig {
        EngineConfig::default()
            .with_samples(self.samples)
            .with_budget_seconds(self.budget_seconds)
            .with_tau(self.tau)
            .with_alpha(self.alpha)
            .with_ols_samples(self.ols_samples)
            .with_direct_sampling_threshold(self.direct_sampling_threshold)
            .with_verbose(self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_config() {
        let args = CliArgs::parse_from(["benchkit"]);
        let config = args.into_config();
        let default = EngineConfig::default();
        assert_eq!(config.samples, default.samples);
        assert_eq!(config.budget_seconds, default.budget_seconds);
        assert_eq!(config.tau, default.tau);
        assert_eq!(config.alpha, default.alpha);
        assert_eq!(config.ols_samples, default.ols_samples);
        assert_eq!(config.direct_sampling_threshold, default.direct_sampling_threshold);
        assert!(!config.verbose);
    }

    #[test]
    fn flags_override_defaults() {
        let args = CliArgs::parse_from(["benchkit", "--samples", "10", "--budget-seconds", "2.5", "--verbose"]);
        let config = args.into_config();
        assert_eq!(config.samples, 10);
        assert_eq!(config.budget_seconds, 2.5);
        assert!(config.verbose);
    }
}
