//! Environment metadata capture (spec §6: the Environment record written
//! alongside Samples output).

use std::fmt;

/// A snapshot of the host/runtime/crate identity under which a benchmark
/// ran, written once per invocation to the Environment CSV (spec §6).
#[derive(Debug, Clone)]
pub struct Environment {
    pub os: String,
    pub arch: String,
    /// Hostname, matching the historical `machine` column (spec §6); `None`
    /// when the host name cannot be determined.
    pub machine: Option<String>,
    pub cpu_cores: u32,
    pub word_size: u32,
    pub use_blas64: bool,
    pub uuid: String,
    pub timestamp: String,
    /// Revision of the host runtime; the historical `julia_sha1` column.
    pub runtime_revision: Option<String>,
    /// Revision of the benchmarked code's own repository; the historical
    /// `package_sha1` column.
    pub crate_revision: Option<String>,
}

impl Environment {
    /// Captures the current process's environment.
    ///
    /// `uuid` and `timestamp` are supplied by the caller rather than
    /// generated here: this module has no dependency on a clock or RNG, so
    /// it stays trivially testable and keeps "when was this run" under the
    /// caller's control (spec §9: timestamps are the harness's job, not the
    /// engine's).
    pub fn capture(uuid: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            machine: std::env::var("HOSTNAME").ok().or_else(|| std::env::var("COMPUTERNAME").ok()),
            cpu_cores: std::thread::available_parallelism().map(|n| n.get() as u32).unwrap_or(1),
            word_size: (std::mem::size_of::<usize>() * 8) as u32,
            // No BLAS is linked by this crate; carried for column-schema
            // parity with the historical BenchmarkTools.jl Environment
            // record (spec §6).
            use_blas64: false,
            uuid: uuid.into(),
            timestamp: timestamp.into(),
            runtime_revision: rustc_version_string(),
            crate_revision: option_env!("BENCHKIT_CRATE_SHA1").map(str::to_string),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} cores, {}-bit) @ {}",
            self.os, self.arch, self.cpu_cores, self.word_size, self.timestamp
        )
    }
}

/// Best-effort `rustc` identification, `None` when the embedding build has
/// none available (e.g. no `build.rs` wiring `RUSTC_VERSION`).
fn rustc_version_string() -> Option<String> {
    option_env!("RUSTC_VERSION").map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_fills_every_field() {
        let env = Environment::capture("fixed-uuid", "2026-01-01T00:00:00Z");
        assert!(!env.os.is_empty());
        assert!(!env.arch.is_empty());
        assert!(env.cpu_cores >= 1);
        assert!(env.word_size == 32 || env.word_size == 64);
        assert_eq!(env.uuid, "fixed-uuid");
        assert_eq!(env.timestamp, "2026-01-01T00:00:00Z");
    }

    #[test]
    fn display_is_human_readable() {
        let env = Environment::capture("u", "t");
        let rendered = env.to_string();
        assert!(rendered.contains(&env.os));
        assert!(rendered.contains("cores"));
    }
}
