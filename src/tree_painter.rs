//! The pretty-printer boundary (spec §2 row 7, Component 7): renders a
//! [`Summary`] to a text stream.
//!
//! Grounded in `divan::tree_painter::TreePainter`'s column-padding
//! approach (measure every cell, pad to the widest, write once), but
//! degenerate for a single benchmarkable: there is no name tree to walk
//! (spec §1 places multi-benchmark registries out of scope), so this
//! prints one aligned row of statistics instead of a box-drawn tree.

use std::io::{self, Write};

use crate::results::{Bound, Results, Summary};

/// Renders a [`Summary`] as a single aligned `name  time  gc%  bytes
/// allocs` row, in the style of `divan`'s per-leaf statistics line.
pub struct Printer<W> {
    writer: W,
}

impl<W: Write> Printer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes the column header row.
    pub fn print_header(&mut self) -> io::Result<()> {
        writeln!(
            self.writer,
            "{:<10}  {:>18}  {:>10}  {:>12}  {:>12}  {:>8}",
            "name", "time/eval", "gc%", "bytes/eval", "allocs/eval", "r²"
        )
    }

    /// Writes one row for `name`'s [`Summary`].
    pub fn print_summary(&mut self, name: &str, summary: &Summary) -> io::Result<()> {
        writeln!(
            self.writer,
            "{:<10}  {:>18}  {:>10}  {:>12}  {:>12}  {:>8}",
            name,
            format_time(summary.time_center, summary.time_bounds),
            format_percent(summary.gc_percent_center, summary.gc_percent_bounds),
            summary.bytes_per_eval,
            summary.allocations_per_eval,
            summary.r_squared.map(|r2| format!("{r2:.4}")).unwrap_or_else(|| "-".to_owned()),
        )
    }

    /// Writes a one-line summary of the flags a [`Results`] recorded, ahead
    /// of its `Summary` row; useful for `verbose` / diagnostic output.
    pub fn print_flags(&mut self, results: &Results) -> io::Result<()> {
        writeln!(
            self.writer,
            "precompiled={} multiple_samples={} search_performed={} samples={} time_used={:.3}s",
            results.precompiled,
            results.multiple_samples,
            results.search_performed,
            results.samples.len(),
            results.time_used,
        )
    }
}

/// Formats a nanosecond duration at a human-scaled unit, the way
/// `divan`'s `FineDuration` formats picoseconds: pick the largest unit
/// that keeps the value readable, and append a 6-sigma bound when present
/// (spec §4.6).
fn format_time(center_ns: f64, bounds: Bound) -> String {
    let center = format_duration_ns(center_ns);
    match bounds {
        Some((lower, upper)) => {
            format!("{center} [{}, {}]", format_duration_ns(lower), format_duration_ns(upper))
        }
        None => center,
    }
}

fn format_duration_ns(ns: f64) -> String {
    if ns < 1_000.0 {
        format!("{ns:.2} ns")
    } else if ns < 1_000_000.0 {
        format!("{:.2} \u{b5}s", ns / 1_000.0)
    } else if ns < 1_000_000_000.0 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else {
        format!("{:.2} s", ns / 1_000_000_000.0)
    }
}

fn format_percent(center: f64, bounds: Bound) -> String {
    match bounds {
        Some((lower, upper)) => format!("{center:.2}% [{lower:.2}, {upper:.2}]"),
        None => format!("{center:.2}%"),
    }
}
