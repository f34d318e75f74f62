//! Persisted and rendered output formats: the pretty-printer boundary
//! (spec §2 row 7), the two CSV formats (spec §6), and JSON as a
//! supplementary automation-friendly format (SPEC_FULL §2.6).

pub mod csv;
pub mod json;
