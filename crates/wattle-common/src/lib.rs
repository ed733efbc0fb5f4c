//! Shared infrastructure for the wattle CSS crates.
//!
//! - **Warnings** - deduplicated, coloured diagnostics on stderr for dropped
//!   declarations and unsupported syntax

pub mod warning;

pub use warning::{clear_warnings, warn_once, warning_count};
