//! # Core models for chromcompare
//!
//! Typed, columnar containers for the genomic tracks compared by chromcompare:
//! interval tracks (bedGraph-like), per-base tracks and per-base tracks carrying
//! a lower/upper bound. Also holds the shared error type and a couple of small
//! file helpers used by the io crate.
//!
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::{ChromCompareError, Result};
