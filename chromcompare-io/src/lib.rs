//! # Input/Output for chromcompare tracks.
//!
//! Readers for the plain-text formats a peak comparison starts from
//! (bedGraph signal tracks, narrowPeak/BED3+ peak calls, per-base bedbase
//! tracks and peak-calling cutoff tables), and a writer that dumps any track
//! back to disk as tab-separated text. Files ending in `.gz` are decompressed
//! and compressed transparently.
//!
pub mod consts;
pub mod error;
pub mod read;
pub mod write;

// re-expose core functions
pub use consts::*;
pub use error::*;
pub use read::*;
pub use write::*;
