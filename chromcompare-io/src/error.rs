use std::io;
use std::path::PathBuf;

use thiserror::Error;

use chromcompare_core::ChromCompareError;

/// Error type for chromcompare-io operations.
#[derive(Error, Debug)]
pub enum TrackIoError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A line had the wrong number of tab-separated fields.
    #[error("{}:{line}: expected {expected} columns, found {found}", .path.display())]
    ColumnCount {
        path: PathBuf,
        line: usize,
        expected: String,
        found: usize,
    },

    /// A field could not be parsed into the type its column requires.
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A required header column is missing.
    #[error("{}: missing column '{column}' in header", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// The file holds no data rows.
    #[error("Corrupted file. 0 rows found in the file: {}", .path.display())]
    Empty { path: PathBuf },

    /// The parsed rows could not be turned into a track.
    #[error("{}: {source}", .path.display())]
    Track {
        path: PathBuf,
        #[source]
        source: ChromCompareError,
    },

    /// Failure reported by the core crate outside of track construction.
    #[error(transparent)]
    Core(#[from] ChromCompareError),
}

/// Result type alias for chromcompare-io operations.
pub type Result<T> = std::result::Result<T, TrackIoError>;
