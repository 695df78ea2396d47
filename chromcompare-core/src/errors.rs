use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChromCompareError {
    /// Two tracks that must share `(CHR, BASE)` or `(CHR, START, END)` rows do not.
    #[error("Tracks are not aligned: {0}")]
    Alignment(String),

    #[error("Malformed track: {0}")]
    Schema(String),

    #[error("No interval on {chr} covers position {position}")]
    RegionNotFound { chr: String, position: u32 },

    #[error("Concordance metric is undefined: {0}")]
    DivisionUndefined(String),

    #[error("Invalid region {chr}:{start}-{end}, end must not be before start")]
    InvalidRegion { chr: String, start: u32, end: u32 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No cutoff found for an average peak length of {0}")]
    CutoffNotFound(u32),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChromCompareError>;
