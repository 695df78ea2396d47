pub const DEFAULT_SIGNIFICANCE: f64 = 0.95;
pub const DEFAULT_WINDOW_SIZE: usize = 50;
pub const DEFAULT_INCLUDE_MERGED_PEAKS: bool = true;

// column headers of a cutoff table
pub const CUTOFF_TABLE_LENGTH_COLUMN: &str = "avelpeak";
pub const CUTOFF_TABLE_SCORE_COLUMN: &str = "score";
