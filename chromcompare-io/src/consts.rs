pub const BEDGRAPH_COLUMNS: usize = 4;
pub const BEDBASE_COLUMNS: usize = 3;
pub const MIN_PEAK_COLUMNS: usize = 3;

pub const HEADER_PREFIXES: [&str; 3] = ["browser", "track", "#"];
pub const FIELD_DELIMITER: char = '\t';
