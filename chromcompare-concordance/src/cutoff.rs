use chromcompare_core::{ChromCompareError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoffRow {
    pub average_peak_length: f64,
    pub score: f64,
}

///
/// Peak calling cutoffs keyed by average peak length, in file order.
///
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CutoffTable {
    pub rows: Vec<CutoffRow>,
}

impl CutoffTable {
    pub fn new(rows: Vec<CutoffRow>) -> Self {
        CutoffTable { rows }
    }

    ///
    /// Score of the first row whose average peak length reaches
    /// `average_peak_length`.
    ///
    pub fn select_cutoff(&self, average_peak_length: u32) -> Result<f64> {
        self.rows
            .iter()
            .find(|row| row.average_peak_length >= f64::from(average_peak_length))
            .map(|row| row.score)
            .ok_or(ChromCompareError::CutoffNotFound(average_peak_length))
    }
}
