use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::{ChromCompareError, Result};

///
/// The region every track gets extracted to. Both ends are inclusive: a
/// region covers `end - start + 1` bases.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct RegionOfInterest {
    pub chr: String,
    pub start: u32,
    pub end: u32,
}

impl RegionOfInterest {
    pub fn new(chr: impl Into<String>, start: u32, end: u32) -> Result<Self> {
        let chr = chr.into();
        if end < start {
            return Err(ChromCompareError::InvalidRegion { chr, start, end });
        }
        Ok(RegionOfInterest { chr, start, end })
    }

    ///
    /// Number of bases covered by the region
    ///
    pub fn n_bases(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    ///
    /// Iterate over every base of the region, in order
    ///
    pub fn bases(&self) -> impl Iterator<Item = u32> + '_ {
        self.start..=self.end
    }
}

impl Display for RegionOfInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chr, self.start, self.end)
    }
}

impl FromStr for RegionOfInterest {
    type Err = ChromCompareError;

    /// Parse a region written as `chr:start-end`.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || ChromCompareError::Schema(format!("Region must look like chr:start-end, got '{}'", s));

        let (chr, range) = s.rsplit_once(':').ok_or_else(malformed)?;
        let (start, end) = range.split_once('-').ok_or_else(malformed)?;
        let start = start.trim().replace(',', "").parse::<u32>().map_err(|_| malformed())?;
        let end = end.trim().replace(',', "").parse::<u32>().map_err(|_| malformed())?;

        RegionOfInterest::new(chr, start, end)
    }
}
