//! Region extraction: cut an interval track down to a region and re-express
//! it with one row per base.

use std::ops::Range;

use log::debug;

use chromcompare_core::models::{IntervalTrack, PositionTrack, RegionOfInterest};
use chromcompare_core::{ChromCompareError, Result};

///
/// Rows holding `chromosome`. Rows of one chromosome are assumed to be
/// contiguous, so the first run found is the only one.
///
pub(crate) fn chromosome_rows(chr: &[String], chromosome: &str) -> Range<usize> {
    match chr.iter().position(|c| c == chromosome) {
        Some(first) => {
            let len = chr[first..].iter().take_while(|c| *c == chromosome).count();
            first..first + len
        }
        None => 0..0,
    }
}

///
/// Index of the interval whose `[START, END)` contains `position`.
///
fn covering_interval(track: &IntervalTrack, rows: &Range<usize>, position: u32) -> Option<usize> {
    let starts = &track.start()[rows.clone()];
    let idx = starts.partition_point(|&s| s <= position);
    if idx == 0 {
        return None;
    }
    let candidate = rows.start + idx - 1;
    (track.end()[candidate] > position).then_some(candidate)
}

///
/// Subset an interval track to the intervals spanning `region`.
///
/// The interval containing `region.start` and the one containing `region.end`
/// are located, and every interval between them (inclusive) is returned.
///
/// # Errors
/// [`ChromCompareError::RegionNotFound`] when either end of the region is not
/// covered by an interval, including when the chromosome is absent.
///
pub fn subset_to_region(track: &IntervalTrack, region: &RegionOfInterest) -> Result<IntervalTrack> {
    let rows = chromosome_rows(track.chr(), &region.chr);

    let not_found = |position: u32| ChromCompareError::RegionNotFound {
        chr: region.chr.clone(),
        position,
    };
    let first = covering_interval(track, &rows, region.start).ok_or_else(|| not_found(region.start))?;
    let last = covering_interval(track, &rows, region.end).ok_or_else(|| not_found(region.end))?;

    let slice = first..last + 1;
    debug!("Region {} spans {} intervals", region, slice.len());

    IntervalTrack::new(
        track.chr()[slice.clone()].to_vec(),
        track.start()[slice.clone()].to_vec(),
        track.end()[slice.clone()].to_vec(),
        track.score()[slice].to_vec(),
    )
}

///
/// Expand an interval track into one row per base of `region`.
///
/// Interval starts act as left-closed, right-open bin edges, with the end of
/// the last interval closing the final bin. A base therefore takes the score
/// of the last interval starting at or before it; a base sitting exactly on
/// an interval end belongs to the next interval. Bases outside every bin
/// take the minimum score found among the covered bases (0 when nothing is
/// covered).
///
pub fn expand_to_per_base(track: &IntervalTrack, region: &RegionOfInterest) -> Result<PositionTrack> {
    let rows = chromosome_rows(track.chr(), &region.chr);
    let starts = &track.start()[rows.clone()];
    let scores = &track.score()[rows.clone()];
    let last_edge = rows.clone().last().map(|i| track.end()[i]);

    let binned: Vec<Option<f64>> = region
        .bases()
        .map(|base| {
            let idx = starts.partition_point(|&s| s <= base);
            if idx == 0 {
                return None;
            }
            let bin = idx - 1;
            let in_last_bin = bin + 1 == starts.len();
            match (in_last_bin, last_edge) {
                (true, Some(edge)) if base > edge => None,
                _ => Some(scores[bin]),
            }
        })
        .collect();

    let fill = binned
        .iter()
        .flatten()
        .copied()
        .reduce(f64::min)
        .unwrap_or(0.0);

    let uncovered = binned.iter().filter(|s| s.is_none()).count();
    if uncovered > 0 {
        debug!("{} bases of {} not covered by any interval, filled with {}", uncovered, region, fill);
    }

    let score: Vec<f64> = binned.into_iter().map(|s| s.unwrap_or(fill)).collect();

    PositionTrack::new(
        vec![region.chr.clone(); score.len()],
        region.bases().collect(),
        score,
    )
}

///
/// Subset an interval track to `region` and expand it to one row per base.
///
pub fn extract_region(track: &IntervalTrack, region: &RegionOfInterest) -> Result<PositionTrack> {
    let subset = subset_to_region(track, region)?;
    expand_to_per_base(&subset, region)
}
