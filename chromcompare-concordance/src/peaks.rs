//! Reference peak labelling.
//!
//! Narrow peak calls are turned into per-base 0/1 indicators, and the
//! indicators from the unmerged and merged calls are summed into a
//! [`PeakType`] code per base.

use log::debug;

use chromcompare_core::models::{IntervalTrack, PositionTrack, RegionOfInterest, Score, ensure_aligned};
use chromcompare_core::Result;

use crate::extract::{chromosome_rows, expand_to_per_base};

///
/// Per-base classification of the reference dataset.
///
/// Codes are the sum of the unmerged and merged indicators. Because merged
/// calls contain every unmerged call, a base already called before merging
/// scores 1 + 1 = 2 and a base that only became a peak through merging
/// scores 0 + 1 = 1.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeakType {
    /// Never inside a peak
    NotPeak,
    /// Inside a peak only once small peaks were merged
    MergedOnly,
    /// Inside a peak both before and after merging
    Unmerged,
}

impl PeakType {
    pub fn code(&self) -> u8 {
        match self {
            PeakType::NotPeak => 0,
            PeakType::MergedOnly => 1,
            PeakType::Unmerged => 2,
        }
    }

    pub fn from_score(score: f64) -> Option<PeakType> {
        match score {
            s if s == 0.0 => Some(PeakType::NotPeak),
            s if s == 1.0 => Some(PeakType::MergedOnly),
            s if s == 2.0 => Some(PeakType::Unmerged),
            _ => None,
        }
    }
}

///
/// Sorted, disjoint `[start, end)` spans of the peaks on one chromosome.
/// Overlapping and abutting peaks are fused.
///
fn merged_spans(peaks: &IntervalTrack, chromosome: &str) -> Vec<(u32, u32)> {
    let rows = chromosome_rows(peaks.chr(), chromosome);
    let mut spans: Vec<(u32, u32)> = rows
        .map(|i| (peaks.start()[i], peaks.end()[i]))
        .filter(|(s, e)| e > s)
        .collect();
    spans.sort_unstable();

    let mut merged: Vec<(u32, u32)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

///
/// Convert narrow peak calls into a per-base indicator over `region`:
/// 1 where a base lies inside a called peak, 0 elsewhere.
///
/// The chromosome is tiled with the peaks (scored 1) and the gaps around
/// them (scored 0) before the per-base expansion, so every base lands in
/// exactly one tile and the original peak scores play no part.
///
pub fn peaks_to_position_track(peaks: &IntervalTrack, region: &RegionOfInterest) -> Result<PositionTrack> {
    let spans = merged_spans(peaks, &region.chr);
    debug!("{} peak spans on {}", spans.len(), region.chr);

    let mut start = Vec::with_capacity(spans.len() * 2 + 1);
    let mut end = Vec::with_capacity(spans.len() * 2 + 1);
    let mut score = Vec::with_capacity(spans.len() * 2 + 1);

    let mut cursor = 0u32;
    for (peak_start, peak_end) in spans {
        if peak_start > cursor {
            start.push(cursor);
            end.push(peak_start);
            score.push(0.0);
        }
        start.push(peak_start);
        end.push(peak_end);
        score.push(1.0);
        cursor = peak_end;
    }
    start.push(cursor);
    end.push(u32::MAX);
    score.push(0.0);

    let tiles = IntervalTrack::new(vec![region.chr.clone(); start.len()], start, end, score)?;
    let expanded = expand_to_per_base(&tiles, region)?;

    let indicator = expanded
        .score()
        .iter()
        .map(|&s| if s > 0.0 { 1.0 } else { 0.0 })
        .collect();
    expanded.with_values(Score { score: indicator })
}

///
/// Label every base with its [`PeakType`] code.
///
/// The code is the sum of the two indicators. The merged call set must be a
/// superset of the unmerged one; this is not enforced here, see
/// [`check_merged_superset`].
///
/// # Errors
/// [`chromcompare_core::ChromCompareError::Alignment`] when the two tracks do
/// not share positions.
///
pub fn label_peak_type(unmerged_peaks: &PositionTrack, merged_peaks: &PositionTrack) -> Result<PositionTrack> {
    ensure_aligned(
        unmerged_peaks,
        merged_peaks,
        "merged and unmerged peaks cover different bases",
    )?;

    let score = unmerged_peaks
        .score()
        .iter()
        .zip(merged_peaks.score())
        .map(|(u, m)| u + m)
        .collect();

    unmerged_peaks.with_values(Score { score })
}

///
/// Bases where the unmerged calls have a peak but the merged calls do not.
/// A non-empty result means [`label_peak_type`] cannot tell code 1 from 2
/// reliably.
///
pub fn check_merged_superset(unmerged_peaks: &PositionTrack, merged_peaks: &PositionTrack) -> Result<Vec<u32>> {
    ensure_aligned(
        unmerged_peaks,
        merged_peaks,
        "merged and unmerged peaks cover different bases",
    )?;

    let violations: Vec<u32> = unmerged_peaks
        .base()
        .iter()
        .zip(unmerged_peaks.score().iter().zip(merged_peaks.score()))
        .filter(|(_, (u, m))| **u > 0.0 && **m <= 0.0)
        .map(|(b, _)| *b)
        .collect();

    if !violations.is_empty() {
        debug!(
            "{} bases are peaks before merging but not after",
            violations.len()
        );
    }
    Ok(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromcompare_core::ChromCompareError;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn peaks(rows: &[(u32, u32)]) -> IntervalTrack {
        IntervalTrack::new(
            vec!["chr1".to_string(); rows.len()],
            rows.iter().map(|r| r.0).collect(),
            rows.iter().map(|r| r.1).collect(),
            vec![0.0; rows.len()],
        )
        .unwrap()
    }

    fn indicator(bases: std::ops::RangeInclusive<u32>, score: &[f64]) -> PositionTrack {
        let base: Vec<u32> = bases.collect();
        PositionTrack::new(vec!["chr1".to_string(); base.len()], base, score.to_vec()).unwrap()
    }

    fn region(start: u32, end: u32) -> RegionOfInterest {
        RegionOfInterest::new("chr1", start, end).unwrap()
    }

    #[rstest]
    fn test_peaks_to_position_track() {
        let track = peaks_to_position_track(&peaks(&[(2, 4), (6, 7)]), &region(0, 8)).unwrap();
        assert_eq!(track.base(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(track.score(), &[0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[rstest]
    fn test_overlapping_peaks_are_fused() {
        let track = peaks_to_position_track(&peaks(&[(2, 5), (3, 4), (5, 6)]), &region(1, 6)).unwrap();
        assert_eq!(track.score(), &[0.0, 1.0, 1.0, 1.0, 1.0, 0.0]);
    }

    #[rstest]
    fn test_region_inside_one_peak() {
        let track = peaks_to_position_track(&peaks(&[(0, 100)]), &region(10, 12)).unwrap();
        assert_eq!(track.score(), &[1.0, 1.0, 1.0]);
    }

    #[rstest]
    fn test_no_peaks_on_chromosome() {
        let other = IntervalTrack::new(vec!["chr2".into()], vec![0], vec![10], vec![0.0]).unwrap();
        let track = peaks_to_position_track(&other, &region(0, 3)).unwrap();
        assert_eq!(track.score(), &[0.0; 4]);
    }

    #[rstest]
    fn test_label_peak_type() {
        let unmerged = indicator(0..=4, &[0.0, 1.0, 0.0, 1.0, 0.0]);
        let merged = indicator(0..=4, &[0.0, 1.0, 1.0, 1.0, 0.0]);

        let labels = label_peak_type(&unmerged, &merged).unwrap();
        assert_eq!(labels.score(), &[0.0, 2.0, 1.0, 2.0, 0.0]);
        assert_eq!(labels.base(), unmerged.base());
    }

    #[rstest]
    fn test_label_peak_type_rejects_misaligned_tracks() {
        let unmerged = indicator(0..=4, &[0.0; 5]);
        let merged = indicator(1..=5, &[0.0; 5]);
        assert!(matches!(
            label_peak_type(&unmerged, &merged),
            Err(ChromCompareError::Alignment(_))
        ));
    }

    #[rstest]
    fn test_check_merged_superset() {
        let unmerged = indicator(0..=3, &[1.0, 1.0, 0.0, 0.0]);
        let merged = indicator(0..=3, &[1.0, 0.0, 1.0, 0.0]);
        assert_eq!(check_merged_superset(&unmerged, &merged).unwrap(), vec![1]);
        assert!(check_merged_superset(&merged, &merged).unwrap().is_empty());
    }

    #[rstest]
    #[case(0.0, Some(PeakType::NotPeak))]
    #[case(1.0, Some(PeakType::MergedOnly))]
    #[case(2.0, Some(PeakType::Unmerged))]
    #[case(3.0, None)]
    fn test_peak_type_from_score(#[case] score: f64, #[case] expected: Option<PeakType>) {
        assert_eq!(PeakType::from_score(score), expected);
        if let Some(peak_type) = expected {
            assert_eq!(peak_type.code() as f64, score);
        }
    }
}
