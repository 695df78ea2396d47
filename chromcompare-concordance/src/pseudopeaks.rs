//! Deciding which comparison bases reproduce a reference peak.

use chromcompare_core::models::{BoundedPositionTrack, PositionTrack, Score, ensure_aligned};
use chromcompare_core::Result;

use crate::peaks::PeakType;

fn indicator(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

///
/// Flag bases (1) where the comparison's upper p-value bound is above the
/// reference's lower bound, i.e. the two intervals overlap or the comparison
/// is better than the reference's weakest case.
///
pub fn compare_pvalue_bounds(reference_bounds: &BoundedPositionTrack, comparison_bounds: &BoundedPositionTrack) -> Result<PositionTrack> {
    ensure_aligned(
        reference_bounds,
        comparison_bounds,
        "reference and comparison p-value bounds cover different bases",
    )?;

    let score = comparison_bounds
        .upper()
        .iter()
        .zip(reference_bounds.lower())
        .map(|(best, worst)| indicator(best > worst))
        .collect();

    reference_bounds.with_values(Score { score })
}

///
/// Flag pseudopeaks (1): bases of the comparison dataset that reproduce a
/// reference peak.
///
/// - [`PeakType::Unmerged`] bases (code 2) pass when their p-value bounds
///   overlap (`compared_bounds` is 1).
/// - [`PeakType::MergedOnly`] bases (code 1) pass when the comparison p-value
///   is above `cutoff`.
///
/// # Errors
/// [`chromcompare_core::ChromCompareError::Alignment`] unless all three
/// tracks share positions.
///
pub fn determine_pseudopeaks(
    comparison_pvalues: &PositionTrack,
    compared_bounds: &PositionTrack,
    reference_labels: &PositionTrack,
    cutoff: f64,
) -> Result<PositionTrack> {
    ensure_aligned(
        comparison_pvalues,
        compared_bounds,
        "comparison p-values and compared bounds cover different bases",
    )?;
    ensure_aligned(
        comparison_pvalues,
        reference_labels,
        "comparison p-values and reference labels cover different bases",
    )?;
    ensure_aligned(
        compared_bounds,
        reference_labels,
        "compared bounds and reference labels cover different bases",
    )?;

    let score = comparison_pvalues
        .score()
        .iter()
        .zip(compared_bounds.score())
        .zip(reference_labels.score())
        .map(|((&pvalue, &bounds_overlap), &label)| {
            let is_pseudopeak = match PeakType::from_score(label) {
                Some(PeakType::Unmerged) => bounds_overlap == 1.0,
                Some(PeakType::MergedOnly) => pvalue > cutoff,
                _ => false,
            };
            indicator(is_pseudopeak)
        })
        .collect();

    comparison_pvalues.with_values(Score { score })
}
