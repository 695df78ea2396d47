use std::fmt::{self, Display};

use log::debug;

use chromcompare_core::models::{PositionTrack, ensure_aligned};
use chromcompare_core::{ChromCompareError, Result};

///
/// Non-fatal conditions noticed while computing the metric.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// More pseudopeaks than reference peaks: the metric is above 1.
    ComparisonExceedsReference,
}

impl Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::ComparisonExceedsReference => write!(
                f,
                "Peaks in comparison dataset outnumber those in the reference dataset. \
                 For a better result, consider switching the order of the datasets."
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Concordance {
    /// pseudopeaks / reference_peaks
    pub value: f64,
    pub reference_peaks: usize,
    pub pseudopeaks: usize,
    pub advisory: Option<Advisory>,
}

///
/// Ratio of pseudopeak bases to qualifying reference peak bases.
///
/// Reference bases qualify when their label is above 1 with
/// `include_merged_peaks`, or exactly 1 without it.
///
/// # Errors
/// - [`ChromCompareError::Alignment`] when the tracks do not share positions.
/// - [`ChromCompareError::DivisionUndefined`] when no reference base qualifies.
///
pub fn calculate_metric(reference_labels: &PositionTrack, pseudopeaks: &PositionTrack, include_merged_peaks: bool) -> Result<Concordance> {
    ensure_aligned(
        reference_labels,
        pseudopeaks,
        "reference peaks must be over the same region as pseudopeaks",
    )?;

    let reference_peaks = reference_labels
        .score()
        .iter()
        .filter(|&&label| if include_merged_peaks { label > 1.0 } else { label == 1.0 })
        .count();

    if reference_peaks == 0 {
        return Err(ChromCompareError::DivisionUndefined(
            "the reference dataset has no qualifying peaks in this region".to_string(),
        ));
    }

    let pseudopeak_count = pseudopeaks.score().iter().filter(|&&p| p == 1.0).count();
    let value = pseudopeak_count as f64 / reference_peaks as f64;
    debug!("{} pseudopeaks over {} reference peak bases", pseudopeak_count, reference_peaks);

    Ok(Concordance {
        value,
        reference_peaks,
        pseudopeaks: pseudopeak_count,
        advisory: (value > 1.0).then_some(Advisory::ComparisonExceedsReference),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn track(score: &[f64]) -> PositionTrack {
        let n = score.len();
        PositionTrack::new(vec!["chr1".to_string(); n], (0..n as u32).collect(), score.to_vec()).unwrap()
    }

    #[fixture]
    fn labels() -> PositionTrack {
        track(&[0.0, 2.0, 2.0, 1.0, 2.0, 0.0])
    }

    #[rstest]
    fn test_every_qualifying_base_marked(labels: PositionTrack) {
        let pseudopeaks = track(&[0.0, 1.0, 1.0, 0.0, 1.0, 0.0]);
        let concordance = calculate_metric(&labels, &pseudopeaks, true).unwrap();
        assert_eq!(concordance.value, 1.0);
        assert_eq!(concordance.advisory, None);
    }

    #[rstest]
    fn test_no_base_marked(labels: PositionTrack) {
        let concordance = calculate_metric(&labels, &track(&[0.0; 6]), true).unwrap();
        assert_eq!(concordance.value, 0.0);
    }

    #[rstest]
    fn test_unmerged_counts_code_one(labels: PositionTrack) {
        let pseudopeaks = track(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        let concordance = calculate_metric(&labels, &pseudopeaks, false).unwrap();
        assert_eq!(concordance.reference_peaks, 1);
        assert_eq!(concordance.value, 1.0);
    }

    #[rstest]
    fn test_partial_concordance(labels: PositionTrack) {
        let pseudopeaks = track(&[0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        let concordance = calculate_metric(&labels, &pseudopeaks, true).unwrap();
        assert!((concordance.value - 1.0 / 3.0).abs() < 1e-12);
    }

    #[rstest]
    fn test_metric_above_one_is_advisory(labels: PositionTrack) {
        let pseudopeaks = track(&[0.0, 1.0, 1.0, 1.0, 1.0, 0.0]);
        let concordance = calculate_metric(&labels, &pseudopeaks, false).unwrap();
        assert_eq!(concordance.value, 4.0);
        assert_eq!(concordance.advisory, Some(Advisory::ComparisonExceedsReference));
    }

    #[rstest]
    fn test_no_reference_peaks_is_undefined() {
        let labels = track(&[0.0, 1.0, 0.0]);
        let result = calculate_metric(&labels, &track(&[0.0, 1.0, 0.0]), true);
        assert!(matches!(result, Err(ChromCompareError::DivisionUndefined(_))));
    }

    #[rstest]
    fn test_requires_alignment(labels: PositionTrack) {
        let result = calculate_metric(&labels, &track(&[0.0; 5]), true);
        assert!(matches!(result, Err(ChromCompareError::Alignment(_))));
    }
}
