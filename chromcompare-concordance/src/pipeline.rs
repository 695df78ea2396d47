//! The whole comparison, from raw interval tracks to the concordance metric.

use log::info;

use chromcompare_core::models::{BoundedPositionTrack, IntervalTrack, PositionTrack, RegionOfInterest};
use chromcompare_core::Result;

use crate::confidence::{BoundMethod, pvalue_bounds};
use crate::consts::{DEFAULT_INCLUDE_MERGED_PEAKS, DEFAULT_SIGNIFICANCE, DEFAULT_WINDOW_SIZE};
use crate::extract::extract_region;
use crate::metric::{Concordance, calculate_metric};
use crate::peaks::{check_merged_superset, label_peak_type, peaks_to_position_track};
use crate::pseudopeaks::{compare_pvalue_bounds, determine_pseudopeaks};

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonParameters {
    pub significance: f64,
    pub window_size: usize,
    /// Cutoff used when the reference peaks were called
    pub cutoff: f64,
    /// Count peaks that only exist after merging in the metric denominator
    pub include_merged_peaks: bool,
    /// Use the read-scaled lambda interval instead of the windowed variance
    pub read_scaled_bounds: bool,
}

impl ComparisonParameters {
    pub fn new(cutoff: f64) -> Self {
        ComparisonParameters {
            significance: DEFAULT_SIGNIFICANCE,
            window_size: DEFAULT_WINDOW_SIZE,
            cutoff,
            include_merged_peaks: DEFAULT_INCLUDE_MERGED_PEAKS,
            read_scaled_bounds: false,
        }
    }

    pub fn bound_method(&self) -> BoundMethod {
        if self.read_scaled_bounds {
            BoundMethod::ReadScaled
        } else {
            BoundMethod::WindowedVariance {
                significance: self.significance,
                window_size: self.window_size,
            }
        }
    }
}

/// Inputs from the dataset whose peaks are being reproduced.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    pub merged_peaks: IntervalTrack,
    pub unmerged_peaks: IntervalTrack,
    pub bias_track: IntervalTrack,
    pub coverage_track: IntervalTrack,
}

/// Inputs from the dataset checked against the reference.
#[derive(Debug, Clone)]
pub struct ComparisonDataset {
    pub bias_track: IntervalTrack,
    pub coverage_track: IntervalTrack,
    pub pvalue_track: IntervalTrack,
}

///
/// Every intermediate track of a comparison, plus the final metric.
///
#[derive(Debug, Clone)]
pub struct PeakComparison {
    pub region: RegionOfInterest,
    pub reference_labels: PositionTrack,
    pub reference_pvalue_bounds: BoundedPositionTrack,
    pub comparison_pvalue_bounds: BoundedPositionTrack,
    pub compared_bounds: PositionTrack,
    pub pseudopeaks: PositionTrack,
    pub concordance: Concordance,
    /// Bases called before merging but missing after; should be empty
    pub superset_violations: Vec<u32>,
}

///
/// Run the comparison of `comparison` against `reference` over `region`.
///
pub fn compare_peaks(
    region: &RegionOfInterest,
    reference: &ReferenceDataset,
    comparison: &ComparisonDataset,
    parameters: &ComparisonParameters,
) -> Result<PeakComparison> {
    info!("Comparing peaks over {} ({} bases)", region, region.n_bases());

    let merged = peaks_to_position_track(&reference.merged_peaks, region)?;
    let unmerged = peaks_to_position_track(&reference.unmerged_peaks, region)?;
    let superset_violations = check_merged_superset(&unmerged, &merged)?;
    let reference_labels = label_peak_type(&unmerged, &merged)?;

    let reference_bias = extract_region(&reference.bias_track, region)?;
    let reference_coverage = extract_region(&reference.coverage_track, region)?;
    let comparison_bias = extract_region(&comparison.bias_track, region)?;
    let comparison_coverage = extract_region(&comparison.coverage_track, region)?;
    let comparison_pvalues = extract_region(&comparison.pvalue_track, region)?;

    let method = parameters.bound_method();
    let reference_pvalue_bounds = pvalue_bounds(&reference_bias, &reference_coverage, method)?;
    let comparison_pvalue_bounds = pvalue_bounds(&comparison_bias, &comparison_coverage, method)?;
    let compared_bounds = compare_pvalue_bounds(&reference_pvalue_bounds, &comparison_pvalue_bounds)?;

    let pseudopeaks = determine_pseudopeaks(
        &comparison_pvalues,
        &compared_bounds,
        &reference_labels,
        parameters.cutoff,
    )?;
    let concordance = calculate_metric(&reference_labels, &pseudopeaks, parameters.include_merged_peaks)?;

    info!(
        "{} of {} reference peak bases reproduced",
        concordance.pseudopeaks, concordance.reference_peaks
    );

    Ok(PeakComparison {
        region: region.clone(),
        reference_labels,
        reference_pvalue_bounds,
        comparison_pvalue_bounds,
        compared_bounds,
        pseudopeaks,
        concordance,
        superset_violations,
    })
}
