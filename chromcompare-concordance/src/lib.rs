//! Peak concordance between two peak-calling runs.
//!
//! Given a reference and a comparison dataset, this crate measures how many
//! of the reference's peak bases are reproduced in the comparison over a
//! region. The steps are:
//!
//! - Extracting interval tracks to one row per base of the region
//! - Labelling reference bases by peak type (not a peak, merged only, unmerged)
//! - Poisson p-value confidence intervals from bias and coverage tracks
//! - Classifying comparison bases as pseudopeaks
//! - Reducing pseudopeaks to a single concordance metric
//!
//! # Example
//!
//! ```no_run
//! use chromcompare_core::models::RegionOfInterest;
//! use chromcompare_concordance::{ComparisonParameters, compare_peaks};
//! # use chromcompare_concordance::{ComparisonDataset, ReferenceDataset};
//! # fn inputs() -> (ReferenceDataset, ComparisonDataset) { unimplemented!() }
//!
//! let (reference, comparison) = inputs();
//! let region = RegionOfInterest::new("chr1", 10_000, 20_000).unwrap();
//!
//! let result = compare_peaks(&region, &reference, &comparison, &ComparisonParameters::new(2.0)).unwrap();
//! println!("{}", result.concordance.value);
//! ```

pub mod confidence;
pub mod consts;
pub mod cutoff;
pub mod extract;
pub mod metric;
pub mod peaks;
pub mod pipeline;
pub mod pseudopeaks;

// re-exports
pub use confidence::{BoundMethod, LambdaBounds, bias_track_bounds, compute_lambda_bounds, poisson_cdf, pvalue_bounds};
pub use cutoff::{CutoffRow, CutoffTable};
pub use extract::{expand_to_per_base, extract_region, subset_to_region};
pub use metric::{Advisory, Concordance, calculate_metric};
pub use peaks::{PeakType, check_merged_superset, label_peak_type, peaks_to_position_track};
pub use pipeline::{ComparisonDataset, ComparisonParameters, PeakComparison, ReferenceDataset, compare_peaks};
pub use pseudopeaks::{compare_pvalue_bounds, determine_pseudopeaks};
