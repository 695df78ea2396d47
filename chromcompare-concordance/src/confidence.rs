//! Confidence intervals for the Poisson rate (lambda) carried by a bias
//! track, and the p-value intervals they imply for an observed coverage
//! track.

use log::debug;
use statrs::distribution::{ContinuousCDF, DiscreteCDF, Normal, Poisson};

use chromcompare_core::models::{BoundedPositionTrack, Bounds, PositionTrack, ensure_aligned};
use chromcompare_core::{ChromCompareError, Result};

use crate::consts::{DEFAULT_SIGNIFICANCE, DEFAULT_WINDOW_SIZE};

/// Lower/upper lambda per position.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaBounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

///
/// How the lambda interval around each bias value is estimated.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundMethod {
    /// `lambda ± z * sqrt(var / n)` over a centered window of neighbours.
    WindowedVariance { significance: f64, window_size: usize },
    /// `exp(ln(lambda) ± sqrt(lambda / reads))`, scaled by the observed reads.
    ReadScaled,
}

impl Default for BoundMethod {
    fn default() -> Self {
        BoundMethod::WindowedVariance {
            significance: DEFAULT_SIGNIFICANCE,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

fn z_score(significance: f64) -> Result<f64> {
    if !(significance > 0.0 && significance < 1.0) {
        return Err(ChromCompareError::InvalidParameter(format!(
            "significance must lie strictly between 0 and 1, got {}",
            significance
        )));
    }
    let normal = Normal::new(0.0, 1.0).map_err(|e| ChromCompareError::InvalidParameter(e.to_string()))?;
    Ok(normal.inverse_cdf(significance))
}

/// Sample variance (n - 1 denominator); 0 for fewer than two values.
fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
}

///
/// Windowed-variance confidence interval for every lambda.
///
/// For position `i` a window of `window_size` values centered on `i` is
/// taken (shrunk at the sequence edges). The half width is
/// `z * sqrt(variance / count)` with `z` the standard normal quantile at
/// `significance`. The lower bound never drops below the smallest lambda in
/// the whole sequence.
///
pub fn compute_lambda_bounds(lambdas: &[f64], significance: f64, window_size: usize) -> Result<LambdaBounds> {
    if window_size == 0 {
        return Err(ChromCompareError::InvalidParameter(
            "window size must be a positive integer".to_string(),
        ));
    }
    let z = z_score(significance)?;
    let n = lambdas.len();
    let floor = lambdas.iter().copied().fold(f64::INFINITY, f64::min);

    let left = window_size / 2;
    let right = window_size - left;

    let mut lower = Vec::with_capacity(n);
    let mut upper = Vec::with_capacity(n);
    for (i, &lambda) in lambdas.iter().enumerate() {
        let window = &lambdas[i.saturating_sub(left)..(i + right).min(n)];
        let standard_error = (sample_variance(window) / window.len() as f64).sqrt();
        let half_width = z * standard_error;

        lower.push((lambda - half_width).max(floor));
        upper.push(lambda + half_width);
    }

    Ok(LambdaBounds { lower, upper })
}

///
/// Read-scaled lambda interval: `exp(ln(lambda) ± sqrt(lambda / reads))`.
/// Reads go through [`correct_zero_reads`] first.
///
pub fn read_scaled_lambda_bounds(lambdas: &[f64], reads: &[f64]) -> Result<LambdaBounds> {
    if lambdas.len() != reads.len() {
        return Err(ChromCompareError::Schema(format!(
            "{} lambdas but {} read counts",
            lambdas.len(),
            reads.len()
        )));
    }
    let reads = correct_zero_reads(reads);

    let (lower, upper) = lambdas
        .iter()
        .zip(&reads)
        .map(|(&lambda, &r)| {
            let spread = (lambda / r).sqrt();
            ((lambda.ln() - spread).exp(), (lambda.ln() + spread).exp())
        })
        .unzip();

    Ok(LambdaBounds { lower, upper })
}

///
/// Lambda confidence interval of a bias track, positions carried over.
///
pub fn bias_track_bounds(bias_track: &PositionTrack, significance: f64, window_size: usize) -> Result<BoundedPositionTrack> {
    let bounds = compute_lambda_bounds(bias_track.score(), significance, window_size)?;
    bias_track.with_values(Bounds {
        lower: bounds.lower,
        upper: bounds.upper,
    })
}

///
/// Zero read counts are bumped to 1 so they never end up as a divisor.
///
pub fn correct_zero_reads(reads: &[f64]) -> Vec<f64> {
    reads
        .iter()
        .map(|&r| if r == 0.0 { r + 1.0 } else { r })
        .collect()
}

///
/// Poisson CDF `P(X <= observed)` for `X ~ Poisson(rate)`.
///
/// Fractional read counts are floored. A non-positive or non-finite rate has
/// no Poisson distribution and yields NaN.
///
pub fn poisson_cdf(observed: f64, rate: f64) -> f64 {
    if observed.is_nan() || !rate.is_finite() || rate <= 0.0 {
        return f64::NAN;
    }
    if observed < 0.0 {
        return 0.0;
    }
    match Poisson::new(rate) {
        Ok(poisson) => poisson.cdf(observed.floor() as u64),
        Err(_) => f64::NAN,
    }
}

/// [`poisson_cdf`] over two equal length sequences.
pub fn poisson_cdf_many(observed: &[f64], rates: &[f64]) -> Result<Vec<f64>> {
    if observed.len() != rates.len() {
        return Err(ChromCompareError::Schema(format!(
            "{} observations but {} rates",
            observed.len(),
            rates.len()
        )));
    }
    Ok(observed
        .iter()
        .zip(rates)
        .map(|(&k, &rate)| poisson_cdf(k, rate))
        .collect())
}

fn nan_to_zero(values: Vec<f64>) -> Vec<f64> {
    values
        .into_iter()
        .map(|v| if v.is_nan() { 0.0 } else { v })
        .collect()
}

///
/// P-value confidence interval of a coverage track given its bias track.
///
/// A larger rate gives a smaller CDF for the same read count, so the lower
/// p-value comes from the upper lambda and vice versa. NaN p-values are set
/// to 0, after which `LOWER_SCORE <= UPPER_SCORE` is enforced row by row.
///
/// # Errors
/// [`ChromCompareError::Alignment`] when bias and coverage do not share
/// positions.
///
pub fn pvalue_bounds(bias_track: &PositionTrack, coverage_track: &PositionTrack, method: BoundMethod) -> Result<BoundedPositionTrack> {
    ensure_aligned(
        bias_track,
        coverage_track,
        "bias and coverage tracks cover different bases",
    )?;

    let reads = correct_zero_reads(coverage_track.score());
    let lambda = match method {
        BoundMethod::WindowedVariance {
            significance,
            window_size,
        } => compute_lambda_bounds(bias_track.score(), significance, window_size)?,
        BoundMethod::ReadScaled => read_scaled_lambda_bounds(bias_track.score(), &reads)?,
    };

    let lower = nan_to_zero(poisson_cdf_many(&reads, &lambda.upper)?);
    let upper = nan_to_zero(poisson_cdf_many(&reads, &lambda.lower)?);
    let lower: Vec<f64> = lower.iter().zip(&upper).map(|(l, u)| l.min(*u)).collect();

    debug!("Computed p-value bounds for {} bases", lower.len());

    coverage_track.with_values(Bounds { lower, upper })
}
