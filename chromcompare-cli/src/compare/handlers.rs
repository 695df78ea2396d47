use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use clap::parser::ValueSource;
use log::warn;

use chromcompare_concordance::{ComparisonDataset, PeakComparison, ReferenceDataset, compare_peaks};
use chromcompare_core::models::IntervalTrack;
use chromcompare_io::{read_bedgraph, read_narrow_peaks};

use super::config::{ComparisonConfig, CompareConfig, ParametersConfig, ReferenceConfig, RegionConfig};

fn required<'a, T: Clone + Send + Sync + 'static>(matches: &'a ArgMatches, name: &str) -> Result<&'a T> {
    matches
        .get_one::<T>(name)
        .with_context(|| format!("<{}> is required", name))
}

fn config_from_args(matches: &ArgMatches) -> Result<CompareConfig> {
    let path = |name: &str| required::<String>(matches, name).map(PathBuf::from);

    Ok(CompareConfig {
        region: RegionConfig {
            chromosome: required::<String>(matches, "chromosome")?.clone(),
            start: *required::<u32>(matches, "start")?,
            end: *required::<u32>(matches, "end")?,
        },
        reference: ReferenceConfig {
            merged_peaks: path("reference-merged-peaks")?,
            unmerged_peaks: path("reference-unmerged-peaks")?,
            bias_track: path("reference-bias-track")?,
            coverage_track: path("reference-coverage-track")?,
        },
        comparison: ComparisonConfig {
            bias_track: path("comparison-bias-track")?,
            coverage_track: path("comparison-coverage-track")?,
            pvalue_track: path("comparison-pvalues")?,
        },
        parameters: ParametersConfig {
            cutoff: matches.get_one::<f64>("cutoff").copied(),
            ..ParametersConfig::default()
        },
    })
}

fn given_on_command_line(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

///
/// Command line options win over the config file.
///
fn apply_options(config: &mut CompareConfig, matches: &ArgMatches) {
    let parameters = &mut config.parameters;

    if let Some(table) = matches.get_one::<String>("cutoff-table") {
        parameters.cutoff = None;
        parameters.cutoff_table = Some(PathBuf::from(table));
        parameters.average_peak_length = matches.get_one::<u32>("average-peak-length").copied();
    }
    if given_on_command_line(matches, "significance") {
        if let Some(significance) = matches.get_one::<f64>("significance") {
            parameters.significance = *significance;
        }
    }
    if given_on_command_line(matches, "window-size") {
        if let Some(window_size) = matches.get_one::<usize>("window-size") {
            parameters.window_size = *window_size;
        }
    }
    if matches.get_flag("unmerged") {
        parameters.unmerged = true;
    }
    if matches.get_flag("read-scaled") {
        parameters.read_scaled = true;
    }
}

fn load_bedgraph(path: &Path) -> Result<IntervalTrack> {
    read_bedgraph(path).with_context(|| format!("Failed to read bedGraph file {}", path.display()))
}

fn load_peaks(path: &Path) -> Result<IntervalTrack> {
    read_narrow_peaks(path).with_context(|| format!("Failed to read peak file {}", path.display()))
}

fn load_datasets(config: &CompareConfig) -> Result<(ReferenceDataset, ComparisonDataset)> {
    let reference = ReferenceDataset {
        merged_peaks: load_peaks(&config.reference.merged_peaks)?,
        unmerged_peaks: load_peaks(&config.reference.unmerged_peaks)?,
        bias_track: load_bedgraph(&config.reference.bias_track)?,
        coverage_track: load_bedgraph(&config.reference.coverage_track)?,
    };
    let comparison = ComparisonDataset {
        bias_track: load_bedgraph(&config.comparison.bias_track)?,
        coverage_track: load_bedgraph(&config.comparison.coverage_track)?,
        pvalue_track: load_bedgraph(&config.comparison.pvalue_track)?,
    };
    Ok((reference, comparison))
}

fn report(result: &PeakComparison, parsable: bool) {
    if !result.superset_violations.is_empty() {
        warn!(
            "{} bases are peaks in the unmerged peak file but not in the merged one",
            result.superset_violations.len()
        );
    }
    if let Some(advisory) = result.concordance.advisory {
        warn!("{}", advisory);
    }

    let region = &result.region;
    if parsable {
        println!("{}", result.concordance.value);
    } else {
        println!(
            "The metric for these datasets over the range {} to {} for chromosome {} is: {}.",
            region.start, region.end, region.chr, result.concordance.value
        );
    }
}

pub fn run_compare(matches: &ArgMatches) -> Result<()> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => CompareConfig::from_file(Path::new(path))?,
        None => config_from_args(matches)?,
    };
    apply_options(&mut config, matches);

    let region = config.region()?;
    let parameters = config.parameters()?;
    let (reference, comparison) = load_datasets(&config)?;

    let result = compare_peaks(&region, &reference, &comparison, &parameters)
        .with_context(|| format!("Failed to compare peaks over {}", region))?;

    report(&result, matches.get_flag("parsable"));

    Ok(())
}
