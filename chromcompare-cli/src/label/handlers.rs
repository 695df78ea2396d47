use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::warn;

use chromcompare_concordance::{check_merged_superset, label_peak_type, peaks_to_position_track};
use chromcompare_core::models::RegionOfInterest;
use chromcompare_io::read_narrow_peaks;

use crate::output::emit_track;

pub fn run_label(matches: &ArgMatches) -> Result<()> {
    let merged_path = matches
        .get_one::<String>("merged-peaks")
        .context("A merged peak file is required.")?;
    let unmerged_path = matches
        .get_one::<String>("unmerged-peaks")
        .context("An unmerged peak file is required.")?;
    let region: RegionOfInterest = matches
        .get_one::<String>("region")
        .context("A region is required.")?
        .parse()?;

    let merged = read_narrow_peaks(Path::new(merged_path))
        .with_context(|| format!("Failed to read peak file {}", merged_path))?;
    let unmerged = read_narrow_peaks(Path::new(unmerged_path))
        .with_context(|| format!("Failed to read peak file {}", unmerged_path))?;

    let merged = peaks_to_position_track(&merged, &region)?;
    let unmerged = peaks_to_position_track(&unmerged, &region)?;

    let violations = check_merged_superset(&unmerged, &merged)?;
    if !violations.is_empty() {
        warn!(
            "{} bases are peaks in {} but not in {}",
            violations.len(),
            unmerged_path,
            merged_path
        );
    }

    let labels = label_peak_type(&unmerged, &merged)?;
    emit_track(&labels, matches.get_one::<String>("output"))
}
