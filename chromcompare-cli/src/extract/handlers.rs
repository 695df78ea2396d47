use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use chromcompare_concordance::extract_region;
use chromcompare_core::models::RegionOfInterest;
use chromcompare_io::read_bedgraph;

use crate::output::emit_track;

pub fn run_extract(matches: &ArgMatches) -> Result<()> {
    let track_path = matches
        .get_one::<String>("track")
        .context("A path to a bedGraph track is required.")?;
    let region: RegionOfInterest = matches
        .get_one::<String>("region")
        .context("A region is required.")?
        .parse()?;

    let track = read_bedgraph(Path::new(track_path))
        .with_context(|| format!("Failed to read bedGraph file {}", track_path))?;
    let per_base = extract_region(&track, &region)
        .with_context(|| format!("Failed to extract {} from {}", region, track_path))?;

    info!("Extracted {} bases from {}", per_base.len(), track_path);
    emit_track(&per_base, matches.get_one::<String>("output"))
}
