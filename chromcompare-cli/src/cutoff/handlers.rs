use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use chromcompare_io::read_cutoff_table;

pub fn run_cutoff(matches: &ArgMatches) -> Result<()> {
    let table_path = matches
        .get_one::<String>("table")
        .context("A path to a cutoff table is required.")?;
    let average_peak_length = *matches
        .get_one::<u32>("average-peak-length")
        .context("An average peak length is required.")?;

    let cutoff = read_cutoff_table(Path::new(table_path))
        .with_context(|| format!("Failed to read cutoff table {}", table_path))?
        .select_cutoff(average_peak_length)?;

    println!("{}", cutoff);
    Ok(())
}
