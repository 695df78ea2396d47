use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::error;

use crate::compare::config::check_config_file;

pub fn run_check_config(matches: &ArgMatches) -> Result<()> {
    let config_path = matches
        .get_one::<String>("config")
        .context("A path to a config file is required.")?;

    let problems = check_config_file(Path::new(config_path))?;
    if problems.is_empty() {
        println!("{} is valid", config_path);
        return Ok(());
    }

    for problem in &problems {
        error!("{}", problem);
    }
    anyhow::bail!("{} problem(s) found in {}", problems.len(), config_path)
}
