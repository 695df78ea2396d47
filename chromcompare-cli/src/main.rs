mod check_config;
mod compare;
mod cutoff;
mod extract;
mod label;
mod output;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "chromcompare";
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Compare chromatin accessibility peak calls between a reference and a comparison dataset.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
                .help("Log debug messages"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Only log warnings and errors"),
        )
        .subcommand(compare::cli::create_compare_cli())
        .subcommand(extract::cli::create_extract_cli())
        .subcommand(label::cli::create_label_cli())
        .subcommand(cutoff::cli::create_cutoff_cli())
        .subcommand(check_config::cli::create_check_config_cli())
}

fn init_logging(matches: &ArgMatches) {
    let level = if matches.get_flag("verbose") {
        "debug"
    } else if matches.get_flag("quiet") {
        "warn"
    } else {
        consts::DEFAULT_LOG_LEVEL
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(&matches);

    match matches.subcommand() {
        //
        // PEAK COMPARISON
        //
        Some((compare::cli::COMPARE_CMD, matches)) => {
            compare::handlers::run_compare(matches)?;
        }

        //
        // PER-BASE EXTRACTION
        //
        Some((extract::cli::EXTRACT_CMD, matches)) => {
            extract::handlers::run_extract(matches)?;
        }

        //
        // PEAK TYPE LABELS
        //
        Some((label::cli::LABEL_CMD, matches)) => {
            label::handlers::run_label(matches)?;
        }

        //
        // CUTOFF LOOKUP
        //
        Some((cutoff::cli::CUTOFF_CMD, matches)) => {
            cutoff::handlers::run_cutoff(matches)?;
        }

        //
        // CONFIG VALIDATION
        //
        Some((check_config::cli::CHECK_CONFIG_CMD, matches)) => {
            check_config::handlers::run_check_config(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
