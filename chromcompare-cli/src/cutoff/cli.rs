use clap::{Arg, Command};

pub const CUTOFF_CMD: &str = "cutoff";

pub fn create_cutoff_cli() -> Command {
    Command::new(CUTOFF_CMD)
        .about("Look up the peak calling cutoff for an average peak length in a cutoff analysis table.")
        .arg(
            Arg::new("table")
                .required(true)
                .help("Tab separated cutoff table with avelpeak and score columns"),
        )
        .arg(
            Arg::new("average-peak-length")
                .required(true)
                .value_parser(clap::value_parser!(u32))
                .help("Average peak length to find the cutoff for"),
        )
}
