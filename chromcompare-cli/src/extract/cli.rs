use clap::{Arg, Command};

pub const EXTRACT_CMD: &str = "extract";

pub fn create_extract_cli() -> Command {
    Command::new(EXTRACT_CMD)
        .about("Expand a bedGraph track to one row per base over a region.")
        .arg(
            Arg::new("track")
                .required(true)
                .help("Path to bedGraph/bedGraph.gz track"),
        )
        .arg(
            Arg::new("region")
                .required(true)
                .help("Region to extract, as chr:start-end with both ends inclusive"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .required(false)
                .help("Output path for the per-base track; .gz outputs are compressed (default: stdout)"),
        )
}
