use clap::{Arg, ArgAction, Command};

pub const COMPARE_CMD: &str = "compare";

/// Positional inputs, in the order they are given on the command line.
pub const POSITIONAL_ARGS: [(&str, &str); 11] = [
    ("chromosome", "The chromosome of the region you wish to inspect"),
    ("start", "The base pair position at the start of the region"),
    ("end", "The base pair position at the end of the region (inclusive)"),
    ("reference-merged-peaks", "narrowPeak file of the reference dataset where peaks are merged"),
    ("reference-unmerged-peaks", "narrowPeak file of the reference dataset where peaks are not merged"),
    ("reference-bias-track", "Bias track (bedGraph) of the reference dataset"),
    ("reference-coverage-track", "Coverage track (pileup bedGraph) of the reference dataset"),
    ("comparison-bias-track", "Bias track (bedGraph) of the comparison dataset"),
    ("comparison-coverage-track", "Coverage track (pileup bedGraph) of the comparison dataset"),
    ("comparison-pvalues", "p-value track (bedGraph) of the comparison dataset"),
    ("cutoff", "The cutoff used to call peaks in the reference dataset"),
];

pub fn create_compare_cli() -> Command {
    let mut command = Command::new(COMPARE_CMD)
        .about("Measure how well the peaks of a reference dataset are reproduced by a comparison dataset over a region.")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .conflicts_with("chromosome")
                .help("TOML file describing the region, inputs and parameters, instead of positional arguments"),
        );

    for (index, (name, help)) in POSITIONAL_ARGS.iter().enumerate() {
        let arg = Arg::new(*name).index(index + 1).help(*help);
        let arg = match *name {
            "start" | "end" => arg
                .value_parser(clap::value_parser!(u32))
                .required_unless_present("config"),
            "cutoff" => arg
                .value_parser(clap::value_parser!(f64))
                .required_unless_present_any(["config", "cutoff-table"]),
            _ => arg.required_unless_present("config"),
        };
        command = command.arg(arg);
    }

    command
        .arg(
            Arg::new("cutoff-table")
                .long("cutoff-table")
                .conflicts_with("cutoff")
                .requires("average-peak-length")
                .help("Cutoff analysis table (avelpeak and score columns) to pick the cutoff from"),
        )
        .arg(
            Arg::new("average-peak-length")
                .long("average-peak-length")
                .value_parser(clap::value_parser!(u32))
                .requires("cutoff-table")
                .help("Average peak length used to look up the cutoff in --cutoff-table"),
        )
        .arg(
            Arg::new("parsable")
                .long("parsable")
                .short('p')
                .action(ArgAction::SetTrue)
                .help("Print only the metric, for computer parsing"),
        )
        .arg(
            Arg::new("unmerged")
                .long("unmerged")
                .action(ArgAction::SetTrue)
                .help("Discount peaks that are a result of merging when calculating the metric"),
        )
        .arg(
            Arg::new("significance")
                .long("significance")
                .value_parser(clap::value_parser!(f64))
                .default_value("0.95")
                .help("The significance used when calculating confidence intervals"),
        )
        .arg(
            Arg::new("window-size")
                .long("window-size")
                .value_parser(clap::value_parser!(usize))
                .default_value("50")
                .help("The window size used when calculating confidence intervals"),
        )
        .arg(
            Arg::new("read-scaled")
                .long("read-scaled")
                .action(ArgAction::SetTrue)
                .help("Derive lambda intervals from read counts instead of the windowed variance"),
        )
}
