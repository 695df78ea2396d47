use clap::{Arg, Command};

pub const LABEL_CMD: &str = "label";

pub fn create_label_cli() -> Command {
    Command::new(LABEL_CMD)
        .about("Label every base of a region by reference peak type: 0 not a peak, 1 merged only, 2 unmerged.")
        .arg(
            Arg::new("merged-peaks")
                .required(true)
                .help("narrowPeak file where peaks are merged"),
        )
        .arg(
            Arg::new("unmerged-peaks")
                .required(true)
                .help("narrowPeak file where peaks are not merged"),
        )
        .arg(
            Arg::new("region")
                .required(true)
                .help("Region to label, as chr:start-end with both ends inclusive"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .required(false)
                .help("Output path for the labelled track; .gz outputs are compressed (default: stdout)"),
        )
}
