use clap::{Arg, Command};

pub const CHECK_CONFIG_CMD: &str = "check-config";

pub fn create_check_config_cli() -> Command {
    Command::new(CHECK_CONFIG_CMD)
        .about("Validate a compare config file and report every problem found.")
        .arg(
            Arg::new("config")
                .required(true)
                .help("Path to the TOML config file"),
        )
}
