//! Command-line interface definitions for the `model-config` binary.

use std::path::PathBuf;

use clap::Parser;
use model_config::model::ConfigurationOption;


/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "model-config",
    author,
    about = "Builds and validates a model configuration from a configuration file \
             and command-line options, then prints the resolved result as TOML.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If unspecified, this defaults to `./data/configuration.toml`.
    #[arg(
        short = 'c',
        long = "configuration-file-path",
        help = "Path to the configuration file to use. Defaults to ./data/configuration.toml"
    )]
    pub configuration_file_path: Option<PathBuf>,

    /// Options layered over the configuration file's `[model]` table.
    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        help = "Set a model option, e.g. --set max-context-length=2048 or --set dev=enabled. \
                May be repeated, but each option at most once. Integer options also accept \
                \"unset\" and \"disabled\"."
    )]
    pub set_options: Vec<ConfigurationOption>,

    #[arg(
        long = "log-level",
        help = "Console log level filter (e.g. debug, or model_config=trace). \
                Overrides logging.console_output_level_filter from the configuration file."
    )]
    pub console_log_level: Option<String>,

    #[arg(
        long = "demonstration",
        help = "If this flag is present, the built-in demonstration configurations \
                (built and validated at compile time) are printed to stderr first."
    )]
    pub demonstration: bool,
}
