use clap::Parser;
use miette::{miette, Context, Result};
use tracing::{debug, info};

use crate::cli::CLIArgs;
use model_config::{
    configuration::Configuration,
    logging::initialize_tracing,
    output::{describe_demonstration, render_resolved},
};

mod cli;


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    // Load configuration.
    let configuration = match cli_args.configuration_file_path.as_ref() {
        Some(path) => {
            eprintln!("Loading configuration: {}", path.display());
            Configuration::load_from_path(path)
        }
        None => {
            eprintln!("Loading configuration at default path.");
            Configuration::load_from_default_path()
        }
    }
    .wrap_err("Failed to load configuration file.")?;

    eprintln!(
        "Configuration loaded: {}.",
        configuration.file_path.display()
    );


    let logging_raii_guard = initialize_tracing(
        configuration
            .logging
            .console_output_level_filter(cli_args.console_log_level.as_deref())?,
        configuration.logging.log_file_output_level_filter()?,
        &configuration.logging.log_file_output_directory,
        "model-config.log",
    )
    .wrap_err("Failed to initialize tracing.")?;

    info!("Tracing initialized.");


    if cli_args.demonstration {
        eprintln!("{}", describe_demonstration());
    }


    if !cli_args.set_options.is_empty() {
        info!(
            "Layering {} command-line options over the configuration file.",
            cli_args.set_options.len()
        );
    }

    let model_configuration = configuration
        .model
        .with_options(cli_args.set_options.iter().copied())
        .wrap_err("Invalid --set options.")?;

    let resolved_model_configuration = model_configuration
        .validate()
        .wrap_err_with(|| {
            miette!(
                "Model configuration is invalid (from {} and the command line).",
                configuration.file_path.display()
            )
        })?;

    debug!("Resolved model configuration: {:?}", resolved_model_configuration);


    print!("{}", render_resolved(&resolved_model_configuration)?);


    drop(logging_raii_guard);
    Ok(())
}
