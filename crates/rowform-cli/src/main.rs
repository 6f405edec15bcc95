//! Rowform CLI - reshape row data with declarative field templates
//!
//! This is the main entry point for the Rowform CLI application, providing
//! commands for transforming row files, listing a template's output fields
//! and validating templates.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use is_terminal::IsTerminal;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Load configuration before logging so the file can tune it
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e, !cli.no_color),
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, config) {
        Ok(()) => process::exit(0),
        Err(e) => exit_with(&e, use_color),
    }
}

fn exit_with(e: &error::Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(e, use_color));

    if e.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(e.exit_code());
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = config.output_format(cli.output)?;
    let mut output = OutputWriter::new(
        format,
        cli.use_color() && config.output.color,
        cli.quiet,
        config.output.progress && std::io::stderr().is_terminal(),
    );

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        format = ?format,
        "Executing command"
    );

    match cli.command {
        Commands::Transform(args) => handlers::handle_transform(args, &mut output),
        Commands::Fields(args) => handlers::handle_fields(args, &mut output),
        Commands::Validate(args) => handlers::handle_validate(args, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    // File settings first, then environment overrides
    logging_config.merge_with_file(&config.logging, cli.verbosity_level());
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["rowform", "fields", "--template", "t.json"]);
        assert_eq!(cli.verbosity_level(), 0);

        let cli = Cli::parse_from(["rowform", "-vv", "validate", "--template", "t.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["rowform", "--quiet", "validate", "-t", "t.json"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
