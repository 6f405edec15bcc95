//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Rowform CLI - Reshape row data with declarative field templates
///
/// Renames columns and runs every configured field through its chain of
/// value transformations (casing, find/replace, substitution maps, date and
/// phone number reformatting, identifier generation).
#[derive(Parser, Debug)]
#[command(
    name = "rowform",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "ROWFORM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform rows with a field template
    Transform(TransformArgs),

    /// List the output field names of a template
    Fields(FieldsArgs),

    /// Check that a template loads and show each field's chain
    Validate(ValidateArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the transform command
#[derive(Parser, Debug)]
pub struct TransformArgs {
    /// Path to the field template (JSON or YAML)
    #[arg(short, long, value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Path to the input rows (JSON array, NDJSON or CSV)
    #[arg(short, long, value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the transformed rows to a file (stdout if not specified)
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,

    /// Drop rows that fail instead of aborting
    #[arg(long)]
    pub skip_failed_rows: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the fields command
#[derive(Parser, Debug)]
pub struct FieldsArgs {
    /// Path to the field template (JSON or YAML)
    #[arg(short, long, value_name = "TEMPLATE")]
    pub template: PathBuf,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the field template (JSON or YAML)
    #[arg(short, long, value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Fail when a step has an unknown type
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// Pretty-printed JSON output
    JsonPretty,
    /// YAML output
    Yaml,
    /// CSV output (rows only)
    Csv,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl OutputFormat {
    /// Parse a format name from the configuration file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify that the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: None,
            no_color: false,
            command: Commands::Fields(FieldsArgs {
                template: PathBuf::from("template.json"),
            }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli {
            verbose: 2,
            quiet: true,
            ..cli
        };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_transform_args() {
        let cli = Cli::parse_from([
            "rowform",
            "-o",
            "csv",
            "transform",
            "--template",
            "t.yaml",
            "--input",
            "rows.csv",
            "--skip-failed-rows",
        ]);

        assert_eq!(cli.output, Some(OutputFormat::Csv));
        match cli.command {
            Commands::Transform(args) => {
                assert_eq!(args.template, PathBuf::from("t.yaml"));
                assert_eq!(args.input, PathBuf::from("rows.csv"));
                assert!(args.skip_failed_rows);
                assert!(!args.pretty);
                assert!(args.save_to.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::from_name("json-pretty"), Some(OutputFormat::JsonPretty));
        assert_eq!(OutputFormat::from_name("YAML"), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::from_name("xml"), None);
    }
}
