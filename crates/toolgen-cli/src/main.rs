//! Toolgen CLI.
//!
//! Generates a Python MCP server from a markdown command document.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `generate` - Full pipeline: extract, validate, render, sync, write
//! - `validate` - Extract and validate only
//! - `list` - Show extracted commands grouped by category
//! - `sync` - Copy the bundled framework documents
//! - `export-commands` - Write one slash command file per command
//! - `completions` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # Generate with toolgen.toml (or built-in defaults)
//! toolgen generate
//!
//! # Embed instructions, skip the document sync
//! toolgen generate --mode embed --no-sync
//!
//! # Check a document before committing it
//! toolgen validate --document framework/SLASH_COMMANDS.md
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use std::path::PathBuf;
use toolgen_cli::commands;
use toolgen_cli::commands::generate::GenerateArgs;
use toolgen_core::cli::{ExitCode, OutputFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Toolgen - MCP tool server generator.
///
/// Reads the MCP metadata blocks of a command document and generates a
/// `FastMCP` server module exposing one tool per command.
#[derive(Parser, Debug)]
#[command(name = "toolgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    format: String,

    /// Configuration file (default: ./toolgen.toml when present)
    #[arg(short, long, global = true, env = "TOOLGEN_CONFIG")]
    config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the MCP server module.
    ///
    /// Extracts command records, validates them, renders the module, syncs
    /// the bundled documents and writes the module. Nothing is written when
    /// validation finds errors.
    ///
    /// # Examples
    ///
    /// ```bash
    /// toolgen generate --output mcp-server-flow/mcp_server.py --mode lookup
    /// ```
    Generate {
        /// Command document (overrides source.document)
        #[arg(short, long)]
        document: Option<PathBuf>,

        /// Output module path (overrides output.path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Instruction mode: lookup (read at run time) or embed (literals)
        #[arg(short, long)]
        mode: Option<String>,

        /// Skip the validation pass
        #[arg(long)]
        no_validate: bool,

        /// Skip copying the framework documents
        #[arg(long)]
        no_sync: bool,
    },

    /// Validate the command document without generating.
    Validate {
        /// Command document (overrides source.document)
        #[arg(short, long)]
        document: Option<PathBuf>,
    },

    /// List the commands found in the document.
    List {
        /// Command document (overrides source.document)
        #[arg(short, long)]
        document: Option<PathBuf>,
    },

    /// Copy the framework documents into the server package.
    Sync,

    /// Write each command's instructions to its slash command file.
    ExportCommands {
        /// Command document (overrides source.document)
        #[arg(short, long)]
        document: Option<PathBuf>,

        /// Directory the command files are written to
        #[arg(long, default_value = ".claude/commands")]
        output_dir: PathBuf,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(ExitCode::ERROR.as_i32());
    }

    let exit_code = match execute(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Initializes logging infrastructure.
///
/// Logs go to stderr so reports on stdout stay machine-readable.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Maps an error to the exit code of the first generator error in its chain.
fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<toolgen_core::Error>())
        .map_or(ExitCode::ERROR, ExitCode::for_error)
}

/// Routes the parsed command line to its handler.
fn execute(cli: Cli) -> Result<ExitCode> {
    let output_format = cli.format.parse::<OutputFormat>()?;
    let config = cli.config;

    match cli.command {
        Commands::Generate {
            document,
            output,
            mode,
            no_validate,
            no_sync,
        } => commands::generate::run(
            config,
            GenerateArgs {
                document,
                output,
                mode,
                no_validate,
                no_sync,
            },
            output_format,
        ),
        Commands::Validate { document } => {
            commands::validate::run(config, document, output_format)
        }
        Commands::List { document } => commands::list::run(config, document, output_format),
        Commands::Sync => commands::sync::run(config, output_format),
        Commands::ExportCommands {
            document,
            output_dir,
        } => commands::export::run(config, document, &output_dir, output_format),
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_generate() {
        let cli = Cli::parse_from(["toolgen", "generate"]);
        assert!(matches!(cli.command, Commands::Generate { .. }));

        let cli = Cli::parse_from([
            "toolgen",
            "generate",
            "--document",
            "docs/COMMANDS.md",
            "--output",
            "/tmp/server.py",
            "--mode",
            "embed",
            "--no-validate",
            "--no-sync",
        ]);
        if let Commands::Generate {
            document,
            output,
            mode,
            no_validate,
            no_sync,
        } = cli.command
        {
            assert_eq!(document, Some(PathBuf::from("docs/COMMANDS.md")));
            assert_eq!(output, Some(PathBuf::from("/tmp/server.py")));
            assert_eq!(mode.as_deref(), Some("embed"));
            assert!(no_validate);
            assert!(no_sync);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_parsing_export_commands_default_dir() {
        let cli = Cli::parse_from(["toolgen", "export-commands"]);
        if let Commands::ExportCommands { output_dir, .. } = cli.command {
            assert_eq!(output_dir, PathBuf::from(".claude/commands"));
        } else {
            panic!("Expected ExportCommands command");
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "toolgen",
            "list",
            "--verbose",
            "--format",
            "json",
            "--config",
            "custom.toml",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.format, "json");
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_cli_output_format_default() {
        let cli = Cli::parse_from(["toolgen", "sync"]);
        assert_eq!(cli.format, "pretty");
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::parse_from(["toolgen", "completions", "zsh"]);
        if let Commands::Completions { shell } = cli.command {
            assert_eq!(shell, Shell::Zsh);
        } else {
            panic!("Expected Completions command");
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_code_for_wrapped_errors() {
        let err = anyhow::Error::new(toolgen_core::Error::DocumentNotFound {
            path: "x.md".to_string(),
        })
        .context("failed to extract commands");
        assert_eq!(exit_code_for(&err), ExitCode::DOCUMENT_NOT_FOUND);

        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), ExitCode::ERROR);
    }

    #[test]
    fn test_invalid_format_is_invalid_input() {
        let cli = Cli::parse_from(["toolgen", "--format", "yaml", "sync"]);
        let err = execute(cli).unwrap_err();
        assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
    }
}
