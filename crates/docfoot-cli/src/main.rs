#![allow(
    clippy::needless_pass_by_value,    // clap requires owned values
    clippy::unnecessary_wraps,         // consistent Result return for CLI handlers
)]

//! Docfoot CLI - DOCX footer metadata extraction
//!
//! Scans a folder (or takes a list of files), extracts `key: value` pairs from
//! the footers of every `.docx` document in parallel and prints a report.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use config::{Config, ReportFormat};
use docfoot_backend::{BatchExtractor, ConsoleReporter, ExtractorConfig};
use docfoot_core::{
    has_docx_extension, render_report, save_report, summarize, to_json, DocfootError, FileResult,
    InputSource,
};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with per-file progress
    Verbose,
}

impl Verbosity {
    /// Create from CLI flags
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if output should be shown (not quiet)
    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if verbose output is requested
    const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Default log filter when `RUST_LOG` is unset
    const fn log_filter(self) -> &'static str {
        if self.is_verbose() {
            "info"
        } else {
            "warn"
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "docfoot",
    about = "Extract key/value metadata from DOCX footers",
    long_about = "Extract `key: value` metadata from the footers of .docx documents.\n\
                  \n\
                  Footer paragraphs are split into lines and every line containing a colon\n\
                  becomes an entry. Footer tables are read cell by cell. Documents are\n\
                  processed in parallel.",
    version
)]
struct Args {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show per-file progress
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract footer metadata from a folder or a list of .docx files
    #[command(long_about = "Extract footer metadata from a folder or a list of .docx files.\n\
                      \n\
                      A single directory argument is scanned (non-recursively) for .docx files.\n\
                      Several arguments, or a single file, form a file list: missing entries and\n\
                      entries without the .docx extension are skipped with a warning.\n\
                      \n\
                      Defaults can be set via .docfoot.toml configuration file.\n\
                      \n\
                      Examples:\n\
                        docfoot extract contracts/\n\
                        docfoot extract a.docx b.docx -f json\n\
                        docfoot extract contracts/ -o metadata_results.txt\n\
                        docfoot extract --manifest inputs.json -j 4")]
    Extract {
        /// Folder to scan, or .docx files to process
        #[arg(value_name = "INPUTS", required_unless_present = "manifest")]
        inputs: Vec<PathBuf>,

        /// Read the inputs from a JSON file: a folder path string or an array of file paths
        #[arg(long, value_name = "FILE", conflicts_with = "inputs")]
        manifest: Option<PathBuf>,

        /// Number of worker threads (default: one per CPU)
        #[arg(short = 'j', long, value_name = "N")]
        workers: Option<usize>,

        /// Write the results to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<ReportFormat>,
    },

    /// Manage configuration settings
    #[command(long_about = "Manage docfoot configuration files.\n\
                      \n\
                      Configuration files are loaded in this order (later overrides earlier):\n\
                        1. User config: ~/.docfoot.toml\n\
                        2. Project config: ./.docfoot.toml\n\
                        3. Command-line arguments")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Display the current effective configuration
    Show {
        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Show the paths of the configuration files
    Path,
}

fn main() -> Result<()> {
    // Load configuration files
    let (user_config, project_config) = Config::discover_configs();
    let config = Config::merge(user_config, project_config);

    let args = Args::parse();
    let settings = config.extract_settings();

    let verbosity = Verbosity::from_flags(
        args.quiet,
        args.verbose || settings.verbose.unwrap_or(false),
    );

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(verbosity.log_filter()),
    )
    .target(env_logger::Target::Stderr)
    .init();

    match args.command {
        Commands::Extract {
            inputs,
            manifest,
            workers,
            output,
            format,
        } => {
            let options = ExtractOptions {
                workers: workers.or(settings.workers),
                output: output.or(settings.output),
                format: format.or(settings.format).unwrap_or_default(),
            };
            extract_command(inputs, manifest, &options, verbosity)
        }
        Commands::Config { action } => config_command(action),
    }
}

/// Extract settings after applying configuration defaults
#[derive(Debug)]
struct ExtractOptions {
    workers: Option<usize>,
    output: Option<PathBuf>,
    format: ReportFormat,
}

fn extract_command(
    inputs: Vec<PathBuf>,
    manifest: Option<PathBuf>,
    options: &ExtractOptions,
    verbosity: Verbosity,
) -> Result<()> {
    let source = match manifest {
        Some(manifest) => read_manifest(&manifest)?,
        None => classify_inputs(inputs),
    };

    debug!("Extracting from {source:?} with {options:?}");

    let reporter = if verbosity.should_show_output() {
        ConsoleReporter::stderr()
    } else {
        ConsoleReporter::silent()
    };
    let extractor =
        BatchExtractor::with_config(ExtractorConfig::default().with_max_workers(options.workers))
            .with_reporter(reporter);

    let results = match extractor.extract(&source, verbosity.is_verbose()) {
        Ok(results) => results,
        Err(e) => fail(&e),
    };

    write_results(&results, options, verbosity)?;

    if verbosity.should_show_output() {
        let (found, empty, failed) = summarize(&results);
        eprintln!(
            "{} {} files: {} with metadata, {} without, {} failed",
            "Done:".green().bold(),
            results.len(),
            found,
            empty,
            failed
        );
    }

    Ok(())
}

/// Print a resolution error and exit with a failure status
fn fail(error: &DocfootError) -> ! {
    eprintln!("{} {error}", "Error:".red().bold());
    if error.is_empty_result() {
        eprintln!(
            "{} Only files with the .docx extension are processed",
            "Hint:".cyan().bold()
        );
    }
    std::process::exit(1);
}

/// One existing directory, or one path that is neither existing nor a
/// `.docx` name, is a folder. Anything else is a file list.
fn classify_inputs(mut inputs: Vec<PathBuf>) -> InputSource {
    if inputs.len() == 1 {
        let single = &inputs[0];
        let is_folder =
            single.is_dir() || (!single.exists() && !has_docx_extension(single));
        if is_folder {
            return InputSource::folder(inputs.remove(0));
        }
    }
    InputSource::files(inputs)
}

fn read_manifest(path: &Path) -> Result<InputSource> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;

    match InputSource::try_from(value) {
        Ok(source) => Ok(source),
        Err(e) => fail(&e),
    }
}

fn write_results(
    results: &[FileResult],
    options: &ExtractOptions,
    verbosity: Verbosity,
) -> Result<()> {
    match &options.output {
        Some(path) => {
            let written = match options.format {
                ReportFormat::Text => save_report(results, path),
                ReportFormat::Json => write_json(results, path),
            };
            written.with_context(|| format!("Failed to write results to {}", path.display()))?;

            if verbosity.should_show_output() {
                println!("Results saved to: {}", path.display());
            }
        }
        None => match options.format {
            ReportFormat::Text => print!("{}", render_report(results)),
            ReportFormat::Json => println!("{}", to_json(results, true)?),
        },
    }
    Ok(())
}

fn write_json(results: &[FileResult], path: &Path) -> docfoot_core::Result<()> {
    let json = to_json(results, true)?;
    fs::write(path, json + "\n")?;
    Ok(())
}

fn config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show { json } => config_show(json),
        ConfigAction::Path => config_path(),
    }
}

fn config_show(json_output: bool) -> Result<()> {
    let (user_config, project_config) = Config::discover_configs();
    let merged = Config::merge(user_config, project_config);

    if json_output {
        let json = serde_json::to_string_pretty(&merged)?;
        println!("{json}");
    } else {
        let toml = toml::to_string_pretty(&merged)?;
        println!("{toml}");
    }

    Ok(())
}

fn config_path() -> Result<()> {
    let status = |path: &Path| {
        if path.exists() {
            "exists".green()
        } else {
            "not found".yellow()
        }
    };

    if let Some(user) = Config::user_config_path() {
        println!("{} {} ({})", "User:".bright_black(), user.display(), status(&user));
    }
    let project = Config::project_config_path();
    println!(
        "{} {} ({})",
        "Project:".bright_black(),
        project.display(),
        status(&project)
    );

    Ok(())
}
