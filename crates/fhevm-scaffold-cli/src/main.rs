// crates/fhevm-scaffold-cli/src/main.rs
// ============================================================================
// Module: fhevm-scaffold CLI Entry Point
// Description: Command dispatcher for project and documentation generation.
// Purpose: Expose the catalog pipelines as scriptable subcommands.
// Dependencies: clap, fhevm-scaffold-catalog, fhevm-scaffold-gen, thiserror, tracing-subscriber
// ============================================================================

//! ## Overview
//! `fhevm-scaffold` loads the catalog once, then runs exactly one pipeline.
//! Every failure is reported as a single `error[<kind>]: <message>` line on
//! stderr followed by a non-zero exit code. Progress logs go to stderr through
//! `tracing`; results go to stdout.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use fhevm_scaffold_catalog::Catalog;
use fhevm_scaffold_cli::t;
use fhevm_scaffold_gen::GenerateError;
use fhevm_scaffold_gen::ProjectReport;
use fhevm_scaffold_gen::generate_all_docs;
use fhevm_scaffold_gen::generate_category;
use fhevm_scaffold_gen::generate_docs;
use fhevm_scaffold_gen::generate_example;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "fhevm-scaffold", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Catalog file (overrides `FHEVM_SCAFFOLD_CATALOG`).
    #[arg(long, value_name = "PATH", global = true)]
    catalog: Option<PathBuf>,
    /// Increase log verbosity (`-v` info, `-vv` debug).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a standalone project for one example.
    GenerateExample(ProjectCommand),
    /// Generate one project bundling every example of a category.
    GenerateCategory(ProjectCommand),
    /// Regenerate documentation for one example or for the whole catalog.
    GenerateDocs(DocsCommand),
    /// List example and category keys.
    List,
}

/// Arguments shared by the project generation subcommands.
#[derive(Args, Debug)]
struct ProjectCommand {
    /// Catalog key to generate.
    key: String,
    /// Destination directory; must not exist.
    output_dir: Option<PathBuf>,
}

/// Arguments for `generate-docs`.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct DocsCommand {
    /// Example key whose page is regenerated; the index is left untouched.
    key: Option<String>,
    /// Regenerate every page, prune stale pages, and rebuild the index.
    #[arg(long)]
    all: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a catalog message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }

    /// Formats a generation failure as a single error line.
    fn generate(err: &GenerateError) -> Self {
        Self::new(t!("error.line", kind = err.kind(), message = err))
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    init_logging(cli.verbose)?;
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match command {
        Commands::GenerateExample(command) => command_generate_example(&catalog, &command),
        Commands::GenerateCategory(command) => command_generate_category(&catalog, &command),
        Commands::GenerateDocs(command) => command_generate_docs(&catalog, command),
        Commands::List => command_list(&catalog),
    }
}

/// Returns the default log directive for a `-v` count.
const fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| CliError::new(t!("logging.init_failed", error = err)))
}

/// Loads the catalog from the flag, environment, or working directory.
fn load_catalog(path: Option<&Path>) -> CliResult<Catalog> {
    Catalog::load(path).map_err(|err| {
        CliError::new(t!(
            "error.line",
            kind = "catalog",
            message = t!("catalog.load_failed", error = err)
        ))
    })
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Project Commands
// ============================================================================

/// Executes `generate-example`.
fn command_generate_example(catalog: &Catalog, command: &ProjectCommand) -> CliResult<ExitCode> {
    let report = generate_example(catalog, &command.key, command.output_dir.as_deref())
        .map_err(|err| CliError::generate(&err))?;
    write_lines(&[t!("example.ok", key = report.key, path = report.destination.display())])?;
    write_project_summary(&report)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `generate-category`.
fn command_generate_category(catalog: &Catalog, command: &ProjectCommand) -> CliResult<ExitCode> {
    let report = generate_category(catalog, &command.key, command.output_dir.as_deref())
        .map_err(|err| CliError::generate(&err))?;
    write_lines(&[t!("category.ok", key = report.key, path = report.destination.display())])?;
    write_project_summary(&report)?;
    Ok(ExitCode::SUCCESS)
}

/// Writes package, contract, and copy details for a generated project.
fn write_project_summary(report: &ProjectReport) -> CliResult<()> {
    write_lines(&[
        t!("project.package", name = report.package_name),
        t!("project.contracts", contracts = report.contracts.join(", ")),
        t!("project.files", files = report.copy.files, skipped = report.copy.skipped),
    ])
}

// ============================================================================
// SECTION: Documentation Commands
// ============================================================================

/// Executes `generate-docs`.
fn command_generate_docs(catalog: &Catalog, command: DocsCommand) -> CliResult<ExitCode> {
    if let Some(key) = command.key {
        let page = generate_docs(catalog, &key).map_err(|err| CliError::generate(&err))?;
        let path = catalog.docs_dir().join(&page.relative_path);
        write_lines(&[t!("docs.page_ok", path = path.display())])?;
        return Ok(ExitCode::SUCCESS);
    }

    let report = generate_all_docs(catalog).map_err(|err| CliError::generate(&err))?;
    let mut lines = vec![t!("docs.all_ok", count = report.pages.len())];
    lines.extend(report.pruned.iter().map(|page| t!("docs.pruned", page = page)));
    lines.push(t!("docs.index_ok", path = report.index_path.display()));
    write_lines(&lines)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: List Command
// ============================================================================

/// Executes `list`.
fn command_list(catalog: &Catalog) -> CliResult<ExitCode> {
    let width = catalog
        .example_keys()
        .into_iter()
        .chain(catalog.category_keys())
        .map(str::len)
        .max()
        .unwrap_or(0);
    let mut lines = vec![t!("list.examples")];
    for example in catalog.examples() {
        lines.push(t!(
            "list.example_line",
            key = format!("{:<width$}", example.key),
            description = example.description
        ));
    }
    lines.push(t!("list.categories"));
    for category in catalog.categories() {
        lines.push(t!(
            "list.category_line",
            key = format!("{:<width$}", category.key),
            name = category.name,
            members = category.members.join(", ")
        ));
    }
    write_lines(&lines)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes each line to stdout.
fn write_lines(lines: &[String]) -> CliResult<()> {
    for line in lines {
        write_stdout_line(line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(())
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
