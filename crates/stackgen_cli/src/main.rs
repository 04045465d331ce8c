//! stackgen CLI - Main entry point.
//!
//! Builds the VPC single-instance stack template and prints it to stdout
//! (or a file). Exit codes:
//! - 0: Success
//! - 1: Template construction or validation error
//! - 2: I/O error writing the output

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod stack;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const TEMPLATE_ERROR: u8 = 1;
    pub const IO_ERROR: u8 = 2;
}

/// stackgen - emit the VPC single-instance infrastructure template
#[derive(Parser)]
#[command(name = "stackgen")]
#[command(version, about = "stackgen - emit the VPC single-instance infrastructure template")]
pub struct Cli {
    /// Write the template to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit compact single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "stackgen_cli=debug,stackgen_template=debug,stackgen_catalog=debug,warn"
    } else {
        "stackgen_cli=info,warn"
    };
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    match run(&cli) {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(categorize_error(&e))
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let template = stack::build_stack()?;
    template.validate_references()?;

    let rendered = if cli.compact {
        template.to_json_compact()?
    } else {
        template.to_json()?
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.chain().any(|cause| cause.downcast_ref::<std::io::Error>().is_some()) {
        ExitCodes::IO_ERROR
    } else {
        ExitCodes::TEMPLATE_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackgen_template::TemplateError;

    #[test]
    fn test_write_failures_map_to_io_exit_code() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = anyhow::Error::new(io).context("failed to write template.json");
        assert_eq!(categorize_error(&err), ExitCodes::IO_ERROR);
    }

    #[test]
    fn test_build_failures_map_to_template_exit_code() {
        let err = anyhow::Error::new(TemplateError::DuplicateName("VPC".to_string()));
        assert_eq!(categorize_error(&err), ExitCodes::TEMPLATE_ERROR);
    }
}
