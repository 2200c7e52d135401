//! Command-line interface for the exporter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use shr_javadoc_engine::{Compiler, Documentation};

use crate::config::DEFAULT_OUTPUT_DIR;
use crate::error::Result;
use crate::export::{export, ExportSummary};
use crate::loader::load_model;

/// SHR Javadoc - Render SHR data-model definitions as Javadoc-style HTML.
#[derive(Parser)]
#[command(name = "shr-javadoc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the HTML documentation site for a model.
    Build {
        /// Model file (.json, .yaml or .yml)
        model: PathBuf,

        /// Output directory (default: out)
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        out: PathBuf,
    },

    /// Print the resolved documentation data without rendering pages.
    Resolve {
        /// Model file (.json, .yaml or .yml)
        model: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

/// Serialization format of `resolve` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { model, out } => build_command(&model, &out),
        Commands::Resolve { model, format } => resolve_command(&model, format),
    }
}

/// Execute the build command.
fn build_command(model_path: &Path, out_dir: &Path) -> Result<()> {
    println!(
        "{} {} into {}",
        style("Building").bold(),
        style(model_path.display()).cyan(),
        style(out_dir.display()).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    pb.set_message("Resolving constraints...");
    let doc = match load_documentation(model_path) {
        Ok(doc) => doc,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Writing pages...");
    let summary = match export(&doc, out_dir) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();
    print_summary(&doc, &summary);
    Ok(())
}

/// Execute the resolve command.
fn resolve_command(model_path: &Path, format: OutputFormat) -> Result<()> {
    let doc = load_documentation(model_path)?;

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&doc)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(&doc)?,
    };
    println!("{output}");
    Ok(())
}

fn load_documentation(model_path: &Path) -> Result<Documentation> {
    let model = load_model(model_path)?;
    Ok(Compiler::new().document(model)?)
}

fn print_summary(doc: &Documentation, summary: &ExportSummary) {
    if let Some(name) = doc.project.name.as_deref() {
        println!("  Project: {}", style(name).green());
    }
    println!("  Namespaces: {}", summary.namespaces);
    println!("  Elements: {}", summary.elements);
    println!("  Pages: {}", summary.pages);
    if summary.warnings > 0 {
        println!("  Warnings: {}", style(summary.warnings).yellow().bold());
        for warning in &doc.warnings {
            println!("    {}", style(warning).yellow());
        }
    }

    println!();
    println!(
        "{} {}",
        style("Written to:").green().bold(),
        summary.out_dir.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_build_defaults() {
        let cli = Cli::parse_from(["shr-javadoc", "build", "shr.json"]);

        let Commands::Build { model, out } = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(model, PathBuf::from("shr.json"));
        assert_eq!(out, PathBuf::from("out"));
    }

    #[test]
    fn test_cli_parse_build_with_out() {
        let cli = Cli::parse_from(["shr-javadoc", "build", "shr.yaml", "-o", "site"]);

        let Commands::Build { out, .. } = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(out, PathBuf::from("site"));
    }

    #[test]
    fn test_cli_parse_resolve_format() {
        let cli = Cli::parse_from(["shr-javadoc", "resolve", "shr.json", "--format", "yaml"]);

        let Commands::Resolve { format, .. } = cli.command else {
            panic!("expected resolve command");
        };
        assert_eq!(format, OutputFormat::Yaml);
    }
}
