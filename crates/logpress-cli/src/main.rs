// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Logpress — JSON journal to PDF
//
// Entry point. Initialises logging, parses the command line, and runs the
// render or inspect command.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use logpress_core::error::Result;
use logpress_core::JournalConfig;
use logpress_document::{PdfReader, generate_journal};

const DEFAULT_INPUT: &str = "sawyer.json";

/// Render a JSON journal export as a paginated PDF.
#[derive(Debug, Parser)]
#[command(name = "logpress")]
#[command(version)]
#[command(about = "Render a JSON journal export as a paginated PDF")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a journal JSON file to PDF
    Render {
        /// Journal JSON file
        #[arg(default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output PDF (default: INPUT with a .pdf extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show the page count of a PDF
    Inspect {
        /// PDF file to inspect
        pdf: PathBuf,

        /// Also print the extracted text of every page
        #[arg(long)]
        text: bool,
    },
}

/// `sawyer.json` becomes `sawyer.pdf` next to it.
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

fn render(input: &Path, output: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let config = match config {
        Some(path) => JournalConfig::load(path)?,
        None => JournalConfig::default(),
    };
    let output = output.unwrap_or_else(|| default_output(input));

    println!("Generating PDF: {}", output.display());
    let summary = generate_journal(input, &output, &config)?;
    if !summary.skipped.is_empty() {
        tracing::info!(skipped = summary.skipped.len(), "Some attachments were left out");
    }
    println!("✓ Minimal journal PDF created: {}", summary.output.display());
    Ok(())
}

fn inspect(pdf: &Path, text: bool) -> Result<()> {
    let reader = PdfReader::open(pdf)?;
    println!("{}: {} page(s)", pdf.display(), reader.page_count());

    if text {
        for page in 1..=reader.page_count() as u32 {
            println!("--- page {page} ---");
            println!("{}", reader.page_text(page)?.trim_end());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "Logpress starting");

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            config,
        } => render(&input, output, config),
        Commands::Inspect { pdf, text } => inspect(&pdf, text),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
