//! # metainsights-cli
//!
//! Command-line front end for importing Meta Insights exports.

mod terminal;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use colored::Colorize;
use metainsights_core::{
    about_text, create_insights_sheet, load_raw_export, run_import, CreateOutcome, ImportConfig,
    ImportContext, ImportOutcome, Metric, Platform, Ui, ABOUT_TITLE,
};
use metainsights_sheet::Book;
use std::path::{Path, PathBuf};
use terminal::TerminalUi;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// metainsights - Meta Insights importer for tracking workbooks
#[derive(Parser)]
#[command(name = "metainsights")]
#[command(author, version, about = "Import Meta Insights exports into tracking sheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// YAML file overriding sheet names, markers and columns
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Create the tracking sheet of a platform
    Create {
        /// facebook or instagram
        platform: Platform,

        /// Workbook (.xlsx file or directory of CSV files)
        #[arg(long, value_name = "PATH")]
        book: PathBuf,

        /// Year whose days fill the date column (default: current year)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Import one metric from the raw export sheet
    Import {
        /// reach, likes or followers
        metric: Metric,

        /// Workbook (.xlsx file or directory of CSV files)
        #[arg(long, value_name = "PATH")]
        book: PathBuf,

        /// Raw Meta export (.csv or .xlsx) to load as the source sheet first
        #[arg(long, value_name = "FILE")]
        raw: Option<PathBuf>,

        /// Answer OK to the confirmation without prompting
        #[arg(short, long)]
        yes: bool,
    },
    /// Show version and authors
    About,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let config = match &cli.config {
        Some(path) => ImportConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ImportConfig::default(),
    };

    match cli.command {
        Command::Create {
            platform,
            book,
            year,
        } => {
            let year = year.unwrap_or_else(|| chrono::Local::now().year());
            run_create(&book, &config, platform, year, &mut TerminalUi::new(false))
        }
        Command::Import {
            metric,
            book,
            raw,
            yes,
        } => run_import_command(&book, &config, metric, raw.as_deref(), &mut TerminalUi::new(yes)),
        Command::About => {
            TerminalUi::new(false).alert(ABOUT_TITLE, &about_text());
            Ok(())
        }
    }
}

/// Open the workbook at `path`, or start an empty one when nothing is there yet.
fn open_book(path: &Path) -> Result<Book> {
    if path.exists() {
        Book::load(path).with_context(|| format!("Failed to open workbook: {}", path.display()))
    } else {
        info!(path = %path.display(), "starting a new workbook");
        Ok(Book::new())
    }
}

fn save_book(book: &Book, path: &Path) -> Result<()> {
    book.save(path)
        .with_context(|| format!("Failed to save workbook: {}", path.display()))
}

fn run_create<U: Ui>(
    path: &Path,
    config: &ImportConfig,
    platform: Platform,
    year: i32,
    ui: &mut U,
) -> Result<()> {
    let mut book = open_book(path)?;
    let mut ctx = ImportContext::new(&mut book, ui, config);

    match create_insights_sheet(&mut ctx, platform, year)? {
        CreateOutcome::Created => {
            save_book(&book, path)?;
            println!(
                "{} {} ({year})",
                "Created".green().bold(),
                platform.insights_sheet_name()
            );
        }
        CreateOutcome::AlreadyExists => {}
    }
    Ok(())
}

fn run_import_command<U: Ui>(
    path: &Path,
    config: &ImportConfig,
    metric: Metric,
    raw: Option<&Path>,
    ui: &mut U,
) -> Result<()> {
    let mut book = open_book(path)?;
    if let Some(raw) = raw {
        load_raw_export(&mut book, config, metric, raw)
            .with_context(|| format!("Failed to load raw export: {}", raw.display()))?;
    }

    let mut ctx = ImportContext::new(&mut book, ui, config);
    let outcome = run_import(&mut ctx, metric)?;

    if let ImportOutcome::Done { platforms, .. } = &outcome {
        if platforms.is_empty() {
            info!(path = %path.display(), "nothing imported, workbook left unchanged");
            return Ok(());
        }
        save_book(&book, path)?;
        for report in platforms {
            println!(
                "{} {}: {} updated, {} appended",
                "Done".green().bold(),
                report.platform.insights_sheet_name(),
                report.summary.updated,
                report.summary.appended
            );
        }
    }
    Ok(())
}
