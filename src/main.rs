use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info};
use std::path::PathBuf;

use eqdocx::export::{Sink, export_to_json, export_to_text};
use eqdocx::{Config, ExportFormat, extract_from_path, normalize_extraction};

#[derive(Parser)]
#[command(
    name = "eqdocx",
    version,
    about = "Extract mathematical equations from Word documents"
)]
struct Cli {
    /// Path to the .docx file
    #[arg(required_unless_present = "init_config")]
    file: Option<PathBuf>,

    /// Output file path (default: print to console)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Return raw OMML markup without cleaning
    #[arg(short, long)]
    raw: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Text)]
    format: ExportFormat,

    /// Config file (default: <config dir>/eqdocx/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries results
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(err) = run(&cli) {
        error!("{err}");
        debug!("{err:?}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.init_config {
        let path = Config::init_default(cli.config.as_deref())?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let file = cli.file.as_deref().context("No document path given")?;
    let raw = cli.raw || config.output.raw;

    let extraction = extract_from_path(file, &config.extraction.options())?;
    let extraction = if raw {
        extraction
    } else {
        normalize_extraction(extraction)
    };

    let sink = if cli.output.is_some() {
        Sink::File
    } else {
        Sink::Console
    };
    let rendered = match cli.format {
        ExportFormat::Text => export_to_text(&extraction, file, &config.output.label, sink)?,
        ExportFormat::Json => export_to_json(&extraction, file)?,
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Results written to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
