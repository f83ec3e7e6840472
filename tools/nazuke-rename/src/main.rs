//! Nazuke rename tool
//!
//! Plans canonical target paths for a batch of media files and prints them as
//! JSON lines. The batch comes from a JSON file of descriptors or from stdin,
//! one relative path per line.

use std::fs;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use nazuke_core::{MediaFile, MediaKind, RenameConfig, RenameOutcome, RenameRequest, Renamer};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser)]
#[command(name = "nazuke-rename")]
#[command(about = "Plan canonical Movie/TV/Anime paths for a batch of media files")]
#[command(version)]
struct Cli {
    /// Naming layout: movie, tv, anime or default
    #[arg(short, long, env = "NAZUKE_KIND", default_value = "default")]
    kind: MediaKind,

    /// Canonical title of the release
    #[arg(short, long, env = "NAZUKE_TITLE")]
    title: String,

    /// Release year used by the movie layout
    #[arg(short, long)]
    year: Option<String>,

    /// Take the year from the batch itself when --year is absent
    #[arg(long)]
    infer_year: bool,

    /// JSON array of file descriptors (reads paths from stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON rename configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Plan across all cores
    #[arg(long)]
    parallel: bool,

    /// Print the updated descriptor array instead of one line per file
    #[arg(long)]
    batch: bool,
}

/// One planned file, as printed on stdout.
#[derive(Debug, Serialize)]
struct RenameLine {
    index: usize,
    name: String,
    target: Option<String>,
    season: Option<u32>,
    episode: Option<u32>,
}

impl From<RenameOutcome> for RenameLine {
    fn from(outcome: RenameOutcome) -> Self {
        Self {
            index: outcome.index,
            name: outcome.name,
            target: outcome.target,
            season: outcome.episode.map(|se| se.season),
            episode: outcome.episode.map(|se| se.episode),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RenameConfig::default(),
    };
    let renamer = Renamer::new(config).context("Failed to build renamer")?;

    let mut files = match &cli.input {
        Some(path) => load_batch(path)?,
        None => read_paths(io::stdin().lock())?,
    };
    info!(files = files.len(), kind = %cli.kind, "Loaded batch");

    let mut request = RenameRequest::new(cli.kind, cli.title.clone());
    request.year = match cli.year.clone() {
        Some(year) => Some(year),
        None if cli.infer_year => {
            let year = renamer.extract_year_from_files(&files);
            debug!(year = %year, "Inferred year from batch");
            Some(year).filter(|y| !y.is_empty())
        }
        None => None,
    };

    let plan = plan(&renamer, &files, &request, cli.parallel)?;
    let renamed = plan.iter().filter(|o| o.is_renamed()).count();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if cli.batch {
        nazuke_core::apply(&mut files, plan);
        serde_json::to_writer_pretty(&mut out, &files).context("Failed to write batch")?;
        writeln!(out)?;
    } else {
        for outcome in plan {
            serde_json::to_writer(&mut out, &RenameLine::from(outcome))
                .context("Failed to write rename line")?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    info!(renamed, total = files.len(), "Done");
    Ok(())
}

#[cfg(feature = "parallel")]
fn plan(
    renamer: &Renamer,
    files: &[MediaFile],
    request: &RenameRequest,
    parallel: bool,
) -> Result<Vec<RenameOutcome>> {
    Ok(if parallel {
        renamer.plan_parallel(files, request)
    } else {
        renamer.plan(files, request)
    })
}

#[cfg(not(feature = "parallel"))]
fn plan(
    renamer: &Renamer,
    files: &[MediaFile],
    request: &RenameRequest,
    parallel: bool,
) -> Result<Vec<RenameOutcome>> {
    if parallel {
        anyhow::bail!("--parallel requires nazuke-rename to be built with the `parallel` feature");
    }
    Ok(renamer.plan(files, request))
}

fn load_config(path: &Path) -> Result<RenameConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    RenameConfig::from_json_str(&json)
        .with_context(|| format!("Invalid config {}", path.display()))
}

fn load_batch(path: &Path) -> Result<Vec<MediaFile>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid batch {}", path.display()))
}

/// Reads one relative path per line, skipping blank lines.
fn read_paths(reader: impl BufRead) -> Result<Vec<MediaFile>> {
    let mut files = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read stdin")?;
        let path = line.trim();
        if !path.is_empty() {
            files.push(MediaFile::from_path(path));
        }
    }
    Ok(files)
}
