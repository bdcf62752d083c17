//! Regeneration-aware line merge tool CLI.
//!
//! Merges freshly generated content onto files the user may have edited
//! since the last generation, keeping both sides' changes.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use remerge::{merge, BaselineStore, LineSequence, Regenerator, WriteOutcome};

/// Regeneration-aware line merge tool
#[derive(Parser)]
#[command(name = "remerge")]
#[command(version)]
#[command(about = "Merge user edits onto regenerated file content", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge observed user edits onto newly generated content
    #[command(visible_alias = "m")]
    Merge {
        /// Baseline file (last generated content)
        baseline: PathBuf,
        /// Observed file (current, possibly user-edited content)
        observed: PathBuf,
        /// Proposed file (freshly generated content)
        proposed: PathBuf,
        /// Output file (default: stdout)
        output: Option<PathBuf>,

        /// Also write the new baseline to this file
        #[arg(long)]
        baseline_out: Option<PathBuf>,
    },

    /// Regenerate one managed artifact, honoring user edits
    #[command(visible_alias = "a")]
    Apply {
        /// Artifact path, relative to the managed root
        path: PathBuf,
        /// File with the newly generated content ("-" for stdin)
        #[arg(short, long)]
        source: PathBuf,
        /// Baseline cache directory
        #[arg(long)]
        cache_dir: PathBuf,
        /// Root of the managed tree
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Print the committed baseline for a managed artifact
    Baseline {
        /// Artifact path, relative to the managed root
        path: PathBuf,
        /// Baseline cache directory
        #[arg(long)]
        cache_dir: PathBuf,
    },
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Merge {
            baseline,
            observed,
            proposed,
            output,
            baseline_out,
        } => run_merge(
            &baseline,
            &observed,
            &proposed,
            output.as_deref(),
            baseline_out.as_deref(),
        ),
        Commands::Apply {
            path,
            source,
            cache_dir,
            root,
        } => run_apply(&path, &source, &cache_dir, &root),
        Commands::Baseline { path, cache_dir } => run_baseline(&path, &cache_dir),
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

/// Reads and normalizes one file into a line sequence.
fn read_sequence(path: &Path) -> anyhow::Result<LineSequence> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    LineSequence::from_bytes(&bytes)
        .with_context(|| format!("normalizing {}", path.display()))
}

/// Runs a standalone three-file merge.
fn run_merge(
    baseline_path: &Path,
    observed_path: &Path,
    proposed_path: &Path,
    output_path: Option<&Path>,
    baseline_out: Option<&Path>,
) -> anyhow::Result<()> {
    let baseline = read_sequence(baseline_path)?;
    let observed = read_sequence(observed_path)?;
    let proposed = read_sequence(proposed_path)?;

    let outcome = merge(Some(baseline), Some(observed), proposed)?;

    let mut output: Box<dyn Write> = match output_path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout()),
    };
    output.write_all(outcome.merged.to_text().as_bytes())?;
    output.flush()?;

    if let Some(path) = baseline_out {
        std::fs::write(path, outcome.baseline.to_text())
            .with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(())
}

/// Runs the regeneration driver for one artifact.
fn run_apply(
    path: &Path,
    source: &Path,
    cache_dir: &Path,
    root: &Path,
) -> anyhow::Result<()> {
    let proposed_text = if source == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("reading proposal from stdin")?;
        text
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("reading {}", source.display()))?
    };

    let store = BaselineStore::new(cache_dir);
    let mut regen = Regenerator::new(root, store);

    match regen.write(path, &proposed_text)? {
        WriteOutcome::Created => eprintln!("Created {}", path.display()),
        WriteOutcome::Regenerated { preserved } => eprintln!(
            "Regenerated {} ({} user line(s) preserved)",
            path.display(),
            preserved
        ),
    }

    Ok(())
}

/// Prints the committed baseline for an artifact.
fn run_baseline(path: &Path, cache_dir: &Path) -> anyhow::Result<()> {
    let store = BaselineStore::new(cache_dir);

    match store.load(path)? {
        Some(baseline) => {
            print!("{}", baseline.to_text());
            Ok(())
        }
        None => anyhow::bail!(
            "no baseline committed for {} in {}",
            path.display(),
            store.root().display()
        ),
    }
}
