use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use photo_consolidator_rs::prelude::*;

#[derive(Parser)]
#[command(name = "photo_consolidator_rs")]
#[command(about = "Copy photos from nested folders into one numbered archive with a CSV audit log", long_about = None)]
struct Cli {
    /// Folder containing the submissions (scanned recursively)
    source: PathBuf,

    /// Location where the output folder is created
    destination: PathBuf,

    /// Image extension to collect; repeat to add more (default: jpg jpeg png gif bmp tiff webp)
    #[arg(short, long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Number files in sorted name order instead of filesystem order
    #[arg(long)]
    sorted: bool,

    /// Pad every serial to the digit count of the total (e.g. 0001 for 1000+ files)
    #[arg(long)]
    fit_width: bool,

    /// Prefix for renamed files
    #[arg(long, default_value = photo_consolidator_rs::config::DEFAULT_NAME_PREFIX)]
    prefix: String,

    /// Name of the folder created inside the destination
    #[arg(long, default_value = photo_consolidator_rs::config::DEFAULT_OUTPUT_FOLDER)]
    folder_name: String,

    /// Name of the CSV audit log
    #[arg(long, default_value = photo_consolidator_rs::config::DEFAULT_AUDIT_FILE)]
    audit_name: String,

    /// Run in batch mode (no progress bar)
    #[arg(long)]
    batch: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::new().filter_or("PHOTO_CONSOLIDATOR_LOG", default_filter),
    )
    .init();

    // Set up graceful shutdown handler
    let shutdown_requested = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown_requested.clone();

    ctrlc::set_handler(move || {
        eprintln!("\n⚠️  Shutdown requested. Finishing current file...");
        shutdown_flag.store(true, Ordering::SeqCst);
    })
    .context("Error setting Ctrl-C handler")?;

    let extensions = resolve_extensions(&cli.extensions)?;
    let discovery = DiscoveryOptions {
        sort_by_name: cli.sorted,
    };

    if !cli.destination.is_dir() {
        bail!("Destination is not an existing folder: {}", cli.destination.display());
    }

    println!("Photo Consolidator");
    println!("Scanning {} for image files...", cli.source.display());

    let items = discover_with(&cli.source, &extensions, &discovery)
        .with_context(|| format!("Failed to scan {}", cli.source.display()))?;

    if items.is_empty() {
        println!("No image files found in the source folder.");
        return Ok(());
    }
    println!("Found {} image(s) to process\n", items.len());

    let progress = if cli.batch {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(items.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    };

    let options = ConsolidateOptions {
        output_folder_name: cli.folder_name.clone(),
        audit_file_name: cli.audit_name.clone(),
        name_prefix: cli.prefix.clone(),
        serial_width: if cli.fit_width {
            SerialWidth::FitTotal
        } else {
            SerialWidth::Minimum
        },
    };

    let result = Consolidator::new(options)
        .with_cancel_flag(shutdown_requested.clone())
        .run(&items, &cli.destination, |p| {
            match &p.record.status {
                ItemStatus::Success { new_file_name } => {
                    if cli.verbose {
                        progress.println(format!("✓ {} → {}", p.record.original_file_name, new_file_name));
                    }
                }
                ItemStatus::Failed { error } => {
                    progress.println(format!("✗ Failed: {} - {}", p.record.original_file_name, error));
                }
            }
            progress.set_message(format!("Processing {}/{}", p.serial, p.total));
            progress.inc(1);
        })
        .context("Consolidation aborted")?;

    if result.cancelled {
        progress.finish_and_clear();
        eprintln!("\n⏹️  Graceful shutdown complete");
    } else {
        progress.finish_with_message("Process complete!");
    }
    println!();

    if cli.json {
        println!("{}", summary_json(&result)?);
    } else {
        write_summary(&mut io::stdout().lock(), &result)?;
    }

    Ok(())
}

/// Normalize `--ext` values, falling back to the default image set
fn resolve_extensions(raw: &[String]) -> Result<BTreeSet<String>> {
    if raw.is_empty() {
        return Ok(default_extensions());
    }

    let extensions: BTreeSet<String> = raw.iter().filter_map(|e| normalize_extension(e)).collect();
    if extensions.is_empty() {
        bail!("No usable extensions given with --ext");
    }
    Ok(extensions)
}
