//! Batch command - process many receipt PDFs into one CSV dataset.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use mercadata_core::{Dataset, ReceiptPipeline};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output CSV path
    #[arg(short, long, default_value = "data/mercadata.csv")]
    output: PathBuf,

    /// Continue on error instead of aborting the batch
    #[arg(long)]
    continue_on_error: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("pdf")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching PDF files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Sequential, in upload order: one accumulating dataset, no
    // per-document isolation unless --continue-on-error is set.
    let pipeline = ReceiptPipeline::with_config(config);
    let mut dataset = Dataset::new();
    let mut failed: Vec<(PathBuf, String)> = Vec::new();

    for path in &files {
        let result = fs::read(path)
            .map_err(anyhow::Error::from)
            .and_then(|data| {
                let source = path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("receipt.pdf");
                pipeline
                    .process_document(source, &data)
                    .map_err(anyhow::Error::from)
            });

        match result {
            Ok(receipt) => {
                debug!(
                    "{}: {} records",
                    path.display(),
                    receipt.records.len()
                );
                dataset.extend_from_receipt(&receipt);
            }
            Err(e) => {
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), e);
                    failed.push((path.clone(), e.to_string()));
                } else {
                    error!("Failed to process {}: {}", path.display(), e);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), e);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if dataset.is_empty() {
        println!(
            "{} No purchase records found; nothing written.",
            style("ℹ").blue()
        );
    } else {
        if let Some(parent) = args.output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        write_dataset(&args.output, &dataset)?;
        println!(
            "{} {} records written to {}",
            style("✓").green(),
            dataset.len(),
            args.output.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        files.len(),
        start.elapsed()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (path, err) in &failed {
            println!("  - {}: {}", path.display(), err);
        }
    }

    Ok(())
}

fn write_dataset(path: &PathBuf, dataset: &Dataset) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "fecha",
        "identificativo de ticket",
        "ubicación",
        "item",
        "categoría",
        "precio",
    ])?;

    for record in dataset.iter() {
        wtr.write_record([
            &record.format_timestamp(),
            &record.ticket_id,
            &record.location,
            &record.item,
            &record.category,
            &record.price.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
