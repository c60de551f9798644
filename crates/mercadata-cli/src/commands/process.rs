//! Process command - extract records from a single receipt PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use mercadata_core::{Receipt, ReceiptPipeline};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input receipt PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let data = fs::read(&args.input)?;
    let pipeline = ReceiptPipeline::with_config(config);

    let source = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("receipt.pdf");
    let receipt = pipeline.process_document(source, &data)?;

    if receipt.records.is_empty() {
        eprintln!(
            "{} No purchase records found in {}",
            style("ℹ").blue(),
            args.input.display()
        );
    }

    let output = format_receipt(&receipt, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_receipt(receipt: &Receipt, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(receipt)?),
        OutputFormat::Csv => format_receipt_csv(receipt),
        OutputFormat::Text => Ok(format_receipt_text(receipt)),
    }
}

fn format_receipt_csv(receipt: &Receipt) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "fecha",
        "identificativo de ticket",
        "ubicación",
        "item",
        "categoría",
        "precio",
    ])?;

    for record in &receipt.records {
        wtr.write_record([
            &record.format_timestamp(),
            &record.ticket_id,
            &record.location,
            &record.item,
            &record.category,
            &record.price.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_receipt_text(receipt: &Receipt) -> String {
    let mut output = String::new();

    output.push_str(&format!("Ticket: {}\n", receipt.header.ticket_id));
    output.push_str(&format!("Fecha: {}\n", receipt.header.format_timestamp()));
    output.push_str(&format!("Ubicación: {}\n", receipt.header.location));
    output.push('\n');

    for record in &receipt.records {
        output.push_str(&format!(
            "  {:<40} {:>18} {:>8}\n",
            record.item,
            record.category,
            record.price.to_string()
        ));
    }

    output.push('\n');
    output.push_str(&format!("{} records\n", receipt.records.len()));

    output
}
