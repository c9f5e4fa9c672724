//! Parse command - extract fields from a single statement PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use cardstmt_core::models::config::CardstmtConfig;
use cardstmt_core::statement::StatementProcessor;
use cardstmt_core::{ExtractionError, StatementRecord};

use crate::output::{append_csv_row, csv_document};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input statement PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// CSV ledger path (default: from config)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Skip the CSV ledger append
    #[arg(long)]
    no_csv: bool,

    /// Skip OCR and use only the embedded text layer
    #[arg(long)]
    text_only: bool,

    /// Show per-field confidence scores
    #[arg(long)]
    show_confidence: bool,

    /// Validate the extracted record and report issues
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON record
    Json,
    /// Single header-plus-row CSV document
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = if let Some(path) = config_path {
        CardstmtConfig::from_file(std::path::Path::new(path))?
    } else {
        CardstmtConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let processor = if args.text_only {
        StatementProcessor::new()
            .with_min_text_length(config.pdf.min_text_length)
            .with_max_pages(config.pdf.max_pages)
    } else {
        StatementProcessor::from_config(&config)
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Processing statement...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let outcome = processor.process_path(&args.input)?;

    pb.finish_and_clear();

    if args.validate {
        let issues = outcome.record.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    // The rendering is always produced, supported or not, so consumers
    // see the unknown-issuer shape too.
    let rendering = format_record(&outcome.record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendering)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", rendering.trim_end());
    }

    for warning in &outcome.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    if args.show_confidence {
        eprintln!();
        for (field, confidence) in &outcome.field_confidence {
            eprintln!("{} {:<16} {:.2}", style("ℹ").blue(), field, confidence);
        }
        eprintln!(
            "{} processed in {}ms ({:?})",
            style("ℹ").blue(),
            outcome.processing_time_ms,
            outcome.source
        );
    }

    if !outcome.is_supported() {
        return Err(ExtractionError::UnsupportedIssuer)
            .with_context(|| format!("failed to parse {}", args.input.display()));
    }

    if !args.no_csv {
        let csv_path = args
            .csv
            .unwrap_or_else(|| config.output.results_csv.clone());
        append_csv_row(&csv_path, &outcome.record)?;
        eprintln!("{} Appended to {}", style("✓").green(), csv_path.display());
    }

    debug!("parse finished in {}ms", outcome.processing_time_ms);

    Ok(())
}

fn format_record(record: &StatementRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => csv_document(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_text(record: &StatementRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Issuer: {}\n", record.issuer));
    if let Some(last4) = &record.card_last4 {
        output.push_str(&format!("Card ending: {}\n", last4));
    }
    output.push('\n');

    output.push_str("Billing period:\n");
    output.push_str(&format!("  Start: {}\n", cell(record.billing_period.start)));
    output.push_str(&format!("  End:   {}\n", cell(record.billing_period.end)));
    output.push('\n');

    output.push_str("Amounts:\n");
    output.push_str(&format!("  New balance: {}\n", cell(record.new_balance)));
    output.push_str(&format!("  Minimum due: {}\n", cell(record.minimum_due)));

    if let Some(due) = record.payment_due_date {
        output.push_str(&format!("\nPayment due: {}\n", due));
    }
    output.push_str(&format!("\nConfidence: {:.2}\n", record.confidence));

    output
}

fn cell<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
