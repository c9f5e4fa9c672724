//! Batch command - parse every statement PDF under a directory.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use cardstmt_core::models::config::CardstmtConfig;
use cardstmt_core::statement::{ParseOutcome, StatementProcessor};

use crate::output::append_csv_row;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory or glob pattern
    #[arg(required = true)]
    input: String,

    /// Directory for per-file JSON results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// CSV ledger path (default: from config)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Stop at the first failed file
    #[arg(long)]
    fail_fast: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    outcome: Option<ParseOutcome>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = if let Some(path) = config_path {
        CardstmtConfig::from_file(std::path::Path::new(path))?
    } else {
        CardstmtConfig::default()
    };

    // A bare directory means "every PDF under it".
    let pattern = if PathBuf::from(&args.input).is_dir() {
        format!("{}/**/*.pdf", args.input.trim_end_matches('/'))
    } else {
        args.input.clone()
    };

    let files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No PDF files found for pattern: {}", pattern);
    }

    println!(
        "{} Found {} statement files",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let csv_path = args
        .csv
        .clone()
        .unwrap_or_else(|| config.output.results_csv.clone());
    let processor = StatementProcessor::from_config(&config);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let (outcome, error) = match processor.process_path(&path) {
            Ok(outcome) if outcome.is_supported() => (Some(outcome), None),
            Ok(_) => (None, Some("unsupported issuer".to_string())),
            Err(e) => (None, Some(e.to_string())),
        };

        if let Some(msg) = &error {
            if args.fail_fast {
                anyhow::bail!("Failed to process {}: {}", path.display(), msg);
            }
            warn!("failed to process {}: {}", path.display(), msg);
        }

        results.push(FileResult {
            path,
            outcome,
            error,
        });
        pb.inc(1);
    }
    pb.finish_and_clear();

    let mut parsed = 0usize;
    let mut confidence_sum = 0.0f32;

    for result in &results {
        match &result.outcome {
            Some(outcome) => {
                append_csv_row(&csv_path, &outcome.record)?;

                if let Some(ref output_dir) = args.output_dir {
                    let stem = result
                        .path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("statement");
                    let json_path = output_dir.join(format!("{stem}.json"));
                    fs::write(&json_path, serde_json::to_string_pretty(&outcome.record)?)?;
                }

                println!(
                    "{} {} [{}] confidence {:.2}",
                    style("✓").green(),
                    result.path.display(),
                    outcome.record.issuer,
                    outcome.record.confidence
                );
                parsed += 1;
                confidence_sum += outcome.record.confidence;
            }
            None => {
                println!(
                    "{} {}: {}",
                    style("✗").red(),
                    result.path.display(),
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }

    let failed = results.len() - parsed;
    println!();
    println!(
        "{} Parsed {} of {} statements in {:?}",
        style("✓").green(),
        parsed,
        results.len(),
        start.elapsed()
    );
    if parsed > 0 {
        println!(
            "   average confidence {:.2}",
            confidence_sum / parsed as f32
        );
        println!("   ledger: {}", csv_path.display());
    }
    if failed > 0 {
        println!("   {} failed", style(failed).red());
    }

    Ok(())
}
