//! Batch command for reading many GDE documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use gde_core::models::config::GdeConfig;
use gde_core::models::record::GdeRecord;
use gde_core::GdeDocument;

use super::config::load_config;
use super::read::{format_record, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching the input PDFs
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome of reading a single file.
struct ReadResult {
    path: PathBuf,
    record: Option<GdeRecord>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to read",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = read_single_file(&path, &config);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(record) => results.push(ReadResult {
                path,
                record: Some(record),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to read {}: {}", path.display(), error_msg);
                    results.push(ReadResult {
                        path,
                        record: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to read {}: {}", path.display(), error_msg);
                    overall_pb.abandon();
                    anyhow::bail!("Reading {} failed: {}", path.display(), error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.record.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(record) = &result.record {
                write_output(output_dir, &result.path, record, args.format)?;
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Read {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn read_single_file(path: &Path, config: &GdeConfig) -> anyhow::Result<GdeRecord> {
    let document = GdeDocument::open(path, config)?;
    Ok(document.into_record())
}

fn write_output(
    output_dir: &Path,
    source: &Path,
    record: &GdeRecord,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let output_name = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));

    fs::write(&output_path, format_record(record, format)?)?;
    debug!("Wrote output to {}", output_path.display());

    Ok(())
}

fn write_summary(path: &Path, results: &[ReadResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "gde_number",
        "reference",
        "signer",
        "release_date",
        "page_count",
        "is_signed",
        "canonical_filename",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(record) = &result.record {
            let signer = record
                .signer
                .as_ref()
                .map(|s| format!("{}, {}", s.surname, s.name))
                .unwrap_or_default();

            wtr.write_record([
                filename,
                "success",
                record.gde_number.as_deref().unwrap_or_default(),
                record.reference.as_deref().unwrap_or_default(),
                signer.as_str(),
                record.release_date.map(|d| d.to_string()).unwrap_or_default().as_str(),
                record.page_count.to_string().as_str(),
                record.is_signed.to_string().as_str(),
                record.filename().unwrap_or_default().as_str(),
                result.processing_time_ms.to_string().as_str(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                result.processing_time_ms.to_string().as_str(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
