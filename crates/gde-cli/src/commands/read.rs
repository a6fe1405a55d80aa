//! Read command - extract metadata from a single GDE document.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use gde_core::models::config::GdeConfig;
use gde_core::models::record::GdeRecord;
use gde_core::GdeDocument;

use super::config::load_config;

/// Arguments for the read command.
#[derive(Args)]
pub struct ReadArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Treat the input as base64 text wrapping the PDF bytes
    #[arg(long)]
    base64: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
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

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn run(args: ReadArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Reading file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Reading document...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let document = read_document(&args, &config);
    pb.finish_and_clear();
    let document = document?;

    let output = format_record(document.record(), args.format)?;

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

fn read_document(args: &ReadArgs, config: &GdeConfig) -> anyhow::Result<GdeDocument> {
    let document = if args.base64 {
        let encoded = fs::read_to_string(&args.input)?;
        GdeDocument::from_base64(&encoded, config)?
    } else {
        GdeDocument::open(&args.input, config)?
    };
    Ok(document)
}

pub fn format_record(record: &GdeRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &GdeRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "gde_number",
        "doc_type",
        "year",
        "number",
        "extra",
        "agency",
        "section",
        "division",
        "direction",
        "department",
        "reference",
        "references",
        "signer_surname",
        "signer_name",
        "signer_second_name",
        "release_date",
        "page_count",
        "is_signed",
    ])?;

    let parsed = record.parsed_number.as_ref();
    let signer = record.signer.as_ref();
    let references = record
        .references
        .iter()
        .flatten()
        .map(|r| r.value.as_str())
        .collect::<Vec<_>>()
        .join(";");

    wtr.write_record([
        record.gde_number.as_deref().unwrap_or_default(),
        parsed.map(|n| n.doc_type()).unwrap_or_default(),
        parsed.map(|n| n.year()).unwrap_or_default(),
        parsed.map(|n| n.number()).unwrap_or_default(),
        parsed.and_then(|n| n.extra()).unwrap_or_default(),
        parsed.map(|n| n.agency()).unwrap_or_default(),
        parsed.and_then(|n| n.section()).unwrap_or_default(),
        parsed.map(|n| n.division()).unwrap_or_default(),
        parsed.map(|n| n.direction()).unwrap_or_default(),
        parsed.map(|n| n.abbreviated_department()).unwrap_or_default().as_str(),
        record.reference.as_deref().unwrap_or_default(),
        references.as_str(),
        signer.map(|s| s.surname.as_str()).unwrap_or_default(),
        signer.map(|s| s.name.as_str()).unwrap_or_default(),
        signer.and_then(|s| s.second_name.as_deref()).unwrap_or_default(),
        record.release_date.map(|d| d.to_string()).unwrap_or_default().as_str(),
        record.page_count.to_string().as_str(),
        record.is_signed.to_string().as_str(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &GdeRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Document: {}\n",
        record.gde_number.as_deref().unwrap_or("(not found)")
    ));
    if let Some(number) = &record.parsed_number {
        output.push_str(&format!("  Type: {}\n", number.doc_type()));
        output.push_str(&format!("  Year: {}\n", number.year()));
        output.push_str(&format!("  Agency: {}\n", number.agency()));
        output.push_str(&format!("  Department: {}\n", number.abbreviated_department()));
    }
    output.push('\n');

    if let Some(reference) = &record.reference {
        output.push_str(&format!("Reference: {}\n", reference));
        for id in record.references.iter().flatten() {
            output.push_str(&format!("  - {:?} {}\n", id.kind, id.value));
        }
        output.push('\n');
    }

    if let Some(signer) = &record.signer {
        output.push_str(&format!("Signer: {}, {}", signer.surname, signer.name));
        if let Some(second_name) = &signer.second_name {
            output.push_str(&format!(" {}", second_name));
        }
        output.push('\n');
    }

    if let Some(date) = record.release_date {
        output.push_str(&format!("Released: {}\n", date));
    }

    output.push_str(&format!(
        "Pages: {}{}\n",
        record.page_count,
        if record.is_signed { " (signed)" } else { "" }
    ));

    output
}
