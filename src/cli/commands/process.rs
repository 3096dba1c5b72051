//! Process command - window and canonicalize the mentions of a document

use crate::cli::output::{colors, format_duration, highlight_window, print_success, print_warning};
use crate::cli::OutputFormat;
use crate::core::canonical::Scorer;
use crate::core::config::Config;
use crate::core::context::Marker;
use crate::core::document::{load_document, load_mentions};
use crate::core::pipeline::{Assembly, PipelineAssembler};
use crate::core::types::{AssemblyStats, CanonicalRecord, LocationRecord, MentionFailure};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Document to process (UTF-8 text)
    pub document: PathBuf,

    /// JSON array of recognizer mentions ({raw_text, start_char, end_char})
    #[arg(long, short = 'm')]
    pub mentions: PathBuf,

    /// Tokens kept on each side of the entity
    #[arg(long, short = 'w', allow_negative_numbers = true)]
    pub window_radius: Option<i64>,

    /// Minimum similarity (0-100) for two names to share a label
    #[arg(long, short = 't', allow_negative_numbers = true)]
    pub threshold: Option<i64>,

    /// Similarity metric (jaro_winkler, levenshtein, sorensen_dice)
    #[arg(long)]
    pub scorer: Option<Scorer>,

    /// Keep line breaks instead of replacing them with spaces
    #[arg(long)]
    pub keep_newlines: bool,

    /// Only show records for this raw mention text
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Print only the deduplicated canonical labels
    #[arg(long)]
    pub targets_only: bool,

    /// Write the complete JSON report to this file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Process result response
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub generated_at: DateTime<Utc>,
    pub document: String,
    pub window_radius: i64,
    pub threshold: i64,
    pub scorer: Scorer,
    pub records: Vec<LocationRecord>,
    pub failures: Vec<MentionFailure>,
    pub clusters: Vec<CanonicalRecord>,
    pub geocoding_targets: Vec<String>,
    pub stats: AssemblyStats,
}

/// Geocoding targets response
#[derive(Debug, Serialize)]
pub struct TargetsResponse {
    pub targets: Vec<String>,
}

/// Execute the process command
pub fn execute(
    args: ProcessArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = apply_overrides(&args, config)?;

    let normalize = config.document.normalize_newlines && !args.keep_newlines;
    let document = load_document(&args.document, normalize)?;
    let mentions = load_mentions(&args.mentions)?;

    tracing::info!(
        "Processing {} mentions in {:?}",
        mentions.len(),
        args.document
    );

    let assembler = PipelineAssembler::from_config(&config)?;
    let assembly = assembler.assemble_raw(&document, &mentions);

    let mut response = build_response(&args, &config, assembly);

    // The report file always carries every record
    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&response)?;
        fs::write(path, json)
            .map_err(|e| format!("Failed to write report '{}': {}", path.display(), e))?;
        if format == OutputFormat::Human {
            print_success(&format!("Report written to {}", path.display()));
        }
    }

    if args.targets_only {
        let targets = TargetsResponse {
            targets: response.geocoding_targets,
        };
        return print_targets(&targets, format);
    }

    if let Some(raw) = &args.location {
        response.records.retain(|r| &r.block.mention_raw_text == raw);
        if response.records.is_empty() && format == OutputFormat::Human {
            print_warning(&format!("No records for mention '{raw}'"));
        }
    }

    match format {
        OutputFormat::Human => {
            let marker = Marker::new(&config.window.open_marker, &config.window.close_marker)?;
            print_human(&response, &marker);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Flags win over the loaded configuration.
fn apply_overrides(args: &ProcessArgs, config: &Config) -> crate::core::Result<Config> {
    let mut config = config.clone();

    if let Some(radius) = args.window_radius {
        config.window.radius = radius;
    }
    if let Some(threshold) = args.threshold {
        config.canonical.threshold = threshold;
    }
    if let Some(scorer) = args.scorer {
        config.canonical.scorer = scorer;
    }

    config.validate()?;
    Ok(config)
}

fn build_response(args: &ProcessArgs, config: &Config, assembly: Assembly) -> ProcessResponse {
    let geocoding_targets = assembly
        .geocoding_targets()
        .into_iter()
        .map(str::to_string)
        .collect();

    ProcessResponse {
        generated_at: Utc::now(),
        document: args.document.display().to_string(),
        window_radius: config.window.radius,
        threshold: config.canonical.threshold,
        scorer: config.canonical.scorer,
        records: assembly.records,
        failures: assembly.failures,
        clusters: assembly.canonical.records().to_vec(),
        geocoding_targets,
        stats: assembly.stats,
    }
}

fn print_targets(
    targets: &TargetsResponse,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => {
            for target in &targets.targets {
                println!("{target}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(targets)?);
        }
    }
    Ok(())
}

fn print_human(response: &ProcessResponse, marker: &Marker) {
    let stats = &response.stats;

    println!(
        "{} {} mentions from {}: {} windowed, {} failed in {}",
        colors::success("Processed"),
        colors::number(&stats.mentions.to_string()),
        colors::dim(&response.document),
        colors::number(&stats.records.to_string()),
        colors::number(&stats.failures.to_string()),
        colors::number(&format_duration(stats.duration_ms as f64 / 1000.0))
    );
    println!(
        "{} distinct mentions -> {} canonical labels",
        colors::number(&stats.distinct_mentions.to_string()),
        colors::number(&stats.distinct_labels.to_string())
    );

    for (i, record) in response.records.iter().enumerate() {
        let block = &record.block;
        let label = record.canonical_label.as_deref().unwrap_or("-");

        println!();
        println!(
            "{} {} -> {}  {}",
            colors::rank(&format!("[{i}]")),
            colors::mention(&block.mention_raw_text),
            colors::canonical(label),
            colors::dim(&format!(
                "tokens {}..={} (chars {}..{})",
                block.start_token_idx,
                block.end_token_idx,
                block.entity_start_char,
                block.entity_end_char
            ))
        );
        println!("    {}", highlight_window(&block.window_text, marker));
    }

    if !response.failures.is_empty() {
        println!();
        println!("{}", colors::label("Failures:"));
        for failure in &response.failures {
            println!(
                "  #{} '{}' ({}..{}) {}: {}",
                failure.position,
                failure.mention.raw_text,
                failure.mention.start_char,
                failure.mention.end_char,
                colors::error(&failure.kind),
                failure.message
            );
        }
    }

    if !response.geocoding_targets.is_empty() {
        println!();
        println!(
            "{} {}",
            colors::label("Geocoding targets:"),
            response.geocoding_targets.join(", ")
        );
    }
}
