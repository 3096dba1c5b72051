//! Canonicalize command - cluster spelling variants of place names

use crate::cli::output::{colors, print_header, print_output, print_warning};
use crate::cli::OutputFormat;
use crate::core::canonical::{Canonicalizer, Scorer};
use crate::core::config::Config;
use crate::core::document::load_names;
use crate::core::types::CanonicalRecord;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the canonicalize command
#[derive(Args, Debug)]
pub struct CanonicalizeArgs {
    /// Names to cluster, in mention order
    pub names: Vec<String>,

    /// File with one name per line (appended after NAMES)
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Minimum similarity (0-100) for two names to share a label
    #[arg(long, short = 't', allow_negative_numbers = true)]
    pub threshold: Option<i64>,

    /// Similarity metric (jaro_winkler, levenshtein, sorensen_dice)
    #[arg(long)]
    pub scorer: Option<Scorer>,
}

/// Canonicalization result response
#[derive(Debug, Serialize)]
pub struct CanonicalizeResponse {
    pub threshold: u8,
    pub scorer: Scorer,
    pub names: usize,
    pub clusters: Vec<CanonicalRecord>,
    pub labels: Vec<String>,
}

/// Execute the canonicalize command
pub fn execute(
    args: CanonicalizeArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut names: Vec<String> = args
        .names
        .into_iter()
        .filter(|name| !name.trim().is_empty())
        .collect();

    if let Some(path) = &args.input {
        names.extend(load_names(path)?);
    }

    let threshold = args.threshold.unwrap_or(config.canonical.threshold);
    let scorer = args.scorer.unwrap_or(config.canonical.scorer);
    let canonicalizer = Canonicalizer::new(threshold)?.with_scorer(scorer);

    if names.is_empty() && format == OutputFormat::Human {
        print_warning("No names given; pass NAMES or --input FILE");
    }

    let map = canonicalizer.canonicalize(names.as_slice());
    tracing::info!(
        "Clustered {} names into {} labels",
        names.len(),
        map.cluster_count()
    );

    let response = CanonicalizeResponse {
        threshold: canonicalizer.threshold(),
        scorer: canonicalizer.scorer(),
        names: names.len(),
        labels: map.labels().into_iter().map(str::to_string).collect(),
        clusters: map.records().to_vec(),
    };

    match format {
        OutputFormat::Human => {
            print_header(&format!(
                "{} names -> {} labels (threshold {}, {})",
                response.names,
                response.clusters.len(),
                response.threshold,
                response.scorer
            ));
            for cluster in &response.clusters {
                let members: Vec<&str> = cluster.members.iter().map(String::as_str).collect();
                println!(
                    "  {} <- {}",
                    colors::canonical(&cluster.canonical_label),
                    colors::mention(&members.join(", "))
                );
            }
        }
        OutputFormat::Json => print_output(&response, format),
    }

    Ok(())
}
