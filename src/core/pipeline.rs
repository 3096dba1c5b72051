//! Pipeline orchestration.
//!
//! Runs the stages over one document, strictly in sequence:
//! 1. Tokenize the document
//! 2. Build a context block per mention
//! 3. Canonicalize the raw texts of all windowed mentions
//! 4. Attach canonical labels to the blocks

use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Instant;

use crate::core::canonical::{CanonicalMap, Canonicalizer, Scorer};
use crate::core::config::Config;
use crate::core::context::{ContextWindower, Marker, TokenIndex};
use crate::core::error::Result;
use crate::core::types::{
    AssemblyStats, EntityMention, LocationRecord, MentionFailure, RawMention,
};

/// Everything produced by one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct Assembly {
    /// One record per successfully windowed mention, in input order
    pub records: Vec<LocationRecord>,

    /// Mentions that were rejected, in input order
    pub failures: Vec<MentionFailure>,

    /// Raw text to canonical label mapping
    pub canonical: CanonicalMap,

    pub stats: AssemblyStats,
}

impl Assembly {
    /// Deduplicated canonical labels to hand to a geocoder.
    pub fn geocoding_targets(&self) -> BTreeSet<&str> {
        self.canonical.labels()
    }

    /// Records whose raw mention text equals `raw`.
    pub fn records_for<'a>(&'a self, raw: &'a str) -> impl Iterator<Item = &'a LocationRecord> {
        self.records
            .iter()
            .filter(move |r| r.block.mention_raw_text == raw)
    }
}

/// Composes tokenization, windowing and canonicalization
#[derive(Debug, Clone, Default)]
pub struct PipelineAssembler {
    windower: ContextWindower,
    canonicalizer: Canonicalizer,
}

impl PipelineAssembler {
    pub fn new(windower: ContextWindower, canonicalizer: Canonicalizer) -> Self {
        Self {
            windower,
            canonicalizer,
        }
    }

    /// Build the stages from validated configuration values
    pub fn from_config(config: &Config) -> Result<Self> {
        let marker = Marker::new(&config.window.open_marker, &config.window.close_marker)?;
        let windower = ContextWindower::new(config.window.radius)?.with_marker(marker);
        let scorer: Scorer = config.canonical.scorer;
        let canonicalizer = Canonicalizer::new(config.canonical.threshold)?.with_scorer(scorer);

        Ok(Self::new(windower, canonicalizer))
    }

    pub fn windower(&self) -> &ContextWindower {
        &self.windower
    }

    pub fn canonicalizer(&self) -> &Canonicalizer {
        &self.canonicalizer
    }

    /// Run the pipeline over one document.
    ///
    /// A mention that cannot be windowed is reported in
    /// `failures` and left out of both the records and the
    /// clustering; the remaining mentions are still processed.
    /// An empty mention list produces an empty assembly.
    pub fn assemble(&self, document: &str, mentions: &[EntityMention]) -> Assembly {
        let raw: Vec<RawMention> = mentions.iter().map(RawMention::from).collect();
        self.assemble_raw(document, &raw)
    }

    /// Run the pipeline over recognizer output whose offsets have
    /// not been checked yet. A negative offset fails its own
    /// mention with kind `OutOfRange`.
    pub fn assemble_raw(&self, document: &str, mentions: &[RawMention]) -> Assembly {
        let start = Instant::now();

        // Step 1: Tokenize once
        let index = TokenIndex::build(document);

        // Step 2: Window every mention
        let mut blocks = Vec::with_capacity(mentions.len());
        let mut failures = Vec::new();

        for (position, mention) in mentions.iter().enumerate() {
            if position % 1000 == 0 && position > 0 {
                tracing::info!("Progress: {}/{} mentions windowed", position, mentions.len());
            }

            let block = EntityMention::try_from(mention)
                .and_then(|checked| self.windower.build_block(&checked, &index));

            match block {
                Ok(block) => blocks.push(block),
                Err(e) => {
                    tracing::warn!(
                        "Skipping mention #{} '{}' ({}..{}): {}",
                        position,
                        mention.raw_text,
                        mention.start_char,
                        mention.end_char,
                        e
                    );
                    failures.push(MentionFailure {
                        position,
                        mention: mention.clone(),
                        kind: e.kind().to_string(),
                        message: e.message(),
                    });
                }
            }
        }

        // Step 3: Cluster all raw texts at once; blank ones have no label
        let canonical = {
            let raw_texts: Vec<&str> = blocks
                .iter()
                .map(|b| b.mention_raw_text.as_str())
                .filter(|raw| !raw.trim().is_empty())
                .collect();
            self.canonicalizer.canonicalize(&raw_texts)
        };

        // Step 4: Attach labels by raw text
        let records: Vec<LocationRecord> = blocks
            .into_iter()
            .map(|block| {
                let canonical_label = canonical
                    .label_for(&block.mention_raw_text)
                    .map(str::to_string);
                LocationRecord {
                    block,
                    canonical_label,
                }
            })
            .collect();

        let duration_ms = start.elapsed().as_millis() as u64;

        let stats = AssemblyStats {
            mentions: mentions.len(),
            records: records.len(),
            failures: failures.len(),
            distinct_mentions: canonical.len(),
            distinct_labels: canonical.labels().len(),
            duration_ms,
        };

        tracing::info!(
            "Assembly complete: {} records, {} failed, {} distinct mentions \
             -> {} canonical labels in {}ms",
            stats.records,
            stats.failures,
            stats.distinct_mentions,
            stats.distinct_labels,
            duration_ms
        );

        Assembly {
            records,
            failures,
            canonical,
            stats,
        }
    }
}

/// Run the pipeline with default radius, markers and threshold.
pub fn assemble(document: &str, mentions: &[EntityMention]) -> Assembly {
    PipelineAssembler::default().assemble(document, mentions)
}
