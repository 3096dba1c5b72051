//! Core data types for toponym.
//!
//! This module defines the data structures passed between the
//! pipeline stages: tokens, NER mentions, context blocks,
//! canonical records and the per-run failure and statistics
//! records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::error::ToponymError;

/// A single whitespace-delimited word of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The word text (never contains whitespace)
    pub text: String,

    /// Character offset where the token starts (inclusive)
    pub start: usize,

    /// Character offset where the token ends (exclusive)
    pub end: usize,

    /// Position in the token sequence
    pub index: usize,
}

/// A location mention produced by the external entity recognizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMention {
    /// Mention text as reported by the recognizer
    pub raw_text: String,

    /// Character offset of the first character (inclusive)
    pub start_char: usize,

    /// Character offset past the last character (exclusive)
    pub end_char: usize,
}

impl EntityMention {
    pub fn new(raw_text: impl Into<String>, start_char: usize, end_char: usize) -> Self {
        Self {
            raw_text: raw_text.into(),
            start_char,
            end_char,
        }
    }
}

/// A recognizer span as read from disk, before its offsets are checked
///
/// Offsets are signed so that one negative span fails only its own
/// mention instead of the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMention {
    pub raw_text: String,
    pub start_char: i64,
    pub end_char: i64,
}

impl RawMention {
    pub fn new(raw_text: impl Into<String>, start_char: i64, end_char: i64) -> Self {
        Self {
            raw_text: raw_text.into(),
            start_char,
            end_char,
        }
    }
}

impl From<&EntityMention> for RawMention {
    fn from(mention: &EntityMention) -> Self {
        Self {
            raw_text: mention.raw_text.clone(),
            start_char: i64::try_from(mention.start_char).unwrap_or(i64::MAX),
            end_char: i64::try_from(mention.end_char).unwrap_or(i64::MAX),
        }
    }
}

impl TryFrom<&RawMention> for EntityMention {
    type Error = ToponymError;

    fn try_from(raw: &RawMention) -> Result<Self, Self::Error> {
        match (usize::try_from(raw.start_char), usize::try_from(raw.end_char)) {
            (Ok(start), Ok(end)) => Ok(EntityMention::new(raw.raw_text.clone(), start, end)),
            _ => Err(ToponymError::NegativeOffset {
                start: raw.start_char,
                end: raw.end_char,
            }),
        }
    }
}

/// Word-bounded context window around one mention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBlock {
    /// Raw mention text this block was built for
    pub mention_raw_text: String,

    /// Window tokens joined by single spaces, entity marked once
    pub window_text: String,

    /// Index of the entity's first token
    pub start_token_idx: usize,

    /// Index of the entity's last token (inclusive)
    pub end_token_idx: usize,

    /// First token of the window (inclusive)
    pub window_start_token_idx: usize,

    /// Token after the end of the window (exclusive)
    pub window_end_token_idx: usize,

    /// Entity span in character offsets, as supplied
    pub entity_start_char: usize,
    pub entity_end_char: usize,
}

/// One cluster of spelling variants and the label chosen for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Most frequent member (ties go to the earliest seen)
    pub canonical_label: String,

    /// Distinct raw strings assigned to the cluster
    pub members: BTreeSet<String>,
}

/// A context block annotated with its canonical place name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(flatten)]
    pub block: ContextBlock,

    /// `None` only when the raw mention text is blank
    pub canonical_label: Option<String>,
}

/// A mention that could not be windowed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionFailure {
    /// Position of the mention in the input list
    pub position: usize,

    /// The offending mention, offsets as supplied
    pub mention: RawMention,

    /// Violated contract (e.g. `OutOfRange`)
    pub kind: String,

    /// Human-readable description
    pub message: String,
}

/// Counts reported after a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyStats {
    /// Mentions received
    pub mentions: usize,

    /// Records produced
    pub records: usize,

    /// Mentions rejected
    pub failures: usize,

    /// Distinct raw mention strings that were clustered
    pub distinct_mentions: usize,

    /// Distinct canonical labels (geocoding lookups needed)
    pub distinct_labels: usize,

    /// Pipeline duration in milliseconds
    pub duration_ms: u64,
}
