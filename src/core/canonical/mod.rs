//! Canonical place names.
//!
//! Groups near-duplicate spellings of mentioned places and picks a
//! single label for each group, so that downstream geocoding only
//! looks up one name per place.

pub mod canonicalizer;
pub mod similarity;

pub use canonicalizer::{canonicalize, CanonicalMap, Canonicalizer, DEFAULT_SIMILARITY_THRESHOLD};
pub use similarity::{sort_key, token_sort_similarity, Scorer};
