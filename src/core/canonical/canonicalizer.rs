//! Greedy clustering of place-name spelling variants.
//!
//! Each mention is compared, in input order, against the
//! *representative* (first-seen string) of every existing cluster
//! in creation order. It joins the first cluster scoring at or
//! above the threshold, otherwise it seeds a new cluster. There is
//! no backtracking and earlier members other than the
//! representative are never consulted, so the result depends on
//! the input order. Cost is O(n * k) for k clusters.
//!
//! Labels are chosen only after every mention is assigned: the
//! most frequent member of each cluster, ties going to the string
//! seen first.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::core::canonical::Scorer;
use crate::core::error::{Result, ToponymError};
use crate::core::types::CanonicalRecord;

/// Default minimum similarity (0-100) for joining a cluster
pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 90;

/// Mutable accumulator used during the clustering pass only
#[derive(Debug)]
struct Cluster<'a> {
    representative: &'a str,
    members: Vec<&'a str>,
}

impl<'a> Cluster<'a> {
    fn seed(mention: &'a str) -> Self {
        Self {
            representative: mention,
            members: vec![mention],
        }
    }

    /// Most frequent member; the earliest wins a tie.
    fn label(&self) -> &'a str {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for &member in &self.members {
            *counts.entry(member).or_default() += 1;
        }

        let mut best = self.representative;
        let mut best_count = 0;
        for &member in &self.members {
            let count = counts[&member];
            if count > best_count {
                best = member;
                best_count = count;
            }
        }
        best
    }

    fn into_record(self) -> CanonicalRecord {
        CanonicalRecord {
            canonical_label: self.label().to_string(),
            members: self.members.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Mapping from every raw mention string to its canonical record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CanonicalMap {
    /// One record per cluster, in cluster creation order
    records: Vec<CanonicalRecord>,

    #[serde(skip)]
    by_member: HashMap<String, usize>,
}

impl CanonicalMap {
    fn from_records(records: Vec<CanonicalRecord>) -> Self {
        let by_member = records
            .iter()
            .enumerate()
            .flat_map(|(i, record)| record.members.iter().map(move |m| (m.clone(), i)))
            .collect();

        Self { records, by_member }
    }

    /// Canonical label for a raw mention string.
    pub fn label_for(&self, raw: &str) -> Option<&str> {
        self.record_for(raw).map(|r| r.canonical_label.as_str())
    }

    pub fn record_for(&self, raw: &str) -> Option<&CanonicalRecord> {
        self.by_member.get(raw).map(|&i| &self.records[i])
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    /// Deduplicated canonical labels, e.g. for geocoding lookups.
    pub fn labels(&self) -> BTreeSet<&str> {
        self.records
            .iter()
            .map(|r| r.canonical_label.as_str())
            .filter(|label| !label.trim().is_empty())
            .collect()
    }

    /// Number of distinct raw strings mapped.
    pub fn len(&self) -> usize {
        self.by_member.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_member.is_empty()
    }

    /// Number of clusters.
    pub fn cluster_count(&self) -> usize {
        self.records.len()
    }
}

/// Assigns canonical labels to spelling variants.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    threshold: u8,
    scorer: Scorer,
}

impl Canonicalizer {
    /// Create a canonicalizer; `threshold` must lie in `[0, 100]`.
    pub fn new(threshold: i64) -> Result<Self> {
        let threshold = u8::try_from(threshold)
            .ok()
            .filter(|t| *t <= 100)
            .ok_or_else(|| {
                ToponymError::InvalidConfiguration(format!(
                    "Similarity threshold must be within 0..=100, got {threshold}"
                ))
            })?;

        Ok(Self {
            threshold,
            scorer: Scorer::default(),
        })
    }

    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn scorer(&self) -> Scorer {
        self.scorer
    }

    /// Cluster `mentions` in order and label each cluster.
    ///
    /// Callers should drop blank strings first. An empty slice
    /// yields an empty map.
    pub fn canonicalize<S: AsRef<str>>(&self, mentions: &[S]) -> CanonicalMap {
        let threshold = f64::from(self.threshold);
        let mut clusters: Vec<Cluster<'_>> = Vec::new();

        for mention in mentions {
            let mention: &str = mention.as_ref();
            let matched = clusters
                .iter_mut()
                .find(|c| self.scorer.score(mention, c.representative) >= threshold);

            match matched {
                Some(cluster) => cluster.members.push(mention),
                None => {
                    tracing::debug!("New cluster #{} seeded by '{}'", clusters.len(), mention);
                    clusters.push(Cluster::seed(mention));
                }
            }
        }

        tracing::info!(
            "Canonicalized {} mentions into {} clusters (threshold {}, {})",
            mentions.len(),
            clusters.len(),
            self.threshold,
            self.scorer
        );

        CanonicalMap::from_records(clusters.into_iter().map(Cluster::into_record).collect())
    }
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            scorer: Scorer::default(),
        }
    }
}

/// Canonicalize with the default scorer.
pub fn canonicalize<S: AsRef<str>>(mentions: &[S], threshold: i64) -> Result<CanonicalMap> {
    Ok(Canonicalizer::new(threshold)?.canonicalize(mentions))
}
