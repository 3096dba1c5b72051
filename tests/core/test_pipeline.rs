//! End-to-end pipeline tests

use crate::common::{mentions_of, CACHIMAYO_DOC, CUZCO_DOC, MULTIBYTE_DOC};
use toponym::core::canonical::Canonicalizer;
use toponym::core::config::Config;
use toponym::core::context::{ContextWindower, Marker};
use toponym::core::document::normalize_newlines;
use toponym::{assemble, EntityMention, PipelineAssembler};

#[test]
fn test_cachimayo_document() {
    let mentions = mentions_of(CACHIMAYO_DOC, &["Cachimayo", "Cachimayu", "cachimayo", "Lima"]);
    let assembly = assemble(CACHIMAYO_DOC, &mentions);

    assert_eq!(assembly.records.len(), 4);
    assert!(assembly.failures.is_empty());

    let labels: Vec<&str> = assembly
        .records
        .iter()
        .map(|r| r.canonical_label.as_deref().unwrap())
        .collect();
    assert_eq!(labels, ["Cachimayo", "Cachimayo", "Lima", "Cachimayo"]);

    let targets: Vec<&str> = assembly.geocoding_targets().into_iter().collect();
    assert_eq!(targets, ["Cachimayo", "Lima"]);
    assert_eq!(assembly.stats.distinct_mentions, 4);
    assert_eq!(assembly.stats.distinct_labels, 2);
}

#[test]
fn test_records_follow_document_positions() {
    let mentions = mentions_of(CACHIMAYO_DOC, &["Cachimayo", "Cachimayu", "cachimayo", "Lima"]);
    let assembly = assemble(CACHIMAYO_DOC, &mentions);

    for (record, mention) in assembly.records.iter().zip(&mentions) {
        assert_eq!(record.block.mention_raw_text, mention.raw_text);
        assert_eq!(record.block.entity_start_char, mention.start_char);
        assert_eq!(record.block.entity_end_char, mention.end_char);
    }

    let starts: Vec<usize> = assembly
        .records
        .iter()
        .map(|r| r.block.start_token_idx)
        .collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}

#[test]
fn test_cuzco_repeated_mention() {
    let windower = ContextWindower::new(2).unwrap();
    let assembler = PipelineAssembler::new(windower, Canonicalizer::default());

    let assembly = assembler.assemble(CUZCO_DOC, &[EntityMention::new("Cuzco", 11, 16)]);

    assert_eq!(assembly.records[0].block.window_text, "went to <<Cuzco>> then Cuzco");
    assert_eq!(assembly.records[0].canonical_label.as_deref(), Some("Cuzco"));
}

#[test]
fn test_empty_mention_list() {
    let assembly = assemble(CACHIMAYO_DOC, &[]);

    assert!(assembly.records.is_empty());
    assert!(assembly.failures.is_empty());
    assert!(assembly.canonical.is_empty());
    assert!(assembly.geocoding_targets().is_empty());
    assert_eq!(assembly.stats.mentions, 0);
}

#[test]
fn test_bad_span_does_not_stop_the_rest() {
    let mut mentions = mentions_of(CACHIMAYO_DOC, &["Cachimayo", "Lima"]);
    mentions.insert(1, EntityMention::new("Atlantis", 5_000, 5_008));
    mentions.push(EntityMention::new("Nowhere", 9, 9));

    let assembly = assemble(CACHIMAYO_DOC, &mentions);

    assert_eq!(assembly.records.len(), 2);
    assert_eq!(assembly.failures.len(), 2);
    assert_eq!(assembly.failures[0].position, 1);
    assert_eq!(assembly.failures[0].kind, "OutOfRange");
    assert_eq!(assembly.failures[1].mention.raw_text, "Nowhere");

    // Rejected mentions are not clustered
    assert_eq!(assembly.canonical.label_for("Atlantis"), None);
    assert_eq!(assembly.stats.failures, 2);
    assert_eq!(assembly.stats.records, 2);
}

#[test]
fn test_whitespace_document_fails_every_mention() {
    let assembly = assemble("   \n  ", &[EntityMention::new("Lima", 0, 4)]);

    assert!(assembly.records.is_empty());
    assert_eq!(assembly.failures.len(), 1);
    assert_eq!(assembly.failures[0].kind, "OutOfRange");
}

#[test]
fn test_normalized_newlines_keep_offsets_valid() {
    let mentions = mentions_of(MULTIBYTE_DOC, &["Cañete", "東京"]);
    let raw = assemble(MULTIBYTE_DOC, &mentions);
    let normalized = assemble(&normalize_newlines(MULTIBYTE_DOC), &mentions);

    assert_eq!(raw.records, normalized.records);
}

#[test]
fn test_from_config_uses_markers_and_radius() {
    let mut config = Config::default();
    config.window.radius = 1;
    config.window.open_marker = "[".to_string();
    config.window.close_marker = "]".to_string();

    let assembler = PipelineAssembler::from_config(&config).unwrap();
    let assembly = assembler.assemble(CUZCO_DOC, &[EntityMention::new("Cuzco", 22, 27)]);

    assert_eq!(assembly.records[0].block.window_text, "then [Cuzco] again.");

    let marker = Marker::new("[", "]").unwrap();
    assert_eq!(
        marker.extract(&assembly.records[0].block.window_text),
        Some("Cuzco")
    );
}

#[test]
fn test_records_for_filters_by_raw_text() {
    let mentions = mentions_of(CUZCO_DOC, &["Cuzco"]);
    let assembly = assemble(CUZCO_DOC, &mentions);

    assert_eq!(assembly.records_for("Cuzco").count(), 2);
    assert_eq!(assembly.records_for("Lima").count(), 0);
}
