//! Tokenization and context window tests
//!
//! Properties checked over whole documents rather than single
//! mentions:
//! - tokens cover exactly the non-whitespace characters
//! - locate() is monotonic
//! - windows contain their entity and respect the radius
//! - character offsets survive multi-byte text

use crate::common::{mentions_of, CUZCO_DOC, MULTIBYTE_DOC};
use toponym::core::context::{build_block, ContextWindower, Marker, TokenIndex};
use toponym::EntityMention;

const SAMPLES: &[&str] = &[
    "",
    "   \n\t ",
    "Lima",
    "  leading and trailing  ",
    "Up the Amazon\nand Madeira\n\nrivers to Porto Velho.",
    MULTIBYTE_DOC,
    "🦀 crabs 🦀 at Ilo",
];

#[test]
fn test_tokens_cover_non_whitespace_exactly() {
    for doc in SAMPLES {
        let index = TokenIndex::build(doc);
        let chars: Vec<char> = doc.chars().collect();

        assert_eq!(index.char_len(), chars.len(), "char_len for {doc:?}");

        for token in index.tokens() {
            let text: String = chars[token.start..token.end].iter().collect();
            assert_eq!(text, token.text, "token text matches its span in {doc:?}");
            assert!(!token.text.chars().any(char::is_whitespace));
        }

        // Every character outside all tokens is whitespace
        let mut covered = vec![false; chars.len()];
        for token in index.tokens() {
            for slot in &mut covered[token.start..token.end] {
                assert!(!*slot, "tokens overlap in {doc:?}");
                *slot = true;
            }
        }
        for (c, covered) in chars.iter().zip(&covered) {
            assert_eq!(!c.is_whitespace(), *covered, "coverage of {c:?} in {doc:?}");
        }
    }
}

#[test]
fn test_tokens_reconstruct_words() {
    for doc in SAMPLES {
        let index = TokenIndex::build(doc);
        let words: Vec<&str> = doc.split_whitespace().collect();

        assert_eq!(index.join(0..index.len()), words.join(" "));
        for (i, token) in index.tokens().iter().enumerate() {
            assert_eq!(token.index, i);
        }
    }
}

#[test]
fn test_locate_is_monotonic() {
    for doc in SAMPLES {
        let index = TokenIndex::build(doc);
        if index.is_empty() {
            assert_eq!(index.locate(0), None);
            continue;
        }

        let mut previous = 0;
        for c in 0..index.char_len() + 3 {
            let current = index.locate(c).unwrap();
            assert!(current >= previous, "locate({c}) went backwards in {doc:?}");
            assert!(current < index.len());
            previous = current;
        }
    }
}

#[test]
fn test_windows_contain_entity_and_respect_radius() {
    let doc = "one two three four five six seven eight nine ten \
               eleven twelve thirteen fourteen fifteen";
    let index = TokenIndex::build(doc);
    let mentions = mentions_of(doc, &["one", "seven", "eleven twelve", "fifteen"]);

    for radius in [0, 1, 3, 30] {
        let windower = ContextWindower::new(radius).unwrap();
        let r = radius as usize;

        for mention in &mentions {
            let block = windower.build_block(mention, &index).unwrap();

            assert!(block.window_start_token_idx <= block.start_token_idx);
            assert!(block.start_token_idx <= block.end_token_idx);
            assert!(block.end_token_idx < block.window_end_token_idx);
            assert!(block.window_end_token_idx <= index.len());

            assert_eq!(
                block.window_start_token_idx,
                block.start_token_idx.saturating_sub(r)
            );
            assert_eq!(
                block.window_end_token_idx,
                (block.end_token_idx + r + 1).min(index.len())
            );

            let window_tokens = block.window_end_token_idx - block.window_start_token_idx;
            let entity_tokens = block.end_token_idx - block.start_token_idx + 1;
            assert!(window_tokens <= entity_tokens + 2 * r);
        }
    }
}

#[test]
fn test_window_has_exactly_one_marker() {
    let index = TokenIndex::build(CUZCO_DOC);
    let marker = Marker::default();

    for mention in mentions_of(CUZCO_DOC, &["Cuzco"]) {
        let block = build_block(&mention, &index, 30).unwrap();

        assert_eq!(block.window_text.matches("<<").count(), 1);
        assert_eq!(block.window_text.matches(">>").count(), 1);
        assert_eq!(marker.extract(&block.window_text), Some("Cuzco"));

        // Removing the marker gives back the plain window
        let plain = index.join(block.window_start_token_idx..block.window_end_token_idx);
        assert_eq!(marker.strip(&block.window_text), plain);
    }
}

#[test]
fn test_repeated_entity_marks_earliest_occurrence() {
    let index = TokenIndex::build(CUZCO_DOC);
    let second = EntityMention::new("Cuzco", 22, 27);

    let block = build_block(&second, &index, 2).unwrap();

    // Token indices still point at the second occurrence
    assert_eq!(block.start_token_idx, 5);
    assert_eq!(block.window_text, "<<Cuzco>> then Cuzco again.");
}

#[test]
fn test_multibyte_offsets_resolve_to_the_right_words() {
    let index = TokenIndex::build(MULTIBYTE_DOC);
    let mentions = mentions_of(MULTIBYTE_DOC, &["Potosí", "Cañete", "東京", "São Paulo"]);
    assert_eq!(mentions.len(), 4);

    let windows: Vec<String> = mentions
        .iter()
        .map(|m| build_block(m, &index, 1).unwrap().window_text)
        .collect();

    assert_eq!(windows[0], "De <<Potosí>> a");
    // Partial token spans expand to the whole word, punctuation included
    assert_eq!(windows[1], "a <<Cañete,>> luego");
    assert_eq!(windows[2], "luego <<東京>> y");
    assert_eq!(windows[3], "y <<São Paulo.>>");
}

#[test]
fn test_offsets_at_document_edges() {
    let index = TokenIndex::build(MULTIBYTE_DOC);
    let len = index.char_len();

    let last = EntityMention::new("Paulo.", len - 6, len);
    let block = build_block(&last, &index, 0).unwrap();
    assert_eq!(block.window_text, "<<Paulo.>>");

    let past_end = EntityMention::new("Paulo.", len - 5, len + 1);
    let err = build_block(&past_end, &index, 0).unwrap_err();
    assert!(err.is_out_of_range());
}
