//! Tokenization and context windows.
//!
//! Maps between character offsets and word-token indices and
//! builds the context block for each entity mention:
//!
//! - Character-offset tokenization that is safe on multi-byte
//!   UTF-8 text
//! - O(log n) offset lookup
//! - Windows clipped to the document that always contain the
//!   whole entity

pub mod tokens;
pub mod windower;

pub use tokens::TokenIndex;
pub use windower::{build_block, ContextWindower, Marker, DEFAULT_WINDOW_RADIUS};
