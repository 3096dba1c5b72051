//! toponym - context windows and canonical names for place mentions
//!
//! Takes a document plus the location mentions an entity
//! recognizer found in it (text and character offsets) and
//! produces:
//!
//! - a word-bounded context window around each mention, with the
//!   entity marked, for downstream classification
//! - one canonical label per place mentioned under several
//!   spellings, for downstream geocoding
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - context (token index, windower)
//!   - canonical (similarity, greedy clustering)
//!   - pipeline (assembler)
//!   - config, error, types, document, xdg
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Example
//!
//! ```
//! use toponym::core::pipeline::assemble;
//! use toponym::core::types::EntityMention;
//!
//! let document = "He went to Cuzco then Cuzco again.";
//! let assembly = assemble(document, &[EntityMention::new("Cuzco", 11, 16)]);
//!
//! assert_eq!(assembly.records[0].canonical_label.as_deref(), Some("Cuzco"));
//! assert!(assembly.records[0].block.window_text.contains("<<Cuzco>>"));
//! ```

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{Result, ToponymError};
pub use crate::core::pipeline::{assemble, Assembly, PipelineAssembler};
pub use crate::core::types::*;
