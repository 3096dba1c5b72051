//! Core domain logic (protocol-agnostic)
//!
//! This module contains all logic that is independent of the
//! command-line adapter.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **context**: Tokenization and context windows
//! - **canonical**: Spelling-variant clustering
//! - **pipeline**: End-to-end assembly of labelled blocks
//! - **document**: Reading documents and recognizer output

pub mod canonical;
pub mod config;
pub mod context;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{Result, ToponymError};
pub use pipeline::{Assembly, PipelineAssembler};
