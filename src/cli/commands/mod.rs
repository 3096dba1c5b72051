//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.

pub mod canonicalize;
pub mod completions;
pub mod config;
pub mod process;

// Re-export argument types for use in mod.rs
pub use canonicalize::CanonicalizeArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use process::ProcessArgs;
