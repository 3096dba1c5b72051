//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::config::{CanonicalConfig, Config, DocumentConfig, WindowConfig};
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_file: String,
    pub config_file_exists: bool,
    pub window: WindowConfig,
    pub canonical: CanonicalConfig,
    pub document: DocumentConfig,
}

/// Execute the config command
pub fn execute(
    _args: ConfigArgs,
    config: &Config,
    xdg: &XdgDirs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config_file = xdg.config_file();

    let response = ConfigResponse {
        config_file: config_file.to_string_lossy().into_owned(),
        config_file_exists: config_file.exists(),
        window: config.window.clone(),
        canonical: config.canonical.clone(),
        document: config.document.clone(),
    };

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!(
                "  config_file: {}{}",
                response.config_file,
                if response.config_file_exists {
                    ""
                } else {
                    " (not found)"
                }
            );
            println!("  window:");
            println!("    radius: {}", response.window.radius);
            println!("    open_marker: {}", response.window.open_marker);
            println!("    close_marker: {}", response.window.close_marker);
            println!("  canonical:");
            println!("    threshold: {}", response.canonical.threshold);
            println!("    scorer: {}", response.canonical.scorer);
            println!("  document:");
            println!(
                "    normalize_newlines: {}",
                response.document.normalize_newlines
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
