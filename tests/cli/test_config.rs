//! Tests for the show-config command and configuration loading
//!
//! Loading reads process-wide environment variables, so those tests
//! run serially.

use serial_test::serial;
use std::env;
use tempfile::TempDir;
use toponym::cli::commands::config::{execute, ConfigArgs};
use toponym::cli::OutputFormat;
use toponym::core::canonical::Scorer;
use toponym::core::config::Config;
use toponym::core::xdg::XdgDirs;

const ENV_VARS: &[&str] = &[
    "TOPONYM_CONFIG",
    "TOPONYM_CONFIG_DIR",
    "TOPONYM_CONFIG_FILE",
    "TOPONYM_WINDOW_RADIUS",
    "TOPONYM_OPEN_MARKER",
    "TOPONYM_CLOSE_MARKER",
    "TOPONYM_THRESHOLD",
    "TOPONYM_SCORER",
    "TOPONYM_NORMALIZE_NEWLINES",
];

fn clear_env_vars() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

fn xdg_in(dir: &TempDir) -> XdgDirs {
    XdgDirs {
        config_dir: dir.path().to_path_buf(),
    }
}

#[test]
#[serial]
fn test_show_config_both_formats() {
    clear_env_vars();
    let dir = TempDir::new().unwrap();
    let xdg = xdg_in(&dir);

    assert!(execute(ConfigArgs {}, &Config::default(), &xdg, OutputFormat::Human).is_ok());
    assert!(execute(ConfigArgs {}, &Config::default(), &xdg, OutputFormat::Json).is_ok());
}

#[test]
#[serial]
fn test_load_from_xdg_config_file() {
    clear_env_vars();
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[window]\nradius = 5\n\n[canonical]\nscorer = \"sorensen_dice\"\n",
    )
    .unwrap();

    let config = Config::load_with_xdg(&xdg_in(&dir)).unwrap();

    assert_eq!(config.window.radius, 5);
    assert_eq!(config.canonical.scorer, Scorer::SorensenDice);
    assert_eq!(config.canonical.threshold, 90);
}

#[test]
#[serial]
fn test_env_overrides_config_file() {
    clear_env_vars();
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[window]\nradius = 5\n").unwrap();
    env::set_var("TOPONYM_WINDOW_RADIUS", "7");
    env::set_var("TOPONYM_THRESHOLD", "80");

    let config = Config::load_with_xdg(&xdg_in(&dir)).unwrap();

    assert_eq!(config.window.radius, 7);
    assert_eq!(config.canonical.threshold, 80);

    clear_env_vars();
}

#[test]
#[serial]
fn test_explicit_config_path_wins() {
    clear_env_vars();
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[window]\nradius = 5\n").unwrap();
    let explicit = dir.path().join("explicit.toml");
    std::fs::write(&explicit, "[window]\nradius = 12\n").unwrap();
    env::set_var("TOPONYM_CONFIG", &explicit);

    let config = Config::load_with_xdg(&xdg_in(&dir)).unwrap();
    assert_eq!(config.window.radius, 12);

    clear_env_vars();
}

#[test]
#[serial]
fn test_invalid_config_file_is_rejected() {
    clear_env_vars();
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[canonical]\nthreshold = 150\n").unwrap();

    let err = Config::load_with_xdg(&xdg_in(&dir)).unwrap_err();
    assert!(err.is_invalid_configuration());
}
