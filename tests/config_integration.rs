//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use camsync::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("CAMSYNC_WINDOW__TITLE", "Test From Env");
    std::env::set_var("CAMSYNC_PANEL__NUDGE_STEP", "0.25");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    assert_eq!(config.panel.nudge_step, 0.25);
    std::env::remove_var("CAMSYNC_WINDOW__TITLE");
    std::env::remove_var("CAMSYNC_PANEL__NUDGE_STEP");
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("CAMSYNC_WINDOW__TITLE");

    let cwd = std::env::current_dir().unwrap();
    assert!(
        cwd.join("config/default.toml").exists(),
        "config/default.toml should ship with the crate"
    );

    let config = AppConfig::load().unwrap();
    assert_eq!(config.bridge.reply_delay_frames, 30);
    assert!(config.panel.start_visible);
}
