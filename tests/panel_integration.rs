//! Integration tests for the keyboard-driven settings panel
//!
//! Feeds key presses through the InputMapper into the SyncSystem, frame by
//! frame, without opening a window.

use camsync::config::AppConfig;
use camsync::input::{InputMapper, PanelAction};
use camsync::systems::{format_panel, SyncSystem};
use camsync_core::{CameraOffsets, FieldKey};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

fn system_with_seed(seed: CameraOffsets, delay: u32) -> SyncSystem {
    let mut config = AppConfig::default();
    config.bridge.seed = seed;
    config.bridge.reply_delay_frames = delay;
    SyncSystem::new(&config).unwrap()
}

/// Press a key and run one frame. Returns the action taken, if any.
fn press(system: &mut SyncSystem, key: KeyCode) -> Option<PanelAction> {
    let action = InputMapper::map_keyboard(key, ElementState::Pressed, system.visible());
    if let Some(action) = action {
        system.apply(action);
    }
    system.update();
    action
}

fn writes(system: &SyncSystem) -> Vec<String> {
    system
        .engine()
        .history()
        .into_iter()
        .filter(|chunk| chunk.starts_with("settings.setValue"))
        .collect()
}

#[test]
fn test_panel_shows_hydrated_values_after_delay() {
    let seed = CameraOffsets::DEFAULT.with(FieldKey::CamPosX, 1.5);
    let mut system = system_with_seed(seed, 2);

    system.update();
    assert!(format_panel(&system.values(), system.selected()).contains("[camPosX: --]"));

    system.update();
    let text = format_panel(&system.values(), system.selected());
    assert!(text.contains("[camPosX: 1.50]"));
    assert!(text.contains("camRotX: 7.50"));
    assert!(writes(&system).is_empty());
}

#[test]
fn test_select_nudge_and_reset() {
    let seed = CameraOffsets::DEFAULT.with(FieldKey::CamPosX, 1.5);
    let mut system = system_with_seed(seed, 0);
    system.update();

    press(&mut system, KeyCode::ArrowUp);
    press(&mut system, KeyCode::ArrowUp);
    assert_eq!(
        writes(&system),
        vec![
            r#"settings.setValue("camPosX",1.6)"#,
            r#"settings.setValue("camPosX",1.7)"#,
        ]
    );

    press(&mut system, KeyCode::Digit4);
    press(&mut system, KeyCode::ArrowDown);
    assert_eq!(system.engine().setting("camRotX"), Some(7.4));

    press(&mut system, KeyCode::KeyR);
    assert_eq!(writes(&system).len(), 3 + 6);
    for key in FieldKey::ALL {
        assert_eq!(system.engine().setting(key.name()), Some(key.default_value()));
    }
}

#[test]
fn test_clear_then_nudge() {
    let mut system = system_with_seed(CameraOffsets::DEFAULT, 0);
    system.update();

    press(&mut system, KeyCode::Digit5);
    press(&mut system, KeyCode::Delete);
    assert_eq!(system.values()[4], None);
    assert!(writes(&system).is_empty());

    // A cleared field nudges from its default
    press(&mut system, KeyCode::ArrowUp);
    assert_eq!(system.values()[4], Some(1.1));
    assert_eq!(writes(&system), vec![r#"settings.setValue("camRotY",1.1)"#]);
}

#[test]
fn test_hidden_panel_blocks_edits() {
    let mut system = system_with_seed(CameraOffsets::DEFAULT, 0);
    system.update();

    assert_eq!(press(&mut system, KeyCode::KeyH), Some(PanelAction::ToggleVisibility));
    assert!(!system.visible());
    assert_eq!(press(&mut system, KeyCode::ArrowUp), None);
    assert_eq!(press(&mut system, KeyCode::KeyR), None);
    assert!(writes(&system).is_empty());

    press(&mut system, KeyCode::KeyH);
    assert!(system.visible());
}

#[test]
fn test_nudge_after_reset_survives_late_replies() {
    let seed = CameraOffsets::DEFAULT.with(FieldKey::CamPosX, 4.0);
    let mut system = system_with_seed(seed, 30);

    press(&mut system, KeyCode::KeyR);
    press(&mut system, KeyCode::ArrowUp);
    assert_eq!(system.values()[0], Some(0.1));
    assert_eq!(writes(&system).len(), 7);
    assert_eq!(writes(&system)[6], r#"settings.setValue("camPosX",0.1)"#);

    for _ in 0..30 {
        system.update();
    }
    assert_eq!(system.values()[0], Some(0.1));
    assert_eq!(system.engine().setting("camPosX"), Some(0.1));
    assert_eq!(writes(&system).len(), 7);
}
