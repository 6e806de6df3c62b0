//! Input mapping from raw key events to panel actions
//!
//! The settings panel is driven from the keyboard:
//! - 1-6: select camPosX..camRotZ
//! - Up/Right, Down/Left: nudge the selected field
//! - Delete/Backspace: clear the selected field
//! - R: reset all fields to defaults
//! - H: show/hide the panel
//! - Escape: exit

use camsync_core::FieldKey;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions on the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// Make a field the target of nudge/clear
    SelectField(FieldKey),
    /// Move the selected field by this many steps
    Nudge(i32),
    /// Empty the selected field
    ClearField,
    /// Restore every field to its default
    Reset,
    /// Show or hide the panel
    ToggleVisibility,
    /// Exit application
    Exit,
}

/// Maps raw keyboard events to panel actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Editing keys only act while the panel is visible. Returns `None` for
    /// releases and unmapped keys.
    pub fn map_keyboard(
        key: KeyCode,
        state: ElementState,
        panel_visible: bool,
    ) -> Option<PanelAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => return Some(PanelAction::Exit),
            KeyCode::KeyH => return Some(PanelAction::ToggleVisibility),
            _ => {}
        }

        if !panel_visible {
            return None;
        }

        match key {
            KeyCode::Digit1 => Some(PanelAction::SelectField(FieldKey::CamPosX)),
            KeyCode::Digit2 => Some(PanelAction::SelectField(FieldKey::CamPosY)),
            KeyCode::Digit3 => Some(PanelAction::SelectField(FieldKey::CamPosZ)),
            KeyCode::Digit4 => Some(PanelAction::SelectField(FieldKey::CamRotX)),
            KeyCode::Digit5 => Some(PanelAction::SelectField(FieldKey::CamRotY)),
            KeyCode::Digit6 => Some(PanelAction::SelectField(FieldKey::CamRotZ)),
            KeyCode::ArrowUp | KeyCode::ArrowRight => Some(PanelAction::Nudge(1)),
            KeyCode::ArrowDown | KeyCode::ArrowLeft => Some(PanelAction::Nudge(-1)),
            KeyCode::Delete | KeyCode::Backspace => Some(PanelAction::ClearField),
            KeyCode::KeyR => Some(PanelAction::Reset),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_select_fields_in_order() {
        let digits = [
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
        ];
        for (digit, field) in digits.into_iter().zip(FieldKey::ALL) {
            assert_eq!(
                InputMapper::map_keyboard(digit, ElementState::Pressed, true),
                Some(PanelAction::SelectField(field))
            );
        }
    }

    #[test]
    fn test_nudge_keys() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::ArrowUp, ElementState::Pressed, true),
            Some(PanelAction::Nudge(1))
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::ArrowLeft, ElementState::Pressed, true),
            Some(PanelAction::Nudge(-1))
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::KeyR, ElementState::Released, true);
        assert_eq!(action, None);
    }

    #[test]
    fn test_hidden_panel_ignores_edits() {
        for key in [KeyCode::Digit1, KeyCode::ArrowUp, KeyCode::Delete, KeyCode::KeyR] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed, false);
            assert_eq!(action, None, "Key {:?} should not act on a hidden panel", key);
        }
    }

    #[test]
    fn test_toggle_and_exit_always_available() {
        for visible in [true, false] {
            assert_eq!(
                InputMapper::map_keyboard(KeyCode::KeyH, ElementState::Pressed, visible),
                Some(PanelAction::ToggleVisibility)
            );
            assert_eq!(
                InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed, visible),
                Some(PanelAction::Exit)
            );
        }
    }

    #[test]
    fn test_unmapped_key() {
        let action = InputMapper::map_keyboard(KeyCode::KeyW, ElementState::Pressed, true);
        assert_eq!(action, None);
    }
}
