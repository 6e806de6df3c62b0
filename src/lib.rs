//! camsync - camera offset settings panel
//!
//! Host application around [`camsync_core::SettingsSync`]: configuration,
//! keyboard mapping and the per-frame systems.

pub mod config;
pub mod input;
pub mod systems;
