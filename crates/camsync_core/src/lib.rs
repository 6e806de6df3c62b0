//! Core types for camera offset settings sync
//!
//! This crate keeps six camera offsets in sync with an engine-side settings
//! store reached through an asynchronous bridge:
//!
//! - [`FieldKey`] - One of the six synchronized settings
//! - [`CameraOffsets`] - The six values as a plain record, with defaults
//! - [`Tracked`] / [`Watchers`] - Value cells with explicit change detection
//! - [`SettingsState`] - Local copy of the fields plus panel visibility
//! - [`SettingsBridge`] - Asynchronous access to the remote store
//! - [`MemoryBridge`] - In-memory store for tests and offline use
//! - [`SettingsSync`] - Hydration, change propagation and reset

mod field;
mod reactive;
mod state;
mod bridge;
mod memory;
mod sync;

pub use field::{FieldKey, FieldKeyError, FieldMask, CameraOffsets};
pub use reactive::{Change, SameValue, Tracked, WatcherKey, Watchers};
pub use state::SettingsState;
pub use bridge::{SettingsBridge, BridgeError, ReadResult};
pub use memory::MemoryBridge;
pub use sync::{SettingsSync, SyncError, on_field_changed};
