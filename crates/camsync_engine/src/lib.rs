//! Engine-side settings access for camsync
//!
//! The engine's settings store is reached by sending Lua source to the game:
//!
//! - [`SettingsCommand`] - `settings.getValue` / `settings.setValue` calls as Lua text
//! - [`decode_value`] - Decoding the JSON reply of a read
//! - [`EngineTransport`] - Channel that runs Lua chunks inside the engine
//! - [`LuaBridge`] - [`camsync_core::SettingsBridge`] on top of a transport
//! - [`LocalEngine`] - In-process transport that interprets settings calls

mod command;
mod reply;
mod bridge;
mod local;

pub use command::{SettingsCommand, CommandError};
pub use reply::decode_value;
pub use bridge::{EngineTransport, LuaBridge};
pub use local::LocalEngine;
