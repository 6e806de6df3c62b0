//! Settings bridge over the engine's Lua command channel

use futures::future::{FutureExt, LocalBoxFuture};

use camsync_core::{BridgeError, FieldKey, ReadResult, SettingsBridge};

use crate::command::SettingsCommand;
use crate::reply::decode_value;

/// Channel that runs Lua chunks inside the engine
pub trait EngineTransport {
    /// Run a chunk and resolve with the JSON encoding of its result
    fn execute(&self, chunk: String) -> LocalBoxFuture<'static, Result<String, BridgeError>>;

    /// Run a chunk, ignoring its result
    fn send(&self, chunk: String);
}

/// [`SettingsBridge`] that talks to the engine's `settings` Lua module
pub struct LuaBridge<T> {
    transport: T,
}

impl<T: EngineTransport> LuaBridge<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: EngineTransport> SettingsBridge for LuaBridge<T> {
    fn get(&self, key: FieldKey) -> LocalBoxFuture<'static, ReadResult> {
        let chunk = SettingsCommand::get(key).to_lua();
        log::debug!("engine <- {}", chunk);
        let reply = self.transport.execute(chunk);
        async move { decode_value(&reply.await?) }.boxed_local()
    }

    fn set(&self, key: FieldKey, value: f64) {
        let chunk = SettingsCommand::set(key, value).to_lua();
        log::debug!("engine <- {}", chunk);
        self.transport.send(chunk);
    }
}
