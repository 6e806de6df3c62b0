//! Remote settings bridge
//!
//! The engine owns the persistent settings store. The sync core only sees it
//! through [`SettingsBridge`]: an asynchronous read and a fire-and-forget write.

use futures::future::LocalBoxFuture;
use std::fmt;

use crate::field::FieldKey;

/// Result of a remote read: `Ok(None)` when the store holds no value for the key
pub type ReadResult = Result<Option<f64>, BridgeError>;

/// Access to the remote key/value settings store
///
/// Read futures run on the single-threaded UI executor, so they need not be
/// `Send`. Writes return nothing: no acknowledgement is ever observed.
pub trait SettingsBridge {
    /// Query one setting
    fn get(&self, key: FieldKey) -> LocalBoxFuture<'static, ReadResult>;

    /// Request persistence of one setting
    fn set(&self, key: FieldKey, value: f64);
}

/// Failure reported by a bridge read
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// The engine connection went away before answering
    Disconnected,
    /// The engine answered with something that is not a number
    Decode(String),
    /// Transport-level failure
    Transport(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Disconnected => write!(f, "Bridge disconnected"),
            BridgeError::Decode(msg) => write!(f, "Bridge decode error: {}", msg),
            BridgeError::Transport(msg) => write!(f, "Bridge transport error: {}", msg),
        }
    }
}

impl std::error::Error for BridgeError {}

impl From<futures::channel::oneshot::Canceled> for BridgeError {
    fn from(_: futures::channel::oneshot::Canceled) -> Self {
        BridgeError::Disconnected
    }
}
