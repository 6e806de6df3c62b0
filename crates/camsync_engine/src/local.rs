//! In-process engine stand-in
//!
//! [`LocalEngine`] interprets settings commands against a local table, so the
//! Lua bridge can run without a game attached. Replies can be held back and
//! released with [`LocalEngine::flush`] to mimic the engine answering on a
//! later frame.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{self, FutureExt, LocalBoxFuture};

use camsync_core::{BridgeError, CameraOffsets};

use crate::bridge::EngineTransport;
use crate::command::SettingsCommand;

type Reply = Result<String, BridgeError>;

#[derive(Default)]
struct EngineState {
    settings: HashMap<String, f64>,
    /// Every chunk received, in order
    history: Vec<String>,
    deferred: bool,
    queued: Vec<(String, oneshot::Sender<Reply>)>,
}

impl EngineState {
    fn run(&mut self, chunk: &str) -> Reply {
        let command = SettingsCommand::parse(chunk)
            .map_err(|e| BridgeError::Transport(e.to_string()))?;

        match command {
            SettingsCommand::GetValue { key } => Ok(match self.settings.get(&key) {
                Some(value) => serde_json::to_string(value)
                    .map_err(|e| BridgeError::Transport(e.to_string()))?,
                None => "null".to_string(),
            }),
            SettingsCommand::SetValue { key, value } => {
                self.settings.insert(key, value);
                Ok("null".to_string())
            }
        }
    }
}

/// Shared handle to an in-process settings engine
#[derive(Clone, Default)]
pub struct LocalEngine {
    inner: Rc<RefCell<EngineState>>,
}

impl LocalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine whose settings table holds `offsets`
    pub fn with_offsets(offsets: CameraOffsets) -> Self {
        let engine = Self::new();
        {
            let mut state = engine.inner.borrow_mut();
            for (key, value) in offsets.iter() {
                state.settings.insert(key.name().to_string(), value);
            }
        }
        engine
    }

    /// Hold replies to executed chunks until [`flush`](Self::flush)
    pub fn deferred(self) -> Self {
        self.inner.borrow_mut().deferred = true;
        self
    }

    /// Value of a setting in the engine table
    pub fn setting(&self, name: &str) -> Option<f64> {
        self.inner.borrow().settings.get(name).copied()
    }

    /// Chunks received so far
    pub fn history(&self) -> Vec<String> {
        self.inner.borrow().history.clone()
    }

    /// Number of executed chunks waiting for a reply
    pub fn queued(&self) -> usize {
        self.inner.borrow().queued.len()
    }

    /// Evaluate held chunks in arrival order and send their replies.
    ///
    /// Returns how many were answered.
    pub fn flush(&self) -> usize {
        let queued = std::mem::take(&mut self.inner.borrow_mut().queued);
        let count = queued.len();
        for (chunk, reply) in queued {
            let result = self.inner.borrow_mut().run(&chunk);
            let _ = reply.send(result);
        }
        count
    }
}

impl EngineTransport for LocalEngine {
    fn execute(&self, chunk: String) -> LocalBoxFuture<'static, Reply> {
        let mut state = self.inner.borrow_mut();
        state.history.push(chunk.clone());

        if state.deferred {
            let (tx, rx) = oneshot::channel();
            state.queued.push((chunk, tx));
            async move { rx.await? }.boxed_local()
        } else {
            future::ready(state.run(&chunk)).boxed_local()
        }
    }

    fn send(&self, chunk: String) {
        let mut state = self.inner.borrow_mut();
        state.history.push(chunk.clone());
        if let Err(e) = state.run(&chunk) {
            log::warn!("Engine rejected {}: {}", chunk, e);
        }
    }
}
