//! In-memory settings store
//!
//! [`MemoryBridge`] stands in for the engine: it keeps values in a map, records
//! every write in dispatch order and can hold reads back until they are
//! resolved explicitly, which lets callers drive completion order.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::bridge::{BridgeError, ReadResult, SettingsBridge};
use crate::field::{CameraOffsets, FieldKey};

#[derive(Default)]
struct MemoryStore {
    values: HashMap<String, f64>,
    writes: Vec<(FieldKey, f64)>,
    reads: usize,
    deferred: bool,
    pending: Vec<(FieldKey, oneshot::Sender<ReadResult>)>,
}

/// Shared handle to an in-memory settings store
///
/// Clones share the same store, so a test can keep one handle for inspection
/// while the sync core owns another.
#[derive(Clone, Default)]
pub struct MemoryBridge {
    inner: Rc<RefCell<MemoryStore>>,
}

impl MemoryBridge {
    /// Create an empty store whose reads answer immediately
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given offsets
    pub fn with_values(offsets: CameraOffsets) -> Self {
        let bridge = Self::new();
        for (key, value) in offsets.iter() {
            bridge.insert(key, value);
        }
        bridge
    }

    /// Hold reads until [`resolve`](Self::resolve) is called
    pub fn deferred(self) -> Self {
        self.inner.borrow_mut().deferred = true;
        self
    }

    /// Store a value without recording a write
    pub fn insert(&self, key: FieldKey, value: f64) {
        self.inner.borrow_mut().values.insert(key.name().to_string(), value);
    }

    /// Current stored value
    pub fn value(&self, key: FieldKey) -> Option<f64> {
        self.inner.borrow().values.get(key.name()).copied()
    }

    /// Writes dispatched so far, oldest first
    pub fn writes(&self) -> Vec<(FieldKey, f64)> {
        self.inner.borrow().writes.clone()
    }

    /// Return and forget the writes dispatched so far
    pub fn take_writes(&self) -> Vec<(FieldKey, f64)> {
        std::mem::take(&mut self.inner.borrow_mut().writes)
    }

    /// Number of reads requested so far
    pub fn read_count(&self) -> usize {
        self.inner.borrow().reads
    }

    /// Keys of reads that are still outstanding, in request order
    pub fn pending_reads(&self) -> Vec<FieldKey> {
        self.inner.borrow().pending.iter().map(|(key, _)| *key).collect()
    }

    /// Answer the oldest outstanding read for `key` with the stored value.
    ///
    /// Returns `false` if no read for `key` is outstanding.
    pub fn resolve(&self, key: FieldKey) -> bool {
        let value = self.value(key);
        self.complete(key, Ok(value))
    }

    /// Answer the oldest outstanding read for `key` with an error
    pub fn fail(&self, key: FieldKey, error: BridgeError) -> bool {
        self.complete(key, Err(error))
    }

    /// Answer every outstanding read in request order. Returns how many.
    pub fn resolve_all(&self) -> usize {
        let keys = self.pending_reads();
        keys.into_iter().filter(|key| self.resolve(*key)).count()
    }

    fn complete(&self, key: FieldKey, result: ReadResult) -> bool {
        let sender = {
            let mut store = self.inner.borrow_mut();
            let Some(pos) = store.pending.iter().position(|(k, _)| *k == key) else {
                return false;
            };
            store.pending.remove(pos).1
        };

        // The reader may have been dropped; the answer is simply discarded then.
        let _ = sender.send(result);
        true
    }
}

impl SettingsBridge for MemoryBridge {
    fn get(&self, key: FieldKey) -> LocalBoxFuture<'static, ReadResult> {
        let mut store = self.inner.borrow_mut();
        store.reads += 1;
        log::debug!("memory store: read {}", key);

        if store.deferred {
            let (tx, rx) = oneshot::channel();
            store.pending.push((key, tx));
            async move { rx.await? }.boxed_local()
        } else {
            let value = store.values.get(key.name()).copied();
            future::ready(Ok(value)).boxed_local()
        }
    }

    fn set(&self, key: FieldKey, value: f64) {
        let mut store = self.inner.borrow_mut();
        log::debug!("memory store: write {} = {}", key, value);
        store.values.insert(key.name().to_string(), value);
        store.writes.push((key, value));
    }
}
