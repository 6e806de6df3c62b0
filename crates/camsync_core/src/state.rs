//! Local settings state
//!
//! [`SettingsState`] holds one [`Tracked`] cell per [`FieldKey`] plus the
//! panel visibility flag. Hydration results are queued and applied by
//! [`SettingsState::digest`], which also runs change detection and notifies
//! the registered watchers.

use std::collections::VecDeque;
use std::mem;

use crate::field::{CameraOffsets, FieldKey, FieldMask};
use crate::reactive::{Change, Tracked, WatcherKey, Watchers};

/// Local copy of the six camera offsets
pub struct SettingsState {
    fields: [Tracked<f64>; 6],
    visible: bool,
    /// Fields edited since the last digest
    dirty: FieldMask,
    /// Hydration results waiting for the next digest, in arrival order
    pending: VecDeque<(FieldKey, Option<f64>)>,
    watchers: Watchers<FieldKey, f64>,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsState {
    /// Create a visible state with every field unset
    pub fn new() -> Self {
        Self {
            fields: [Tracked::new(); 6],
            visible: true,
            dirty: FieldMask::NONE,
            pending: VecDeque::new(),
            watchers: Watchers::new(),
        }
    }

    /// Set the initial visibility
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    // --- Fields ---

    /// Current value of a field, `None` while unset
    pub fn field(&self, key: FieldKey) -> Option<f64> {
        self.fields[key.index()].get()
    }

    /// Whether the remote read for a field has been applied
    pub fn is_hydrated(&self, key: FieldKey) -> bool {
        self.fields[key.index()].is_hydrated()
    }

    /// Whether every field has been hydrated
    pub fn is_fully_hydrated(&self) -> bool {
        self.fields.iter().all(Tracked::is_hydrated)
    }

    /// All six values in [`FieldKey::ALL`] order
    pub fn values(&self) -> [Option<f64>; 6] {
        self.fields.map(|cell| cell.get())
    }

    /// The six values, or `None` if any field is unset
    pub fn snapshot(&self) -> Option<CameraOffsets> {
        let mut offsets = CameraOffsets::DEFAULT;
        for key in FieldKey::ALL {
            offsets.set(key, self.field(key)?);
        }
        Some(offsets)
    }

    /// Local edit, picked up by the next digest
    pub fn set_field(&mut self, key: FieldKey, value: Option<f64>) {
        if self.fields[key.index()].assign(value) {
            self.dirty |= key.mask();
        }
    }

    /// Local edit whose remote write was already dispatched.
    ///
    /// Change detection will not report it.
    pub fn assign_synced(&mut self, key: FieldKey, value: f64) {
        self.fields[key.index()].assign_synced(value);
    }

    /// Queue a remote read result for the next digest
    pub fn queue_hydration(&mut self, key: FieldKey, value: Option<f64>) {
        self.pending.push_back((key, value));
    }

    /// Number of hydration results waiting for a digest
    pub fn pending_hydrations(&self) -> usize {
        self.pending.len()
    }

    // --- Visibility ---

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Flip visibility and return the new value
    pub fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    // --- Change detection ---

    /// Register a callback for changes of `key`.
    ///
    /// Callbacks run inside [`digest`](Self::digest) and must not access this
    /// state again.
    pub fn watch<F>(&mut self, key: FieldKey, callback: F) -> WatcherKey
    where
        F: FnMut(FieldKey, Change<f64>) + 'static,
    {
        self.watchers.watch(key, callback)
    }

    /// Remove a watcher registered with [`watch`](Self::watch)
    pub fn unwatch(&mut self, key: WatcherKey) -> bool {
        self.watchers.unwatch(key)
    }

    /// Number of registered watchers
    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }

    /// Apply queued hydrations, then report changed fields to the watchers.
    ///
    /// Returns the number of changes detected.
    pub fn digest(&mut self) -> usize {
        while let Some((key, value)) = self.pending.pop_front() {
            if !self.fields[key.index()].hydrate(value) {
                log::debug!("Dropped stale read for {}", key);
            }
        }

        let dirty = mem::take(&mut self.dirty);
        let mut changes = 0;
        for key in dirty.keys() {
            if let Some(change) = self.fields[key.index()].observe() {
                self.watchers.notify(key, change);
                changes += 1;
            }
        }
        changes
    }
}
