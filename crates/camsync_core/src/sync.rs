//! Bidirectional settings synchronization
//!
//! [`SettingsSync`] keeps a [`SettingsState`] and the remote store consistent:
//!
//! - [`initialize`](SettingsSync::initialize) dispatches one read per field on
//!   the local executor. Results are queued and applied by the next digest as
//!   hydration writes, which never echo back to the store.
//! - Every field has one watcher. When a digest sees a hydrated field change,
//!   the watcher dispatches exactly one remote write.
//! - [`reset`](SettingsSync::reset) writes the defaults remotely and locally in
//!   a fixed order; the local assignment is marked as already synced.
//!
//! All of this runs on one thread. Read tasks only hold a weak reference to the
//! state, so reads that resolve after the sync is dropped do nothing.
//!
//! # Example
//! ```ignore
//! let mut pool = LocalPool::new();
//! let sync = SettingsSync::new(Rc::new(bridge), pool.spawner());
//! sync.initialize()?;
//!
//! // Each UI frame
//! pool.run_until_stalled();
//! sync.digest();
//! ```

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use futures::executor::LocalSpawner;
use futures::task::{LocalSpawnExt, SpawnError};

use crate::bridge::SettingsBridge;
use crate::field::{CameraOffsets, FieldKey};
use crate::state::SettingsState;

/// Dispatch the remote write for a changed field.
///
/// `None` is the unset marker and is dropped. Returns whether a write was
/// dispatched.
pub fn on_field_changed(bridge: &dyn SettingsBridge, key: FieldKey, value: Option<f64>) -> bool {
    match value {
        Some(value) => {
            log::debug!("Writing {} = {}", key, value);
            bridge.set(key, value);
            true
        }
        None => {
            log::trace!("Ignoring unset value for {}", key);
            false
        }
    }
}

/// Keeps the six camera offsets in sync with the remote store
pub struct SettingsSync {
    state: Rc<RefCell<SettingsState>>,
    bridge: Rc<dyn SettingsBridge>,
    spawner: LocalSpawner,
}

impl SettingsSync {
    /// Mount a new, visible component with every field unset.
    ///
    /// Registers one watcher per field. Nothing is read until
    /// [`initialize`](Self::initialize).
    pub fn new(bridge: Rc<dyn SettingsBridge>, spawner: LocalSpawner) -> Self {
        let mut state = SettingsState::new();
        for key in FieldKey::ALL {
            let bridge = bridge.clone();
            state.watch(key, move |key, change| {
                on_field_changed(&*bridge, key, Some(change.new));
            });
        }

        Self {
            state: Rc::new(RefCell::new(state)),
            bridge,
            spawner,
        }
    }

    /// Set the initial panel visibility
    pub fn with_visible(self, visible: bool) -> Self {
        {
            let mut state = self.state.borrow_mut();
            if state.visible() != visible {
                state.toggle_visible();
            }
        }
        self
    }

    /// Dispatch the six hydration reads.
    ///
    /// Returns immediately. Fails only if the executor has shut down.
    pub fn initialize(&self) -> Result<(), SyncError> {
        for key in FieldKey::ALL {
            let read = self.bridge.get(key);
            let state = Rc::downgrade(&self.state);
            self.spawner.spawn_local(async move {
                let value = match read.await {
                    Ok(value) => value,
                    Err(err) => {
                        log::warn!("Failed to read {}: {}", key, err);
                        None
                    }
                };
                hydrate(&state, key, value);
            })?;
        }

        log::debug!("Dispatched {} hydration reads", FieldKey::ALL.len());
        Ok(())
    }

    /// Apply queued hydrations and propagate local changes.
    ///
    /// Call once per UI update. Returns the number of fields written.
    pub fn digest(&self) -> usize {
        self.state.borrow_mut().digest()
    }

    /// Dispatch the remote write for a changed field, see [`on_field_changed`]
    pub fn on_field_changed(&self, key: FieldKey, value: Option<f64>) -> bool {
        on_field_changed(&*self.bridge, key, value)
    }

    /// User edit of a field
    pub fn set_field(&self, key: FieldKey, value: f64) {
        self.state.borrow_mut().set_field(key, Some(value));
    }

    /// User cleared a field; no write follows
    pub fn clear_field(&self, key: FieldKey) {
        self.state.borrow_mut().set_field(key, None);
    }

    /// Restore the default offsets on both sides.
    ///
    /// Writes are dispatched in [`FieldKey::ALL`] order, each followed by the
    /// local assignment.
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        for key in FieldKey::ALL {
            let value = key.default_value();
            self.bridge.set(key, value);
            state.assign_synced(key, value);
        }
        log::info!("Camera offsets reset to defaults");
    }

    /// Flip panel visibility and return the new value
    pub fn toggle_visibility(&self) -> bool {
        let visible = self.state.borrow_mut().toggle_visible();
        log::info!("Settings panel {}", if visible { "shown" } else { "hidden" });
        visible
    }

    // --- Accessors ---

    pub fn field(&self, key: FieldKey) -> Option<f64> {
        self.state.borrow().field(key)
    }

    pub fn visible(&self) -> bool {
        self.state.borrow().visible()
    }

    /// All six values, or `None` while any field is unset
    pub fn snapshot(&self) -> Option<CameraOffsets> {
        self.state.borrow().snapshot()
    }

    /// Borrow the underlying state
    pub fn state(&self) -> Ref<'_, SettingsState> {
        self.state.borrow()
    }
}

fn hydrate(state: &Weak<RefCell<SettingsState>>, key: FieldKey, value: Option<f64>) {
    match state.upgrade() {
        Some(state) => {
            log::debug!("Hydrated {} = {:?}", key, value);
            state.borrow_mut().queue_hydration(key, value);
        }
        None => log::debug!("Discarding read of {}: settings unmounted", key),
    }
}

/// Error starting the synchronization
#[derive(Debug)]
pub enum SyncError {
    /// The local executor refused the read task
    Spawn(SpawnError),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Spawn(e) => write!(f, "Failed to spawn read task: {}", e),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Spawn(e) => Some(e),
        }
    }
}

impl From<SpawnError> for SyncError {
    fn from(e: SpawnError) -> Self {
        SyncError::Spawn(e)
    }
}
