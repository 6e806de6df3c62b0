//! Settings sync system
//!
//! Drives the settings component once per frame:
//! - Engine replies (after the configured delay)
//! - Local executor (read tasks)
//! - Digest (hydration, change propagation)
//!
//! and applies panel actions to it.

use std::rc::Rc;

use futures::executor::LocalPool;

use camsync_core::{FieldKey, SettingsSync, SyncError};
use camsync_engine::{LocalEngine, LuaBridge};

use crate::config::AppConfig;
use crate::input::PanelAction;

/// Result of a sync update
pub struct SyncResult {
    /// Number of remote writes dispatched by the digest
    pub writes: usize,
}

/// Owns the settings component and the executor it runs on
pub struct SyncSystem {
    pool: LocalPool,
    sync: SettingsSync,
    engine: LocalEngine,
    selected: FieldKey,
    nudge_step: f64,
    reply_delay_frames: u64,
    frame: u64,
}

impl SyncSystem {
    /// Mount the settings component against a local engine and start hydration
    pub fn new(config: &AppConfig) -> Result<Self, SyncError> {
        let mut engine = LocalEngine::with_offsets(config.bridge.seed);
        if config.bridge.reply_delay_frames > 0 {
            engine = engine.deferred();
        }

        let pool = LocalPool::new();
        let bridge = LuaBridge::new(engine.clone());
        let sync = SettingsSync::new(Rc::new(bridge), pool.spawner())
            .with_visible(config.panel.start_visible);
        sync.initialize()?;

        Ok(Self {
            pool,
            sync,
            engine,
            selected: FieldKey::CamPosX,
            nudge_step: config.panel.nudge_step,
            reply_delay_frames: u64::from(config.bridge.reply_delay_frames),
            frame: 0,
        })
    }

    /// Run one frame
    pub fn update(&mut self) -> SyncResult {
        self.frame += 1;

        // 1. Let the engine answer once the delay has passed
        if self.frame >= self.reply_delay_frames {
            let answered = self.engine.flush();
            if answered > 0 {
                log::debug!("Engine answered {} reads on frame {}", answered, self.frame);
            }
        }

        // 2. Complete read tasks
        self.pool.run_until_stalled();

        // 3. Apply hydrations and propagate edits
        let writes = self.sync.digest();

        SyncResult { writes }
    }

    /// Apply a panel action. `Exit` is left to the caller.
    pub fn apply(&mut self, action: PanelAction) {
        match action {
            PanelAction::SelectField(key) => self.selected = key,
            PanelAction::Nudge(steps) => {
                let current = self
                    .sync
                    .field(self.selected)
                    .unwrap_or_else(|| self.selected.default_value());
                self.sync
                    .set_field(self.selected, nudged(current, steps, self.nudge_step));
            }
            PanelAction::ClearField => self.sync.clear_field(self.selected),
            PanelAction::Reset => self.sync.reset(),
            PanelAction::ToggleVisibility => {
                self.sync.toggle_visibility();
            }
            PanelAction::Exit => {}
        }
    }

    pub fn selected(&self) -> FieldKey {
        self.selected
    }

    pub fn visible(&self) -> bool {
        self.sync.visible()
    }

    /// All six values in display order
    pub fn values(&self) -> [Option<f64>; 6] {
        self.sync.state().values()
    }

    pub fn engine(&self) -> &LocalEngine {
        &self.engine
    }
}

/// Move `value` by `steps` increments of `step`, dropping float noise
fn nudged(value: f64, steps: i32, step: f64) -> f64 {
    let raw = value + f64::from(steps) * step;
    (raw * 1e6).round() / 1e6
}
