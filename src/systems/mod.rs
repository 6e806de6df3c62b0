//! Application systems
//!
//! Frame-level systems driven by the event loop in main.rs.

mod sync;
mod window;

pub use sync::{SyncResult, SyncSystem};
pub use window::{format_panel, WindowError, WindowSystem};
