//! Input handling module
//!
//! Provides input mapping from raw key events to panel actions.

mod input_mapper;

pub use input_mapper::{InputMapper, PanelAction};
