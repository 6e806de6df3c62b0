//! Window management system
//!
//! Handles window creation and presents the settings panel in the window title.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::Window,
};
use camsync_core::FieldKey;
use crate::config::WindowConfig;

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
    last_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
            last_title: config.title.clone(),
        })
    }

    /// Show the panel (or the hidden hint) in the title
    pub fn update_title(&mut self, values: &[Option<f64>; 6], selected: FieldKey, visible: bool) {
        let title = if visible {
            format!("{} - {} [H to hide]", self.base_title, format_panel(values, selected))
        } else {
            format!("{} [H to show]", self.base_title)
        };

        // Avoid a platform call every frame
        if title != self.last_title {
            self.window.set_title(&title);
            self.last_title = title;
        }
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Render the six fields as one line, selected field in brackets
///
/// Unset fields show as `--`.
pub fn format_panel(values: &[Option<f64>; 6], selected: FieldKey) -> String {
    FieldKey::ALL
        .iter()
        .zip(values)
        .map(|(key, value)| {
            let text = match value {
                Some(v) => format!("{}: {:.2}", key, v),
                None => format!("{}: --", key),
            };
            if *key == selected {
                format!("[{}]", text)
            } else {
                text
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}
