//! camsync - camera offset settings panel
//!
//! Opens a window whose title shows the six camera offsets and edits them from
//! the keyboard, keeping them in sync with the engine settings store.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use camsync::config::AppConfig;
use camsync::input::{InputMapper, PanelAction};
use camsync::systems::{SyncSystem, WindowSystem};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    sync: SyncSystem,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let sync = SyncSystem::new(&config)
            .unwrap_or_else(|e| panic!("Failed to start settings sync: {}", e));

        Self {
            config,
            window: None,
            sync,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            match WindowSystem::create(event_loop, &self.config.window) {
                Ok(window) => self.window = Some(window),
                Err(e) => {
                    log::error!("{}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match InputMapper::map_keyboard(key, event.state, self.sync.visible()) {
                        Some(PanelAction::Exit) => event_loop.exit(),
                        Some(action) => self.sync.apply(action),
                        None => {}
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let result = self.sync.update();
                if result.writes > 0 {
                    log::debug!("Dispatched {} setting writes", result.writes);
                }

                if let Some(window) = &mut self.window {
                    window.update_title(&self.sync.values(), self.sync.selected(), self.sync.visible());
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    // Load configuration before logging so the configured level applies
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting camsync");

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
