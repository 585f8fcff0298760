//! Application state shared across handlers.

use std::sync::Arc;

use roster_core::AdminConsole;

use crate::config::AdminConfig;
use crate::services::ConsoleHandle;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the console task.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    console: ConsoleHandle,
}

impl AppState {
    /// Create application state and spawn the console task.
    ///
    /// The console starts with the mock records unless
    /// `config.seed_mock_data` is off. Must be called inside a Tokio runtime.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let console = if config.seed_mock_data {
            AdminConsole::with_mock_data(config.validation)
        } else {
            AdminConsole::new(config.validation)
        };
        Self::with_console(config, console)
    }

    /// Create application state around an existing console.
    #[must_use]
    pub fn with_console(config: AdminConfig, console: AdminConsole) -> Self {
        let console = ConsoleHandle::spawn(console, config.intent_queue);
        Self {
            inner: Arc::new(AppStateInner { config, console }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the console handle.
    #[must_use]
    pub fn console(&self) -> &ConsoleHandle {
        &self.inner.console
    }
}
