//! Application state for the attendance engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::AttendanceStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded schedule configuration and the attendance store.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<dyn AttendanceStore>,
}

impl AppState {
    /// Creates a new application state from a configuration loader and
    /// a store.
    pub fn new(config: ConfigLoader, store: Arc<dyn AttendanceStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a reference to the attendance store.
    pub fn store(&self) -> &dyn AttendanceStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
