use std::sync::Arc;

use crate::application::AuthenticationCoordinator;

/// Shared state injected into every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<AuthenticationCoordinator>,
}

impl AppState {
    pub fn new(coordinator: Arc<AuthenticationCoordinator>) -> Self {
        Self { coordinator }
    }
}
