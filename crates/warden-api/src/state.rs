//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use warden_auth::AuthService;
use warden_core::config::AppConfig;

/// Application state passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Token authority.
    pub auth: Arc<AuthService>,
    /// Process start, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    /// Creates state with the clock started now.
    pub fn new(config: Arc<AppConfig>, auth: Arc<AuthService>) -> Self {
        Self {
            config,
            auth,
            started_at: Instant::now(),
        }
    }
}
