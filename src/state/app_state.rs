use std::sync::Arc;
use std::time::Duration;

use crate::services::theme_generator::ThemeGenerator;
use crate::state::session_store::SessionStore;

pub struct AppState {
    pub sessions: SessionStore,
    pub theme_generator: Arc<dyn ThemeGenerator>,
}

impl AppState {
    pub fn new(theme_generator: Arc<dyn ThemeGenerator>) -> Self {
        Self {
            sessions: SessionStore::new(),
            theme_generator,
        }
    }

    /// Same as `new`, but sessions idle longer than `ttl` are dropped.
    pub fn with_session_ttl(theme_generator: Arc<dyn ThemeGenerator>, ttl: Duration) -> Self {
        Self {
            sessions: SessionStore::with_ttl(ttl),
            theme_generator,
        }
    }
}
