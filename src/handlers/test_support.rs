//! Fakes shared by the handler tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;

use crate::models::theme::ThemeSuggestion;
use crate::services::theme_generator::{GenerationError, ThemeGenerator};
use crate::state::app_state::AppState;

pub fn app_state<G: ThemeGenerator + 'static>(generator: G) -> web::Data<AppState> {
    web::Data::new(AppState::new(Arc::new(generator)))
}

type Hook = Box<dyn FnOnce() + Send>;

/// Always answers with the same suggestion
pub struct StaticThemeGenerator {
    pub suggestion: ThemeSuggestion,
    pub calls: AtomicUsize,
    before_reply: Mutex<Option<Hook>>,
}

impl Default for StaticThemeGenerator {
    fn default() -> Self {
        Self {
            suggestion: ThemeSuggestion {
                primary_color: "#0b3d91".into(),
                secondary_color: "#fc3d21".into(),
                background_color: "#f5f5f5".into(),
                style: "retro".into(),
            },
            calls: AtomicUsize::new(0),
            before_reply: Mutex::new(None),
        }
    }
}

impl StaticThemeGenerator {
    /// Run `hook` while the next request is in flight
    pub fn set_before_reply(&self, hook: impl FnOnce() + Send + 'static) {
        *self.before_reply.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ThemeGenerator for StaticThemeGenerator {
    async fn generate(&self, _description: &str) -> Result<ThemeSuggestion, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let hook = self.before_reply.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
        Ok(self.suggestion.clone())
    }
}

/// Fails every request with a fixed error
pub struct FailingThemeGenerator {
    configured: bool,
}

impl FailingThemeGenerator {
    pub fn backend_down() -> Self {
        Self { configured: true }
    }

    pub fn not_configured() -> Self {
        Self { configured: false }
    }
}

#[async_trait]
impl ThemeGenerator for FailingThemeGenerator {
    async fn generate(&self, _description: &str) -> Result<ThemeSuggestion, GenerationError> {
        if self.configured {
            Err(GenerationError::Backend(503))
        } else {
            Err(GenerationError::NotConfigured)
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
