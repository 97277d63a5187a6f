use uuid::Uuid;

use crate::models::customization::{Customization, CustomizationUpdate};
use crate::models::qr_request::{QrKind, QrRequest};
use crate::models::theme::ThemeSuggestion;
use crate::utils::payload::format_payload;

/// Payload shown before the first submission
pub const DEFAULT_PAYLOAD: &str = "https://qrfy.com/";

/// One interactive generator session. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub active_kind: QrKind,
    pub payload: String,
    pub customization: Customization,
    pub revision: u64, // Bumped on every mutation
    pub created_at: i64,
    pub updated_at: i64,
}

impl Session {
    pub fn new() -> Self {
        let now = chrono::Utc::now().timestamp_millis();

        Self {
            id: Uuid::new_v4(),
            active_kind: QrKind::Url,
            payload: DEFAULT_PAYLOAD.to_string(),
            customization: Customization::default(),
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the payload with the one derived from an accepted request.
    pub fn submit(&mut self, request: &QrRequest) {
        self.active_kind = request.kind();
        self.payload = format_payload(request);
        self.touch();
    }

    pub fn clear_payload(&mut self) {
        self.payload.clear();
        self.touch();
    }

    pub fn customize(&mut self, update: CustomizationUpdate) {
        self.customization.update(update);
        self.touch();
    }

    /// Apply a theme only if nothing changed since `seen_revision` was read.
    /// Returns whether the theme was applied.
    pub fn apply_theme_if_current(&mut self, suggestion: &ThemeSuggestion, seen_revision: u64) -> bool {
        if self.revision != seen_revision {
            return false;
        }
        self.customization.apply_theme(suggestion);
        self.touch();
        true
    }

    pub fn can_export(&self) -> bool {
        !self.payload.is_empty()
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
