use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::customization::{Customization, CustomizationUpdate};
use crate::models::qr_request::QrKind;
use crate::models::session::Session;
use crate::models::theme::ThemeSuggestion;
use crate::structs::qr_request::QrForm;
use crate::utils::render::ExportFormat;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationResponse {
    pub primary_color: String,
    pub background_color: String,
    pub transparent_background: bool,
    pub picker_background: String, // What the background color picker should show
}

impl From<&Customization> for CustomizationResponse {
    fn from(customization: &Customization) -> Self {
        Self {
            primary_color: customization.primary_color.clone(),
            background_color: customization.background_color.clone(),
            transparent_background: customization.is_transparent(),
            picker_background: customization.picker_background().to_string(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: Uuid,
    pub active_kind: QrKind,
    pub payload: String,
    pub customization: CustomizationResponse,
    pub revision: u64,
    pub can_export: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            active_kind: session.active_kind,
            customization: CustomizationResponse::from(&session.customization),
            revision: session.revision,
            can_export: session.can_export(),
            created_at: session.created_at,
            updated_at: session.updated_at,
            payload: session.payload,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ThemeRequest {
    #[serde(default)]
    pub theme_description: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ThemeResponse {
    pub suggestion: ThemeSuggestion,
    /// False when the session changed while the theme was being generated
    pub applied: bool,
    pub session: SessionResponse,
}

/// One-shot render without a session
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DirectQrRequest {
    pub content: QrForm,
    #[serde(default)]
    pub customization: CustomizationUpdate,
    pub format: Option<ExportFormat>,
}
