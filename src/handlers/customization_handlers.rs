use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Result, error, web};
use log::{info, warn};
use uuid::Uuid;

use crate::models::customization::CustomizationUpdate;
use crate::services::theme_generator::{GenerationError, request_theme};
use crate::state::app_state::AppState;
use crate::structs::session::{SessionResponse, ThemeRequest, ThemeResponse};

fn generation_status(err: &GenerationError) -> StatusCode {
    match err {
        GenerationError::EmptyDescription => StatusCode::UNPROCESSABLE_ENTITY,
        GenerationError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        GenerationError::Request(_) | GenerationError::Backend(_) | GenerationError::Malformed(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

/// Merge a partial color edit into the session
pub async fn update_customization(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    web::Json(update): web::Json<CustomizationUpdate>,
) -> Result<HttpResponse> {
    if update.is_empty() {
        return Err(error::ErrorBadRequest("No customization fields provided"));
    }
    if let Some(color) = update.invalid_color() {
        return Err(error::ErrorBadRequest(format!("Unsupported color: {}", color)));
    }

    let (_, session) = app_state
        .sessions
        .update(&path.into_inner(), |session| session.customize(update))
        .ok_or_else(|| error::ErrorNotFound("Session not found"))?;

    Ok(HttpResponse::Ok().json(SessionResponse::from(session)))
}

/// Ask the generative model for a theme and apply it to the session.
///
/// The session revision is captured before the call; if the session changed
/// while the request was in flight the suggestion is returned but not applied.
pub async fn generate_theme(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    web::Json(req): web::Json<ThemeRequest>,
) -> Result<HttpResponse> {
    let session_id = path.into_inner();
    let seen_revision = app_state
        .sessions
        .get(&session_id)
        .ok_or_else(|| error::ErrorNotFound("Session not found"))?
        .revision;

    let suggestion =
        match request_theme(app_state.theme_generator.as_ref(), &req.theme_description).await {
            Ok(suggestion) => suggestion,
            Err(e) => {
                warn!("Theme generation failed for session {}: {}", session_id, e);
                return Ok(HttpResponse::build(generation_status(&e))
                    .json(serde_json::json!({ "error": e.to_string() })));
            }
        };

    let (applied, session) = app_state
        .sessions
        .update(&session_id, |session| {
            session.apply_theme_if_current(&suggestion, seen_revision)
        })
        .ok_or_else(|| error::ErrorNotFound("Session ended during theme generation"))?;

    if applied {
        info!("Applied {} theme to session {}", suggestion.style, session_id);
    } else {
        warn!(
            "Discarded stale theme for session {} (revision {} -> {})",
            session_id, seen_revision, session.revision
        );
    }

    Ok(HttpResponse::Ok().json(ThemeResponse {
        suggestion,
        applied,
        session: SessionResponse::from(session),
    }))
}
