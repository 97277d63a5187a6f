use actix_web::{HttpResponse, Result, error, http, web};
use log::{debug, info};
use uuid::Uuid;

use crate::models::customization::Customization;
use crate::state::app_state::AppState;
use crate::structs::qr_request::{QrForm, field_errors};
use crate::structs::session::{DirectQrRequest, SessionResponse};
use crate::utils::payload::format_payload;
use crate::utils::render::{self, ExportFormat, RenderError};

fn render_error(err: RenderError) -> error::Error {
    let message = err.to_string();
    match err {
        RenderError::DataTooLong => error::ErrorPayloadTooLarge(message),
        RenderError::UnsupportedColor(_) => error::ErrorBadRequest(message),
        _ => error::ErrorInternalServerError(message),
    }
}

fn validation_failed(errors: &validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "errors": field_errors(errors) }))
}

/// Validate, format and render one form without creating a session
pub async fn generate_direct_qr(web::Json(req): web::Json<DirectQrRequest>) -> Result<HttpResponse> {
    let request = match req.content.into_request() {
        Ok(request) => request,
        Err(errors) => return Ok(validation_failed(&errors)),
    };
    let payload = format_payload(&request);

    let mut customization = Customization::default();
    customization.update(req.customization);

    let format = req.format.unwrap_or(ExportFormat::Svg);
    match render::export(&payload, &customization, format).map_err(render_error)? {
        Some(export) => Ok(HttpResponse::Ok()
            .content_type(export.format.content_type())
            .body(export.bytes)),
        None => Ok(HttpResponse::NoContent().finish()),
    }
}

/// Accept a typed form and make its payload the session's current content
pub async fn submit_content(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    web::Json(form): web::Json<QrForm>,
) -> Result<HttpResponse> {
    let session_id = path.into_inner();

    let request = match form.into_request() {
        Ok(request) => request,
        Err(errors) => {
            debug!("Rejected form for session {}: {}", session_id, errors);
            return Ok(validation_failed(&errors));
        }
    };

    let (_, session) = app_state
        .sessions
        .update(&session_id, |session| session.submit(&request))
        .ok_or_else(|| error::ErrorNotFound("Session not found"))?;

    info!(
        "Session {} now encodes {:?} content ({} bytes)",
        session_id,
        session.active_kind,
        session.payload.len()
    );
    Ok(HttpResponse::Ok().json(SessionResponse::from(session)))
}

pub async fn clear_content(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let session_id = path.into_inner();
    let (_, session) = app_state
        .sessions
        .update(&session_id, |session| session.clear_payload())
        .ok_or_else(|| error::ErrorNotFound("Session not found"))?;

    Ok(HttpResponse::Ok().json(SessionResponse::from(session)))
}

/// Current QR code as SVG
pub async fn preview_qr(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let session = app_state
        .sessions
        .get(&path.into_inner())
        .ok_or_else(|| error::ErrorNotFound("Session not found"))?;

    if !session.can_export() {
        return Ok(HttpResponse::NoContent().finish());
    }

    let svg = render::render_svg(&session.payload, &session.customization).map_err(render_error)?;
    Ok(HttpResponse::Ok().content_type("image/svg+xml").body(svg))
}

/// Download the current QR code. Disabled (204) while the payload is empty.
pub async fn export_qr(
    app_state: web::Data<AppState>,
    path: web::Path<(Uuid, ExportFormat)>,
) -> Result<HttpResponse> {
    let (session_id, format) = path.into_inner();
    let session = app_state
        .sessions
        .get(&session_id)
        .ok_or_else(|| error::ErrorNotFound("Session not found"))?;

    let export = render::export(&session.payload, &session.customization, format)
        .map_err(render_error)?;

    match export {
        Some(export) => {
            info!(
                "Exporting session {} as {}",
                session_id,
                export.format.file_name()
            );
            Ok(HttpResponse::Ok()
                .content_type(export.format.content_type())
                .insert_header((
                    http::header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", export.format.file_name()),
                ))
                .body(export.bytes))
        }
        None => Ok(HttpResponse::NoContent().finish()),
    }
}
