use actix_web::{HttpResponse, Result, error, web};
use log::info;
use uuid::Uuid;

use crate::state::app_state::AppState;
use crate::structs::session::SessionResponse;

/// Start a session with the default payload and colors
pub async fn create_session(app_state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = app_state.sessions.create();
    info!("Created session {}", session.id);

    Ok(HttpResponse::Created().json(SessionResponse::from(session)))
}

pub async fn get_session(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let session = app_state
        .sessions
        .get(&path.into_inner())
        .ok_or_else(|| error::ErrorNotFound("Session not found"))?;

    Ok(HttpResponse::Ok().json(SessionResponse::from(session)))
}

pub async fn delete_session(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let session_id = path.into_inner();
    app_state
        .sessions
        .remove(&session_id)
        .ok_or_else(|| error::ErrorNotFound("Session not found"))?;
    info!("Ended session {}", session_id);

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;
    use uuid::Uuid;

    use crate::handlers::test_support::{StaticThemeGenerator, app_state};
    use crate::routes::init_routes;

    #[actix_web::test]
    async fn create_returns_defaults() {
        let state = app_state(StaticThemeGenerator::default());
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post().uri("/api/sessions").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["payload"], "https://qrfy.com/");
        assert_eq!(body["activeKind"], "url");
        assert_eq!(body["customization"]["primaryColor"], "#1F9481");
        assert_eq!(body["customization"]["backgroundColor"], "#ffffff");
        assert_eq!(body["customization"]["transparentBackground"], false);
        assert_eq!(body["canExport"], true);

        let id: Uuid = body["id"].as_str().unwrap().parse().unwrap();
        assert!(state.sessions.contains(&id));
    }

    #[actix_web::test]
    async fn get_and_delete_round_trip() {
        let state = app_state(StaticThemeGenerator::default());
        let session = state.sessions.create();
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let uri = format!("/api/sessions/{}", session.id);
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp =
            test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.sessions.count(), 0);

        // The guard now rejects the id before any handler runs
        let err = test::try_call_service(&app, test::TestRequest::get().uri(&uri).to_request())
            .await
            .unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
    }
}
