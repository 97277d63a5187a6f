use actix_web::web;

use crate::handlers::customization_handlers::{generate_theme, update_customization};
use crate::handlers::health_handlers::health_check;
use crate::handlers::qr_handlers::{
    clear_content, export_qr, generate_direct_qr, preview_qr, submit_content,
};
use crate::handlers::session_handlers::{create_session, delete_session, get_session};
use crate::middlewares::session_guard::SessionGuard;

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health/check", web::get().to(health_check))
            // One-shot rendering, no session involved
            .route("/qr", web::post().to(generate_direct_qr))
            .route("/sessions", web::post().to(create_session))
            .service(
                web::scope("/sessions/{session_id}")
                    .wrap(SessionGuard {
                        param_name: "session_id".to_string(),
                    })
                    .route("", web::get().to(get_session))
                    .route("", web::delete().to(delete_session))
                    .route("/content", web::put().to(submit_content))
                    .route("/content", web::delete().to(clear_content))
                    .route("/customization", web::patch().to(update_customization))
                    .route("/theme", web::post().to(generate_theme))
                    .route("/qr", web::get().to(preview_qr))
                    .route("/export/{format}", web::get().to(export_qr)),
            ),
    );
}
