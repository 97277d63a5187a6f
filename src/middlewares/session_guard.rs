use std::future::{Ready, ready};

use actix_web::error::{ErrorBadRequest, ErrorInternalServerError, ErrorNotFound};
use actix_web::{
    Error, web,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use crate::state::app_state::AppState;

/// Rejects requests addressed to a session that does not exist
pub struct SessionGuard {
    pub param_name: String, // Name of the URL parameter that contains the session ID
}

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionGuardMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardMiddleware {
            service,
            param_name: self.param_name.clone(),
        }))
    }
}

pub struct SessionGuardMiddleware<S> {
    service: S,
    param_name: String,
}

impl<S, B> Service<ServiceRequest> for SessionGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let raw_id = match req.match_info().get(&self.param_name) {
            Some(id) => id.to_string(),
            None => {
                // No session parameter on this route, nothing to guard
                return Box::pin(self.service.call(req));
            }
        };

        let session_id = match Uuid::parse_str(&raw_id) {
            Ok(id) => id,
            Err(_) => {
                return Box::pin(async move { Err(ErrorBadRequest("Invalid session ID format")) });
            }
        };

        let exists = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state.sessions.contains(&session_id),
            None => {
                return Box::pin(
                    async move { Err(ErrorInternalServerError("Application state missing")) },
                );
            }
        };

        if !exists {
            return Box::pin(async move { Err(ErrorNotFound("Session not found")) });
        }

        Box::pin(self.service.call(req))
    }
}
