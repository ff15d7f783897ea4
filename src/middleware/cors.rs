use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::CorsLayer;

use crate::{config::CorsConfig, error::AppError};

/// Build the CORS layer answering preflights and decorating responses for allowed origins.
pub fn build_cors_layer(cfg: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .allowed_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s.trim_end_matches('/')).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Refuses requests declaring an origin outside the allow-list before the handler runs.
///
/// Only the relay route is gated. A page served by this process posts with its own
/// origin, which is accepted whether or not it is listed.
pub async fn origin_gate(State(cors): State<CorsConfig>, req: Request, next: Next) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .map(|value| value.to_str().unwrap_or("<non-ascii>").to_string());
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    match origin {
        None if cors.allow_missing_origin => next.run(req).await,
        None => AppError::OriginMissing.into_response(),
        Some(origin) if cors.allows(&origin) => {
            tracing::debug!(origin = %origin, "Allowed by CORS");
            next.run(req).await
        }
        Some(origin) if is_same_origin(&origin, host.as_deref()) => {
            tracing::debug!(origin = %origin, "Same-origin request");
            next.run(req).await
        }
        Some(origin) => AppError::OriginNotAllowed(origin).into_response(),
    }
}

/// `Origin` and `Host` name the same authority (scheme aside).
fn is_same_origin(origin: &str, host: Option<&str>) -> bool {
    let Some(host) = host else {
        return false;
    };

    origin
        .split_once("://")
        .is_some_and(|(_, authority)| authority.eq_ignore_ascii_case(host))
}
