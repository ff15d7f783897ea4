use std::{path::Path, sync::Arc};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use rrbusiness_contact::SEND_EMAIL_PATH;
use rrbusiness_notification::Mailer;
use tower_http::{
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

mod contact;
mod health;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mailer: Arc<dyn Mailer>,
}

pub fn router(app_state: AppState) -> Router {
    let cors = crate::middleware::build_cors_layer(&app_state.config.cors);
    let origin_gate = middleware::from_fn_with_state(
        app_state.config.cors.clone(),
        crate::middleware::origin_gate,
    );

    let mut router = Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route(
            SEND_EMAIL_PATH,
            post(contact::send_email).route_layer(origin_gate),
        );

    if let Some(static_dir) = &app_state.config.server.static_dir {
        // Client-side routes (/about, /products, ...) all resolve to the bundle entry point
        let index = Path::new(static_dir).join("index.html");
        router = router.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)));
    }

    router
        .layer(middleware::from_fn(
            crate::middleware::cache_control_middleware,
        ))
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
