pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;

use std::sync::Arc;

pub use config::Config;
pub use routes::AppState;

/// Create app router
///
/// Builds the relay router around any mail provider, which is how the
/// integration tests run it without an SMTP server.
pub fn create_app(
    config: Config,
    mailer: Arc<dyn rrbusiness_notification::Mailer>,
) -> axum::Router {
    routes::router(AppState { config, mailer })
}
