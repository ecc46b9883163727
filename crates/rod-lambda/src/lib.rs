//! rod-lambda
//!
//! HTTP surface of the document generator, served on AWS Lambda through
//! `lambda_http`.

use axum::middleware as axum_mw;
use axum::routing::{any, get};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/generate", any(routes::generate::generate_document));

    with_layers(routes).with_state(state)
}

/// Wrap `router` in the panic guard, request logging and CORS layers that
/// every route shares.
pub fn with_layers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(axum_mw::from_fn(middleware::request_log::request_log))
        .layer(cors)
}
