mod docs;
mod error;
mod middleware;
mod state;

pub mod routes;

pub use docs::ApiDoc;
pub use error::{ApiError, ErrorResponse, ResponseFormat};
pub use state::AppState;

use axum::{
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .route("/auth/local/register", post(routes::auth::register))
        .route(
            "/admin/auth/local/register",
            post(routes::auth::admin_register),
        )
        .route(
            "/auth/email-confirmation",
            get(routes::auth::email_confirmation),
        )
        .route(
            "/auth/send-email-confirmation",
            post(routes::auth::send_email_confirmation),
        )
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
