use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// The dashboard front-end may be served from any origin.
pub fn dashboard_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_LENGTH])
        .allow_origin(Any)
}
