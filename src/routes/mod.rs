pub mod candidate_routes;
pub mod dashboard;
pub mod guide;
pub mod health;
pub mod interview;
pub mod media;
pub mod question;
pub mod recording;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::middleware::rate_limit::{limit_model_calls, ModelRateLimiter};
use crate::services::capture_service::MAX_MEDIA_BYTES;
use crate::AppState;

/// Upload requests may exceed the media ceiling so the workflow can reject
/// oversized files with its own message.
pub const MAX_UPLOAD_REQUEST_BYTES: usize = MAX_MEDIA_BYTES * 5 / 2;

pub fn api_router(ai_rps: u32) -> Router<AppState> {
    let model_routes = Router::new()
        .route("/api/interviews", post(interview::submit_interview))
        .route("/api/questions/generate", post(question::generate_questions))
        .route("/api/questions/follow-up", post(question::follow_up))
        .layer(axum::middleware::from_fn_with_state(
            ModelRateLimiter::new(ai_rps),
            limit_model_calls,
        ));

    let media_routes = Router::new()
        .route("/api/media", get(media::media_summary).delete(media::reset_media))
        .route("/api/media/upload", post(media::upload_media))
        .route("/api/media/cv", post(media::upload_cv).delete(media::clear_cv))
        .route(
            "/api/recording",
            get(recording::recording_status).delete(recording::delete_recording),
        )
        .route("/api/recording/start", post(recording::start_recording))
        .route("/api/recording/chunks", post(recording::push_chunk))
        .route("/api/recording/stop", post(recording::stop_recording))
        .route("/api/recording/playback/:token", get(recording::playback))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_REQUEST_BYTES));

    Router::new()
        .route("/health", get(health::health))
        .route("/api/dashboard/stats", get(dashboard::get_dashboard_stats))
        .route(
            "/api/candidates",
            get(candidate_routes::list_candidates).post(candidate_routes::import_candidate),
        )
        .route(
            "/api/candidates/:id",
            get(candidate_routes::get_candidate).delete(candidate_routes::delete_candidate),
        )
        .route(
            "/api/candidates/:id/status",
            post(candidate_routes::update_candidate_status),
        )
        .route("/api/interviews/in-flight", get(interview::in_flight))
        .route("/api/guide", get(guide::guide))
        .merge(model_routes)
        .merge(media_routes)
}
