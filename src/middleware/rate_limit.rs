//! Fixed one-second window limiter placed in front of the routes that call
//! the generative model.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

#[derive(Debug)]
struct Window {
    opened: Instant,
    admitted: u32,
}

#[derive(Clone, Debug)]
pub struct ModelRateLimiter {
    per_second: u32,
    window: Arc<Mutex<Window>>,
}

impl ModelRateLimiter {
    pub fn new(per_second: u32) -> Self {
        Self {
            per_second: per_second.max(1),
            window: Arc::new(Mutex::new(Window {
                opened: Instant::now(),
                admitted: 0,
            })),
        }
    }

    fn admit_at(&self, now: Instant) -> bool {
        let mut window = self.window.lock().unwrap_or_else(PoisonError::into_inner);
        if now.duration_since(window.opened) >= Duration::from_secs(1) {
            window.opened = now;
            window.admitted = 0;
        }
        if window.admitted < self.per_second {
            window.admitted += 1;
            true
        } else {
            false
        }
    }

    pub fn admit(&self) -> bool {
        self.admit_at(Instant::now())
    }
}

pub async fn limit_model_calls(
    State(limiter): State<ModelRateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !limiter.admit() {
        tracing::warn!(path = %req.uri().path(), "Model request rate limit exceeded");
        let body = Json(json!({
            "error": "Too many analysis requests. Please wait a moment and try again.",
            "code": "rate_limited",
        }));
        return (StatusCode::TOO_MANY_REQUESTS, body).into_response();
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_admits_up_to_limit_then_resets() {
        let limiter = ModelRateLimiter::new(2);
        let start = Instant::now();
        assert!(limiter.admit_at(start));
        assert!(limiter.admit_at(start));
        assert!(!limiter.admit_at(start + Duration::from_millis(500)));
        assert!(limiter.admit_at(start + Duration::from_millis(1000)));
    }

    #[test]
    fn zero_limit_still_admits_one() {
        let limiter = ModelRateLimiter::new(0);
        let now = Instant::now();
        assert!(limiter.admit_at(now));
        assert!(!limiter.admit_at(now));
    }
}
