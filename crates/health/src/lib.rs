//! Liveness listener.
//!
//! A minimal always-200 responder for platform health checks. It shares no
//! state with the bot: `GET /health` answers 200 with a fixed body, anything
//! else answers 404. No other verbs, no authentication.

use axum::{Router, http::StatusCode, routing::get};

pub fn router() -> Router {
    Router::new().route("/health", get(health)).fallback(not_found)
}

async fn health() -> &'static str {
    "OK"
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

pub async fn run_with_listener(listener: tokio::net::TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Health listener on {addr}");
    }
    axum::serve(listener, router()).await
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::router;

    #[tokio::test]
    async fn health_answers_200_with_fixed_body() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn any_other_path_answers_404() {
        let response = router()
            .oneshot(Request::get("/anything").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn other_verbs_are_not_served() {
        let response = router()
            .oneshot(Request::post("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
