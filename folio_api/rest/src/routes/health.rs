use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_health_contracts::{HealthFeatureService, HealthStatus};
use serde::Serialize;

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    email: bool,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let HealthStatus { email } = service.get_status().await;

    let status = if email {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(HealthResponse { http: true, email })).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use folio_core_health_contracts::MockHealthFeatureService;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn ok() {
        let service =
            MockHealthFeatureService::new().with_get_status(HealthStatus { email: true });

        let response = router(Arc::new(service))
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unhealthy() {
        let service =
            MockHealthFeatureService::new().with_get_status(HealthStatus { email: false });

        let response = router(Arc::new(service))
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
