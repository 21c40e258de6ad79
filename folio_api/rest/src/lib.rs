use std::net::IpAddr;

use axum::{
    http::{header, Method},
    Router,
};
use folio_core_contact_contracts::ContactFeatureService;
use folio_core_health_contracts::HealthFeatureService;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub fn new(health: Health, contact: Contact) -> Self {
        Self { health, contact }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(self.contact.into()))
            .merge(routes::assets::router());

        let router = middlewares::add(router);

        // The static site may be hosted anywhere, so the form must be allowed
        // to post from any origin.
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use folio_core_contact_contracts::MockContactFeatureService;
    use folio_core_health_contracts::{HealthStatus, MockHealthFeatureService};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn cors_headers() {
        let server = RestServer::new(
            MockHealthFeatureService::new().with_get_status(HealthStatus { email: true }),
            MockContactFeatureService::new(),
        );

        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn preflight() {
        let server = RestServer::new(
            MockHealthFeatureService::new(),
            MockContactFeatureService::new(),
        );

        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/contact")
                    .header("origin", "https://example.com")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-methods")
                .unwrap(),
            "POST"
        );
    }
}
