use std::sync::Arc;

use anyhow::Context;
use folio_api_rest::RestServer;
use folio_config::Config;
use folio_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
use folio_core_health_impl::{HealthFeatureConfig, HealthFeatureServiceImpl};
use folio_email_contracts::EmailService;
use folio_templates_impl::TemplateServiceImpl;
use tracing::info;

use crate::email;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Setting up mail transport");
    let email = email::connect(&config.email)?;
    email
        .ping()
        .await
        .context("Failed to reach mail transport")?;

    let template = TemplateServiceImpl::new();

    let health = HealthFeatureServiceImpl::new(
        email.clone(),
        HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        },
    );
    let contact = ContactFeatureServiceImpl::new(
        email,
        template,
        ContactFeatureConfig {
            recipient: Arc::new(config.contact.recipient.clone()),
        },
    );

    let server = RestServer::new(health, contact);
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
