use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use folio_core_health_contracts::{HealthFeatureService, HealthStatus};
use folio_email_contracts::EmailService;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Email> {
    email: Email,
    config: HealthFeatureConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: Instant,
}

impl<Email> HealthFeatureServiceImpl<Email> {
    pub fn new(email: Email, config: HealthFeatureConfig) -> Self {
        Self {
            email,
            config,
            state: Default::default(),
        }
    }
}

impl<Email> HealthFeatureService for HealthFeatureServiceImpl<Email>
where
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| c.timestamp.elapsed() < self.config.cache_ttl)
        {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| c.timestamp.elapsed() < self.config.cache_ttl)
        {
            return cached.status;
        }

        let email = self
            .email
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping mail transport: {err}"))
            .is_ok();

        let status = HealthStatus { email };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: Instant::now(),
            })
            .status
    }
}

#[cfg(test)]
mod tests {
    use folio_email_contracts::MockEmailService;

    use super::*;

    #[tokio::test]
    async fn ok() {
        // Arrange
        let email = MockEmailService::new().with_ping(Ok(()));

        let sut = HealthFeatureServiceImpl::new(
            email,
            HealthFeatureConfig {
                cache_ttl: Duration::from_secs(3600),
            },
        );

        // Act
        let status = sut.get_status().await;

        // Assert
        assert_eq!(status, HealthStatus { email: true });
    }

    #[tokio::test]
    async fn transport_unreachable() {
        // Arrange
        let email = MockEmailService::new().with_ping(Err(anyhow::anyhow!("connection refused")));

        let sut = HealthFeatureServiceImpl::new(
            email,
            HealthFeatureConfig {
                cache_ttl: Duration::from_secs(3600),
            },
        );

        // Act
        let status = sut.get_status().await;

        // Assert
        assert_eq!(status, HealthStatus { email: false });
    }

    #[tokio::test]
    async fn cached_within_ttl() {
        // Arrange
        let email = MockEmailService::new().with_ping(Ok(()));

        let sut = HealthFeatureServiceImpl::new(
            email,
            HealthFeatureConfig {
                cache_ttl: Duration::from_secs(3600),
            },
        );

        // Act
        let first = sut.get_status().await;
        let second = sut.get_status().await;

        // Assert
        assert_eq!(first, second);
    }
}
