use std::future::Future;

use folio_models::contact::Submission;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Forwards a validated submission to the portfolio owner via email.
    fn submit(
        &self,
        submission: Submission,
    ) -> impl Future<Output = Result<(), ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("Failed to send message.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        submission: Submission,
        result: Result<(), ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
