use std::future::Future;

use folio_models::email_address::EmailAddressWithName;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Hands the email to the underlying mail transport.
    ///
    /// Returns `Ok(false)` if the transport accepted the hand-off but
    /// reported a negative result.
    fn send(&self, email: Email) -> impl Future<Output = anyhow::Result<bool>> + Send;

    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailAddressWithName,
    pub subject: String,
    pub body: EmailBody,
    pub reply_to: Option<EmailAddressWithName>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailBody {
    Text(String),
    Html(String),
    /// An HTML part with a plain text fallback (multipart/alternative).
    Alternative { html: String, text: String },
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: bool) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_error(mut self, email: Email, error: anyhow::Error) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Err(error))));
        self
    }

    pub fn with_ping(mut self, result: anyhow::Result<()>) -> Self {
        self.expect_ping()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}
