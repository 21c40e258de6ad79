use anyhow::Context;
use folio_config::{EmailConfig, EmailTransportConfig};
use folio_email_impl::{EmailServiceImpl, SendmailEmailService, SmtpEmailService};

/// Set up the mail transport selected by the configuration
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    Ok(match &config.transport {
        EmailTransportConfig::Smtp { smtp_url } => EmailServiceImpl::Smtp(
            SmtpEmailService::new(smtp_url, config.from.clone())
                .context("Failed to set up SMTP transport")?,
        ),
        EmailTransportConfig::Direct => {
            EmailServiceImpl::Sendmail(SendmailEmailService::new(config.from.clone()))
        }
    })
}
