use std::sync::Arc;

use folio_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use folio_email_contracts::{Email, EmailBody, EmailService};
use folio_models::{contact::Submission, email_address::EmailAddressWithName};
use folio_templates_contracts::{ContactEmailTemplate, TemplateService};

const SUBJECT: &str = "New Contact Form Message from Portfolio Website";

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Email, Template> {
    email: Email,
    template: Template,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    pub recipient: Arc<EmailAddressWithName>,
}

impl<Email, Template> ContactFeatureServiceImpl<Email, Template> {
    pub fn new(email: Email, template: Template, config: ContactFeatureConfig) -> Self {
        Self {
            email,
            template,
            config,
        }
    }
}

impl<EmailS, TemplateS> ContactFeatureService for ContactFeatureServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn submit(&self, submission: Submission) -> Result<(), ContactSubmitError> {
        let name = submission.name.into_inner();
        let address = submission.email.as_str().to_owned();
        let message = submission.message.into_inner();

        let html = self.template.render(&ContactEmailTemplate {
            name: name.clone(),
            email: address.clone(),
            message: message.clone(),
        })?;

        let text = format!(
            "New Contact Form Message\n\nName: {name}\nEmail: {address}\nMessage: \
             {message}\n\nThis message was sent from your portfolio website contact form."
        );

        let email = Email {
            recipient: (*self.config.recipient).clone(),
            subject: SUBJECT.into(),
            body: EmailBody::Alternative { html, text },
            // lets the owner reply to the submitter straight from the inbox
            reply_to: Some(submission.email.with_name(name)),
        };

        if !self.email.send(email).await? {
            return Err(ContactSubmitError::Send);
        }

        Ok(())
    }
}
