use nutype::nutype;
use thiserror::Error;

use crate::email_address::EmailAddress;

/// A fully validated contact form submission.
///
/// Can only be obtained by running a [`SubmissionDraft`] through
/// [`SubmissionDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: SubmissionName,
    pub email: EmailAddress,
    pub message: SubmissionMessage,
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct SubmissionName(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 10, len_char_max = 4096),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct SubmissionMessage(String);

/// The raw, untrusted fields of a contact form submission as they arrive in
/// the request body. Absent fields are represented as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl SubmissionDraft {
    /// Validates all fields, collecting every violation instead of stopping
    /// at the first one.
    pub fn validate(self) -> Result<Submission, SubmissionRejection> {
        let mut errors = Vec::new();

        let name = if self.name.trim().is_empty() {
            errors.push(SubmissionFieldError::NameMissing);
            None
        } else {
            match SubmissionName::try_new(self.name) {
                Ok(name) => Some(name),
                Err(_) => {
                    errors.push(SubmissionFieldError::NameTooLong);
                    None
                }
            }
        };

        let email = match self.email.trim() {
            "" => {
                errors.push(SubmissionFieldError::EmailMissing);
                None
            }
            // Single-label domains ("a@b") pass lettre's parser but not the
            // form's pattern, so they are rejected here as well.
            raw => match raw.parse::<EmailAddress>() {
                Ok(email)
                    if email
                        .as_str()
                        .rsplit_once('@')
                        .is_some_and(|(_, domain)| domain.contains('.')) =>
                {
                    Some(email)
                }
                _ => {
                    errors.push(SubmissionFieldError::EmailInvalid);
                    None
                }
            },
        };

        let message = if self.message.trim().is_empty() {
            errors.push(SubmissionFieldError::MessageMissing);
            None
        } else {
            match SubmissionMessage::try_new(self.message) {
                Ok(message) => Some(message),
                Err(SubmissionMessageError::LenCharMinViolated) => {
                    errors.push(SubmissionFieldError::MessageTooShort);
                    None
                }
                Err(SubmissionMessageError::LenCharMaxViolated) => {
                    errors.push(SubmissionFieldError::MessageTooLong);
                    None
                }
            }
        };

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) => Ok(Submission {
                name,
                email,
                message,
            }),
            _ => Err(SubmissionRejection(errors)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionFieldError {
    #[error("Name is required")]
    NameMissing,
    #[error("Name is too long")]
    NameTooLong,
    #[error("Email is required")]
    EmailMissing,
    #[error("Invalid email format")]
    EmailInvalid,
    #[error("Message is required")]
    MessageMissing,
    #[error("Message must be at least 10 characters long")]
    MessageTooShort,
    #[error("Message is too long")]
    MessageTooLong,
}

/// All field errors of a rejected submission, in field order. The [`Display`]
/// implementation joins them with `", "`, which is exactly the failure
/// message returned to the client.
///
/// [`Display`]: std::fmt::Display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRejection(pub Vec<SubmissionFieldError>);

impl std::fmt::Display for SubmissionRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            error.fmt(f)?;
        }
        Ok(())
    }
}

impl std::error::Error for SubmissionRejection {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn draft(name: &str, email: &str, message: &str) -> SubmissionDraft {
        SubmissionDraft {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn ok() {
        let submission = draft(
            "  Max Mustermann ",
            "max.mustermann@example.de",
            " Hello, I would like to work with you! ",
        )
        .validate()
        .unwrap();

        assert_eq!(&*submission.name, "Max Mustermann");
        assert_eq!(submission.email.as_str(), "max.mustermann@example.de");
        assert_eq!(&*submission.message, "Hello, I would like to work with you!");
    }

    #[test]
    fn all_fields_missing() {
        let err = draft("", "", "").validate().unwrap_err();

        assert_eq!(
            err.0,
            [
                SubmissionFieldError::NameMissing,
                SubmissionFieldError::EmailMissing,
                SubmissionFieldError::MessageMissing,
            ]
        );
        assert_eq!(
            err.to_string(),
            "Name is required, Email is required, Message is required"
        );
    }

    #[test]
    fn whitespace_only_fields_are_missing() {
        let err = draft("  ", "\t", " \n ").validate().unwrap_err();

        assert_eq!(
            err.0,
            [
                SubmissionFieldError::NameMissing,
                SubmissionFieldError::EmailMissing,
                SubmissionFieldError::MessageMissing,
            ]
        );
    }

    #[test]
    fn invalid_emails() {
        for email in ["abc", "a@b", "a@b@c.com", "a b@example.com"] {
            let err = draft("Max", email, "This is long enough.")
                .validate()
                .unwrap_err();

            assert_eq!(err.0, [SubmissionFieldError::EmailInvalid], "{email}");
            assert_eq!(err.to_string(), "Invalid email format");
        }
    }

    #[test]
    fn valid_emails() {
        for email in ["user@example.com", "first.last@sub.example.co.uk"] {
            draft("Max", email, "This is long enough.")
                .validate()
                .unwrap();
        }
    }

    #[test]
    fn message_too_short() {
        let err = draft("Max", "max@example.com", "short").validate().unwrap_err();

        assert_eq!(err.0, [SubmissionFieldError::MessageTooShort]);
        assert_eq!(
            err.to_string(),
            "Message must be at least 10 characters long"
        );
    }

    #[test]
    fn multiple_errors_are_joined() {
        let err = draft("", "abc", "short").validate().unwrap_err();

        assert_eq!(
            err.to_string(),
            "Name is required, Invalid email format, Message must be at least 10 characters long"
        );
    }

    #[test]
    fn name_too_long() {
        let err = draft(&"x".repeat(257), "max@example.com", "This is long enough.")
            .validate()
            .unwrap_err();

        assert_eq!(err.0, [SubmissionFieldError::NameTooLong]);
    }
}
