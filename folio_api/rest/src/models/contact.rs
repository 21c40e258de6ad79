use folio_models::contact::SubmissionDraft;
use serde::Deserialize;

/// Raw form fields as posted by the browser. Missing fields are treated as
/// empty strings; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl From<ApiSubmission> for SubmissionDraft {
    fn from(value: ApiSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            message: value.message,
        }
    }
}
