use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response, routing, Form, Router};
use folio_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use folio_models::contact::SubmissionDraft;

use super::{failure, success};
use crate::models::contact::ApiSubmission;

const SENT: &str = "Thank you! Your message has been sent successfully.";
const SEND_FAILED: &str =
    "Sorry, there was an error sending your message. Please try again later.";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(
            "/contact",
            routing::post(submit).fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    Form(submission): Form<ApiSubmission>,
) -> Response {
    let submission = match SubmissionDraft::from(submission).validate() {
        Ok(submission) => submission,
        // still a 200; the browser script only inspects the success flag
        Err(rejection) => return failure(StatusCode::OK, rejection.to_string()),
    };

    match service.submit(submission).await {
        Ok(()) => success(SENT),
        Err(ContactSubmitError::Send) => failure(StatusCode::OK, SEND_FAILED),
        Err(ContactSubmitError::Other(err)) => {
            tracing::error!("failed to send contact message: {err}");
            failure(
                StatusCode::OK,
                format!("Sorry, there was an error sending your message: {err}"),
            )
        }
    }
}

async fn method_not_allowed() -> Response {
    failure(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
