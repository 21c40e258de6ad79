//! Ambient request middlewares: correlation ids, tracing spans and panic
//! recovery.

use std::{any::Any, panic::AssertUnwindSafe, time::Duration};

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{from_fn, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use futures::FutureExt;
use tracing::{debug, error, Span};
use uuid::Uuid;

use crate::models::ApiResponse;

/// Wraps the router with the full middleware stack. Layers run outside-in:
/// panic recovery, then id assignment, then the trace span (which reads the
/// id from the request extensions).
pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(make_span)
                .on_request(|_: &Request, _: &Span| debug!("started processing request"))
                .on_response(|response: &Response, latency: Duration, _: &Span| {
                    let status = response.status();
                    debug!(?latency, %status, "finished processing request")
                })
                .on_body_chunk(())
                .on_eos(())
                .on_failure(()),
        )
        .layer(from_fn(assign_request_id))
        .layer(from_fn(recover_from_panic))
}

/// Correlation id attached to every request and echoed in the response.
#[derive(Debug, Clone, Copy)]
struct RequestId(Uuid);

async fn assign_request_id(mut request: Request, next: Next) -> Response {
    let request_id = RequestId(Uuid::now_v7());
    request.extensions_mut().insert(request_id);
    let response = next.run(request).await;
    (
        [("X-Request-Id", request_id.0.as_hyphenated().to_string())],
        response,
    )
        .into_response()
}

fn make_span(request: &Request) -> Span {
    let version = request.version();
    let method = request.method();
    let route = request.uri();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.as_hyphenated().to_string())
        .unwrap_or_else(|| "-".into());

    tracing::debug_span!("http-request", ?version, %method, %route, %request_id)
}

/// Converts a panicking handler into the uniform failure response instead of
/// tearing down the connection.
async fn recover_from_panic(request: Request, next: Next) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            error!("request handler panicked: {}", panic_message(payload.as_ref()));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse {
                    success: false,
                    message: "Internal server error".into(),
                }),
            )
                .into_response()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
