use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiResponse;

pub mod assets;
pub mod contact;
pub mod health;

fn success(message: impl Into<String>) -> Response {
    respond(StatusCode::OK, true, message)
}

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    respond(status, false, message)
}

fn respond(status: StatusCode, success: bool, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiResponse {
            success,
            message: message.into(),
        }),
    )
        .into_response()
}
