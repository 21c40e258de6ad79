use serde::{Deserialize, Serialize};

pub mod contact;

/// The uniform response body of the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}
