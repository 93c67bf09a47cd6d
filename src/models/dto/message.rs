use serde::Serialize;
use utoipa::ToSchema;

/// Error envelope: `success` is always `false` here.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorMessage {
    pub success: bool,
    pub error: String,
}

impl ErrorMessage {
    pub fn new(error: &str) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}
