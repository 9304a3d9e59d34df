use serde::Serialize;
use utoipa::ToSchema;

use crate::validation::ValidationErrors;

/// Success envelope: a message plus the payload's own keys flattened beside it,
/// e.g. `{ "message": "...", "product": { ... } }`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

impl ApiResponse<Empty> {
    pub fn message(message: impl Into<String>) -> Self {
        Self::success(message, Empty {})
    }
}

/// Payload for responses that only carry a message.
#[derive(Debug, Serialize, ToSchema)]
pub struct Empty {}

/// Failure envelope: `{ "message": "..." }` or `{ "errors": { field: [..] } }`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            errors: None,
        }
    }

    pub fn fields(errors: ValidationErrors) -> Self {
        Self {
            message: None,
            errors: Some(errors),
        }
    }
}
