//! Responses for requests that match no route

use crate::web::response_types::ApiError;

/// Unknown path
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Known path, unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
