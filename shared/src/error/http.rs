//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            Self::InvalidRequest => StatusCode::BAD_REQUEST,

            // 404 Not Found
            Self::EmployeeNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::EmployeeEmailExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::RegistrationIncomplete => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::AdminRequired => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
