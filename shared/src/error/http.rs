//! HTTP status code mapping for error codes
//!
//! The booking core never speaks HTTP itself; the embedding transport calls
//! [`ErrorCode::http_status`] when it renders an [`super::AppError`].

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::ProviderNotFound
            | Self::ProfileNotFound
            | Self::BreakNotFound
            | Self::AppointmentNotFound
            | Self::ServiceNotFound
            | Self::ServiceUnavailable => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::SlotUnavailable
            | Self::InvalidTransition
            | Self::AppointmentAlreadyCancelled
            | Self::AppointmentAlreadyCompleted => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::PermissionDenied | Self::RoleRequired | Self::NotParticipant => {
                StatusCode::FORBIDDEN
            }

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidFormat
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::NotWorkingDay
            | Self::InvalidWorkingHours
            | Self::InvalidBreak
            | Self::AppointmentInPast
            | Self::NotesTooLong
            | Self::ReasonTooLong
            | Self::AppointmentCrossesMidnight
            | Self::InvalidDuration
            | Self::InvalidPrice
            | Self::DepositProofRequired
            | Self::InvalidDepositAmount => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::NotificationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
