use super::lifecycle::LifecycleEvent;
use crate::db::repository::RepoError;
use crate::scheduling::FormatError;
use chrono::NaiveDate;
use shared::error::{AppError, ErrorCode};
use shared::models::{AppointmentStatus, TimeOfDay};
use thiserror::Error;

/// Booking errors
///
/// Every variant is local and recoverable; [`AppError`] carries it to the
/// caller with a stable [`ErrorCode`].
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Service {0} is not available for booking")]
    ServiceUnavailable(i64),

    #[error("Time slot {start}-{end} on {date} is not available")]
    SlotUnavailable {
        date: NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
    },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Cannot {event} an appointment that is {from}")]
    InvalidTransition {
        from: AppointmentStatus,
        event: LifecycleEvent,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}

impl From<FormatError> for BookingError {
    fn from(err: FormatError) -> Self {
        BookingError::InvalidFormat(err.to_string())
    }
}

impl From<sqlx::Error> for BookingError {
    fn from(err: sqlx::Error) -> Self {
        BookingError::Storage(err.into())
    }
}

impl BookingError {
    pub fn appointment_not_found(id: i64) -> Self {
        BookingError::NotFound {
            entity: "Appointment",
            id,
        }
    }
}

/// Result type for booking operations
pub type BookingResult<T> = Result<T, BookingError>;

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let message = err.to_string();
        match err {
            BookingError::InvalidFormat(_) => {
                AppError::with_message(ErrorCode::InvalidFormat, message)
            }
            BookingError::ServiceUnavailable(id) => {
                AppError::with_message(ErrorCode::ServiceUnavailable, message)
                    .with_detail("service_id", id)
            }
            BookingError::SlotUnavailable { date, start, end } => {
                AppError::with_message(ErrorCode::SlotUnavailable, message)
                    .with_detail("date", date.to_string())
                    .with_detail("start_time", start.to_string())
                    .with_detail("end_time", end.to_string())
            }
            BookingError::Forbidden(_) => {
                AppError::with_message(ErrorCode::PermissionDenied, message)
            }
            BookingError::InvalidTransition { from, event } => {
                AppError::with_message(ErrorCode::InvalidTransition, message)
                    .with_detail("status", from.as_str())
                    .with_detail("event", event.code())
            }
            BookingError::NotFound { entity, id } => {
                let code = match entity {
                    "Appointment" => ErrorCode::AppointmentNotFound,
                    "Service" => ErrorCode::ServiceNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::with_message(code, message).with_detail("id", id)
            }
            BookingError::Validation(_) => AppError::validation(message),
            BookingError::Storage(e) => e.into(),
        }
    }
}
