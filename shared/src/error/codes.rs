//! Unified error codes for the booking workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Schedule errors
//! - 4xxx: Appointment errors
//! - 5xxx: Service catalogue errors
//! - 6xxx: Deposit errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 on the wire so clients in any language can switch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format (time string, date)
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Actor does not participate in the appointment
    NotParticipant = 2003,

    // ==================== 3xxx: Schedule ====================
    /// Provider not found
    ProviderNotFound = 3001,
    /// Provider profile not found
    ProfileNotFound = 3002,
    /// Provider does not work that day
    NotWorkingDay = 3003,
    /// Working hours are invalid (start >= end, bad weekday)
    InvalidWorkingHours = 3004,
    /// Break not found
    BreakNotFound = 3005,
    /// Break interval is invalid
    InvalidBreak = 3006,

    // ==================== 4xxx: Appointment ====================
    /// Appointment not found
    AppointmentNotFound = 4001,
    /// Requested slot overlaps an existing booking
    SlotUnavailable = 4002,
    /// Status transition not allowed from the current state
    InvalidTransition = 4003,
    /// Appointment date is not in the future
    AppointmentInPast = 4004,
    /// Appointment is already cancelled
    AppointmentAlreadyCancelled = 4005,
    /// Appointment is already completed
    AppointmentAlreadyCompleted = 4006,
    /// Notes exceed the allowed length
    NotesTooLong = 4007,
    /// Cancellation reason exceeds the allowed length
    ReasonTooLong = 4008,
    /// Appointment would end after midnight
    AppointmentCrossesMidnight = 4009,

    // ==================== 5xxx: Service ====================
    /// Service not found
    ServiceNotFound = 5001,
    /// Service missing or inactive
    ServiceUnavailable = 5002,
    /// Service duration below minimum
    InvalidDuration = 5003,
    /// Service price is negative
    InvalidPrice = 5004,

    // ==================== 6xxx: Deposit ====================
    /// Deposit proof reference missing
    DepositProofRequired = 6001,
    /// Deposit amount is negative
    InvalidDepositAmount = 6002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Notification delivery failed
    NotificationFailed = 9004,
}

impl ErrorCode {
    /// Get the numeric error code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Get the default English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            Self::Success => "Operation completed successfully",
            Self::Unknown => "An unknown error occurred",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field is missing",
            Self::ValueOutOfRange => "Value is out of range",

            // Auth
            Self::NotAuthenticated => "Authentication required",
            Self::TokenExpired => "Token has expired",
            Self::TokenInvalid => "Invalid token",

            // Permission
            Self::PermissionDenied => "Permission denied",
            Self::RoleRequired => "Role required",
            Self::NotParticipant => "You do not participate in this appointment",

            // Schedule
            Self::ProviderNotFound => "Provider not found",
            Self::ProfileNotFound => "Provider profile not found",
            Self::NotWorkingDay => "Provider does not work this day",
            Self::InvalidWorkingHours => "Invalid working hours",
            Self::BreakNotFound => "Break not found",
            Self::InvalidBreak => "Invalid break interval",

            // Appointment
            Self::AppointmentNotFound => "Appointment not found",
            Self::SlotUnavailable => "The selected time slot is not available",
            Self::InvalidTransition => "Appointment status cannot change this way",
            Self::AppointmentInPast => "Appointment date must be in the future",
            Self::AppointmentAlreadyCancelled => "Appointment is already cancelled",
            Self::AppointmentAlreadyCompleted => "Appointment is already completed",
            Self::NotesTooLong => "Notes are too long",
            Self::ReasonTooLong => "Cancellation reason is too long",
            Self::AppointmentCrossesMidnight => "Appointment must end before midnight",

            // Service
            Self::ServiceNotFound => "Service not found",
            Self::ServiceUnavailable => "Service not found or inactive",
            Self::InvalidDuration => "Service duration is too short",
            Self::InvalidPrice => "Service price cannot be negative",

            // Deposit
            Self::DepositProofRequired => "Deposit proof is required",
            Self::InvalidDepositAmount => "Deposit amount cannot be negative",

            // System
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
            Self::NotificationFailed => "Notification delivery failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            6 => Ok(Self::InvalidFormat),
            7 => Ok(Self::RequiredField),
            8 => Ok(Self::ValueOutOfRange),

            // Auth
            1001 => Ok(Self::NotAuthenticated),
            1003 => Ok(Self::TokenExpired),
            1004 => Ok(Self::TokenInvalid),

            // Permission
            2001 => Ok(Self::PermissionDenied),
            2002 => Ok(Self::RoleRequired),
            2003 => Ok(Self::NotParticipant),

            // Schedule
            3001 => Ok(Self::ProviderNotFound),
            3002 => Ok(Self::ProfileNotFound),
            3003 => Ok(Self::NotWorkingDay),
            3004 => Ok(Self::InvalidWorkingHours),
            3005 => Ok(Self::BreakNotFound),
            3006 => Ok(Self::InvalidBreak),

            // Appointment
            4001 => Ok(Self::AppointmentNotFound),
            4002 => Ok(Self::SlotUnavailable),
            4003 => Ok(Self::InvalidTransition),
            4004 => Ok(Self::AppointmentInPast),
            4005 => Ok(Self::AppointmentAlreadyCancelled),
            4006 => Ok(Self::AppointmentAlreadyCompleted),
            4007 => Ok(Self::NotesTooLong),
            4008 => Ok(Self::ReasonTooLong),
            4009 => Ok(Self::AppointmentCrossesMidnight),

            // Service
            5001 => Ok(Self::ServiceNotFound),
            5002 => Ok(Self::ServiceUnavailable),
            5003 => Ok(Self::InvalidDuration),
            5004 => Ok(Self::InvalidPrice),

            // Deposit
            6001 => Ok(Self::DepositProofRequired),
            6002 => Ok(Self::InvalidDepositAmount),

            // System
            9001 => Ok(Self::InternalError),
            9002 => Ok(Self::DatabaseError),
            9003 => Ok(Self::ConfigError),
            9004 => Ok(Self::NotificationFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
