//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Schedule errors
/// - 4xxx: Appointment errors
/// - 5xxx: Service catalogue errors
/// - 6xxx: Deposit errors
/// - 7xxx..9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Schedule errors (3xxx)
    Schedule,
    /// Appointment errors (4xxx)
    Appointment,
    /// Service catalogue errors (5xxx)
    Service,
    /// Deposit errors (6xxx)
    Deposit,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Schedule,
            4000..5000 => Self::Appointment,
            5000..6000 => Self::Service,
            6000..7000 => Self::Deposit,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Schedule => "schedule",
            Self::Appointment => "appointment",
            Self::Service => "service",
            Self::Deposit => "deposit",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3003), ErrorCategory::Schedule);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::Appointment);
        assert_eq!(ErrorCategory::from_code(5002), ErrorCategory::Service);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Deposit);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(
            ErrorCode::PermissionDenied.category(),
            ErrorCategory::Permission
        );
        assert_eq!(
            ErrorCode::SlotUnavailable.category(),
            ErrorCategory::Appointment
        );
        assert_eq!(
            ErrorCode::ServiceUnavailable.category(),
            ErrorCategory::Service
        );
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Appointment).unwrap();
        assert_eq!(json, "\"appointment\"");

        let category: ErrorCategory = serde_json::from_str("\"schedule\"").unwrap();
        assert_eq!(category, ErrorCategory::Schedule);
    }
}
