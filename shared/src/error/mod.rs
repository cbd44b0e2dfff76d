//! Unified error system for the booking workspace
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified response envelope
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Schedule errors (working hours, breaks, provider profile)
//! - 4xxx: Appointment errors
//! - 5xxx: Service catalogue errors
//! - 6xxx: Deposit errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::SlotUnavailable);
//!
//! let err = AppError::with_message(ErrorCode::InvalidFormat, "Invalid time: 25:00")
//!     .with_detail("field", "start_time");
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(6));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
