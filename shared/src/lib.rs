//! Shared types for the Lash booking workspace
//!
//! Domain models, the unified error system and small utilities used by
//! `booking-server` and by whatever transport layer embeds it.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
