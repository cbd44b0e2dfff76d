//! Lash Booking Server - appointment scheduling core
//!
//! Providers (lashistas) publish working hours, breaks and services; clients
//! book appointments that move through a small lifecycle.
//!
//! # Module structure
//!
//! ```text
//! booking-server/src/
//! ├── core/          # configuration, server state
//! ├── auth.rs        # authenticated actor
//! ├── scheduling/    # time arithmetic, free slots, conflict checks
//! ├── appointments/  # lifecycle state machine, booking service, calendar locks
//! ├── notify/        # notifier trait and fire-and-forget dispatcher
//! ├── db/            # SQLite pool, migrations, repositories
//! └── utils/         # logging
//! ```

pub mod appointments;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod scheduling;
pub mod utils;

pub use appointments::{AppointmentService, BookingError, BookingRequest, BookingResult};
pub use auth::Actor;
pub use core::{Config, ServerState};
pub use db::DbService;
pub use notify::{BroadcastNotifier, LogNotifier, Notification, NotificationDispatcher, Notifier};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Install the logger for `config`
///
/// Writes to daily files under the work dir in production, stdout otherwise.
/// `.env` loading stays with the caller.
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    if config.is_production() {
        init_logger_with_file(&config.log_level, config.log_json, Some(config.log_dir().as_path()))
    } else {
        init_logger(&config.log_level, config.log_json)
    }
}
