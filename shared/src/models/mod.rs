//! Data models
//!
//! Shared between booking-server and whatever transport embeds it.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod appointment;
pub mod availability;
pub mod page;
pub mod schedule;
pub mod service;
pub mod time;
pub mod user;

// Re-exports
pub use appointment::*;
pub use availability::*;
pub use page::*;
pub use schedule::*;
pub use service::*;
pub use time::*;
pub use user::*;
