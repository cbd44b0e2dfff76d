//! Core module: configuration and server state
//!
//! - [`Config`] - environment-driven configuration
//! - [`ServerState`] - shared service handles

pub mod config;
pub mod state;

pub use config::Config;
pub use state::ServerState;
