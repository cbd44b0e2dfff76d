//! Service catalogue model

use serde::{Deserialize, Serialize};

/// Shortest bookable service (minutes)
pub const MIN_SERVICE_DURATION: i64 = 15;

/// Service offered by a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Service {
    pub id: i64,
    pub provider_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Minutes, `>= 15`
    pub duration: i64,
    pub price: f64,
    /// Inactive services stay on historical appointments but cannot be booked
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create service payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCreate {
    pub name: String,
    pub description: Option<String>,
    pub duration: i64,
    pub price: f64,
}
