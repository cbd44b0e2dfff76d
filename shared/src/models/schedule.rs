//! Provider schedule models: weekly working hours, breaks, profile

use super::time::{Interval, TimeOfDay};
use serde::{Deserialize, Serialize};

/// Working hours for one weekday
///
/// `day` is 0 = Sunday .. 6 = Saturday. At most one row per provider and day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WorkingHours {
    pub provider_id: i64,
    pub day: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub is_working: bool,
}

impl WorkingHours {
    /// Bookable window, `None` when the provider is off that day
    pub fn window(&self) -> Option<Interval> {
        if !self.is_working {
            return None;
        }
        Interval::new(self.start_time, self.end_time)
    }
}

/// Upsert payload for one weekday
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingHoursUpsert {
    pub day: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default = "default_true")]
    pub is_working: bool,
}

fn default_true() -> bool {
    true
}

/// Break inside the working day, applied on every working weekday
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Break {
    pub id: i64,
    pub provider_id: i64,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub description: String,
}

impl Break {
    pub fn interval(&self) -> Option<Interval> {
        Interval::new(self.start_time, self.end_time)
    }
}

/// Create break payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakCreate {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub description: String,
}

/// Provider (lashista) profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProviderProfile {
    pub provider_id: i64,
    pub studio_name: String,
    /// Deposit the provider asks for before confirming
    pub deposit_amount: f64,
    pub updated_at: i64,
}

/// Upsert profile payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderProfileUpsert {
    pub studio_name: String,
    #[serde(default)]
    pub deposit_amount: f64,
}
