//! Appointment Model

use super::time::{Interval, TimeOfDay};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum length of appointment notes (characters)
pub const MAX_NOTES_LEN: usize = 500;
/// Maximum length of a cancellation reason (characters)
pub const MAX_REASON_LEN: usize = 200;

/// Appointment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    PaymentPending,
}

impl AppointmentStatus {
    /// Statuses that occupy the provider's calendar
    pub const BLOCKING: [AppointmentStatus; 3] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::PaymentPending,
    ];

    /// Whether this status blocks new bookings in the same interval
    pub fn is_blocking(self) -> bool {
        Self::BLOCKING.contains(&self)
    }

    /// No transition leaves a terminal status
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::PaymentPending => "payment_pending",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appointment entity
///
/// Service name, duration and price are copies taken when the appointment is
/// created; later edits to the service do not touch booked appointments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Appointment {
    pub id: i64,
    pub provider_id: i64,
    pub client_id: i64,
    pub service_id: i64,
    pub service_name: String,
    /// Minutes
    pub service_duration: i64,
    pub service_price: f64,
    pub appointment_date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: AppointmentStatus,
    /// Reference (URL or id) to an uploaded proof of payment
    pub deposit_proof: Option<String>,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Appointment {
    /// Occupied interval; `None` only for a corrupted row with `start >= end`
    pub fn interval(&self) -> Option<Interval> {
        Interval::new(self.start_time, self.end_time)
    }

    /// Client or provider of this appointment
    pub fn is_participant(&self, user_id: i64) -> bool {
        self.client_id == user_id || self.provider_id == user_id
    }
}

/// Insert payload, built by the booking service after validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub provider_id: i64,
    pub client_id: i64,
    pub service_id: i64,
    pub service_name: String,
    pub service_duration: i64,
    pub service_price: f64,
    pub appointment_date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub notes: Option<String>,
}

/// Listing filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentQuery {
    pub status: Option<AppointmentStatus>,
    /// Provider listings only
    pub date: Option<NaiveDate>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for AppointmentQuery {
    fn default() -> Self {
        Self {
            status: None,
            date: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

impl AppointmentQuery {
    /// Page and limit clamped to `>= 1` and `<= 100`
    pub fn normalized(&self) -> (u32, u32) {
        (self.page.max(1), self.limit.clamp(1, 100))
    }

    pub fn offset(&self) -> i64 {
        let (page, limit) = self.normalized();
        i64::from(page - 1) * i64::from(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&AppointmentStatus::PaymentPending).unwrap();
        assert_eq!(json, "\"payment_pending\"");
        let status: AppointmentStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(status, AppointmentStatus::Confirmed);
    }

    #[test]
    fn test_blocking_and_terminal() {
        assert!(AppointmentStatus::Pending.is_blocking());
        assert!(AppointmentStatus::PaymentPending.is_blocking());
        assert!(AppointmentStatus::Confirmed.is_blocking());
        assert!(!AppointmentStatus::Cancelled.is_blocking());
        assert!(!AppointmentStatus::Completed.is_blocking());

        assert!(AppointmentStatus::Cancelled.is_terminal());
        assert!(AppointmentStatus::Completed.is_terminal());
        assert!(!AppointmentStatus::Confirmed.is_terminal());
    }

    #[test]
    fn test_query_normalization() {
        let q = AppointmentQuery {
            page: 0,
            limit: 500,
            ..Default::default()
        };
        assert_eq!(q.normalized(), (1, 100));
        assert_eq!(q.offset(), 0);

        let q = AppointmentQuery {
            page: 3,
            limit: 10,
            ..Default::default()
        };
        assert_eq!(q.offset(), 20);
    }

    #[test]
    fn test_query_defaults_from_json() {
        let q: AppointmentQuery = serde_json::from_str(r#"{"status":"pending"}"#).unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 10);
        assert_eq!(q.status, Some(AppointmentStatus::Pending));
    }
}
