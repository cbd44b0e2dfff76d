//! Day availability result

use super::time::{Interval, TimeOfDay};
use serde::{Deserialize, Serialize};

/// Why a day has (or lacks) free slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// No working hours row for the weekday, or `is_working = false`
    NotWorking,
    /// Working, but breaks and bookings cover every slot
    FullyBooked,
    Available,
}

/// Free slots for one provider and date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayAvailability {
    pub status: AvailabilityStatus,
    pub window: Option<Interval>,
    /// Slot start times, ascending
    pub slots: Vec<TimeOfDay>,
}

impl DayAvailability {
    pub fn not_working() -> Self {
        Self {
            status: AvailabilityStatus::NotWorking,
            window: None,
            slots: Vec::new(),
        }
    }
}
