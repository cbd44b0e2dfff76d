//! Scheduling core
//!
//! Pure functions over [`TimeOfDay`](shared::models::TimeOfDay) and
//! [`Interval`](shared::models::Interval): clock/date parsing, free-slot
//! computation and booking conflict detection. Nothing here touches storage.

pub mod availability;
pub mod conflict;
pub mod time;

pub use availability::{compute_free_slots, day_availability};
pub use conflict::{blocking_intervals, has_conflict};
pub use time::{
    FormatError, day_bounds, is_after_today, parse_date, to_minutes, to_time_string, today,
    weekday_index,
};

/// Default slot stride (minutes)
pub const DEFAULT_SLOT_MINUTES: u16 = 30;
