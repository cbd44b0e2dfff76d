//! Appointments: lifecycle state machine, booking service, calendar locks

mod error;
pub mod lifecycle;
pub mod locks;
pub mod service;

pub use error::{BookingError, BookingResult};
pub use lifecycle::{LifecycleEvent, Transition};
pub use locks::CalendarLocks;
pub use service::{AppointmentService, BookingRequest};
