//! Booking conflict detection
//!
//! Uses [`Interval::overlaps`], the same predicate the availability
//! calculator filters slots with.

use shared::models::{Appointment, Interval};

/// `true` when `candidate` overlaps any interval in `existing`
pub fn has_conflict(candidate: &Interval, existing: &[Interval]) -> bool {
    existing.iter().any(|iv| candidate.overlaps(iv))
}

/// Intervals of appointments whose status blocks the calendar
///
/// Callers pass appointments already restricted to one provider and date.
pub fn blocking_intervals<'a, I>(appointments: I) -> Vec<Interval>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    appointments
        .into_iter()
        .filter(|a| a.status.is_blocking())
        .filter_map(|a| {
            let interval = a.interval();
            if interval.is_none() {
                tracing::warn!(
                    appointment_id = a.id,
                    start = %a.start_time,
                    end = %a.end_time,
                    "Skipping appointment with empty interval"
                );
            }
            interval
        })
        .collect()
}

/// Three-branch overlap form used by older slot and break filters
#[cfg(test)]
pub(crate) fn overlaps_three_branch(a: &Interval, b: &Interval) -> bool {
    (a.start() >= b.start() && a.start() < b.end())
        || (a.end() > b.start() && a.end() <= b.end())
        || (a.start() <= b.start() && a.end() >= b.end())
}
