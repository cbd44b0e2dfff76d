//! Free slot computation

use super::conflict::has_conflict;
use shared::models::{AvailabilityStatus, DayAvailability, Interval, TimeOfDay, WorkingHours};

/// Fixed-stride free slots inside `window`
///
/// Candidates start at `window.start` and advance by `slot_size` while the
/// whole slot fits inside the window. A candidate is dropped if it overlaps
/// any break or booked interval. Output is ascending and depends only on the
/// inputs.
pub fn compute_free_slots(
    window: Interval,
    breaks: &[Interval],
    booked: &[Interval],
    slot_size: u16,
) -> Vec<TimeOfDay> {
    let mut slots = Vec::new();
    if slot_size == 0 {
        return slots;
    }

    let mut cursor = window.start();
    while let Some(slot) = Interval::starting_at(cursor, slot_size) {
        if slot.end() > window.end() {
            break;
        }
        if !has_conflict(&slot, breaks) && !has_conflict(&slot, booked) {
            slots.push(cursor);
        }
        match cursor.checked_add(slot_size) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    slots
}

/// Free slots for one day, with the reason when there are none
pub fn day_availability(
    hours: Option<&WorkingHours>,
    breaks: &[Interval],
    booked: &[Interval],
    slot_size: u16,
) -> DayAvailability {
    let Some(window) = hours.and_then(WorkingHours::window) else {
        return DayAvailability::not_working();
    };

    let slots = compute_free_slots(window, breaks, booked, slot_size);
    let status = if slots.is_empty() {
        AvailabilityStatus::FullyBooked
    } else {
        AvailabilityStatus::Available
    };
    DayAvailability {
        status,
        window: Some(window),
        slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    fn iv(start: &str, end: &str) -> Interval {
        Interval::new(t(start), t(end)).unwrap()
    }

    fn hours(start: &str, end: &str, is_working: bool) -> WorkingHours {
        WorkingHours {
            provider_id: 1,
            day: 3,
            start_time: t(start),
            end_time: t(end),
            is_working,
        }
    }

    /// Random sub-interval of `window`
    fn random_within(rng: &mut StdRng, window: Interval) -> Interval {
        let lo = window.start().minutes();
        let hi = window.end().minutes();
        let start = rng.gen_range(lo..hi);
        let end = rng.gen_range(start + 1..=hi);
        Interval::new(
            TimeOfDay::from_minutes(start).unwrap(),
            TimeOfDay::from_minutes(end).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_reference_day() {
        let slots = compute_free_slots(
            iv("09:00", "17:00"),
            &[iv("12:00", "13:00")],
            &[iv("10:00", "10:30")],
            30,
        );
        assert!(slots.contains(&t("09:00")));
        assert!(slots.contains(&t("09:30")));
        assert!(!slots.contains(&t("10:00")));
        assert!(slots.contains(&t("10:30")));
        assert!(!slots.contains(&t("12:00")));
        assert!(!slots.contains(&t("12:30")));
        assert!(slots.contains(&t("13:00")));
        assert_eq!(slots.last(), Some(&t("16:30")));
        // 16 candidates, minus 1 booked, minus 2 break
        assert_eq!(slots.len(), 13);
    }

    #[test]
    fn test_slot_must_fit_window() {
        let slots = compute_free_slots(iv("09:00", "10:45"), &[], &[], 30);
        assert_eq!(slots, vec![t("09:00"), t("09:30"), t("10:00")]);
    }

    #[test]
    fn test_window_near_midnight() {
        let slots = compute_free_slots(iv("22:00", "23:59"), &[], &[], 30);
        assert_eq!(slots, vec![t("22:00"), t("22:30"), t("23:00")]);
    }

    #[test]
    fn test_zero_slot_size_is_empty() {
        assert!(compute_free_slots(iv("09:00", "17:00"), &[], &[], 0).is_empty());
    }

    #[test]
    fn test_window_covered_by_breaks_is_empty() {
        let window = iv("09:00", "17:00");
        let breaks = [iv("08:00", "13:00"), iv("13:00", "18:00")];
        assert!(compute_free_slots(window, &breaks, &[], 30).is_empty());
    }

    #[test]
    fn test_random_free_slots_never_overlap() {
        let mut rng = StdRng::seed_from_u64(7);
        let window = iv("08:00", "20:00");
        for _ in 0..500 {
            let breaks: Vec<_> = (0..rng.gen_range(0..4))
                .map(|_| random_within(&mut rng, window))
                .collect();
            let booked: Vec<_> = (0..rng.gen_range(0..6))
                .map(|_| random_within(&mut rng, window))
                .collect();
            let slot_size = [15, 20, 30, 45, 60][rng.gen_range(0..5)];

            let slots = compute_free_slots(window, &breaks, &booked, slot_size);
            for start in &slots {
                let slot = Interval::starting_at(*start, slot_size).unwrap();
                assert!(window.contains(&slot));
                assert!(breaks.iter().all(|b| !slot.overlaps(b)), "{slot} hits a break");
                assert!(booked.iter().all(|b| !slot.overlaps(b)), "{slot} hits a booking");
            }
            assert!(slots.windows(2).all(|w| w[0] < w[1]));

            let again = compute_free_slots(window, &breaks, &booked, slot_size);
            assert_eq!(slots, again);
        }
    }

    #[test]
    fn test_random_full_break_coverage_is_empty() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            let lo: u16 = rng.gen_range(0..1200);
            let hi: u16 = rng.gen_range(lo + 1..1440);
            let window = Interval::new(
                TimeOfDay::from_minutes(lo).unwrap(),
                TimeOfDay::from_minutes(hi).unwrap(),
            )
            .unwrap();
            // Split the window into contiguous breaks at random cut points
            let mut cuts: Vec<u16> = (0..rng.gen_range(0..5))
                .map(|_| rng.gen_range(lo..=hi))
                .collect();
            cuts.extend([lo, hi]);
            cuts.sort_unstable();
            cuts.dedup();
            let breaks: Vec<_> = cuts
                .windows(2)
                .filter_map(|w| {
                    Interval::new(
                        TimeOfDay::from_minutes(w[0]).unwrap(),
                        TimeOfDay::from_minutes(w[1]).unwrap(),
                    )
                })
                .collect();
            assert!(compute_free_slots(window, &breaks, &[], 30).is_empty());
        }
    }

    #[test]
    fn test_day_availability_not_working() {
        let off = hours("09:00", "17:00", false);
        let day = day_availability(Some(&off), &[], &[], 30);
        assert_eq!(day.status, AvailabilityStatus::NotWorking);
        assert!(day.window.is_none());

        let missing = day_availability(None, &[], &[], 30);
        assert_eq!(missing.status, AvailabilityStatus::NotWorking);
    }

    #[test]
    fn test_day_availability_fully_booked() {
        let h = hours("09:00", "10:00", true);
        let day = day_availability(Some(&h), &[], &[iv("09:00", "10:00")], 30);
        assert_eq!(day.status, AvailabilityStatus::FullyBooked);
        assert!(day.slots.is_empty());
        assert_eq!(day.window, Some(iv("09:00", "10:00")));
    }

    #[test]
    fn test_day_availability_available() {
        let h = hours("09:00", "10:00", true);
        let day = day_availability(Some(&h), &[], &[iv("09:00", "09:30")], 30);
        assert_eq!(day.status, AvailabilityStatus::Available);
        assert_eq!(day.slots, vec![t("09:30")]);
    }
}
