//! Slot-based availability computation.
//!
//! Pure functions over snapshots: the caller supplies the practitioner, the
//! target date and the full appointment collection, and gets back the open
//! slots. Nothing here reads storage or the clock, so the functions are
//! deterministic, total over their inputs, and safe to call from any thread.
//!
//! Availability *detects* collisions; it does not prevent them. Refusing a
//! booking for an occupied slot is the responsibility of the appointment
//! repository, which checks the computed availability before writing.

use crate::appointment::Appointment;
use crate::practitioner::Practitioner;
use chrono::{Duration, NaiveDate, NaiveTime};
use std::collections::HashSet;

/// Generates the slot sequence from `opening` (inclusive) to `closing`
/// (exclusive) with a fixed step.
///
/// A zero step yields no slots. Steps that would wrap past midnight terminate
/// the sequence instead of cycling.
pub fn schedule_slots(opening: NaiveTime, closing: NaiveTime, step_minutes: u32) -> Vec<NaiveTime> {
    let mut slots = Vec::new();
    if step_minutes == 0 {
        return slots;
    }

    let step = Duration::minutes(i64::from(step_minutes));
    let mut slot = opening;
    while slot < closing {
        slots.push(slot);
        let (next, wrapped) = slot.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        slot = next;
    }

    slots
}

/// Computes the open slots for a practitioner on a date.
///
/// Appointments for other practitioners or other dates are ignored. The
/// result is always a subsequence of the practitioner's schedule, in the
/// schedule's own (ascending) order: booked slots are removed, nothing is
/// invented. With no matching appointments the full schedule comes back.
pub fn available_slots(
    practitioner: &Practitioner,
    date: NaiveDate,
    appointments: &[Appointment],
) -> Vec<NaiveTime> {
    let booked: HashSet<NaiveTime> = appointments
        .iter()
        .filter(|a| a.practitioner == practitioner.name && a.date == date)
        .map(|a| a.slot)
        .collect();

    practitioner
        .schedule
        .iter()
        .copied()
        .filter(|slot| !booked.contains(slot))
        .collect()
}

/// Drops slots that are not strictly after `now`.
///
/// Caller-side refinement for "today": when the target date is the current
/// date, a caller may not want to offer slots that have already passed. The
/// current time is always an argument — this module never reads the clock.
pub fn without_elapsed(slots: Vec<NaiveTime>, now: NaiveTime) -> Vec<NaiveTime> {
    slots.into_iter().filter(|slot| *slot > now).collect()
}
