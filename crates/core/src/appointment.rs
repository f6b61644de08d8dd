//! Appointment domain model.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use vetpr_types::{NonEmptyText, Rut};

/// The kind of consultation being booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentKind {
    General,
    Emergency,
    Checkup,
    Vaccination,
    Surgery,
}

impl AppointmentKind {
    /// Human-readable label for lists and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentKind::General => "General consultation",
            AppointmentKind::Emergency => "Emergency",
            AppointmentKind::Checkup => "Follow-up check",
            AppointmentKind::Vaccination => "Vaccination",
            AppointmentKind::Surgery => "Surgery",
        }
    }

    /// The wire/CLI name of the kind (`snake_case`, matching serde).
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentKind::General => "general",
            AppointmentKind::Emergency => "emergency",
            AppointmentKind::Checkup => "checkup",
            AppointmentKind::Vaccination => "vaccination",
            AppointmentKind::Surgery => "surgery",
        }
    }
}

impl std::fmt::Display for AppointmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(AppointmentKind::General),
            "emergency" => Ok(AppointmentKind::Emergency),
            "checkup" => Ok(AppointmentKind::Checkup),
            "vaccination" => Ok(AppointmentKind::Vaccination),
            "surgery" => Ok(AppointmentKind::Surgery),
            other => Err(format!("unknown appointment kind '{other}'")),
        }
    }
}

/// A booked appointment.
///
/// Associates a practitioner (by name), a calendar date and a slot, plus the
/// patient and reason. At most one appointment may exist per
/// (practitioner, date, slot) triple; the appointment repository enforces
/// this on booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Record identifier, canonical 32-hex form. Assigned by the repository.
    pub id: String,
    /// Record id of the pet being seen.
    pub pet_id: String,
    /// Name of the practitioner.
    pub practitioner: String,
    pub date: NaiveDate,
    /// Slot start time; must be one of the practitioner's schedule slots.
    pub slot: NaiveTime,
    pub kind: AppointmentKind,
    pub reason: NonEmptyText,
    /// Free-form notes, may be empty.
    #[serde(default)]
    pub notes: String,
}

/// Input for booking an appointment; the repository assigns the record id.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub pet_id: String,
    pub practitioner: String,
    pub date: NaiveDate,
    pub slot: NaiveTime,
    pub kind: AppointmentKind,
    pub reason: NonEmptyText,
    pub notes: String,
}

/// Summary of an appointment joined with its pet and owner, for listings.
#[derive(Debug, Clone)]
pub struct AppointmentDetails {
    pub appointment: Appointment,
    pub pet_name: NonEmptyText,
    pub owner_rut: Rut,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in [
            AppointmentKind::General,
            AppointmentKind::Emergency,
            AppointmentKind::Checkup,
            AppointmentKind::Vaccination,
            AppointmentKind::Surgery,
        ] {
            assert_eq!(kind.as_str().parse::<AppointmentKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!(
            " Surgery ".parse::<AppointmentKind>().unwrap(),
            AppointmentKind::Surgery
        );
        assert!("house call".parse::<AppointmentKind>().is_err());
    }
}
