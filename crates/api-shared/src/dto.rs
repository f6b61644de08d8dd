//! Wire types for the REST API.
//!
//! Dates are `YYYY-MM-DD`, slots are `HH:MM`, appointment kinds are the
//! snake_case names (`general`, `emergency`, `checkup`, `vaccination`,
//! `surgery`). Handlers parse these strings into domain types and map
//! failures to 4xx responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// A client (pet owner) as exposed over the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientDto {
    /// Canonical RUT, `body-check` form.
    pub rut: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub photo_url: Option<String>,
}

/// Request body for registering a client.
///
/// The RUT may carry dots and a dash; it is normalised server-side.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateClientReq {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub rut: String,
    /// Explicit photo URL. When absent and photo enrichment is enabled, the
    /// server fetches one from the remote photo API.
    pub photo_url: Option<String>,
}

/// Request body for updating a client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateClientReq {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// New RUT; a change re-keys the record.
    pub rut: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListClientsRes {
    pub clients: Vec<ClientDto>,
}

/// A pet as exposed over the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PetDto {
    pub id: String,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age_years: u32,
    pub owner_rut: String,
    pub photo_url: Option<String>,
}

/// Request body for registering a pet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePetReq {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age_years: u32,
    pub owner_rut: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListPetsRes {
    pub pets: Vec<PetDto>,
}

/// A practitioner as exposed over the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PractitionerDto {
    pub name: String,
    pub specialty: String,
    /// Slot start times, `HH:MM`, ascending.
    pub schedule: Vec<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListPractitionersRes {
    pub practitioners: Vec<PractitionerDto>,
}

/// An appointment as exposed over the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppointmentDto {
    pub id: String,
    pub pet_id: String,
    pub practitioner: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub slot: String,
    pub kind: String,
    pub reason: String,
    pub notes: String,
}

/// Request body for booking an appointment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookAppointmentReq {
    pub pet_id: String,
    pub practitioner: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub slot: String,
    pub kind: String,
    pub reason: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListAppointmentsRes {
    pub appointments: Vec<AppointmentDto>,
}

/// Open slots for a practitioner on a date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityRes {
    pub practitioner: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// Open slot start times, `HH:MM`, ascending.
    pub slots: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_request_notes_default_to_empty() {
        let req: BookAppointmentReq = serde_json::from_str(
            r#"{
                "pet_id": "550e8400e29b41d4a716446655440000",
                "practitioner": "Dr. Simi",
                "date": "2026-08-10",
                "slot": "11:00",
                "kind": "general",
                "reason": "Control anual"
            }"#,
        )
        .unwrap();
        assert_eq!(req.notes, "");
    }
}
