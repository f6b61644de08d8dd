//! Constants used throughout the VetPR core crate.
//!
//! This module contains all path and filename constants to ensure
//! consistency across the codebase and make maintenance easier.

/// Default directory for practice data storage when no explicit directory is configured.
pub const DEFAULT_PRACTICE_DATA_DIR: &str = "practice_data";

/// Directory name for client records storage.
pub const CLIENTS_DIR_NAME: &str = "clients";

/// Directory name for pet records storage.
pub const PETS_DIR_NAME: &str = "pets";

/// Directory name for practitioner records storage.
pub const PRACTITIONERS_DIR_NAME: &str = "practitioners";

/// Directory name for appointment records storage.
pub const APPOINTMENTS_DIR_NAME: &str = "appointments";

/// Filename for client JSON files.
pub const CLIENT_JSON_FILENAME: &str = "client.json";

/// Filename for pet JSON files.
pub const PET_JSON_FILENAME: &str = "pet.json";

/// Filename for practitioner JSON files.
pub const PRACTITIONER_JSON_FILENAME: &str = "practitioner.json";

/// Filename for appointment JSON files.
pub const APPOINTMENT_JSON_FILENAME: &str = "appointment.json";

/// Hour at which the practice opens (first bookable slot).
pub const DEFAULT_OPENING_HOUR: u32 = 9;

/// Hour at which the practice closes (no slot starts at or after this).
pub const DEFAULT_CLOSING_HOUR: u32 = 17;

/// Default length of one bookable slot, in minutes.
pub const DEFAULT_SLOT_MINUTES: u32 = 60;

/// The practice's default practitioner roster: (name, specialty).
///
/// Seeded on first start; photos are enriched separately from the remote
/// profile-photo API.
pub const DEFAULT_PRACTITIONERS: &[(&str, &str)] = &[
    ("Dr. Simi", "General"),
    ("Dra. Polo", "Vaccination"),
    ("Dr. House", "Diagnostics"),
    ("Dra. Quinn", "Surgery"),
];
