//! Practitioner (veterinarian) domain model.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A veterinarian on the practice's roster.
///
/// The name is the practitioner's identity key: appointments reference
/// practitioners by name, and the roster rejects duplicates. The schedule is
/// the ordered sequence of bookable slot start times; it is the same for every
/// calendar date (the practice does not customise hours per day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Practitioner {
    pub name: String,
    /// Area of specialisation, e.g. "General", "Surgery".
    pub specialty: String,
    /// Bookable slot start times, ascending.
    pub schedule: Vec<NaiveTime>,
    /// Profile photo URL from the remote photo API, if enriched.
    #[serde(default)]
    pub photo_url: Option<String>,
}
