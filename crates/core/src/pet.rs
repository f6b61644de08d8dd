//! Pet domain model.

use serde::{Deserialize, Serialize};
use vetpr_types::{NonEmptyText, Rut};

/// A pet registered with the practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    /// Record identifier, canonical 32-hex form. Assigned by the repository.
    pub id: String,
    pub name: NonEmptyText,
    /// Species, e.g. "Perro", "Gato".
    pub species: String,
    pub breed: String,
    /// Age in whole years; under one year counts as a puppy/kitten.
    pub age_years: u32,
    /// RUT of the owning client.
    pub owner_rut: Rut,
    /// Profile photo URL, opaque pass-through.
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl Pet {
    /// Whether the pet is under one year old.
    pub fn is_puppy(&self) -> bool {
        self.age_years < 1
    }
}

/// Input for registering a pet; the repository assigns the record id.
#[derive(Debug, Clone)]
pub struct NewPet {
    pub name: NonEmptyText,
    pub species: String,
    pub breed: String,
    pub age_years: u32,
    pub owner_rut: Rut,
    pub photo_url: Option<String>,
}
