//! Client (pet owner) domain model.

use serde::{Deserialize, Serialize};
use vetpr_types::{EmailAddress, NonEmptyText, PhoneNumber, Rut};

/// A registered client of the practice.
///
/// The RUT is the client's identity: two records with the same RUT are the
/// same client, and the repository layer rejects duplicate registrations.
/// All fields are validated value types, so a `Client` read back from storage
/// or deserialized from a request carries the same guarantees as one built
/// from freshly validated input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// National identifier, canonical `body-check` form.
    pub rut: Rut,
    /// Full name.
    pub name: NonEmptyText,
    /// Contact email.
    pub email: EmailAddress,
    /// Contact phone.
    pub phone: PhoneNumber,
    /// Profile photo URL, opaque pass-through from the photo API.
    #[serde(default)]
    pub photo_url: Option<String>,
}
