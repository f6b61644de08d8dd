//! Form-level validation.
//!
//! The registration forms gate submission on a handful of independent field
//! checks. Each check is a pure parser from `vetpr-types`; these helpers run
//! them in order, name the offending field in the error, and hand back the
//! fully validated domain value — so callers go straight from raw form
//! strings to a storable record, with no framework coupling and no partially
//! validated state in between.

use crate::client::Client;
use crate::pet::NewPet;
use crate::{PracticeError, PracticeResult};
use vetpr_types::{EmailAddress, NonEmptyText, PhoneNumber, Rut};

/// Validates client registration fields and builds the domain value.
///
/// # Errors
///
/// Returns [`PracticeError::InvalidInput`] naming the first field that fails
/// its check.
pub fn parse_client(
    name: &str,
    email: &str,
    phone: &str,
    rut: &str,
    photo_url: Option<String>,
) -> PracticeResult<Client> {
    let name = NonEmptyText::new(name)
        .map_err(|e| PracticeError::InvalidInput(format!("name: {e}")))?;
    let email = EmailAddress::parse(email)
        .map_err(|e| PracticeError::InvalidInput(format!("email: {e}")))?;
    let phone = PhoneNumber::parse(phone)
        .map_err(|e| PracticeError::InvalidInput(format!("phone: {e}")))?;
    let rut = Rut::parse(rut).map_err(|e| PracticeError::InvalidInput(format!("rut: {e}")))?;

    Ok(Client {
        rut,
        name,
        email,
        phone,
        photo_url,
    })
}

/// Validates pet registration fields and builds the repository input.
///
/// # Errors
///
/// Returns [`PracticeError::InvalidInput`] naming the first field that fails
/// its check.
pub fn parse_new_pet(
    name: &str,
    species: &str,
    breed: &str,
    age_years: u32,
    owner_rut: &str,
    photo_url: Option<String>,
) -> PracticeResult<NewPet> {
    let name = NonEmptyText::new(name)
        .map_err(|e| PracticeError::InvalidInput(format!("name: {e}")))?;
    let species = NonEmptyText::new(species)
        .map_err(|e| PracticeError::InvalidInput(format!("species: {e}")))?;
    let owner_rut = Rut::parse(owner_rut)
        .map_err(|e| PracticeError::InvalidInput(format!("owner_rut: {e}")))?;

    Ok(NewPet {
        name,
        species: species.as_str().to_string(),
        breed: breed.trim().to_string(),
        age_years,
        owner_rut,
        photo_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_client_fields_pass() {
        let client = parse_client(
            "Maria Perez",
            "maria@example.com",
            "+56912345678",
            "12.345.678-5",
            None,
        )
        .unwrap();
        assert_eq!(client.rut.as_str(), "12345678-5");
        assert_eq!(client.name.as_str(), "Maria Perez");
    }

    #[test]
    fn test_error_names_the_offending_field() {
        let err = parse_client("", "maria@example.com", "+56912345678", "12.345.678-5", None)
            .unwrap_err();
        assert!(err.to_string().contains("name"));

        let err = parse_client("Maria", "not-an-email", "+56912345678", "12.345.678-5", None)
            .unwrap_err();
        assert!(err.to_string().contains("email"));

        let err =
            parse_client("Maria", "maria@example.com", "123", "12.345.678-5", None).unwrap_err();
        assert!(err.to_string().contains("phone"));

        let err = parse_client("Maria", "maria@example.com", "+56912345678", "12345678-6", None)
            .unwrap_err();
        assert!(err.to_string().contains("rut"));
    }

    #[test]
    fn test_pet_fields() {
        let pet = parse_new_pet("Firulais", "Perro", " Quiltro ", 3, "12.345.678-5", None).unwrap();
        assert_eq!(pet.breed, "Quiltro");

        assert!(parse_new_pet("", "Perro", "", 3, "12.345.678-5", None).is_err());
        assert!(parse_new_pet("Firulais", " ", "", 3, "12.345.678-5", None).is_err());
        assert!(parse_new_pet("Firulais", "Perro", "", 3, "12345678-6", None).is_err());
    }
}
