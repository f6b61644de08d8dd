//! Case-insensitive search over client and pet collections.
//!
//! Plain substring matching, recomputed on every keystroke by the callers: no
//! ranking, no fuzzy matching, no index. A blank query leaves the collection
//! untouched, in its original order.

use crate::client::Client;
use crate::pet::Pet;

/// Whether any of `fields` contains the lowercased, trimmed query.
///
/// A blank query matches everything.
pub fn matches_query<'a>(query: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Filters clients by name or RUT.
pub fn filter_clients<'a>(clients: &'a [Client], query: &str) -> Vec<&'a Client> {
    clients
        .iter()
        .filter(|c| matches_query(query, [c.name.as_str(), c.rut.as_str()]))
        .collect()
}

/// Filters pets by name or species.
pub fn filter_pets<'a>(pets: &'a [Pet], query: &str) -> Vec<&'a Pet> {
    pets.iter()
        .filter(|p| matches_query(query, [p.name.as_str(), p.species.as_str()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vetpr_types::{EmailAddress, NonEmptyText, PhoneNumber, Rut};

    fn client(name: &str, rut: &str) -> Client {
        Client {
            rut: Rut::parse(rut).unwrap(),
            name: NonEmptyText::new(name).unwrap(),
            email: EmailAddress::parse("cliente@example.com").unwrap(),
            phone: PhoneNumber::parse("+56912345678").unwrap(),
            photo_url: None,
        }
    }

    fn pet(name: &str, species: &str) -> Pet {
        Pet {
            id: "550e8400e29b41d4a716446655440000".into(),
            name: NonEmptyText::new(name).unwrap(),
            species: species.into(),
            breed: String::new(),
            age_years: 3,
            owner_rut: Rut::parse("12.345.678-5").unwrap(),
            photo_url: None,
        }
    }

    #[test]
    fn test_blank_query_returns_everything_in_order() {
        let clients = vec![
            client("Maria Perez", "12.345.678-5"),
            client("Juan Soto", "11.111.111-1"),
        ];

        for query in ["", "   ", "\t"] {
            let filtered = filter_clients(&clients, query);
            assert_eq!(filtered.len(), 2);
            assert_eq!(filtered[0].name.as_str(), "Maria Perez");
            assert_eq!(filtered[1].name.as_str(), "Juan Soto");
        }
    }

    #[test]
    fn test_query_case_does_not_matter() {
        let clients = vec![
            client("Maria Perez", "12.345.678-5"),
            client("Juan Soto", "11.111.111-1"),
        ];

        let upper = filter_clients(&clients, "PEREZ");
        let lower = filter_clients(&clients, "perez");
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
        assert_eq!(upper[0].name.as_str(), "Maria Perez");
    }

    #[test]
    fn test_clients_match_on_rut_too() {
        let clients = vec![
            client("Maria Perez", "12.345.678-5"),
            client("Juan Soto", "11.111.111-1"),
        ];

        let filtered = filter_clients(&clients, "12345678");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name.as_str(), "Maria Perez");
    }

    #[test]
    fn test_pets_match_on_name_or_species() {
        let pets = vec![pet("Firulais", "Perro"), pet("Misu", "Gato")];

        let by_name = filter_pets(&pets, "firu");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name.as_str(), "Firulais");

        let by_species = filter_pets(&pets, "GATO");
        assert_eq!(by_species.len(), 1);
        assert_eq!(by_species[0].name.as_str(), "Misu");
    }

    #[test]
    fn test_no_match_yields_empty() {
        let pets = vec![pet("Firulais", "Perro")];
        assert!(filter_pets(&pets, "tortuga").is_empty());
    }

    #[test]
    fn test_query_is_trimmed_before_matching() {
        let pets = vec![pet("Firulais", "Perro")];
        assert_eq!(filter_pets(&pets, "  perro  ").len(), 1);
    }
}
