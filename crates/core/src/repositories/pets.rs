//! Pet record management.
//!
//! Pets are stored as JSON files in a sharded structure under
//! `practice_data/pets/`, keyed by a generated record id. Every pet references
//! its owner by RUT; registration requires the owner to exist, and removal is
//! blocked while appointments still reference the pet.

use crate::config::CoreConfig;
use crate::constants::PET_JSON_FILENAME;
use crate::error::{PracticeError, PracticeResult};
use crate::pet::{NewPet, Pet};
use crate::repositories::shared::{
    create_unique_record_dir, read_json_record, remove_record_dir, scan_json_records,
    write_json_record,
};
use crate::repositories::{AppointmentService, ClientService};
use crate::uuid::ShardableUuid;
use std::sync::Arc;
use vetpr_types::Rut;

/// Service for managing pet records.
#[derive(Clone, Debug)]
pub struct PetService {
    cfg: Arc<CoreConfig>,
}

impl PetService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Registers a new pet and returns the stored record with its id.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::UnknownClient`] if no client is registered
    /// under the owner RUT, or a storage error if writing fails.
    pub fn register(&self, new_pet: NewPet) -> PracticeResult<Pet> {
        let clients = ClientService::new(Arc::clone(&self.cfg));
        if clients.find(&new_pet.owner_rut).is_none() {
            return Err(PracticeError::UnknownClient(new_pet.owner_rut.to_string()));
        }

        let pets_dir = self.cfg.pets_dir();
        std::fs::create_dir_all(&pets_dir).map_err(PracticeError::StorageDirCreation)?;

        let (id, record_dir) = create_unique_record_dir(&pets_dir, ShardableUuid::new)?;
        let pet = Pet {
            id: id.to_string(),
            name: new_pet.name,
            species: new_pet.species,
            breed: new_pet.breed,
            age_years: new_pet.age_years,
            owner_rut: new_pet.owner_rut,
            photo_url: new_pet.photo_url,
        };
        write_json_record(&record_dir.join(PET_JSON_FILENAME), &pet)?;

        tracing::info!("registered pet {} (owner {})", pet.name, pet.owner_rut);
        Ok(pet)
    }

    /// Lists all pets. Order is not guaranteed.
    pub fn list(&self) -> Vec<Pet> {
        scan_json_records(&self.cfg.pets_dir(), PET_JSON_FILENAME)
            .into_iter()
            .map(|(_, pet)| pet)
            .collect()
    }

    /// Lists the pets owned by the client registered under `rut`.
    pub fn list_for_owner(&self, rut: &Rut) -> Vec<Pet> {
        self.list()
            .into_iter()
            .filter(|pet| pet.owner_rut == *rut)
            .collect()
    }

    /// Fetches the pet with the given record id.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::InvalidInput`] for a non-canonical id and
    /// [`PracticeError::UnknownPet`] if no record exists.
    pub fn get(&self, id: &str) -> PracticeResult<Pet> {
        let record_dir = ShardableUuid::parse(id)?.sharded_dir(&self.cfg.pets_dir());
        let record_path = record_dir.join(PET_JSON_FILENAME);
        if !record_path.is_file() {
            return Err(PracticeError::UnknownPet(id.to_string()));
        }
        read_json_record(&record_path)
    }

    /// Overwrites the stored record for `pet.id` with `pet`.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::UnknownPet`] if the record does not exist.
    pub fn update(&self, pet: &Pet) -> PracticeResult<()> {
        let record_dir = ShardableUuid::parse(&pet.id)?.sharded_dir(&self.cfg.pets_dir());
        let record_path = record_dir.join(PET_JSON_FILENAME);
        if !record_path.is_file() {
            return Err(PracticeError::UnknownPet(pet.id.clone()));
        }
        write_json_record(&record_path, pet)?;
        tracing::info!("updated pet {} ({})", pet.name, pet.id);
        Ok(())
    }

    /// Removes the pet with the given record id.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::UnknownPet`] if no record exists, or
    /// [`PracticeError::PetHasAppointments`] while appointments still
    /// reference the pet — they must be cancelled first.
    pub fn remove(&self, id: &str) -> PracticeResult<()> {
        let record_dir = ShardableUuid::parse(id)?.sharded_dir(&self.cfg.pets_dir());
        if !record_dir.join(PET_JSON_FILENAME).is_file() {
            return Err(PracticeError::UnknownPet(id.to_string()));
        }

        let appointments = AppointmentService::new(Arc::clone(&self.cfg));
        if !appointments.list_for_pet(id).is_empty() {
            return Err(PracticeError::PetHasAppointments(id.to_string()));
        }

        remove_record_dir(&record_dir)?;
        tracing::info!("removed pet {id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use std::path::Path;
    use tempfile::TempDir;
    use vetpr_types::{EmailAddress, NonEmptyText, PhoneNumber};

    fn test_cfg(dir: &Path) -> Arc<CoreConfig> {
        Arc::new(CoreConfig::with_default_hours(dir.to_path_buf(), "Test Clinic".into()).unwrap())
    }

    fn register_owner(cfg: &Arc<CoreConfig>, rut: &str) -> Rut {
        let rut = Rut::parse(rut).unwrap();
        ClientService::new(Arc::clone(cfg))
            .register(Client {
                rut: rut.clone(),
                name: NonEmptyText::new("Maria Perez").unwrap(),
                email: EmailAddress::parse("maria@example.com").unwrap(),
                phone: PhoneNumber::parse("+56912345678").unwrap(),
                photo_url: None,
            })
            .expect("owner registration should succeed");
        rut
    }

    fn new_pet(name: &str, owner_rut: &Rut) -> NewPet {
        NewPet {
            name: NonEmptyText::new(name).unwrap(),
            species: "Perro".into(),
            breed: "Quiltro".into(),
            age_years: 3,
            owner_rut: owner_rut.clone(),
            photo_url: None,
        }
    }

    #[test]
    fn test_register_requires_known_owner() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PetService::new(test_cfg(temp_dir.path()));

        let err = service
            .register(new_pet("Firulais", &Rut::parse("12.345.678-5").unwrap()))
            .unwrap_err();
        assert!(matches!(err, PracticeError::UnknownClient(_)));
    }

    #[test]
    fn test_register_get_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let owner = register_owner(&cfg, "12.345.678-5");
        let service = PetService::new(cfg);

        let pet = service.register(new_pet("Firulais", &owner)).unwrap();
        let fetched = service.get(&pet.id).unwrap();

        assert_eq!(fetched, pet);
        assert_eq!(fetched.name.as_str(), "Firulais");
    }

    #[test]
    fn test_list_for_owner_filters() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let maria = register_owner(&cfg, "12.345.678-5");
        let juan = register_owner(&cfg, "11.111.111-1");
        let service = PetService::new(cfg);

        service.register(new_pet("Firulais", &maria)).unwrap();
        service.register(new_pet("Misu", &maria)).unwrap();
        service.register(new_pet("Rocky", &juan)).unwrap();

        let marias = service.list_for_owner(&maria);
        assert_eq!(marias.len(), 2);
        assert!(marias.iter().all(|p| p.owner_rut == maria));
    }

    #[test]
    fn test_update_overwrites_record() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let owner = register_owner(&cfg, "12.345.678-5");
        let service = PetService::new(cfg);

        let mut pet = service.register(new_pet("Firulais", &owner)).unwrap();
        pet.age_years = 4;
        service.update(&pet).expect("update should succeed");

        assert_eq!(service.get(&pet.id).unwrap().age_years, 4);
    }

    #[test]
    fn test_get_unknown_pet() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PetService::new(test_cfg(temp_dir.path()));

        let err = service.get("550e8400e29b41d4a716446655440000").unwrap_err();
        assert!(matches!(err, PracticeError::UnknownPet(_)));

        let err = service.get("not-an-id").unwrap_err();
        assert!(matches!(err, PracticeError::InvalidInput(_)));
    }

    #[test]
    fn test_remove_frees_the_record() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let owner = register_owner(&cfg, "12.345.678-5");
        let service = PetService::new(cfg);

        let pet = service.register(new_pet("Firulais", &owner)).unwrap();
        service.remove(&pet.id).expect("remove should succeed");

        assert!(matches!(
            service.get(&pet.id).unwrap_err(),
            PracticeError::UnknownPet(_)
        ));
    }

    #[test]
    fn test_client_removal_blocked_while_pets_exist() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let owner = register_owner(&cfg, "12.345.678-5");
        let pets = PetService::new(Arc::clone(&cfg));
        let clients = ClientService::new(cfg);

        let pet = pets.register(new_pet("Firulais", &owner)).unwrap();

        let err = clients.remove(&owner).unwrap_err();
        assert!(matches!(err, PracticeError::ClientHasPets(_)));

        pets.remove(&pet.id).unwrap();
        clients.remove(&owner).expect("remove should succeed once pets are gone");
    }
}
