//! Practitioner roster management.
//!
//! Practitioners are stored as JSON files in a sharded structure under
//! `practice_data/practitioners/`. The practitioner's identity is the name
//! inside the record; this service enforces that names are unique.
//!
//! The practice runs with a fixed default roster seeded on first start; the
//! schedule of every seeded practitioner is the configured standard hours.

use crate::config::CoreConfig;
use crate::constants::{DEFAULT_PRACTITIONERS, PRACTITIONER_JSON_FILENAME};
use crate::error::{PracticeError, PracticeResult};
use crate::practitioner::Practitioner;
use crate::repositories::shared::{
    create_unique_record_dir, scan_json_records, write_json_record,
};
use crate::uuid::ShardableUuid;
use std::path::PathBuf;
use std::sync::Arc;

/// Service for managing the practitioner roster.
#[derive(Clone, Debug)]
pub struct PractitionerService {
    cfg: Arc<CoreConfig>,
}

impl PractitionerService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Adds a practitioner to the roster.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::DuplicatePractitioner`] if a practitioner
    /// with the same name already exists.
    pub fn add(&self, practitioner: Practitioner) -> PracticeResult<()> {
        if self.locate(&practitioner.name).is_some() {
            return Err(PracticeError::DuplicatePractitioner(practitioner.name));
        }

        let dir = self.cfg.practitioners_dir();
        std::fs::create_dir_all(&dir).map_err(PracticeError::StorageDirCreation)?;

        let (_, record_dir) = create_unique_record_dir(&dir, ShardableUuid::new)?;
        write_json_record(&record_dir.join(PRACTITIONER_JSON_FILENAME), &practitioner)?;

        tracing::info!("added practitioner {}", practitioner.name);
        Ok(())
    }

    /// Seeds the default roster, skipping names that already exist.
    ///
    /// Returns the full roster after seeding. Safe to call on every start.
    pub fn seed_defaults(&self) -> PracticeResult<Vec<Practitioner>> {
        let schedule = self.cfg.default_schedule();

        for (name, specialty) in DEFAULT_PRACTITIONERS {
            if self.locate(name).is_some() {
                continue;
            }
            self.add(Practitioner {
                name: (*name).to_string(),
                specialty: (*specialty).to_string(),
                schedule: schedule.clone(),
                photo_url: None,
            })?;
        }

        Ok(self.list())
    }

    /// Lists the roster. Order is not guaranteed.
    pub fn list(&self) -> Vec<Practitioner> {
        scan_json_records(&self.cfg.practitioners_dir(), PRACTITIONER_JSON_FILENAME)
            .into_iter()
            .map(|(_, practitioner)| practitioner)
            .collect()
    }

    /// Finds a practitioner by name, if on the roster.
    pub fn find(&self, name: &str) -> Option<Practitioner> {
        self.locate(name).map(|(_, practitioner)| practitioner)
    }

    /// Sets the profile photo URL for a practitioner.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::UnknownPractitioner`] if no practitioner has
    /// that name.
    pub fn set_photo(&self, name: &str, photo_url: String) -> PracticeResult<()> {
        let (record_dir, mut practitioner) = self
            .locate(name)
            .ok_or_else(|| PracticeError::UnknownPractitioner(name.to_string()))?;

        practitioner.photo_url = Some(photo_url);
        write_json_record(
            &record_dir.join(PRACTITIONER_JSON_FILENAME),
            &practitioner,
        )?;

        tracing::info!("updated photo for practitioner {name}");
        Ok(())
    }

    /// Finds the record directory and content for `name`.
    fn locate(&self, name: &str) -> Option<(PathBuf, Practitioner)> {
        let dir = self.cfg.practitioners_dir();
        scan_json_records::<Practitioner>(&dir, PRACTITIONER_JSON_FILENAME)
            .into_iter()
            .find(|(_, practitioner)| practitioner.name == name)
            .and_then(|(id, practitioner)| {
                let record_dir = ShardableUuid::parse(&id).ok()?.sharded_dir(&dir);
                Some((record_dir, practitioner))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn test_cfg(dir: &Path) -> Arc<CoreConfig> {
        Arc::new(CoreConfig::with_default_hours(dir.to_path_buf(), "Test Clinic".into()).unwrap())
    }

    #[test]
    fn test_seed_defaults_creates_roster() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PractitionerService::new(test_cfg(temp_dir.path()));

        let roster = service.seed_defaults().expect("seeding should succeed");

        assert_eq!(roster.len(), DEFAULT_PRACTITIONERS.len());
        assert!(roster.iter().any(|p| p.name == "Dr. Simi"));
        // Everyone works the standard hours.
        for practitioner in &roster {
            assert_eq!(practitioner.schedule.len(), 8);
        }
    }

    #[test]
    fn test_seed_defaults_is_idempotent() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PractitionerService::new(test_cfg(temp_dir.path()));

        service.seed_defaults().unwrap();
        let roster = service.seed_defaults().unwrap();

        assert_eq!(roster.len(), DEFAULT_PRACTITIONERS.len());
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let service = PractitionerService::new(Arc::clone(&cfg));

        let practitioner = Practitioner {
            name: "Dra. Nueva".into(),
            specialty: "General".into(),
            schedule: cfg.default_schedule(),
            photo_url: None,
        };
        service.add(practitioner.clone()).unwrap();

        let err = service.add(practitioner).unwrap_err();
        assert!(matches!(err, PracticeError::DuplicatePractitioner(_)));
    }

    #[test]
    fn test_set_photo() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PractitionerService::new(test_cfg(temp_dir.path()));
        service.seed_defaults().unwrap();

        service
            .set_photo("Dr. Simi", "https://example.com/simi.jpg".into())
            .expect("set_photo should succeed");

        let simi = service.find("Dr. Simi").unwrap();
        assert_eq!(simi.photo_url.as_deref(), Some("https://example.com/simi.jpg"));
    }

    #[test]
    fn test_set_photo_unknown_practitioner() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PractitionerService::new(test_cfg(temp_dir.path()));

        let err = service
            .set_photo("Dr. Nadie", "https://example.com/x.jpg".into())
            .unwrap_err();
        assert!(matches!(err, PracticeError::UnknownPractitioner(_)));
    }
}
