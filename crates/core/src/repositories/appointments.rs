//! Appointment book management.
//!
//! Appointments are stored as JSON files in a sharded structure under
//! `practice_data/appointments/`. Booking enforces the practice's one
//! hard scheduling rule: **at most one appointment per
//! (practitioner, date, slot) triple**. The pure availability computation in
//! [`crate::scheduling`] detects occupied slots; this service refuses to
//! write a booking whose slot is not in the computed availability.

use crate::appointment::{Appointment, AppointmentDetails, NewAppointment};
use crate::config::CoreConfig;
use crate::constants::APPOINTMENT_JSON_FILENAME;
use crate::error::{PracticeError, PracticeResult};
use crate::repositories::shared::{
    create_unique_record_dir, read_json_record, remove_record_dir, scan_json_records,
    write_json_record,
};
use crate::repositories::{PetService, PractitionerService};
use crate::scheduling;
use crate::uuid::ShardableUuid;
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;

/// Service for managing the appointment book.
#[derive(Clone, Debug)]
pub struct AppointmentService {
    cfg: Arc<CoreConfig>,
}

impl AppointmentService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Books an appointment and returns the stored record with its id.
    ///
    /// The practitioner and pet must exist, the slot must be one of the
    /// practitioner's schedule slots, and the slot must still be free for the
    /// (practitioner, date) pair.
    ///
    /// # Errors
    ///
    /// - [`PracticeError::UnknownPractitioner`] / [`PracticeError::UnknownPet`]
    ///   for dangling references.
    /// - [`PracticeError::SlotOutsideSchedule`] if the slot is not a working
    ///   slot at all.
    /// - [`PracticeError::SlotTaken`] if another appointment already occupies
    ///   the triple.
    pub fn book(&self, new_appointment: NewAppointment) -> PracticeResult<Appointment> {
        let practitioners = PractitionerService::new(Arc::clone(&self.cfg));
        let practitioner = practitioners
            .find(&new_appointment.practitioner)
            .ok_or_else(|| {
                PracticeError::UnknownPractitioner(new_appointment.practitioner.clone())
            })?;

        let pets = PetService::new(Arc::clone(&self.cfg));
        pets.get(&new_appointment.pet_id)?;

        if !practitioner.schedule.contains(&new_appointment.slot) {
            return Err(PracticeError::SlotOutsideSchedule {
                practitioner: practitioner.name,
                slot: new_appointment.slot,
            });
        }

        let booked = self.list();
        let open = scheduling::available_slots(&practitioner, new_appointment.date, &booked);
        if !open.contains(&new_appointment.slot) {
            return Err(PracticeError::SlotTaken {
                practitioner: practitioner.name,
                date: new_appointment.date,
                slot: new_appointment.slot,
            });
        }

        let appointments_dir = self.cfg.appointments_dir();
        std::fs::create_dir_all(&appointments_dir).map_err(PracticeError::StorageDirCreation)?;

        let (id, record_dir) = create_unique_record_dir(&appointments_dir, ShardableUuid::new)?;
        let appointment = Appointment {
            id: id.to_string(),
            pet_id: new_appointment.pet_id,
            practitioner: new_appointment.practitioner,
            date: new_appointment.date,
            slot: new_appointment.slot,
            kind: new_appointment.kind,
            reason: new_appointment.reason,
            notes: new_appointment.notes,
        };
        write_json_record(&record_dir.join(APPOINTMENT_JSON_FILENAME), &appointment)?;

        tracing::info!(
            "booked {} with {} on {} at {}",
            appointment.kind,
            appointment.practitioner,
            appointment.date,
            appointment.slot
        );
        Ok(appointment)
    }

    /// Lists all appointments. Order is not guaranteed.
    pub fn list(&self) -> Vec<Appointment> {
        scan_json_records(&self.cfg.appointments_dir(), APPOINTMENT_JSON_FILENAME)
            .into_iter()
            .map(|(_, appointment)| appointment)
            .collect()
    }

    /// Lists the appointments on a date, sorted by slot.
    pub fn on_date(&self, date: NaiveDate) -> Vec<Appointment> {
        let mut appointments: Vec<_> = self
            .list()
            .into_iter()
            .filter(|a| a.date == date)
            .collect();
        appointments.sort_by_key(|a| a.slot);
        appointments
    }

    /// Lists the appointments referencing a pet.
    pub fn list_for_pet(&self, pet_id: &str) -> Vec<Appointment> {
        self.list()
            .into_iter()
            .filter(|a| a.pet_id == pet_id)
            .collect()
    }

    /// Fetches the appointment with the given record id.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::UnknownAppointment`] if no record exists.
    pub fn get(&self, id: &str) -> PracticeResult<Appointment> {
        let record_dir = ShardableUuid::parse(id)?.sharded_dir(&self.cfg.appointments_dir());
        let record_path = record_dir.join(APPOINTMENT_JSON_FILENAME);
        if !record_path.is_file() {
            return Err(PracticeError::UnknownAppointment(id.to_string()));
        }
        read_json_record(&record_path)
    }

    /// Cancels (removes) the appointment with the given record id.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::UnknownAppointment`] if no record exists.
    pub fn cancel(&self, id: &str) -> PracticeResult<()> {
        let record_dir = ShardableUuid::parse(id)?.sharded_dir(&self.cfg.appointments_dir());
        if !record_dir.join(APPOINTMENT_JSON_FILENAME).is_file() {
            return Err(PracticeError::UnknownAppointment(id.to_string()));
        }
        remove_record_dir(&record_dir)?;
        tracing::info!("cancelled appointment {id}");
        Ok(())
    }

    /// Computes the open slots for a practitioner on a date against the
    /// current appointment book.
    ///
    /// Thin wrapper over [`scheduling::available_slots`] that supplies the
    /// stored snapshot; the "today" refinement stays with the caller (pass
    /// the result through [`scheduling::without_elapsed`] if wanted).
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::UnknownPractitioner`] if no practitioner has
    /// that name.
    pub fn available_slots(
        &self,
        practitioner_name: &str,
        date: NaiveDate,
    ) -> PracticeResult<Vec<NaiveTime>> {
        let practitioners = PractitionerService::new(Arc::clone(&self.cfg));
        let practitioner = practitioners
            .find(practitioner_name)
            .ok_or_else(|| PracticeError::UnknownPractitioner(practitioner_name.to_string()))?;

        Ok(scheduling::available_slots(
            &practitioner,
            date,
            &self.list(),
        ))
    }

    /// Lists all appointments joined with their pet and owner, sorted by
    /// date then slot.
    pub fn list_with_details(&self) -> Vec<AppointmentDetails> {
        let pets = PetService::new(Arc::clone(&self.cfg));
        let pets_by_id: std::collections::HashMap<String, _> = pets
            .list()
            .into_iter()
            .map(|pet| (pet.id.clone(), pet))
            .collect();

        let mut details: Vec<_> = self
            .list()
            .into_iter()
            .filter_map(|appointment| {
                let pet = pets_by_id.get(&appointment.pet_id)?;
                Some(AppointmentDetails {
                    pet_name: pet.name.clone(),
                    owner_rut: pet.owner_rut.clone(),
                    appointment,
                })
            })
            .collect();
        details.sort_by_key(|d| (d.appointment.date, d.appointment.slot));
        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::AppointmentKind;
    use crate::client::Client;
    use crate::pet::NewPet;
    use crate::repositories::ClientService;
    use std::path::Path;
    use tempfile::TempDir;
    use vetpr_types::{EmailAddress, NonEmptyText, PhoneNumber, Rut};

    fn test_cfg(dir: &Path) -> Arc<CoreConfig> {
        Arc::new(CoreConfig::with_default_hours(dir.to_path_buf(), "Test Clinic".into()).unwrap())
    }

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
    }

    /// Seeds the roster, a client and a pet; returns the pet id.
    fn seed_fixtures(cfg: &Arc<CoreConfig>) -> String {
        PractitionerService::new(Arc::clone(cfg))
            .seed_defaults()
            .expect("seeding should succeed");

        let rut = Rut::parse("12.345.678-5").unwrap();
        ClientService::new(Arc::clone(cfg))
            .register(Client {
                rut: rut.clone(),
                name: NonEmptyText::new("Maria Perez").unwrap(),
                email: EmailAddress::parse("maria@example.com").unwrap(),
                phone: PhoneNumber::parse("+56912345678").unwrap(),
                photo_url: None,
            })
            .expect("client registration should succeed");

        PetService::new(Arc::clone(cfg))
            .register(NewPet {
                name: NonEmptyText::new("Firulais").unwrap(),
                species: "Perro".into(),
                breed: "Quiltro".into(),
                age_years: 3,
                owner_rut: rut,
                photo_url: None,
            })
            .expect("pet registration should succeed")
            .id
    }

    fn booking(pet_id: &str, practitioner: &str, day: u32, hour: u32) -> NewAppointment {
        NewAppointment {
            pet_id: pet_id.into(),
            practitioner: practitioner.into(),
            date: d(day),
            slot: t(hour),
            kind: AppointmentKind::General,
            reason: NonEmptyText::new("Control anual").unwrap(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_book_and_list() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let pet_id = seed_fixtures(&cfg);
        let service = AppointmentService::new(cfg);

        let appointment = service
            .book(booking(&pet_id, "Dr. Simi", 10, 11))
            .expect("booking should succeed");

        assert_eq!(appointment.practitioner, "Dr. Simi");
        assert_eq!(service.list().len(), 1);
        assert_eq!(service.get(&appointment.id).unwrap(), appointment);
    }

    #[test]
    fn test_double_booking_is_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let pet_id = seed_fixtures(&cfg);
        let service = AppointmentService::new(cfg);

        service.book(booking(&pet_id, "Dr. Simi", 10, 11)).unwrap();

        let err = service
            .book(booking(&pet_id, "Dr. Simi", 10, 11))
            .unwrap_err();
        assert!(matches!(err, PracticeError::SlotTaken { .. }));
    }

    #[test]
    fn test_same_slot_other_practitioner_or_date_is_fine() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let pet_id = seed_fixtures(&cfg);
        let service = AppointmentService::new(cfg);

        service.book(booking(&pet_id, "Dr. Simi", 10, 11)).unwrap();
        service
            .book(booking(&pet_id, "Dra. Quinn", 10, 11))
            .expect("other practitioner should be free");
        service
            .book(booking(&pet_id, "Dr. Simi", 11, 11))
            .expect("other date should be free");
    }

    #[test]
    fn test_slot_outside_schedule_is_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let pet_id = seed_fixtures(&cfg);
        let service = AppointmentService::new(cfg);

        let mut request = booking(&pet_id, "Dr. Simi", 10, 11);
        request.slot = NaiveTime::from_hms_opt(20, 0, 0).unwrap();

        let err = service.book(request).unwrap_err();
        assert!(matches!(err, PracticeError::SlotOutsideSchedule { .. }));
    }

    #[test]
    fn test_dangling_references_are_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let pet_id = seed_fixtures(&cfg);
        let service = AppointmentService::new(cfg);

        let err = service
            .book(booking(&pet_id, "Dr. Nadie", 10, 11))
            .unwrap_err();
        assert!(matches!(err, PracticeError::UnknownPractitioner(_)));

        let err = service
            .book(booking(
                "550e8400e29b41d4a716446655440000",
                "Dr. Simi",
                10,
                11,
            ))
            .unwrap_err();
        assert!(matches!(err, PracticeError::UnknownPet(_)));
    }

    #[test]
    fn test_availability_shrinks_and_recovers() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let pet_id = seed_fixtures(&cfg);
        let service = AppointmentService::new(cfg);

        let before = service.available_slots("Dr. Simi", d(10)).unwrap();
        assert_eq!(before.len(), 8);

        let appointment = service.book(booking(&pet_id, "Dr. Simi", 10, 11)).unwrap();
        let during = service.available_slots("Dr. Simi", d(10)).unwrap();
        assert_eq!(during.len(), 7);
        assert!(!during.contains(&t(11)));

        service.cancel(&appointment.id).expect("cancel should succeed");
        let after = service.available_slots("Dr. Simi", d(10)).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn test_cancel_unknown_appointment() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = AppointmentService::new(test_cfg(temp_dir.path()));

        let err = service
            .cancel("550e8400e29b41d4a716446655440000")
            .unwrap_err();
        assert!(matches!(err, PracticeError::UnknownAppointment(_)));
    }

    #[test]
    fn test_on_date_is_sorted_by_slot() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let pet_id = seed_fixtures(&cfg);
        let service = AppointmentService::new(cfg);

        service.book(booking(&pet_id, "Dr. Simi", 10, 15)).unwrap();
        service.book(booking(&pet_id, "Dr. Simi", 10, 9)).unwrap();
        service.book(booking(&pet_id, "Dra. Quinn", 10, 12)).unwrap();
        service.book(booking(&pet_id, "Dr. Simi", 11, 10)).unwrap();

        let day = service.on_date(d(10));
        assert_eq!(day.len(), 3);
        assert_eq!(
            day.iter().map(|a| a.slot).collect::<Vec<_>>(),
            vec![t(9), t(12), t(15)]
        );
    }

    #[test]
    fn test_list_with_details_joins_pet_and_owner() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let pet_id = seed_fixtures(&cfg);
        let service = AppointmentService::new(cfg);

        service.book(booking(&pet_id, "Dr. Simi", 10, 11)).unwrap();

        let details = service.list_with_details();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].pet_name.as_str(), "Firulais");
        assert_eq!(details[0].owner_rut.as_str(), "12345678-5");
    }

    #[test]
    fn test_pet_removal_blocked_while_booked() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let pet_id = seed_fixtures(&cfg);
        let pets = PetService::new(Arc::clone(&cfg));
        let service = AppointmentService::new(cfg);

        let appointment = service.book(booking(&pet_id, "Dr. Simi", 10, 11)).unwrap();

        let err = pets.remove(&pet_id).unwrap_err();
        assert!(matches!(err, PracticeError::PetHasAppointments(_)));

        service.cancel(&appointment.id).unwrap();
        pets.remove(&pet_id)
            .expect("remove should succeed once appointments are cancelled");
    }
}
