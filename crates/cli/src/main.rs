use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use vetpr_core::constants::DEFAULT_PRACTICE_DATA_DIR;
use vetpr_core::repositories::{
    AppointmentService, ClientService, PetService, PractitionerService,
};
use vetpr_core::{scheduling, validation, AppointmentKind, CoreConfig, NewAppointment, Rut};
use vetpr_core::{NonEmptyText, PracticeResult};

#[derive(Parser)]
#[command(name = "vetpr")]
#[command(about = "VetPR practice management CLI")]
struct Cli {
    /// Practice data directory (overrides VETPR_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered clients
    ListClients {
        /// Filter by name or RUT substring
        #[arg(long)]
        query: Option<String>,
    },
    /// Register a client
    AddClient {
        /// Full name
        name: String,
        /// Email address
        email: String,
        /// Phone number
        phone: String,
        /// RUT (dots and dash accepted)
        rut: String,
    },
    /// Remove a client (refused while they still have pets)
    RemoveClient {
        /// RUT of the client
        rut: String,
    },
    /// List registered pets
    ListPets {
        /// Filter by pet name or species substring
        #[arg(long)]
        query: Option<String>,
    },
    /// Register a pet for an existing client
    AddPet {
        /// Pet name
        name: String,
        /// Species, e.g. "Perro"
        species: String,
        /// Owner's RUT
        owner_rut: String,
        /// Breed (optional)
        #[arg(long, default_value = "")]
        breed: String,
        /// Age in whole years
        #[arg(long, default_value_t = 0)]
        age: u32,
    },
    /// Seed the default practitioner roster
    SeedPractitioners,
    /// List the practitioner roster
    ListPractitioners,
    /// Show open slots for a practitioner on a date
    Availability {
        /// Practitioner name
        practitioner: String,
        /// Date (YYYY-MM-DD)
        date: NaiveDate,
        /// Drop slots at or before this time (HH:MM); pass the current time
        /// when the date is today
        #[arg(long)]
        after: Option<String>,
    },
    /// Book an appointment
    Book {
        /// Pet record id
        pet_id: String,
        /// Practitioner name
        practitioner: String,
        /// Date (YYYY-MM-DD)
        date: NaiveDate,
        /// Slot start time (HH:MM)
        slot: String,
        /// Reason for the visit
        reason: String,
        /// Kind: general, emergency, checkup, vaccination, surgery
        #[arg(long, default_value = "general")]
        kind: String,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Cancel an appointment
    Cancel {
        /// Appointment record id
        id: String,
    },
    /// List appointments with pet and owner details
    ListAppointments {
        /// Restrict to one date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Check whether a RUT is valid
    CheckRut {
        /// RUT to validate (dots and dash accepted)
        rut: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .or_else(|| std::env::var("VETPR_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PRACTICE_DATA_DIR));
    let cfg = Arc::new(CoreConfig::with_default_hours(data_dir, "VetPR Practice".into())?);

    match cli.command {
        Some(Commands::ListClients { query }) => {
            let clients = ClientService::new(cfg).list();
            let query = query.unwrap_or_default();
            let filtered = vetpr_core::search::filter_clients(&clients, &query);
            if filtered.is_empty() {
                println!("No clients found.");
            } else {
                for client in filtered {
                    println!(
                        "RUT: {}, Name: {}, Email: {}, Phone: {}",
                        client.rut, client.name, client.email, client.phone
                    );
                }
            }
        }
        Some(Commands::AddClient {
            name,
            email,
            phone,
            rut,
        }) => {
            let result: PracticeResult<()> =
                validation::parse_client(&name, &email, &phone, &rut, None)
                    .and_then(|client| ClientService::new(cfg).register(client));
            match result {
                Ok(()) => println!("Registered client {name}"),
                Err(e) => eprintln!("Error registering client: {e}"),
            }
        }
        Some(Commands::RemoveClient { rut }) => match parse_rut(&rut)
            .and_then(|rut| ClientService::new(cfg).remove(&rut))
        {
            Ok(()) => println!("Removed client {rut}"),
            Err(e) => eprintln!("Error removing client: {e}"),
        },
        Some(Commands::ListPets { query }) => {
            let pets = PetService::new(cfg).list();
            let query = query.unwrap_or_default();
            let filtered = vetpr_core::search::filter_pets(&pets, &query);
            if filtered.is_empty() {
                println!("No pets found.");
            } else {
                for pet in filtered {
                    println!(
                        "ID: {}, Name: {}, Species: {}, Age: {}, Owner: {}",
                        pet.id, pet.name, pet.species, pet.age_years, pet.owner_rut
                    );
                }
            }
        }
        Some(Commands::AddPet {
            name,
            species,
            owner_rut,
            breed,
            age,
        }) => {
            let result = validation::parse_new_pet(&name, &species, &breed, age, &owner_rut, None)
                .and_then(|new_pet| PetService::new(cfg).register(new_pet));
            match result {
                Ok(pet) => println!("Registered pet {} with id {}", pet.name, pet.id),
                Err(e) => eprintln!("Error registering pet: {e}"),
            }
        }
        Some(Commands::SeedPractitioners) => match PractitionerService::new(cfg).seed_defaults() {
            Ok(roster) => println!("Roster ready: {} practitioners", roster.len()),
            Err(e) => eprintln!("Error seeding practitioners: {e}"),
        },
        Some(Commands::ListPractitioners) => {
            let roster = PractitionerService::new(cfg).list();
            if roster.is_empty() {
                println!("No practitioners found. Run 'vetpr seed-practitioners' first.");
            } else {
                for practitioner in roster {
                    println!(
                        "Name: {}, Specialty: {}, Slots: {}",
                        practitioner.name,
                        practitioner.specialty,
                        practitioner.schedule.len()
                    );
                }
            }
        }
        Some(Commands::Availability {
            practitioner,
            date,
            after,
        }) => {
            let result = AppointmentService::new(cfg)
                .available_slots(&practitioner, date)
                .and_then(|slots| match after {
                    Some(after) => {
                        let after = parse_slot_time(&after)?;
                        Ok(scheduling::without_elapsed(slots, after))
                    }
                    None => Ok(slots),
                });
            match result {
                Ok(slots) if slots.is_empty() => {
                    println!("{practitioner} has no open slots on {date}")
                }
                Ok(slots) => {
                    let formatted: Vec<String> =
                        slots.iter().map(|s| s.format("%H:%M").to_string()).collect();
                    println!("{practitioner} on {date}: {}", formatted.join(", "));
                }
                Err(e) => eprintln!("Error computing availability: {e}"),
            }
        }
        Some(Commands::Book {
            pet_id,
            practitioner,
            date,
            slot,
            reason,
            kind,
            notes,
        }) => {
            let result = book(cfg, pet_id, practitioner, date, &slot, &reason, &kind, notes);
            match result {
                Ok(id) => println!("Booked appointment {id}"),
                Err(e) => eprintln!("Error booking appointment: {e}"),
            }
        }
        Some(Commands::Cancel { id }) => match AppointmentService::new(cfg).cancel(&id) {
            Ok(()) => println!("Cancelled appointment {id}"),
            Err(e) => eprintln!("Error cancelling appointment: {e}"),
        },
        Some(Commands::ListAppointments { date }) => {
            let service = AppointmentService::new(cfg);
            let details = service.list_with_details();
            let details: Vec<_> = match date {
                Some(date) => details
                    .into_iter()
                    .filter(|d| d.appointment.date == date)
                    .collect(),
                None => details,
            };
            if details.is_empty() {
                println!("No appointments found.");
            } else {
                for detail in details {
                    let a = &detail.appointment;
                    println!(
                        "ID: {}, {} {} - {} for {} (owner {}): {}",
                        a.id,
                        a.date,
                        a.slot.format("%H:%M"),
                        a.practitioner,
                        detail.pet_name,
                        detail.owner_rut,
                        a.kind.label()
                    );
                }
            }
        }
        Some(Commands::CheckRut { rut }) => match Rut::parse(&rut) {
            Ok(rut) => println!("{rut} is valid"),
            Err(e) => println!("Invalid: {e}"),
        },
        None => {
            println!("Use 'vetpr --help' for commands");
        }
    }

    Ok(())
}

fn parse_rut(input: &str) -> PracticeResult<Rut> {
    Rut::parse(input)
        .map_err(|e| vetpr_core::PracticeError::InvalidInput(format!("rut: {e}")))
}

fn parse_slot_time(input: &str) -> PracticeResult<NaiveTime> {
    NaiveTime::parse_from_str(input, "%H:%M").map_err(|_| {
        vetpr_core::PracticeError::InvalidInput(format!(
            "expected a slot in HH:MM form, got '{input}'"
        ))
    })
}

#[allow(clippy::too_many_arguments)]
fn book(
    cfg: Arc<CoreConfig>,
    pet_id: String,
    practitioner: String,
    date: NaiveDate,
    slot: &str,
    reason: &str,
    kind: &str,
    notes: String,
) -> PracticeResult<String> {
    let slot = parse_slot_time(slot)?;
    let kind: AppointmentKind = kind
        .parse()
        .map_err(vetpr_core::PracticeError::InvalidInput)?;
    let reason = NonEmptyText::new(reason)
        .map_err(|e| vetpr_core::PracticeError::InvalidInput(format!("reason: {e}")))?;

    let appointment = AppointmentService::new(cfg).book(NewAppointment {
        pet_id,
        practitioner,
        date,
        slot,
        kind,
        reason,
        notes,
    })?;
    Ok(appointment.id)
}
