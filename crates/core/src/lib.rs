//! # VetPR Core
//!
//! Core business logic for the VetPR veterinary practice management system.
//!
//! This crate contains pure data operations and file/folder management:
//! - Domain models: clients (pet owners), pets, practitioners, appointments
//! - Slot-based availability computation over a practitioner's working hours
//! - Case-insensitive search over client and pet collections
//! - File-backed repository services with sharded JSON storage
//!
//! The scheduling and search modules are side-effect free: they compute over
//! snapshots handed in by the caller and never touch storage or the clock.
//! All I/O lives in [`repositories`], behind services that take an explicit
//! [`CoreConfig`] — there is no process-wide mutable state anywhere in this
//! crate.
//!
//! **No API concerns**: HTTP servers, serialization formats of the wire
//! surface, and CLI parsing belong in `api-rest`, `api-shared`, or `cli`.

pub mod appointment;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod pet;
pub mod practitioner;
pub mod repositories;
pub mod scheduling;
pub mod search;
pub mod uuid;
pub mod validation;

pub use appointment::{Appointment, AppointmentKind, NewAppointment};
pub use client::Client;
pub use config::CoreConfig;
pub use error::{PracticeError, PracticeResult};
pub use pet::{NewPet, Pet};
pub use practitioner::Practitioner;
pub use uuid::ShardableUuid;

// Re-export the validated value types so downstream crates can name them
// without depending on vetpr-types directly.
pub use vetpr_types::{EmailAddress, NonEmptyText, PhoneNumber, Rut};
