//! Repository management modules.
//!
//! File-backed services for the practice's record collections. Each service
//! takes an `Arc<CoreConfig>` and owns one record type's directory tree;
//! cross-record rules (a client with pets cannot be removed, a booking needs
//! an existing pet and practitioner) are checked by constructing the sibling
//! service over the same configuration.

pub mod appointments;
pub mod clients;
pub mod pets;
pub mod practitioners;
pub mod shared;

pub use appointments::AppointmentService;
pub use clients::ClientService;
pub use pets::PetService;
pub use practitioners::PractitionerService;
