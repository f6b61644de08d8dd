//! # VetPR Types
//!
//! Validated value types shared across the VetPR practice management system.
//!
//! Each type in this crate guarantees its invariant once constructed: a
//! [`NonEmptyText`] always contains visible characters, an [`EmailAddress`] and
//! a [`PhoneNumber`] always satisfy the practice's contact-field rules, and a
//! [`Rut`] always carries a check character consistent with its body.
//!
//! Construction is the only place validation happens. All constructors are
//! total over strings: malformed input produces a typed error, never a panic.
//! The types serialize as plain strings and re-validate on deserialization, so
//! records read back from storage or received over the API carry the same
//! guarantees as freshly validated input.

mod email;
mod phone;
mod rut;
mod text;

pub use email::{EmailAddress, EmailError};
pub use phone::{PhoneError, PhoneNumber};
pub use rut::{Rut, RutError};
pub use text::{NonEmptyText, TextError};
