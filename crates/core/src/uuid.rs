//! UUID and sharded-path utilities.
//!
//! VetPR stores practice records under sharded directories derived from a
//! UUID. To keep path derivation deterministic and consistent across the
//! codebase, storage identifiers use a *canonical* representation: **32
//! lowercase hexadecimal characters** (no hyphens) — the same value
//! `Uuid::new_v4().simple().to_string()` produces.
//!
//! ## Sharded directory layout
//! For a canonical UUID `u`, records live under
//! `parent_dir/<u[0..2]>/<u[2..4]>/<u>/`, for example
//! `practice_data/pets/55/0e/550e8400e29b41d4a716446655440000/`.
//! This scheme prevents very large fan-out in a single directory.

use crate::error::{PracticeError, PracticeResult};
use std::path::{Path, PathBuf};
use std::{fmt, str::FromStr};

use ::uuid::Uuid;

/// A record identifier in VetPR's canonical form.
///
/// Once constructed, the contained UUID is guaranteed to be valid, and
/// `Display` always produces the canonical 32-character lowercase hex form.
/// Use this wrapper whenever accepting an identifier from outside the core
/// (CLI input, API request) or deriving a sharded storage path.
///
/// Non-canonical values (uppercase, hyphenated, wrong length, non-hex) are
/// rejected by [`ShardableUuid::parse`]; other common UUID forms are not
/// normalised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShardableUuid(Uuid);

impl ShardableUuid {
    /// Generates a new identifier for a fresh record.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates and parses an identifier that must already be canonical.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::InvalidInput`] if `input` is not 32 lowercase
    /// hex characters.
    pub fn parse(input: &str) -> PracticeResult<Self> {
        if Self::is_canonical(input) {
            let uuid = Uuid::parse_str(input).expect("is_canonical guarantees valid UUID");
            return Ok(Self(uuid));
        }
        Err(PracticeError::InvalidInput(format!(
            "record id must be 32 lowercase hex characters without hyphens, got: '{input}'"
        )))
    }

    fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Derives the sharded directory for this identifier under `parent_dir`.
    pub fn sharded_dir(&self, parent_dir: &Path) -> PathBuf {
        let canonical = self.0.simple().to_string();
        parent_dir
            .join(&canonical[0..2])
            .join(&canonical[2..4])
            .join(&canonical)
    }
}

impl Default for ShardableUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShardableUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for ShardableUuid {
    type Err = PracticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_canonical() {
        let id = ShardableUuid::parse("550e8400e29b41d4a716446655440000").unwrap();
        assert_eq!(id.to_string(), "550e8400e29b41d4a716446655440000");
    }

    #[test]
    fn test_parse_rejects_non_canonical() {
        // Uppercase
        assert!(ShardableUuid::parse("550E8400E29B41D4A716446655440000").is_err());
        // Hyphenated
        assert!(ShardableUuid::parse("550e8400-e29b-41d4-a716-446655440000").is_err());
        // Too short
        assert!(ShardableUuid::parse("550e8400e29b41d4a71644665544000").is_err());
        // Invalid characters
        assert!(ShardableUuid::parse("550e8400e29b41d4a716446655440zzz").is_err());
        // Empty string
        assert!(ShardableUuid::parse("").is_err());
    }

    #[test]
    fn test_sharded_dir_structure() {
        let id = ShardableUuid::parse("550e8400e29b41d4a716446655440000").unwrap();
        let parent = Path::new("/practice_data/pets");
        assert_eq!(
            id.sharded_dir(parent),
            PathBuf::from("/practice_data/pets/55/0e/550e8400e29b41d4a716446655440000")
        );
    }

    #[test]
    fn test_round_trip_new_to_string_to_parse() {
        let original = ShardableUuid::new();
        let parsed = ShardableUuid::parse(&original.to_string()).unwrap();
        assert_eq!(original, parsed);
    }
}
