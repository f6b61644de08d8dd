//! Email address validation.

/// Errors that can occur when parsing an [`EmailAddress`].
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// The address does not match the accepted local@domain shape
    #[error("Email address is not in a valid format")]
    Invalid,
}

/// A validated email address.
///
/// The accepted shape is deliberately loose: one or more of ASCII letters,
/// digits, `+`, `_`, `.` or `-`, then a single `@`, then one or more of ASCII
/// letters, digits, `.` or `-`. No TLD or subdomain structure is enforced —
/// this matches what the practice's registration forms have always accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and validates an email address.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError::Invalid`] if the input does not match the
    /// accepted shape. Total over strings; never panics.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let mut parts = input.split('@');
        let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => (local, domain),
            _ => return Err(EmailError::Invalid),
        };

        let local_ok = !local.is_empty()
            && local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '_' | '.' | '-'));
        let domain_ok = !domain.is_empty()
            && domain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'));

        if !(local_ok && domain_ok) {
            return Err(EmailError::Invalid);
        }

        Ok(Self(input.to_owned()))
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EmailAddress::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_addresses() {
        assert!(EmailAddress::parse("ana@example.com").is_ok());
        assert!(EmailAddress::parse("j.perez+vet@clinica-sur.cl").is_ok());
        assert!(EmailAddress::parse("cliente_1@mail").is_ok());
    }

    #[test]
    fn test_rejects_missing_or_repeated_at() {
        assert!(EmailAddress::parse("ana.example.com").is_err());
        assert!(EmailAddress::parse("ana@@example.com").is_err());
        assert!(EmailAddress::parse("ana@exam@ple.com").is_err());
    }

    #[test]
    fn test_rejects_empty_sides() {
        assert!(EmailAddress::parse("@example.com").is_err());
        assert!(EmailAddress::parse("ana@").is_err());
        assert!(EmailAddress::parse("@").is_err());
        assert!(EmailAddress::parse("").is_err());
    }

    #[test]
    fn test_rejects_illegal_characters() {
        assert!(EmailAddress::parse("ana maria@example.com").is_err());
        assert!(EmailAddress::parse("ana@exa mple.com").is_err());
        // '+' is only legal before the '@'.
        assert!(EmailAddress::parse("ana@exam+ple.com").is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let email = EmailAddress::parse("ana@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        let back: EmailAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(email, back);
    }
}
