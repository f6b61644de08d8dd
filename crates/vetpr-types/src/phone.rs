//! Phone number validation.

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(Debug, thiserror::Error)]
pub enum PhoneError {
    /// Fewer than eight characters
    #[error("Phone number must have at least 8 characters")]
    TooShort,
    /// A character other than a digit, '+' or space
    #[error("Phone number may only contain digits, '+' and spaces")]
    InvalidCharacter,
}

/// A validated phone number.
///
/// At least eight characters, each a decimal digit, `+` or space. No grouping
/// structure is enforced; `+56 9 1234 5678` and `912345678` are both fine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parses and validates a phone number.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::InvalidCharacter`] on any character outside
    /// digits, `+` and space, and [`PhoneError::TooShort`] below eight
    /// characters. Total over strings; never panics.
    pub fn parse(input: &str) -> Result<Self, PhoneError> {
        if !input
            .chars()
            .all(|c| c.is_ascii_digit() || c == '+' || c == ' ')
        {
            return Err(PhoneError::InvalidCharacter);
        }
        if input.chars().count() < 8 {
            return Err(PhoneError::TooShort);
        }
        Ok(Self(input.to_owned()))
    }

    /// Returns the number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_boundary() {
        assert!(matches!(
            PhoneNumber::parse("1234567"),
            Err(PhoneError::TooShort)
        ));
        assert!(PhoneNumber::parse("12345678").is_ok());
    }

    #[test]
    fn test_accepts_plus_and_spaces() {
        assert!(PhoneNumber::parse("+56 9 1234 5678").is_ok());
    }

    #[test]
    fn test_rejects_letters_regardless_of_length() {
        assert!(matches!(
            PhoneNumber::parse("12345678x"),
            Err(PhoneError::InvalidCharacter)
        ));
        assert!(matches!(
            PhoneNumber::parse("abc"),
            Err(PhoneError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let phone = PhoneNumber::parse("+56912345678").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        let back: PhoneNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(phone, back);
    }
}
