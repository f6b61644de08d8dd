//! Chilean national identifier (RUT) with modulo-11 check character.

/// Errors that can occur when parsing a [`Rut`].
#[derive(Debug, thiserror::Error)]
pub enum RutError {
    /// The identifier must have at least a body and a check character
    #[error("Identifier must have a body and a check character")]
    TooShort,
    /// The body must be decimal digits and the check character a digit or 'K'
    #[error("Identifier may only contain digits and a trailing digit or 'K'")]
    InvalidCharacter,
    /// The check character does not match the body's modulo-11 checksum
    #[error("Check character does not match the identifier body")]
    ChecksumMismatch,
}

/// A validated Chilean national identifier (RUT).
///
/// A RUT is a numeric body followed by a single check character: a digit or
/// the letter `K`. User input may carry `.` thousands separators and a `-`
/// before the check character, in upper or lower case; all such variants
/// normalise to the same value, so `"12.345.678-5"`, `"12345678-5"` and
/// `"123456785"` are the same identifier.
///
/// Once constructed, the check character is guaranteed to match the modulo-11
/// checksum of the body. The canonical rendering is `body-check` with the
/// check character in upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rut(String);

impl Rut {
    /// Parses and validates a RUT from free-form user input.
    ///
    /// Normalisation strips `.` and `-` and upper-cases the result before the
    /// checksum is verified. This is a total function over strings: any input
    /// yields either a validated `Rut` or a [`RutError`].
    ///
    /// # Errors
    ///
    /// - [`RutError::TooShort`] if fewer than two characters remain after
    ///   normalisation.
    /// - [`RutError::InvalidCharacter`] if the body is not all decimal digits
    ///   or the check character is not a digit or `K`.
    /// - [`RutError::ChecksumMismatch`] if the check character is well-formed
    ///   but wrong for the body.
    pub fn parse(input: &str) -> Result<Self, RutError> {
        let normalised: String = input
            .chars()
            .filter(|c| *c != '.' && *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        // Byte indexing below is only safe on ASCII, and nothing non-ASCII
        // can be part of a well-formed identifier anyway.
        if !normalised.is_ascii() {
            return Err(RutError::InvalidCharacter);
        }
        if normalised.len() < 2 {
            return Err(RutError::TooShort);
        }

        let (body, check) = normalised.split_at(normalised.len() - 1);
        let check = check.chars().next().expect("split_at leaves one character");

        if !body.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RutError::InvalidCharacter);
        }
        if !(check.is_ascii_digit() || check == 'K') {
            return Err(RutError::InvalidCharacter);
        }

        if check != Self::expected_check_char(body) {
            return Err(RutError::ChecksumMismatch);
        }

        Ok(Self(format!("{body}-{check}")))
    }

    /// Computes the modulo-11 check character for an all-digit body.
    ///
    /// The body is traversed from its least-significant digit with a
    /// multiplier cycling 2, 3, 4, 5, 6, 7 and back to 2. A remainder of 11
    /// maps to `'0'` and 10 maps to `'K'`.
    fn expected_check_char(body: &str) -> char {
        let mut sum: u64 = 0;
        let mut multiplier: u64 = 2;

        for digit in body.chars().rev() {
            let value = digit.to_digit(10).expect("body is all decimal digits");
            sum += u64::from(value) * multiplier;
            multiplier += 1;
            if multiplier == 8 {
                multiplier = 2;
            }
        }

        match 11 - (sum % 11) {
            11 => '0',
            10 => 'K',
            remainder => {
                char::from_digit(remainder as u32, 10).expect("remainder is a single digit")
            }
        }
    }

    /// Returns the canonical `body-check` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Rut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Rut {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Rut {
    type Err = RutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rut::parse(s)
    }
}

impl serde::Serialize for Rut {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Rut {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rut::parse(&s).map_err(serde::de::Error::custom)
    }
}
