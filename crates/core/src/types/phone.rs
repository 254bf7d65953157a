//! Contact phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input does not start with the +7 country prefix.
    #[error("phone number must start with +7")]
    MissingPrefix,
    /// The digits after the prefix are wrong in number or not digits.
    #[error("phone number must be +7 followed by exactly 10 digits")]
    InvalidDigits,
}

/// A Russian mobile phone number in `+7XXXXXXXXXX` form.
///
/// Whitespace anywhere in the input is stripped before validation, so
/// `"+7 999 123 45 67"` parses to the same value as `"+79991234567"`.
///
/// ## Constraints
///
/// - Must start with the literal prefix `+7`
/// - Exactly 10 ASCII digits must follow the prefix
///
/// ## Examples
///
/// ```
/// use bosanoga_core::Phone;
///
/// assert!(Phone::parse("+79991234567").is_ok());
/// assert!(Phone::parse("+7 999 123 45 67").is_ok());
///
/// assert!(Phone::parse("").is_err());            // empty
/// assert!(Phone::parse("89991234567").is_err()); // wrong prefix
/// assert!(Phone::parse("+7999123456").is_err()); // only 9 digits
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Number of digits after the `+7` prefix.
    pub const DIGITS: usize = 10;

    /// Parse a `Phone` from a string, stripping whitespace first.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty (after stripping whitespace)
    /// - Does not start with `+7`
    /// - Does not have exactly 10 digits after the prefix
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        if compact.is_empty() {
            return Err(PhoneError::Empty);
        }

        let digits = compact
            .strip_prefix("+7")
            .ok_or(PhoneError::MissingPrefix)?;

        if digits.len() != Self::DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::InvalidDigits);
        }

        Ok(Self(compact))
    }

    /// Get the normalized phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
