//! Contact phone number value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

/// A dialable phone number in loose E.164 form.
///
/// Spaces, dashes, dots and parentheses are stripped; an optional leading
/// `+` is kept; 7 to 15 digits must remain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = raw.as_ref().trim();
        let (plus, rest) = match raw.strip_prefix('+') {
            Some(rest) => ("+", rest),
            None => ("", raw),
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => {
                    return Err(ValidationError::invalid_format(
                        "phone_number",
                        format!("unexpected character '{}'", c),
                    ))
                }
            }
        }

        if digits.is_empty() {
            return Err(ValidationError::empty_field("phone_number"));
        }
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
            return Err(ValidationError::out_of_range(
                "phone_number",
                MIN_DIGITS as i32,
                MAX_DIGITS as i32,
                digits.len() as i32,
            ));
        }

        Ok(Self(format!("{}{}", plus, digits)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PhoneNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_e164() {
        let phone = PhoneNumber::new("+15551234567").unwrap();
        assert_eq!(phone.as_str(), "+15551234567");
    }

    #[test]
    fn strips_formatting() {
        let phone = PhoneNumber::new(" +1 (555) 123-4567 ").unwrap();
        assert_eq!(phone.as_str(), "+15551234567");

        let phone = PhoneNumber::new("555.123.4567").unwrap();
        assert_eq!(phone.as_str(), "5551234567");
    }

    #[test]
    fn rejects_letters() {
        assert!(matches!(
            PhoneNumber::new("+1555CALLNOW"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn enforces_digit_bounds() {
        assert!(PhoneNumber::new("123456").is_err());
        assert!(PhoneNumber::new("1234567").is_ok());
        assert!(PhoneNumber::new("123456789012345").is_ok());
        assert!(matches!(
            PhoneNumber::new("1234567890123456"),
            Err(ValidationError::OutOfRange { actual: 16, .. })
        ));
    }

    #[test]
    fn rejects_empty_and_bare_plus() {
        assert!(matches!(
            PhoneNumber::new(""),
            Err(ValidationError::EmptyField { .. })
        ));
        assert!(PhoneNumber::new("+").is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok: PhoneNumber = serde_json::from_str("\"+44 20 7946 0958\"").unwrap();
        assert_eq!(ok.as_str(), "+442079460958");
        assert!(serde_json::from_str::<PhoneNumber>("\"nope\"").is_err());
    }
}
