//! # Country Codes
//!
//! Validated ISO 3166-1 alpha-2 country code newtype. Only the shape is
//! checked (two uppercase ASCII letters); whether a code has an IBAN layout
//! is the registry's business.

use serde::{Deserialize, Serialize};

use crate::error::IbanError;

/// Two uppercase ASCII letters, e.g. `GB`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Create a country code, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`IbanError::InvalidCountryCode`] unless the value is exactly
    /// two uppercase ASCII letters.
    pub fn new(value: impl Into<String>) -> Result<Self, IbanError> {
        let s = value.into();
        if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(IbanError::InvalidCountryCode(s));
        }
        Ok(Self(s))
    }

    /// Access the code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CountryCode {
    type Error = IbanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl std::str::FromStr for CountryCode {
    type Err = IbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
