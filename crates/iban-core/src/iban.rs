//! # Validated IBAN Newtype
//!
//! [`Iban`] holds an IBAN in electronic format that has passed full
//! validation against a registry. Holding one is proof of validity; the
//! accessors slice it without further checks.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::IbanError;
use crate::format::{electronic_format, print_format};
use crate::registry::Registry;
use crate::specification::PREFIX_LEN;

/// A valid IBAN in electronic format.
///
/// `Deserialize` validates against [`Registry::builtin`], so an IBAN from a
/// country that only a loaded registry knows will not deserialize through
/// it. Use [`Iban::deserialize_with`] for those.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iban(String);

impl Iban {
    /// Parse and validate against `registry`. Separators and lowercase
    /// letters are accepted and normalized away.
    ///
    /// # Errors
    ///
    /// Returns [`IbanError::UnknownCountry`] when the registry has no entry
    /// for the country, or [`IbanError::MalformedIban`] when validation
    /// fails.
    pub fn parse_with(registry: &Registry, input: &str) -> Result<Self, IbanError> {
        let electronic = electronic_format(input);
        let code = electronic.get(..2).unwrap_or(&electronic);
        let spec = registry
            .get(code)
            .ok_or_else(|| IbanError::UnknownCountry(code.to_string()))?;
        if !spec.is_valid(&electronic) {
            return Err(IbanError::MalformedIban(input.to_string()));
        }
        Ok(Self(electronic))
    }

    /// Deserialize a string and validate it against `registry`.
    ///
    /// # Errors
    ///
    /// Returns the deserializer's error, or a custom error carrying the
    /// [`IbanError`] when validation fails.
    pub fn deserialize_with<'de, D>(registry: &Registry, deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse_with(registry, &raw).map_err(serde::de::Error::custom)
    }

    /// Electronic form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Two-letter country code.
    pub fn country_code(&self) -> &str {
        &self.0[..2]
    }

    /// Two check digits.
    pub fn check_digits(&self) -> &str {
        &self.0[2..PREFIX_LEN]
    }

    /// The BBAN.
    pub fn bban(&self) -> &str {
        &self.0[PREFIX_LEN..]
    }

    /// Groups of four joined by `separator`.
    pub fn print_format(&self, separator: &str) -> String {
        print_format(&self.0, separator)
    }
}

impl std::str::FromStr for Iban {
    type Err = IbanError;

    /// Parse against [`Registry::builtin`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(Registry::builtin(), s)
    }
}

impl TryFrom<String> for Iban {
    type Error = IbanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Iban> for String {
    fn from(iban: Iban) -> Self {
        iban.0
    }
}

impl std::fmt::Display for Iban {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.print_format(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_print_format() {
        let iban: Iban = "GB82 WEST 1234 5698 7654 32".parse().unwrap();
        assert_eq!(iban.as_str(), "GB82WEST12345698765432");
        assert_eq!(iban.country_code(), "GB");
        assert_eq!(iban.check_digits(), "82");
        assert_eq!(iban.bban(), "WEST12345698765432");
        assert_eq!(iban.to_string(), "GB82 WEST 1234 5698 7654 32");
        assert_eq!(iban.print_format("-"), "GB82-WEST-1234-5698-7654-32");
    }

    #[test]
    fn rejects_invalid() {
        assert!(matches!(
            "GB83WEST12345698765432".parse::<Iban>(),
            Err(IbanError::MalformedIban(_))
        ));
        assert!(matches!(
            "QQ82WEST12345698765432".parse::<Iban>(),
            Err(IbanError::UnknownCountry(_))
        ));
        assert!("".parse::<Iban>().is_err());
    }

    #[test]
    fn serde_uses_electronic_string() {
        let iban: Iban = "DE89370400440532013000".parse().unwrap();
        let json = serde_json::to_string(&iban).unwrap();
        assert_eq!(json, "\"DE89370400440532013000\"");
        let back: Iban = serde_json::from_str("\"de89 3704 0044 0532 0130 00\"").unwrap();
        assert_eq!(back, iban);
        assert!(serde_json::from_str::<Iban>("\"DE00370400440532013000\"").is_err());
    }

    #[test]
    fn loaded_registry_iban_deserializes_with_that_registry() {
        let yaml = "countries:\n  - country_code: XK\n    length: 20\n    structure: 4!n10!n2!n\n    example: XK051212012345678906\n";
        let registry = Registry::from_yaml_str(yaml).unwrap();
        let iban = Iban::parse_with(&registry, "XK05 1212 0123 4567 8906").unwrap();
        let json = serde_json::to_string(&iban).unwrap();

        assert!(serde_json::from_str::<Iban>(&json).is_err());

        let mut deserializer = serde_json::Deserializer::from_str(&json);
        let back = Iban::deserialize_with(&registry, &mut deserializer).unwrap();
        assert_eq!(back, iban);

        let mut deserializer = serde_json::Deserializer::from_str("\"XK00121201234567890\"");
        assert!(Iban::deserialize_with(&registry, &mut deserializer).is_err());
    }
}
