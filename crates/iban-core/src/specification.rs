//! # Country Specification
//!
//! Binds a country code, total IBAN length, BBAN structure notation, and a
//! documented example into one object that validates IBANs, extracts BBANs,
//! and generates check digits.
//!
//! ## Lazy Compilation
//!
//! The structure matcher is compiled on first use and cached in a
//! [`OnceLock`]. Concurrent first use is safe: one initializer wins, and
//! since compilation is a pure function of the notation every caller sees
//! the same matcher. A structure that fails to compile is cached as the
//! error, so validation keeps answering `false` without recompiling.
//!
//! ## Failure Semantics
//!
//! [`CountrySpecification::is_valid`] and
//! [`CountrySpecification::is_valid_bban`] are total: they classify any
//! string and never error. [`CountrySpecification::from_bban`] refuses to
//! compute check digits for a structurally invalid BBAN.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::checksum;
use crate::country::CountryCode;
use crate::error::{IbanError, RegistryError, StructureError};
use crate::structure::{self, Matcher};

/// Length of the `<country code><check digits>` prefix.
pub const PREFIX_LEN: usize = 4;

/// IBAN layout for one country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountrySpecification {
    country_code: CountryCode,
    length: usize,
    structure: String,
    example: String,
    #[serde(skip)]
    matcher: OnceLock<Result<Matcher, StructureError>>,
}

impl CountrySpecification {
    /// Create a specification. The structure is not compiled until first use.
    pub fn new(
        country_code: CountryCode,
        length: usize,
        structure: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            country_code,
            length,
            structure: structure.into(),
            example: example.into(),
            matcher: OnceLock::new(),
        }
    }

    /// The country this specification governs.
    pub fn country_code(&self) -> &CountryCode {
        &self.country_code
    }

    /// Total IBAN length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// BBAN length, or `None` if `length` is shorter than the prefix.
    pub fn bban_length(&self) -> Option<usize> {
        self.length.checked_sub(PREFIX_LEN)
    }

    /// BBAN structure notation.
    pub fn structure(&self) -> &str {
        &self.structure
    }

    /// Documented example IBAN.
    pub fn example(&self) -> &str {
        &self.example
    }

    /// The compiled matcher, compiling it on first call.
    ///
    /// # Errors
    ///
    /// Returns the [`StructureError`] if the notation is malformed. The
    /// failure is cached like a success.
    pub fn matcher(&self) -> Result<&Matcher, StructureError> {
        self.matcher
            .get_or_init(|| {
                let compiled = structure::compile(&self.structure);
                match &compiled {
                    Ok(m) => tracing::debug!(
                        country = %self.country_code,
                        structure = %self.structure,
                        segments = m.segments().len(),
                        "compiled BBAN matcher"
                    ),
                    Err(e) => tracing::warn!(
                        country = %self.country_code,
                        structure = %self.structure,
                        error = %e,
                        "BBAN structure failed to compile"
                    ),
                }
                compiled
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Whether `iban` is a valid IBAN for this country.
    ///
    /// True iff the length matches, the first two characters are the
    /// country code, everything after the check digits matches the
    /// structure, and the MOD97-10 remainder is 1. Input is taken as-is;
    /// normalize with [`crate::format::electronic_format`] first if needed.
    pub fn is_valid(&self, iban: &str) -> bool {
        iban.len() == self.length
            && iban.get(..2) == Some(self.country_code.as_str())
            && self.matches_structure(iban.get(PREFIX_LEN..))
            && checksum::has_valid_check_digits(iban)
    }

    /// Extract the BBAN segments of `iban`, joined by `separator`.
    ///
    /// Expects an IBAN that already matches this country's structure; only
    /// the structure is checked here, not the check digits.
    ///
    /// # Errors
    ///
    /// Returns [`IbanError::MalformedIban`] if the part after the check
    /// digits does not match, or [`IbanError::Structure`] if the notation
    /// itself is malformed.
    pub fn to_bban(&self, iban: &str, separator: &str) -> Result<String, IbanError> {
        let matcher = self.matcher()?;
        iban.get(PREFIX_LEN..)
            .and_then(|bban| matcher.captures(bban))
            .map(|segments| segments.join(separator))
            .ok_or_else(|| IbanError::MalformedIban(iban.to_string()))
    }

    /// Build the IBAN for `bban` by computing its check digits.
    ///
    /// # Errors
    ///
    /// Returns [`IbanError::InvalidBban`] if the BBAN fails
    /// [`Self::is_valid_bban`], or [`IbanError::Structure`] if the notation
    /// is malformed.
    pub fn from_bban(&self, bban: &str) -> Result<String, IbanError> {
        self.matcher()?;
        if !self.is_valid_bban(bban) {
            return Err(IbanError::InvalidBban {
                country_code: self.country_code.to_string(),
                bban: bban.to_string(),
            });
        }

        let check_digits = checksum::check_digits(self.country_code.as_str(), bban)?;
        Ok(format!("{}{}{}", self.country_code, check_digits, bban))
    }

    /// Whether `bban` has this country's BBAN length and structure.
    ///
    /// Structural only; a BBAN carries no check digits.
    pub fn is_valid_bban(&self, bban: &str) -> bool {
        self.bban_length() == Some(bban.len()) && self.matches_structure(Some(bban))
    }

    /// Check the specification's own data: the structure compiles, its length
    /// range admits `length - 4`, and the example validates.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn check(&self) -> Result<(), IbanError> {
        let matcher = self.matcher()?;

        let consistent = self
            .bban_length()
            .is_some_and(|n| (matcher.min_len()..=matcher.max_len()).contains(&n));
        if !consistent {
            return Err(RegistryError::InconsistentLength {
                country_code: self.country_code.to_string(),
                structure: self.structure.clone(),
                bban_length: self.bban_length().unwrap_or(0),
            }
            .into());
        }

        if !self.is_valid(&self.example) {
            return Err(RegistryError::InvalidExample {
                country_code: self.country_code.to_string(),
                example: self.example.clone(),
            }
            .into());
        }

        Ok(())
    }

    fn matches_structure(&self, bban: Option<&str>) -> bool {
        match (bban, self.matcher()) {
            (Some(bban), Ok(matcher)) => matcher.is_match(bban),
            _ => false,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn gb() -> CountrySpecification {
        CountrySpecification::new(
            CountryCode::new("GB").unwrap(),
            22,
            "4!a6!n8!n",
            "GB82WEST12345698765432",
        )
    }

    proptest! {
        /// Every generated IBAN validates.
        #[test]
        fn generated_ibans_validate(bban in "[A-Z]{4}[0-9]{14}") {
            let spec = gb();
            let iban = spec.from_bban(&bban).unwrap();
            prop_assert!(spec.is_valid(&iban));
        }

        /// BBAN extraction and regeneration are inverse.
        #[test]
        fn bban_round_trip(bban in "[A-Z]{4}[0-9]{14}") {
            let spec = gb();
            let iban = spec.from_bban(&bban).unwrap();
            let extracted = spec.to_bban(&iban, "").unwrap();
            prop_assert_eq!(&extracted, &bban);
            prop_assert_eq!(spec.from_bban(&extracted).unwrap(), iban);
        }

        /// Validation never panics on arbitrary input.
        #[test]
        fn is_valid_is_total(s in "\\PC{0,30}") {
            let spec = gb();
            let _ = spec.is_valid(&s);
            let _ = spec.is_valid_bban(&s);
        }
    }
}
