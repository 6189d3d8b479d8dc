//! # iban-core — IBAN Specification Engine
//!
//! Validates, parses, and generates International Bank Account Numbers
//! (IBAN) and their embedded Basic Bank Account Numbers (BBAN) according to
//! per-country layouts.
//!
//! ## Components
//!
//! 1. **Structure compiler** ([`structure`]). Turns SWIFT registry notation
//!    such as `4!a6!n8!n` into an anchored matcher that captures one segment
//!    per token.
//!
//! 2. **Checksum engine** ([`checksum`]). ISO 13616 rearrangement and
//!    ISO 7064 MOD97-10, reduced in 9-digit blocks so inputs of any length
//!    fit in `u64` arithmetic.
//!
//! 3. **Country specification** ([`specification`]). Country code, length,
//!    structure, and example bound together, exposing validation, BBAN
//!    extraction, and check-digit generation. The matcher compiles lazily,
//!    once per specification.
//!
//! 4. **Registry** ([`registry`]). Built-in country table plus YAML/JSON
//!    loading. The free functions below delegate to [`Registry::builtin`].
//!
//! Well-formedness and checksum consistency are all that is checked. Whether
//! an account exists is out of scope.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Validation predicates are total: they return `false`, never an error.

pub mod checksum;
pub mod country;
pub mod error;
pub mod format;
pub mod iban;
pub mod registry;
pub mod specification;
pub mod structure;

// Re-export primary types for ergonomic imports.
pub use checksum::{iso13616_prepare, iso7064_mod97_10, NumericString};
pub use country::CountryCode;
pub use error::{ChecksumError, IbanError, RegistryError, StructureError};
pub use format::{electronic_format, print_format};
pub use iban::Iban;
pub use registry::{CountryEntry, Registry};
pub use specification::CountrySpecification;
pub use structure::{compile, CharClass, Matcher, Segment};

/// Whether `iban` is valid for its country in the built-in registry.
pub fn is_valid(iban: &str) -> bool {
    Registry::builtin().is_valid(iban)
}

/// BBAN of a valid IBAN, segments joined by `separator`.
///
/// # Errors
///
/// See [`Registry::to_bban`].
pub fn to_bban(iban: &str, separator: &str) -> Result<String, IbanError> {
    Registry::builtin().to_bban(iban, separator)
}

/// IBAN for `bban` in `country_code`.
///
/// # Errors
///
/// See [`Registry::from_bban`].
pub fn from_bban(country_code: &str, bban: &str) -> Result<String, IbanError> {
    Registry::builtin().from_bban(country_code, bban)
}

/// Whether `bban` is structurally valid for `country_code`.
pub fn is_valid_bban(country_code: &str, bban: &str) -> bool {
    Registry::builtin().is_valid_bban(country_code, bban)
}
