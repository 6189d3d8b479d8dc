//! # Error Hierarchy
//!
//! Structured error types for IBAN processing, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Validation predicates (`is_valid`, `is_valid_bban`) never surface these
//! errors; they classify input as valid or not. Errors are reserved for
//! configuration problems (bad structure notation, bad registry data) and for
//! conversions that cannot produce a meaningful result.

use thiserror::Error;

/// Top-level error type for IBAN operations.
#[derive(Error, Debug)]
pub enum IbanError {
    /// Structure notation could not be compiled.
    #[error("structure error: {0}")]
    Structure(#[from] StructureError),

    /// Checksum preparation rejected the input.
    #[error("checksum error: {0}")]
    Checksum(#[from] ChecksumError),

    /// A BBAN failed structural validation, so no check digits were computed.
    #[error("invalid BBAN for {country_code}: {bban:?}")]
    InvalidBban {
        /// Country whose specification rejected the BBAN.
        country_code: String,
        /// The rejected BBAN.
        bban: String,
    },

    /// An IBAN did not match its country's layout.
    #[error("malformed IBAN: {0:?}")]
    MalformedIban(String),

    /// No specification is registered for the country code.
    #[error("unknown country code: {0}")]
    UnknownCountry(String),

    /// A country code is not two uppercase ASCII letters.
    #[error("invalid country code: {0:?}")]
    InvalidCountryCode(String),

    /// Registry construction or loading failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Errors in structure notation such as `4!a6!n8!n`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// The notation is empty.
    #[error("structure notation is empty")]
    Empty,

    /// A token did not start with a repeat count.
    #[error("expected repeat count at offset {offset} in {structure:?}")]
    MissingCount {
        /// The full notation.
        structure: String,
        /// Byte offset of the offending character.
        offset: usize,
    },

    /// A repeat count of zero.
    #[error("repeat count must be positive at offset {offset} in {structure:?}")]
    ZeroCount {
        /// The full notation.
        structure: String,
        /// Byte offset of the count.
        offset: usize,
    },

    /// A repeat count that does not fit the supported range.
    #[error("repeat count too large at offset {offset} in {structure:?}")]
    CountOverflow {
        /// The full notation.
        structure: String,
        /// Byte offset of the count.
        offset: usize,
    },

    /// Character class letter is missing or not one of `a`, `n`, `c`.
    #[error("expected character class (a, n or c) at offset {offset} in {structure:?}")]
    UnknownClass {
        /// The full notation.
        structure: String,
        /// Byte offset where the class letter was expected.
        offset: usize,
    },

    /// The compiled pattern was rejected by the regex engine.
    #[error("pattern for {structure:?} could not be built: {reason}")]
    Pattern {
        /// The full notation.
        structure: String,
        /// Message from the regex engine.
        reason: String,
    },
}

/// Errors during ISO 13616 preparation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChecksumError {
    /// Input contains a character outside `[A-Za-z0-9]`.
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// The rejected character.
        character: char,
        /// Character index in the input.
        position: usize,
    },
}

/// Errors while building or loading a country registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The structure's length range cannot produce a BBAN of `length - 4`.
    #[error(
        "{country_code}: structure {structure:?} cannot describe a BBAN of length {bban_length}"
    )]
    InconsistentLength {
        /// Country of the offending entry.
        country_code: String,
        /// Structure notation of the entry.
        structure: String,
        /// Expected BBAN length (`length - 4`).
        bban_length: usize,
    },

    /// The documented example does not validate against its own entry.
    #[error("{country_code}: example {example:?} does not validate")]
    InvalidExample {
        /// Country of the offending entry.
        country_code: String,
        /// The rejected example.
        example: String,
    },

    /// The same country code appears twice in one source.
    #[error("duplicate country code: {0}")]
    DuplicateCountry(String),

    /// An entry failed basic checks (country code, structure).
    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    /// Registry file extension is not `.yaml`, `.yml`, or `.json`.
    #[error("unsupported registry format: {0}")]
    UnsupportedFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_error_converts_into_iban_error() {
        let err: IbanError = StructureError::Empty.into();
        assert!(matches!(err, IbanError::Structure(StructureError::Empty)));
        assert_eq!(
            err.to_string(),
            "structure error: structure notation is empty"
        );
    }

    #[test]
    fn invalid_bban_message_names_country() {
        let err = IbanError::InvalidBban {
            country_code: "GB".to_string(),
            bban: "WEST1234".to_string(),
        };
        assert_eq!(err.to_string(), "invalid BBAN for GB: \"WEST1234\"");
    }

    #[test]
    fn invalid_character_reports_position() {
        let err = ChecksumError::InvalidCharacter {
            character: '-',
            position: 4,
        };
        assert!(err.to_string().contains("position 4"));
    }
}
