//! # Checksum Engine
//!
//! ISO 13616 rearrangement and ISO 7064 MOD97-10 over digit strings of
//! unbounded length.
//!
//! A prepared IBAN easily exceeds 60 digits (every letter expands to two),
//! far beyond `u64`. The remainder is therefore computed block by block:
//! with at most 9 digits per block and a carried remainder below 97, the
//! intermediate `remainder * 10^9 + block` stays below `97 * 10^9`, well
//! inside `u64`.

use crate::error::ChecksumError;

/// Digits consumed per reduction step.
const BLOCK_DIGITS: usize = 9;

/// The MOD97-10 modulus.
pub const MODULUS: u64 = 97;

/// A string consisting only of ASCII digits.
///
/// Produced by [`iso13616_prepare`], or directly from a digit string via
/// [`NumericString::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumericString(String);

impl NumericString {
    /// Wrap a digit string.
    ///
    /// # Errors
    ///
    /// Returns [`ChecksumError::InvalidCharacter`] for the first non-digit.
    pub fn new(value: impl Into<String>) -> Result<Self, ChecksumError> {
        let s = value.into();
        if let Some((position, character)) =
            s.chars().enumerate().find(|(_, c)| !c.is_ascii_digit())
        {
            return Err(ChecksumError::InvalidCharacter {
                character,
                position,
            });
        }
        Ok(Self(s))
    }

    /// Access the digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no digits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for NumericString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rearrange an IBAN for checksum computation.
///
/// Moves the first four characters (country code and check digits) to the
/// end, then replaces each letter with its two-digit value (`A` = 10 through
/// `Z` = 35, either case). Inputs shorter than four characters are moved
/// whole, which leaves them in place.
///
/// # Errors
///
/// Returns [`ChecksumError::InvalidCharacter`] if any character is outside
/// `[A-Za-z0-9]`.
pub fn iso13616_prepare(iban: &str) -> Result<NumericString, ChecksumError> {
    if let Some((position, character)) = iban
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_alphanumeric())
    {
        return Err(ChecksumError::InvalidCharacter {
            character,
            position,
        });
    }

    // All ASCII from here, so byte offsets are char offsets.
    let split = iban.len().min(4);
    let (head, tail) = iban.split_at(split);

    let mut digits = String::with_capacity(iban.len() * 2);
    for c in tail.chars().chain(head.chars()) {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            let value = u32::from(c.to_ascii_uppercase() as u8 - b'A') + 10;
            digits.push_str(&value.to_string());
        }
    }

    Ok(NumericString(digits))
}

/// Compute the value of a digit string modulo 97.
///
/// The result lies in `0..=96`. An empty string is zero.
pub fn iso7064_mod97_10(numeric: &NumericString) -> u32 {
    let mut remainder: u64 = 0;
    for block in numeric.as_str().as_bytes().chunks(BLOCK_DIGITS) {
        let mut value: u64 = 0;
        for &b in block {
            value = value * 10 + u64::from(b - b'0');
        }
        remainder = (remainder * 10u64.pow(block.len() as u32) + value) % MODULUS;
    }
    remainder as u32
}

/// Whether an IBAN-shaped string carries consistent check digits.
///
/// Returns `false` instead of an error for characters outside `[A-Za-z0-9]`.
pub fn has_valid_check_digits(iban: &str) -> bool {
    iso13616_prepare(iban)
        .map(|n| iso7064_mod97_10(&n) == 1)
        .unwrap_or(false)
}

/// Compute the two check digits for `country_code` and `bban`.
///
/// Runs MOD97-10 over `country_code + "00" + bban` and returns
/// `98 - remainder`, zero-padded. The remainder lies in `0..=96`, so the
/// result is always two digits in `02..=98`.
///
/// # Errors
///
/// Returns [`ChecksumError::InvalidCharacter`] if either part contains a
/// character outside `[A-Za-z0-9]`.
pub fn check_digits(country_code: &str, bban: &str) -> Result<String, ChecksumError> {
    let prepared = iso13616_prepare(&format!("{country_code}00{bban}"))?;
    let remainder = iso7064_mod97_10(&prepared);
    Ok(format!("{:02}", 98 - remainder))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Digit-at-a-time reduction used as an independent reference.
    fn reference_mod97(digits: &str) -> u32 {
        digits
            .bytes()
            .fold(0u32, |acc, b| (acc * 10 + u32::from(b - b'0')) % 97)
    }

    proptest! {
        /// Chunked reduction agrees with the per-digit reference on long inputs.
        #[test]
        fn chunked_matches_reference(digits in "[0-9]{0,200}") {
            let n = NumericString::new(digits.clone()).unwrap();
            prop_assert_eq!(iso7064_mod97_10(&n), reference_mod97(&digits));
        }

        /// Preparation plus reduction is deterministic and stays in range.
        #[test]
        fn checksum_is_total(s in "[A-Za-z0-9]{4,40}") {
            let a = iso7064_mod97_10(&iso13616_prepare(&s).unwrap());
            let b = iso7064_mod97_10(&iso13616_prepare(&s).unwrap());
            prop_assert_eq!(a, b);
            prop_assert!(a <= 96);
        }

        /// Letter-heavy inputs expand past 60 digits and still reduce correctly.
        #[test]
        fn letter_heavy_inputs(s in "[A-Z]{30,34}") {
            let prepared = iso13616_prepare(&s).unwrap();
            prop_assert!(prepared.len() >= 60);
            prop_assert_eq!(
                iso7064_mod97_10(&prepared),
                reference_mod97(prepared.as_str())
            );
        }

        /// Generated check digits are always two digits and make the IBAN valid.
        #[test]
        fn generated_check_digits_validate(cc in "[A-Z]{2}", bban in "[A-Z0-9]{1,30}") {
            let digits = check_digits(&cc, &bban).unwrap();
            prop_assert_eq!(digits.len(), 2);
            let value: u32 = digits.parse().unwrap();
            prop_assert!((2..=98).contains(&value));
            let iban = format!("{cc}{digits}{bban}");
            prop_assert!(has_valid_check_digits(&iban));
        }
    }
}
