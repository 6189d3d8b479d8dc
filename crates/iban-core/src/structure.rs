//! # Structure Compiler
//!
//! Translates the compact BBAN structure notation used by the SWIFT IBAN
//! registry into an anchored matcher that splits a BBAN into its segments.
//!
//! ## Notation
//!
//! A structure is one or more tokens `<count>[!]<class>`:
//!
//! | Class | Alphabet |
//! |-------|----------|
//! | `a` | uppercase letters `A-Z` |
//! | `n` | digits `0-9` |
//! | `c` | letters (either case) and digits |
//!
//! With `!` the segment is exactly `count` characters long; without it the
//! segment holds between 0 and `count` characters. `4!a6!n8!n` is the UK
//! layout: a 4-letter bank code, a 6-digit sort code, an 8-digit account.
//!
//! Compilation is pure. Caching the result is the caller's concern (see
//! [`crate::specification::CountrySpecification`]).

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::StructureError;

/// Largest repeat count accepted in a token.
pub const MAX_REPEAT: usize = 999;

/// Alphabet of a structure segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    /// `a`: uppercase letters.
    Alpha,
    /// `n`: digits.
    Numeric,
    /// `c`: letters of either case and digits.
    Alphanumeric,
}

impl CharClass {
    /// Parse a notation class letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'a' => Some(Self::Alpha),
            'n' => Some(Self::Numeric),
            'c' => Some(Self::Alphanumeric),
            _ => None,
        }
    }

    /// The notation letter for this class.
    pub fn letter(self) -> char {
        match self {
            Self::Alpha => 'a',
            Self::Numeric => 'n',
            Self::Alphanumeric => 'c',
        }
    }

    /// Regex character set for this class.
    fn set(self) -> &'static str {
        match self {
            Self::Alpha => "[A-Z]",
            Self::Numeric => "[0-9]",
            Self::Alphanumeric => "[A-Za-z0-9]",
        }
    }

    /// Whether `c` belongs to this class.
    pub fn admits(self, c: char) -> bool {
        match self {
            Self::Alpha => c.is_ascii_uppercase(),
            Self::Numeric => c.is_ascii_digit(),
            Self::Alphanumeric => c.is_ascii_alphanumeric(),
        }
    }
}

/// One `<count>[!]<class>` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// Repeat count (exact when `fixed`, upper bound otherwise).
    pub count: usize,
    /// `true` when the token carried `!`.
    pub fixed: bool,
    /// Alphabet of the segment.
    pub class: CharClass,
}

impl Segment {
    /// Shortest text this segment matches.
    pub fn min_len(&self) -> usize {
        if self.fixed {
            self.count
        } else {
            0
        }
    }

    /// Capturing regex fragment for this segment.
    fn pattern(&self) -> String {
        if self.fixed {
            format!("({}{{{}}})", self.class.set(), self.count)
        } else {
            format!("({}{{0,{}}})", self.class.set(), self.count)
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bang = if self.fixed { "!" } else { "" };
        write!(f, "{}{}{}", self.count, bang, self.class.letter())
    }
}

/// Tokenize a structure notation into segments.
///
/// # Errors
///
/// Returns a [`StructureError`] naming the byte offset of the first token
/// that does not follow the `<count>[!]<class>` grammar.
pub fn parse(structure: &str) -> Result<Vec<Segment>, StructureError> {
    if structure.is_empty() {
        return Err(StructureError::Empty);
    }

    let bytes = structure.as_bytes();
    let mut segments = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == start {
            return Err(StructureError::MissingCount {
                structure: structure.to_string(),
                offset: start,
            });
        }

        // Digits only, so the slice is on char boundaries.
        let count = structure[start..pos]
            .parse::<usize>()
            .ok()
            .filter(|&n| n <= MAX_REPEAT)
            .ok_or_else(|| StructureError::CountOverflow {
                structure: structure.to_string(),
                offset: start,
            })?;
        if count == 0 {
            return Err(StructureError::ZeroCount {
                structure: structure.to_string(),
                offset: start,
            });
        }

        let fixed = bytes.get(pos) == Some(&b'!');
        if fixed {
            pos += 1;
        }

        let class = bytes
            .get(pos)
            .and_then(|&b| CharClass::from_letter(b as char))
            .ok_or_else(|| StructureError::UnknownClass {
                structure: structure.to_string(),
                offset: pos,
            })?;
        pos += 1;

        segments.push(Segment {
            count,
            fixed,
            class,
        });
    }

    Ok(segments)
}

/// Compile a structure notation into a [`Matcher`].
///
/// # Errors
///
/// Returns a [`StructureError`] if the notation is malformed.
pub fn compile(structure: &str) -> Result<Matcher, StructureError> {
    let segments = parse(structure)?;

    let body: String = segments.iter().map(Segment::pattern).collect();
    let pattern =
        Regex::new(&format!("^{body}$")).map_err(|e| StructureError::Pattern {
            structure: structure.to_string(),
            reason: e.to_string(),
        })?;

    Ok(Matcher {
        structure: structure.to_string(),
        segments,
        pattern,
    })
}

/// Anchored matcher compiled from a structure notation.
///
/// Matches only whole inputs and captures one group per token, in
/// notation order.
#[derive(Debug, Clone)]
pub struct Matcher {
    structure: String,
    segments: Vec<Segment>,
    pattern: Regex,
}

impl Matcher {
    /// Whether the entire input follows the structure.
    pub fn is_match(&self, input: &str) -> bool {
        self.pattern.is_match(input)
    }

    /// Split the input into one slice per segment, or `None` on mismatch.
    pub fn captures<'t>(&self, input: &'t str) -> Option<Vec<&'t str>> {
        let caps = self.pattern.captures(input)?;
        caps.iter()
            .skip(1)
            .map(|group| group.map(|m| m.as_str()))
            .collect()
    }

    /// The source notation.
    pub fn structure(&self) -> &str {
        &self.structure
    }

    /// Parsed segments in notation order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Shortest input the matcher accepts.
    pub fn min_len(&self) -> usize {
        self.segments.iter().map(Segment::min_len).sum()
    }

    /// Longest input the matcher accepts.
    pub fn max_len(&self) -> usize {
        self.segments.iter().map(|s| s.count).sum()
    }
}
