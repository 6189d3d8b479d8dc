//! # Country Registry
//!
//! Maps country codes to their [`CountrySpecification`]. A built-in table
//! covers the SEPA area and other common IBAN countries; further entries can
//! be loaded from YAML or JSON:
//!
//! ```yaml
//! countries:
//!   - country_code: GB
//!     length: 22
//!     structure: 4!a6!n8!n
//!     example: GB82WEST12345698765432
//! ```
//!
//! Every loaded entry is checked before acceptance: the code is two
//! uppercase letters, the structure compiles, its length range admits
//! `length - 4`, and the example validates.
//!
//! Registry-level operations normalize input to electronic format before
//! delegating, so `"gb82 west 1234 5698 7654 32"` validates.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::country::CountryCode;
use crate::error::{IbanError, RegistryError};
use crate::format::electronic_format;
use crate::specification::CountrySpecification;

/// Built-in table: country code, IBAN length, BBAN structure, example.
const BUILTIN: &[(&str, usize, &str, &str)] = &[
    ("AD", 24, "4!n4!n12!c", "AD1200012030200359100100"),
    ("AE", 23, "3!n16!n", "AE070331234567890123456"),
    ("AT", 20, "5!n11!n", "AT611904300234573201"),
    ("BE", 16, "3!n7!n2!n", "BE68539007547034"),
    ("BG", 22, "4!a4!n2!n8!c", "BG80BNBG96611020345678"),
    (
        "BR",
        29,
        "8!n5!n10!n1!a1!c",
        "BR9700360305000010009795493P1",
    ),
    ("CH", 21, "5!n12!c", "CH9300762011623852957"),
    ("CY", 28, "3!n5!n16!c", "CY17002001280000001200527600"),
    ("CZ", 24, "4!n6!n10!n", "CZ6508000000192000145399"),
    ("DE", 22, "8!n10!n", "DE89370400440532013000"),
    ("DK", 18, "4!n9!n1!n", "DK5000400440116243"),
    ("EE", 20, "2!n2!n11!n1!n", "EE382200221020145685"),
    ("ES", 24, "4!n4!n1!n1!n10!n", "ES9121000418450200051332"),
    ("FI", 18, "3!n11!n", "FI2112345600000785"),
    ("FR", 27, "5!n5!n11!c2!n", "FR1420041010050500013M02606"),
    ("GB", 22, "4!a6!n8!n", "GB29NWBK60161331926819"),
    ("GR", 27, "3!n4!n16!c", "GR1601101250000000012300695"),
    ("HR", 21, "7!n10!n", "HR1210010051863000160"),
    ("HU", 28, "3!n4!n1!n15!n1!n", "HU42117730161111101800000000"),
    ("IE", 22, "4!a6!n8!n", "IE29AIBK93115212345678"),
    ("IS", 26, "4!n2!n6!n10!n", "IS140159260076545510730339"),
    ("IT", 27, "1!a5!n5!n12!c", "IT60X0542811101000000123456"),
    ("KZ", 20, "3!n13!c", "KZ86125KZT5004100100"),
    ("LI", 21, "5!n12!c", "LI21088100002324013AA"),
    ("LT", 20, "5!n11!n", "LT121000011101001000"),
    ("LU", 20, "3!n13!c", "LU280019400644750000"),
    ("LV", 21, "4!a13!c", "LV80BANK0000435195001"),
    ("MC", 27, "5!n5!n11!c2!n", "MC5811222000010123456789030"),
    ("MT", 31, "4!a5!n18!c", "MT84MALT011000012345MTLCAST001S"),
    ("NL", 18, "4!a10!n", "NL91ABNA0417164300"),
    ("NO", 15, "4!n6!n1!n", "NO9386011117947"),
    ("PL", 28, "8!n16!n", "PL61109010140000071219812874"),
    ("PT", 25, "4!n4!n11!n2!n", "PT50000201231234567890154"),
    ("RO", 24, "4!a16!c", "RO49AAAA1B31007593840000"),
    ("SA", 24, "2!n18!c", "SA0380000000608010167519"),
    ("SE", 24, "3!n16!n1!n", "SE4550000000058398257466"),
    ("SI", 19, "5!n8!n2!n", "SI56263300012039086"),
    ("SK", 24, "4!n6!n10!n", "SK3112000000198742637541"),
    ("SM", 27, "1!a5!n5!n12!c", "SM86U0322509800000000270100"),
    ("TR", 26, "5!n1!n16!c", "TR330006100519786457841326"),
];

static BUILTIN_REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    let mut registry = Registry::new();
    for &(code, length, structure, example) in BUILTIN {
        match CountryCode::new(code) {
            Ok(cc) => {
                registry.insert(CountrySpecification::new(cc, length, structure, example));
            }
            Err(e) => tracing::error!(error = %e, "skipping built-in registry entry"),
        }
    }
    tracing::debug!(entries = registry.len(), "built-in IBAN registry ready");
    registry
});

/// One registry entry as stored in a registry file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    /// ISO 3166-1 alpha-2 code.
    pub country_code: String,
    /// Total IBAN length.
    pub length: usize,
    /// BBAN structure notation.
    pub structure: String,
    /// A valid example IBAN.
    pub example: String,
}

impl From<&CountrySpecification> for CountryEntry {
    fn from(spec: &CountrySpecification) -> Self {
        Self {
            country_code: spec.country_code().to_string(),
            length: spec.length(),
            structure: spec.structure().to_string(),
            example: spec.example().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RegistryDocument {
    countries: Vec<CountryEntry>,
}

/// Country code to specification map.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    specs: BTreeMap<String, CountrySpecification>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide built-in registry.
    pub fn builtin() -> &'static Registry {
        &BUILTIN_REGISTRY
    }

    /// Build a registry from entries, checking each one.
    ///
    /// # Errors
    ///
    /// Returns the first entry that fails its checks, or
    /// [`RegistryError::DuplicateCountry`] if a code repeats.
    pub fn from_entries(
        entries: impl IntoIterator<Item = CountryEntry>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for entry in entries {
            let code = CountryCode::new(entry.country_code.as_str())
                .map_err(|e| RegistryError::InvalidEntry(e.to_string()))?;
            let spec =
                CountrySpecification::new(code, entry.length, entry.structure, entry.example);
            spec.check().map_err(|e| match e {
                IbanError::Registry(inner) => inner,
                other => RegistryError::InvalidEntry(format!("{}: {other}", entry.country_code)),
            })?;
            if registry.insert(spec).is_some() {
                return Err(RegistryError::DuplicateCountry(entry.country_code));
            }
        }
        Ok(registry)
    }

    /// Parse a YAML registry document.
    ///
    /// # Errors
    ///
    /// Returns a YAML error or the first invalid entry.
    pub fn from_yaml_str(source: &str) -> Result<Self, RegistryError> {
        let doc: RegistryDocument = serde_yaml::from_str(source)?;
        Self::from_entries(doc.countries)
    }

    /// Parse a JSON registry document.
    ///
    /// # Errors
    ///
    /// Returns a JSON error or the first invalid entry.
    pub fn from_json_str(source: &str) -> Result<Self, RegistryError> {
        let doc: RegistryDocument = serde_json::from_str(source)?;
        Self::from_entries(doc.countries)
    }

    /// Load a registry file, choosing the parser by extension
    /// (`.yaml`, `.yml`, `.json`).
    ///
    /// # Errors
    ///
    /// Returns an I/O, parse, or entry error, or
    /// [`RegistryError::UnsupportedFormat`] for other extensions.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let registry = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&std::fs::read_to_string(path)?)?,
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?)?,
            _ => return Err(RegistryError::UnsupportedFormat(path.display().to_string())),
        };
        tracing::debug!(
            entries = registry.len(),
            source = %path.display(),
            "loaded IBAN registry"
        );
        Ok(registry)
    }

    /// Serialize the registry as a YAML document readable by [`Self::from_yaml_str`].
    ///
    /// # Errors
    ///
    /// Returns a YAML serialization error.
    pub fn to_yaml_string(&self) -> Result<String, RegistryError> {
        Ok(serde_yaml::to_string(&self.document())?)
    }

    /// Serialize the registry as a JSON document readable by [`Self::from_json_str`].
    ///
    /// # Errors
    ///
    /// Returns a JSON serialization error.
    pub fn to_json_string(&self) -> Result<String, RegistryError> {
        Ok(serde_json::to_string_pretty(&self.document())?)
    }

    /// Add a specification, returning the one it replaced.
    pub fn insert(&mut self, spec: CountrySpecification) -> Option<CountrySpecification> {
        self.specs.insert(spec.country_code().to_string(), spec)
    }

    /// Add every entry of `other`, replacing same-code entries.
    pub fn merge(&mut self, other: Registry) {
        self.specs.extend(other.specs);
    }

    /// Specification for a country code.
    pub fn get(&self, country_code: &str) -> Option<&CountrySpecification> {
        self.specs.get(country_code)
    }

    /// Specifications ordered by country code.
    pub fn iter(&self) -> impl Iterator<Item = &CountrySpecification> {
        self.specs.values()
    }

    /// Number of countries.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the registry has no countries.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Whether `iban` is valid for the country named by its first two letters.
    pub fn is_valid(&self, iban: &str) -> bool {
        let iban = electronic_format(iban);
        iban.get(..2)
            .and_then(|code| self.get(code))
            .is_some_and(|spec| spec.is_valid(&iban))
    }

    /// BBAN segments of a valid IBAN, joined by `separator`.
    ///
    /// # Errors
    ///
    /// Returns [`IbanError::UnknownCountry`] if no specification exists, or
    /// [`IbanError::MalformedIban`] if the IBAN is not valid.
    pub fn to_bban(&self, iban: &str, separator: &str) -> Result<String, IbanError> {
        let iban = electronic_format(iban);
        let spec = self.spec_for(iban.get(..2).unwrap_or(&iban))?;
        if !spec.is_valid(&iban) {
            return Err(IbanError::MalformedIban(iban));
        }
        spec.to_bban(&iban, separator)
    }

    /// Generate the IBAN for `bban` in `country_code`.
    ///
    /// # Errors
    ///
    /// Returns [`IbanError::UnknownCountry`] or [`IbanError::InvalidBban`].
    pub fn from_bban(&self, country_code: &str, bban: &str) -> Result<String, IbanError> {
        self.spec_for(country_code)?
            .from_bban(&electronic_format(bban))
    }

    /// Whether `bban` is structurally valid for `country_code`.
    pub fn is_valid_bban(&self, country_code: &str, bban: &str) -> bool {
        self.get(country_code)
            .is_some_and(|spec| spec.is_valid_bban(&electronic_format(bban)))
    }

    fn spec_for(&self, country_code: &str) -> Result<&CountrySpecification, IbanError> {
        self.get(country_code)
            .ok_or_else(|| IbanError::UnknownCountry(country_code.to_string()))
    }

    fn document(&self) -> RegistryDocument {
        RegistryDocument {
            countries: self.iter().map(CountryEntry::from).collect(),
        }
    }
}
