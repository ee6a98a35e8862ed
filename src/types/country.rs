//! Defines the fixed set of countries the dashboard ships data for, along with
//! the region labels offered for each of them.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A country with solar irradiance data.
///
/// The set is fixed, but [`crate::DataLocator::resolve`] accepts any identifier,
/// so adding a variant here is all it takes to support a new dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Benin,
    SierraLeone,
    Togo,
}

impl Country {
    /// Every supported country, in the order the dashboard lists them.
    pub const ALL: [Country; 3] = [Country::Benin, Country::SierraLeone, Country::Togo];

    /// Canonical lowercase token used to build file names (e.g. `sierraleone`).
    pub fn token(&self) -> &'static str {
        match self {
            Country::Benin => "benin",
            Country::SierraLeone => "sierraleone",
            Country::Togo => "togo",
        }
    }

    /// Human readable name, used in headings.
    pub fn display_name(&self) -> &'static str {
        match self {
            Country::Benin => "Benin",
            Country::SierraLeone => "Sierra Leone",
            Country::Togo => "Togo",
        }
    }

    /// Region labels the dashboard offers as filter options for this country.
    ///
    /// The first entry is the default selection.
    pub fn known_regions(&self) -> &'static [&'static str] {
        match self {
            Country::Benin => &["Cotonou", "Porto-Novo", "Parakou", "Abomey"],
            Country::SierraLeone => &["Freetown", "Bo", "Kenema", "Makeni"],
            Country::Togo => &["Lomé", "Sokodé", "Kara", "Atakpamé"],
        }
    }

    pub fn default_region(&self) -> &'static str {
        self.known_regions()[0]
    }
}

/// Formats a `Country` using its file-name token.
///
/// # Examples
///
/// ```
/// use solar_dashboard::Country;
///
/// assert_eq!(Country::SierraLeone.to_string(), "sierraleone");
/// ```
impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Parses any spelling that normalizes to a known token, so `"Sierra Leone"`,
/// `"sierraleone"` and `" TOGO "` all work.
impl FromStr for Country {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = country_token(s);
        Country::ALL
            .into_iter()
            .find(|c| c.token() == token)
            .ok_or_else(|| ConfigError::UnknownCountry(s.to_string()))
    }
}

/// Lower-cases a country identifier and strips every whitespace character.
pub fn country_token(country: &str) -> String {
    country
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// First whitespace separated word of the lower-cased identifier, used as the
/// looser file name pattern when searching raw data.
pub fn country_first_word(country: &str) -> Option<String> {
    country
        .split_whitespace()
        .next()
        .map(|word| word.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_strip_spaces_and_case() {
        assert_eq!(country_token("Sierra Leone"), "sierraleone");
        assert_eq!(country_token(" Togo "), "togo");
        assert_eq!(country_first_word("Sierra Leone").as_deref(), Some("sierra"));
        assert_eq!(country_first_word("   "), None);
    }

    #[test]
    fn test_parse_country() -> Result<(), ConfigError> {
        assert_eq!("Sierra Leone".parse::<Country>()?, Country::SierraLeone);
        assert_eq!("BENIN".parse::<Country>()?, Country::Benin);
        assert!(matches!(
            "atlantis".parse::<Country>(),
            Err(ConfigError::UnknownCountry(name)) if name == "atlantis"
        ));
        Ok(())
    }

    #[test]
    fn test_default_region_is_first_known() {
        for country in Country::ALL {
            assert_eq!(country.default_region(), country.known_regions()[0]);
        }
        assert_eq!(Country::Togo.default_region(), "Lomé");
    }
}
