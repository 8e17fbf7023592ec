#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City name lookup for map search.
//!
//! Search input and city names go through the same normalization (trim,
//! then lowercase) and must match exactly. There is no fuzzy or prefix
//! matching.

use pothole_map_pothole_models::CityRecord;
use thiserror::Error;

/// Errors that can occur during city lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The search string was empty or only whitespace.
    #[error("Please enter a city name.")]
    InvalidInput,

    /// No city matched the search string.
    #[error("City not found: {name}")]
    NotFound {
        /// The normalized name that was searched for.
        name: String,
    },
}

/// Normalizes a city name or search string for comparison.
#[must_use]
pub fn normalize_city_name(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Finds the first city whose normalized name equals the normalized input.
///
/// # Errors
///
/// * [`LookupError::InvalidInput`] if `name` is blank.
/// * [`LookupError::NotFound`] if no city matches.
pub fn find_city<'a>(name: &str, cities: &'a [CityRecord]) -> Result<&'a CityRecord, LookupError> {
    let needle = normalize_city_name(name);
    if needle.is_empty() {
        return Err(LookupError::InvalidInput);
    }

    let found = cities
        .iter()
        .find(|city| normalize_city_name(&city.name) == needle);

    match found {
        Some(city) => {
            log::debug!("Resolved '{needle}' to {} at {}", city.name, city.point);
            Ok(city)
        }
        None => {
            log::debug!("No city named '{needle}' among {} cities", cities.len());
            Err(LookupError::NotFound { name: needle })
        }
    }
}
