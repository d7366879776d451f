use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::{Coordinate, InvalidCoordinateError};

/// A persisted school. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error(transparent)]
    CoordinateOutOfRange(#[from] InvalidCoordinateError),
}

/// A school that passed validation and is ready to be stored.
///
/// Only constructible through [`NewSchool::validate`], so holding one proves
/// the name and address are non-blank and the coordinate is in range.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSchool {
    name: String,
    address: String,
    location: Coordinate,
}

impl NewSchool {
    /// Validate raw add-request fields.
    ///
    /// Names and addresses are trimmed; a blank value counts as missing.
    /// Missing fields are reported before range problems.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for the first absent field, or
    /// [`ValidationError::CoordinateOutOfRange`] when a coordinate is outside
    /// its valid range or not finite.
    pub fn validate(
        name: Option<&str>,
        address: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let name = non_blank(name).ok_or(ValidationError::MissingField("name"))?;
        let address = non_blank(address).ok_or(ValidationError::MissingField("address"))?;
        let latitude = latitude.ok_or(ValidationError::MissingField("latitude"))?;
        let longitude = longitude.ok_or(ValidationError::MissingField("longitude"))?;

        let location = Coordinate::new(latitude, longitude)?;

        Ok(Self {
            name: name.to_owned(),
            address: address.to_owned(),
            location,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.location.latitude()
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.location.longitude()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
