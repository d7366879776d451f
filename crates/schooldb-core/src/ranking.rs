//! Proximity ranking of schools around a reference point.

use serde::Serialize;

use crate::geo::{haversine_km, Coordinate, InvalidCoordinateError};
use crate::schools::School;

/// A school paired with its distance from the reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSchool {
    pub school: School,
    pub distance_km: f64,
}

/// Order `records` by great-circle distance from `(latitude, longitude)`.
///
/// The sort is stable: schools at equal distance keep their input order.
/// Every coordinate is checked before any distance is computed, so the call
/// either ranks the whole input or fails without a partial result.
///
/// # Errors
///
/// Returns [`InvalidCoordinateError`] if the reference point, or any record's
/// stored coordinate, is out of range or not finite.
pub fn rank(
    latitude: f64,
    longitude: f64,
    records: Vec<School>,
) -> Result<Vec<RankedSchool>, InvalidCoordinateError> {
    let reference = Coordinate::new(latitude, longitude)?;

    let located = records
        .into_iter()
        .map(|school| Coordinate::new(school.latitude, school.longitude).map(|c| (school, c)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut ranked: Vec<RankedSchool> = located
        .into_iter()
        .map(|(school, position)| RankedSchool {
            distance_km: haversine_km(reference, position),
            school,
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    Ok(ranked)
}
