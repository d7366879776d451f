//! `POST /addSchool` and `GET /listSchools`.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use schooldb_core::{Coordinate, NewSchool, School, ValidationError};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, with_store_timeout, ApiError, AppState};

const ALL_FIELDS_REQUIRED: &str = "All fields are required";
const COORDINATES_REQUIRED: &str = "Latitude and longitude are required";
const COORDINATES_NOT_NUMERIC: &str = "Latitude and longitude must be valid numbers";

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Coordinates arrive either as JSON numbers or as numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum CoordinateInput {
    Number(f64),
    Text(String),
}

impl CoordinateInput {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    fn to_f64(&self) -> Result<f64, ApiError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => parse_coordinate(s),
        }
    }
}

// Every field is optional here so that absence is reported with one uniform
// message instead of a serde rejection.
#[derive(Debug, Deserialize)]
pub(super) struct AddSchoolRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<CoordinateInput>,
    pub longitude: Option<CoordinateInput>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ListSchoolsParams {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(super) struct AddSchoolResponse {
    pub message: &'static str,
    #[serde(rename = "schoolId")]
    pub school_id: i64,
}

#[derive(Debug, Serialize)]
pub(super) struct SchoolWithDistance {
    #[serde(flatten)]
    pub school: School,
    /// Kilometres from the requested point.
    pub distance: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct ListSchoolsResponse {
    pub schools: Vec<SchoolWithDistance>,
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn parse_coordinate(raw: &str) -> Result<f64, ApiError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ApiError::validation(COORDINATES_NOT_NUMERIC))
}

fn map_validation_error(error: &ValidationError) -> ApiError {
    match error {
        ValidationError::MissingField(_) => ApiError::validation(ALL_FIELDS_REQUIRED),
        ValidationError::CoordinateOutOfRange(e) => ApiError::validation(e.to_string()),
    }
}

/// Presence is checked for all four fields before any coordinate is parsed,
/// so a missing field always wins over a malformed one.
fn validate_add_request(body: &AddSchoolRequest) -> Result<NewSchool, ApiError> {
    let (Some(name), Some(address), Some(latitude), Some(longitude)) = (
        present(body.name.as_deref()),
        present(body.address.as_deref()),
        present_coordinate(body.latitude.as_ref()),
        present_coordinate(body.longitude.as_ref()),
    ) else {
        return Err(ApiError::validation(ALL_FIELDS_REQUIRED));
    };

    NewSchool::validate(
        Some(name),
        Some(address),
        Some(latitude.to_f64()?),
        Some(longitude.to_f64()?),
    )
    .map_err(|e| map_validation_error(&e))
}

fn present_coordinate(value: Option<&CoordinateInput>) -> Option<&CoordinateInput> {
    value.filter(|c| !c.is_blank())
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn validate_reference(params: &ListSchoolsParams) -> Result<Coordinate, ApiError> {
    let (Some(lat), Some(lon)) = (
        present(params.latitude.as_deref()),
        present(params.longitude.as_deref()),
    ) else {
        return Err(ApiError::validation(COORDINATES_REQUIRED));
    };

    Coordinate::new(parse_coordinate(lat)?, parse_coordinate(lon)?)
        .map_err(|e| ApiError::validation(e.to_string()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /addSchool: validate and persist one school.
pub(super) async fn add_school(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AddSchoolRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AddSchoolResponse>), ApiError> {
    let rid = &req_id.0;

    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(request_id = %rid, error = %rejection, "rejected add-school body");
        ApiError::validation("Invalid request body")
    })?;

    let school = validate_add_request(&body)?;

    let school_id = with_store_timeout(
        state.store_timeout,
        schooldb_db::insert_school(&state.pool, &school),
    )
    .await
    .map_err(|e| map_db_error(rid, &e))?;

    tracing::info!(request_id = %rid, school_id, "school added");

    Ok((
        StatusCode::CREATED,
        Json(AddSchoolResponse {
            message: "School added successfully",
            school_id,
        }),
    ))
}

/// GET /listSchools?latitude=&longitude=: every school, nearest first.
pub(super) async fn list_schools(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    params: Result<Query<ListSchoolsParams>, QueryRejection>,
) -> Result<Json<ListSchoolsResponse>, ApiError> {
    let rid = &req_id.0;

    let Query(params) = params.map_err(|rejection| {
        tracing::debug!(request_id = %rid, error = %rejection, "rejected list-schools query");
        ApiError::validation(COORDINATES_REQUIRED)
    })?;

    let reference = validate_reference(&params)?;

    let rows = with_store_timeout(state.store_timeout, schooldb_db::list_schools(&state.pool))
        .await
        .map_err(|e| map_db_error(rid, &e))?;

    let records: Vec<School> = rows.into_iter().map(School::from).collect();

    // The reference was validated above, so a failure here means a stored row
    // carries an impossible coordinate.
    let ranked = schooldb_core::rank(reference.latitude(), reference.longitude(), records)
        .map_err(|e| {
            tracing::error!(request_id = %rid, error = %e, "stored school has invalid coordinates");
            ApiError::internal()
        })?;

    tracing::debug!(request_id = %rid, count = ranked.len(), "schools ranked");

    let schools = ranked
        .into_iter()
        .map(|r| SchoolWithDistance {
            school: r.school,
            distance: r.distance_km,
        })
        .collect();

    Ok(Json(ListSchoolsResponse { schools }))
}
