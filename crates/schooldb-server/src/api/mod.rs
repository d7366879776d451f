mod schools;

use std::{future::Future, time::Duration};

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use schooldb_db::DbError;
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

/// Shared handler state. The pool is the only handle to the Record Store.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub store_timeout: Duration,
}

/// Error response. Serializes as `{"message": ...}`; `code` only picks the status.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ApiError {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }

    pub fn internal() -> Self {
        Self::new("internal_error", "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code {
            "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Log a store failure with its detail and hand back the generic 500.
pub(super) fn map_db_error(request_id: &str, error: &DbError) -> ApiError {
    tracing::error!(request_id, error = %error, "school store operation failed");
    ApiError::internal()
}

/// Bound a store call by `timeout`. Elapsed calls are dropped, which cancels
/// the in-flight query and releases its pooled connection.
pub(super) async fn with_store_timeout<T, F>(timeout: Duration, call: F) -> Result<T, DbError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result.map_err(DbError::from),
        Err(_) => Err(DbError::Timeout(timeout)),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/addSchool", post(schools::add_school))
        .route("/listSchools", get(schools::list_schools))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let check = tokio::time::timeout(state.store_timeout, schooldb_db::health_check(&state.pool))
        .await
        .unwrap_or(Err(DbError::Timeout(state.store_timeout)));

    match check {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(request_id = %req_id.0, error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}
