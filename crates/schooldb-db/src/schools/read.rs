//! Read operations for the `schools` table.

use sqlx::PgPool;

use super::types::SchoolRow;

/// Return every school.
///
/// Rows come back in `id` order so output is repeatable, but callers that
/// care about ordering impose their own (see `schooldb_core::rank`).
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_schools(pool: &PgPool) -> Result<Vec<SchoolRow>, sqlx::Error> {
    sqlx::query_as::<_, SchoolRow>(
        "SELECT id, name, address, latitude, longitude, created_at \
         FROM schools \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await
}
