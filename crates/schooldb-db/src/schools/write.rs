//! Write operations for the `schools` table.

use schooldb_core::NewSchool;
use sqlx::PgPool;

/// Insert one school and return its generated `id`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the insert fails, including CHECK constraint
/// violations.
pub async fn insert_school(pool: &PgPool, school: &NewSchool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO schools (name, address, latitude, longitude) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(school.name())
    .bind(school.address())
    .bind(school.latitude())
    .bind(school.longitude())
    .fetch_one(pool)
    .await
}
