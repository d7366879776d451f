//! Row types for the `schools` table.

use chrono::{DateTime, Utc};
use schooldb_core::School;

/// A row from the `schools` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SchoolRow {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl From<SchoolRow> for School {
    fn from(row: SchoolRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}
