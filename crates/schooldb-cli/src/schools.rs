//! School command handlers for the CLI.

use std::{future::Future, time::Duration};

use clap::Subcommand;
use schooldb_core::{Coordinate, NewSchool, RankedSchool, School};
use schooldb_db::DbError;

/// Sub-commands available under `schools`.
#[derive(Debug, Subcommand)]
pub enum SchoolsCommands {
    /// Add a school
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
    },
    /// List every school ordered by distance from a point
    Near {
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
    },
}

/// Validate and insert one school, printing its new id.
///
/// # Errors
///
/// Returns an error if validation or the insert fails.
pub(crate) async fn run_schools_add(
    pool: &sqlx::PgPool,
    name: &str,
    address: &str,
    latitude: f64,
    longitude: f64,
    store_timeout: Duration,
) -> anyhow::Result<()> {
    let school = NewSchool::validate(Some(name), Some(address), Some(latitude), Some(longitude))?;
    let id = bounded(store_timeout, schooldb_db::insert_school(pool, &school)).await?;
    tracing::info!(school_id = id, "school added");
    println!("added school {id}");
    Ok(())
}

/// Print all schools, nearest first.
///
/// # Errors
///
/// Returns an error if the reference point is invalid or the query fails.
/// The reference is checked before the store is queried.
pub(crate) async fn run_schools_near(
    pool: &sqlx::PgPool,
    latitude: f64,
    longitude: f64,
    store_timeout: Duration,
) -> anyhow::Result<()> {
    let reference = Coordinate::new(latitude, longitude)?;

    let rows = bounded(store_timeout, schooldb_db::list_schools(pool)).await?;
    let records: Vec<School> = rows.into_iter().map(School::from).collect();
    let ranked = schooldb_core::rank(reference.latitude(), reference.longitude(), records)?;

    if ranked.is_empty() {
        println!("no schools found; add one with `schools add`");
        return Ok(());
    }

    println!("{:<8}{:<12}{:<32}ADDRESS", "ID", "KM", "NAME");
    for line in ranked.iter().map(format_row) {
        println!("{line}");
    }

    Ok(())
}

async fn bounded<T, F>(timeout: Duration, call: F) -> Result<T, DbError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result.map_err(DbError::from),
        Err(_) => Err(DbError::Timeout(timeout)),
    }
}

fn format_row(ranked: &RankedSchool) -> String {
    format!(
        "{:<8}{:<12.2}{:<32}{}",
        ranked.school.id, ranked.distance_km, ranked.school.name, ranked.school.address
    )
}
