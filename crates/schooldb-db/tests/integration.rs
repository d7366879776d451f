//! Offline unit tests for schooldb-db pool configuration and row types.
//! These tests do not require a live database connection.

use chrono::Utc;
use schooldb_core::{AppConfig, Environment, School};
use schooldb_db::{PoolConfig, SchoolRow};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8888),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        store_timeout_secs: 5,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn school_row_converts_into_domain_school() {
    let row = SchoolRow {
        id: 12,
        name: "Roosevelt Elementary".to_string(),
        address: "400 Oak Ave".to_string(),
        latitude: 47.6062,
        longitude: -122.3321,
        created_at: Utc::now(),
    };

    let school = School::from(row);
    assert_eq!(
        school,
        School {
            id: 12,
            name: "Roosevelt Elementary".to_string(),
            address: "400 Oak Ave".to_string(),
            latitude: 47.6062,
            longitude: -122.3321,
        }
    );
}
