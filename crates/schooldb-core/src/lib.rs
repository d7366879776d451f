pub mod app_config;
pub mod config;
pub mod geo;
pub mod ranking;
pub mod schools;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{haversine_km, Coordinate, InvalidCoordinateError, EARTH_RADIUS_KM};
pub use ranking::{rank, RankedSchool};
pub use schools::{NewSchool, School, ValidationError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
