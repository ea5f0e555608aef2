use thiserror::Error;

pub mod connection;
pub mod reconcile;
pub mod store;

pub use connection::open_database;

/// Column order of the forecast_data table, the insert statement and the
/// schema verification both derive from it
pub const FORECAST_COLUMNS: [&str; 11] = [
    "forecast_date_time",
    "forecast_day_night",
    "snapshot_date_time",
    "temperature",
    "rainfall",
    "snowfall",
    "weather_code",
    "wind_speed",
    "wind_direction",
    "wind_gusts",
    "observed",
];

pub const LOCALE_COLUMNS: [&str; 4] = [
    "coordinates",
    "elevation",
    "timezone",
    "timezone_offset",
];

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("sqlite error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("schema mismatch: {0}")]
    Mismatch(String),
}
