use std::env;
use std::path::Path;
use std::process;
use log::{error, info};
use crate::config::{Config, load_config};
use crate::errors::PopulateError;
use crate::manager_openmeteo::OpenMeteo;
use crate::models::forecast::ForecastRecord;

mod config;
mod db;
mod errors;
mod logging;
mod manager_openmeteo;
mod models;
mod transform;

/// Number of attempts the retry macro gives an operation before giving up
pub const MAX_ATTEMPTS: u32 = 5;

/// Base backoff in milliseconds, doubled after every failed attempt
pub const BACKOFF_MS: u64 = 200;

/// Retries a fallible closure with exponential backoff, returning the last
/// error once the attempt budget is exhausted
macro_rules! retry {
    ($f:expr) => {{
        let mut attempts: u32 = 0;
        loop {
            match $f() {
                Ok(v) => break Ok(v),
                Err(e) => {
                    attempts += 1;
                    if attempts >= crate::MAX_ATTEMPTS {
                        break Err(e);
                    }
                    log::warn!("attempt {} failed: {}, retrying", attempts, e);
                    std::thread::sleep(std::time::Duration::from_millis(crate::BACKOFF_MS << attempts));
                }
            }
        }
    }};
}
pub(crate) use retry;

fn main() {
    let config_path = env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) => { eprintln!("Error loading configuration: {}", e); process::exit(1); }
    };

    if let Err(e) = logging::setup_logging(&config.general) {
        eprintln!("Error setting up logging: {}", e);
        process::exit(1);
    }

    info!("weatherbase version: {}", env!("CARGO_PKG_VERSION"));

    match run(&config) {
        Ok(records) => {
            for record in &records {
                println!("{}", record);
            }
        },
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}

/// Runs the fetch, transform, store and reconcile sequence against one
/// provider response. The connection is opened once, shared by the writers
/// and the reconciler, and released when this function returns on any path.
///
/// # Arguments
///
/// * 'config' - the loaded configuration
fn run(config: &Config) -> Result<Vec<ForecastRecord>, PopulateError> {
    let mut conn = db::open_database(Path::new(&config.files.database))?;

    let openmeteo = OpenMeteo::new(config.geo_ref.lat, config.geo_ref.long, &config.forecast);
    let response = openmeteo.get_forecast()?;
    info!("fetched forecast for {} at {} {}", response.timezone, response.latitude, response.longitude);

    let locale = transform::locale_row(&response);
    db::store::replace_locale(&mut conn, &locale)?;

    let records = transform::hourly_records(&response)?;
    db::store::append_forecast(&mut conn, &records)?;
    info!("appended {} hourly records", records.len());

    db::reconcile::run(&conn)?;

    Ok(records)
}
