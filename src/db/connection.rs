//! Opening and initialising the SQLite store.

use std::fs;
use std::path::Path;
use std::time::Duration;
use rusqlite::Connection;
use crate::db::{FORECAST_COLUMNS, LOCALE_COLUMNS, SchemaError};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS locale (
    coordinates TEXT,
    elevation TEXT,
    timezone TEXT,
    timezone_offset TEXT
);
CREATE TABLE IF NOT EXISTS forecast_data (
    forecast_date_time TEXT,
    forecast_day_night INTEGER,
    snapshot_date_time TEXT,
    temperature REAL,
    rainfall REAL,
    snowfall REAL,
    weather_code REAL,
    wind_speed REAL,
    wind_direction REAL,
    wind_gusts REAL,
    observed INTEGER
);";

/// Opens the database file, creating it and its parent directory on first
/// run, and verifies that the persisted tables still match the column sets
/// the writers expect.
///
/// # Arguments
///
/// * 'path' - path to the database file
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let conn = Connection::open(path)?;
    conn.busy_timeout(Duration::from_millis(1_000))?;
    conn.pragma_update(None, "journal_mode", &"WAL")?;

    ensure_tables(&conn)?;

    log::info!("Database ready at {}", path.display());
    Ok(conn)
}

/// Creates missing tables and verifies the live schema against the expected
/// column lists, a drift is reported rather than silently written to
pub fn ensure_tables(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA)?;
    check_columns(conn, "locale", &LOCALE_COLUMNS)?;
    check_columns(conn, "forecast_data", &FORECAST_COLUMNS)?;
    Ok(())
}

fn check_columns(conn: &Connection, table: &str, expected: &[&str]) -> Result<(), SchemaError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<String>, _>>()?;

    if columns != expected {
        return Err(SchemaError::Mismatch(format!(
            "table {} has columns [{}], expected [{}]",
            table, columns.join(", "), expected.join(", "))));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_and_verifies_both_tables() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_tables(&conn).unwrap();
        // second run against the existing schema passes as well
        ensure_tables(&conn).unwrap();
    }

    #[test]
    fn detects_schema_drift() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE locale (coordinates TEXT, height TEXT)").unwrap();

        match ensure_tables(&conn) {
            Err(SchemaError::Mismatch(msg)) => assert!(msg.contains("locale")),
            other => panic!("expected schema mismatch, got {:?}", other.err()),
        }
    }
}
