//! Deduplication passes over forecast_data.
//!
//! Pass A collapses rows that are identical across every column, keeping the
//! earliest inserted row. Pass B keeps, per observed hour, only the row with
//! the latest snapshot time. Rows still marked as forecasts are never touched
//! by pass B, multiple predictions for the same future hour from different
//! snapshots all survive.

use rusqlite::Connection;
use crate::db::SchemaError;

const REMOVE_EXACT_DUPLICATES: &str = "\
DELETE FROM forecast_data
WHERE rowid NOT IN (
    SELECT MIN(rowid)
    FROM forecast_data
    GROUP BY forecast_date_time, forecast_day_night, snapshot_date_time, temperature, \
rainfall, snowfall, weather_code, wind_speed, wind_direction, wind_gusts
)";

const COLLAPSE_OBSERVED: &str = "\
DELETE FROM forecast_data
WHERE observed = 1
AND rowid NOT IN (
    SELECT rowid
    FROM (
        SELECT
            forecast_date_time,
            MAX(snapshot_date_time) AS latest_time,
            MAX(rowid) AS rowid
        FROM
            forecast_data
        WHERE
            observed = 1
        GROUP BY
            forecast_date_time
    ) AS latest_records
)";

/// Runs both passes after an ingest. Both are full table operations and
/// idempotent, a second run with no new data deletes nothing.
///
/// # Arguments
///
/// * 'conn' - open database connection
pub fn run(conn: &Connection) -> Result<(), SchemaError> {
    let removed = remove_exact_duplicates(conn)?;
    let collapsed = collapse_observed(conn)?;
    log::info!("reconciliation removed {} exact duplicates and {} stale observations", removed, collapsed);

    Ok(())
}

/// Pass A, collapses exact duplicates to the earliest inserted row and
/// returns the number of rows deleted
pub fn remove_exact_duplicates(conn: &Connection) -> Result<usize, SchemaError> {
    Ok(conn.execute(REMOVE_EXACT_DUPLICATES, [])?)
}

/// Pass B, keeps one row per observed hour, the one carrying the latest
/// snapshot time, and returns the number of rows deleted
pub fn collapse_observed(conn: &Connection) -> Result<usize, SchemaError> {
    Ok(conn.execute(COLLAPSE_OBSERVED, [])?)
}
