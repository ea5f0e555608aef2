use rusqlite::{Connection, params};
use crate::db::SchemaError;
use crate::models::forecast::{DATE_TIME_FORMAT, ForecastRecord, Locale};

const INSERT_FORECAST: &str = "\
INSERT INTO forecast_data (forecast_date_time, forecast_day_night, snapshot_date_time, \
temperature, rainfall, snowfall, weather_code, wind_speed, wind_direction, wind_gusts, observed) \
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";

/// Replaces the single locale row with metadata from the latest response,
/// no history is retained
///
/// # Arguments
///
/// * 'conn' - open database connection
/// * 'locale' - the locale row to insert
pub fn replace_locale(conn: &mut Connection, locale: &Locale) -> Result<(), SchemaError> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM locale", [])?;
    tx.execute(
        "INSERT INTO locale (coordinates, elevation, timezone, timezone_offset) \
         VALUES (?1, ?2, ?3, ?4)",
        params![locale.coordinates, locale.elevation, locale.timezone, locale.timezone_offset],
    )?;
    tx.commit()?;

    Ok(())
}

/// Appends records to forecast_data in one transaction. Pre-existing
/// duplicates are not checked here, deduplication is the reconciler's job.
///
/// # Arguments
///
/// * 'conn' - open database connection
/// * 'records' - the transformed records to append
pub fn append_forecast(conn: &mut Connection, records: &[ForecastRecord]) -> Result<(), SchemaError> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare_cached(INSERT_FORECAST)?;
        for record in records {
            stmt.execute(params![
                record.forecast_date_time.format(DATE_TIME_FORMAT).to_string(),
                record.forecast_day_night,
                record.snapshot_date_time.format(DATE_TIME_FORMAT).to_string(),
                record.temperature,
                record.rainfall,
                record.snowfall,
                record.weather_code,
                record.wind_speed,
                record.wind_direction,
                record.wind_gusts,
                record.observed,
            ])?;
        }
    }
    tx.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use crate::db::connection::ensure_tables;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ensure_tables(&conn).unwrap();
        conn
    }

    fn locale(timezone: &str) -> Locale {
        Locale {
            coordinates: "51.5°N 0.625°E".to_string(),
            elevation: "22".to_string(),
            timezone: timezone.to_string(),
            timezone_offset: "0".to_string(),
        }
    }

    fn record(forecast: &str, snapshot: &str) -> ForecastRecord {
        let forecast_date_time = NaiveDateTime::parse_from_str(forecast, DATE_TIME_FORMAT).unwrap();
        let snapshot_date_time = NaiveDateTime::parse_from_str(snapshot, DATE_TIME_FORMAT).unwrap();
        ForecastRecord {
            forecast_date_time,
            forecast_day_night: 1,
            snapshot_date_time,
            temperature: 6.0,
            rainfall: 0.46,
            snowfall: 0.0,
            weather_code: 3.0,
            wind_speed: 13.0,
            wind_direction: 185.0,
            wind_gusts: 20.0,
            observed: snapshot_date_time > forecast_date_time,
        }
    }

    #[test]
    fn locale_holds_exactly_one_row_after_two_runs() {
        let mut conn = test_conn();
        replace_locale(&mut conn, &locale("Europe/London")).unwrap();
        replace_locale(&mut conn, &locale("Europe/Stockholm")).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM locale", [], |row| row.get(0))
            .unwrap();
        let timezone: String = conn
            .query_row("SELECT timezone FROM locale", [], |row| row.get(0))
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(timezone, "Europe/Stockholm");
    }

    #[test]
    fn appends_records_with_sortable_date_time_text() {
        let mut conn = test_conn();
        let records = vec![
            record("2024-01-02 10:00:00", "2024-01-02 11:00:00"),
            record("2024-01-02 11:00:00", "2024-01-02 11:00:00"),
        ];
        append_forecast(&mut conn, &records).unwrap();

        let rows: Vec<(String, i64)> = conn
            .prepare("SELECT forecast_date_time, observed FROM forecast_data ORDER BY rowid")
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(rows[0], ("2024-01-02 10:00:00".to_string(), 1));
        assert_eq!(rows[1], ("2024-01-02 11:00:00".to_string(), 0));
    }
}
