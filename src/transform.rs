use chrono::{DateTime, NaiveDateTime, TimeDelta};
use thiserror::Error;
use crate::models::forecast::{ForecastRecord, Locale};
use crate::models::openmeteo_forecast::ForecastResponse;

#[derive(Error, Debug)]
#[error("malformed hourly data from provider: {0}")]
pub struct DataShapeError(pub String);

/// Builds the single locale row from the metadata of the latest response
///
/// # Arguments
///
/// * 'response' - the forecast response to take metadata from
pub fn locale_row(response: &ForecastResponse) -> Locale {
    Locale {
        coordinates: format!("{}°N {}°E", response.latitude, response.longitude),
        elevation: response.elevation.to_string(),
        timezone: response.timezone.clone(),
        timezone_offset: response.utc_offset_seconds.to_string(),
    }
}

/// Transforms the hourly arrays of a forecast response into one record per
/// hour on the time axis.
///
/// The snapshot time is a single scalar for the whole batch: the current
/// observation time shifted back one hour to compensate for the provider
/// reporting lag. A row whose hour lies strictly before the snapshot time
/// describes the past and is flagged as observed.
///
/// Each weather field carries its own rounding policy, temperature and the
/// wind fields to whole units, showers and snowfall to two decimals. The
/// rainfall column is the sum of rain and showers after each has been
/// rounded on its own. The weather code is a categorical value and is
/// left untouched.
///
/// # Arguments
///
/// * 'response' - the forecast response holding the hourly arrays
pub fn hourly_records(response: &ForecastResponse) -> Result<Vec<ForecastRecord>, DataShapeError> {
    let hourly = &response.hourly;
    let axis = time_axis(&hourly.time, response.utc_offset_seconds)?;

    let lengths = [
        hourly.temperature_2m.len(),
        hourly.rain.len(),
        hourly.showers.len(),
        hourly.snowfall.len(),
        hourly.weather_code.len(),
        hourly.wind_speed_10m.len(),
        hourly.wind_direction_10m.len(),
        hourly.wind_gusts_10m.len(),
        hourly.is_day.len(),
    ];
    if lengths.iter().any(|l| *l != axis.len()) {
        return Err(DataShapeError(format!(
            "hourly arrays not aligned with the time axis of {} instants", axis.len())));
    }

    let current = response.current.as_ref()
        .ok_or_else(|| DataShapeError("response carries no current observation".to_string()))?;

    let snapshot_date_time =
        local_naive(current.time, response.utc_offset_seconds)? - TimeDelta::hours(1);

    let mut records: Vec<ForecastRecord> = Vec::with_capacity(axis.len());
    for (i, forecast_date_time) in axis.into_iter().enumerate() {
        records.push(ForecastRecord {
            forecast_date_time,
            forecast_day_night: hourly.is_day[i],
            snapshot_date_time,
            temperature: round_to(hourly.temperature_2m[i], 0),
            rainfall: round_to(hourly.rain[i], 0) + round_to(hourly.showers[i], 2),
            snowfall: round_to(hourly.snowfall[i], 2),
            weather_code: hourly.weather_code[i],
            wind_speed: round_to(hourly.wind_speed_10m[i], 0),
            wind_direction: round_to(hourly.wind_direction_10m[i], 0),
            wind_gusts: round_to(hourly.wind_gusts_10m[i], 0),
            observed: snapshot_date_time > forecast_date_time,
        });
    }

    Ok(records)
}

/// Rebuilds the half-open time axis [start, end) from the hourly unix
/// timestamps, start inclusive, end exclusive, stepped by the interval
/// between the first two instants.
fn time_axis(times: &[i64], utc_offset_seconds: i64) -> Result<Vec<NaiveDateTime>, DataShapeError> {
    if times.len() < 2 {
        return Err(DataShapeError("time axis needs at least two instants".to_string()));
    }

    let start = times[0];
    let interval = times[1] - times[0];
    if interval <= 0 {
        return Err(DataShapeError(format!("non positive hourly interval: {}", interval)));
    }
    let end = times[times.len() - 1] + interval;

    let mut axis: Vec<NaiveDateTime> = Vec::with_capacity(times.len());
    let mut t = start;
    while t < end {
        axis.push(local_naive(t, utc_offset_seconds)?);
        t += interval;
    }

    Ok(axis)
}

/// Shifts a unix timestamp to provider local wall time and strips the offset
fn local_naive(epoch: i64, utc_offset_seconds: i64) -> Result<NaiveDateTime, DataShapeError> {
    DateTime::from_timestamp(epoch + utc_offset_seconds, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| DataShapeError(format!("timestamp out of range: {}", epoch)))
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::openmeteo_forecast::{CurrentWeather, HourlyValues};

    // 2024-01-01 00:00:00 UTC
    const START: i64 = 1_704_067_200;

    fn response(hours: usize, current_time: i64) -> ForecastResponse {
        ForecastResponse {
            latitude: 51.5,
            longitude: 0.625,
            elevation: 22.0,
            timezone: "Europe/London".to_string(),
            utc_offset_seconds: 0,
            current: Some(CurrentWeather { time: current_time, interval: 900, temperature_2m: 6.4 }),
            hourly: HourlyValues {
                time: (0..hours as i64).map(|h| START + h * 3600).collect(),
                temperature_2m: vec![6.43; hours],
                rain: vec![0.0; hours],
                showers: vec![0.0; hours],
                snowfall: vec![0.0; hours],
                weather_code: vec![3.0; hours],
                wind_speed_10m: vec![12.6; hours],
                wind_direction_10m: vec![184.2; hours],
                wind_gusts_10m: vec![20.1; hours],
                is_day: vec![0; hours],
            },
        }
    }

    #[test]
    fn four_days_give_96_hourly_records() {
        let response = response(96, START + 24 * 3600);
        let records = hourly_records(&response).unwrap();

        assert_eq!(records.len(), 96);
        for pair in records.windows(2) {
            assert_eq!(pair[1].forecast_date_time - pair[0].forecast_date_time, TimeDelta::hours(1));
        }
        let snapshot = records[0].snapshot_date_time;
        assert!(records.iter().all(|r| r.snapshot_date_time == snapshot));
    }

    #[test]
    fn snapshot_is_current_time_minus_one_hour() {
        let response = response(48, START + 24 * 3600);
        let records = hourly_records(&response).unwrap();

        let expected = local_naive(START + 23 * 3600, 0).unwrap();
        assert_eq!(records[0].snapshot_date_time, expected);
    }

    #[test]
    fn observed_iff_snapshot_strictly_later_than_forecast_hour() {
        // snapshot lands on START + 23h
        let response = response(96, START + 24 * 3600);
        let records = hourly_records(&response).unwrap();

        for record in &records {
            assert_eq!(record.observed, record.snapshot_date_time > record.forecast_date_time);
        }
        // hours 0..=22 lie before the snapshot, hour 23 equals it (strict compare)
        assert!(records[22].observed);
        assert!(!records[23].observed);
        assert!(!records[24].observed);
    }

    #[test]
    fn rainfall_sums_independently_rounded_sources() {
        let mut response = response(2, START + 3600);
        response.hourly.rain = vec![1.4, 1.5];
        response.hourly.showers = vec![0.456, 0.454];

        let records = hourly_records(&response).unwrap();
        assert_eq!(records[0].rainfall, 1.0 + 0.46);
        assert_eq!(records[1].rainfall, 2.0 + 0.45);
    }

    #[test]
    fn fields_follow_their_own_rounding_policy() {
        let mut response = response(2, START + 3600);
        response.hourly.temperature_2m = vec![6.43, -0.72];
        response.hourly.snowfall = vec![0.123, 0.456];
        response.hourly.weather_code = vec![61.0, 3.0];
        response.hourly.wind_speed_10m = vec![12.6, 3.2];
        response.hourly.wind_direction_10m = vec![184.5, 12.4];
        response.hourly.wind_gusts_10m = vec![20.499, 7.5];

        let records = hourly_records(&response).unwrap();
        assert_eq!(records[0].temperature, 6.0);
        assert_eq!(records[1].temperature, -1.0);
        assert_eq!(records[0].snowfall, 0.12);
        assert_eq!(records[1].snowfall, 0.46);
        assert_eq!(records[0].weather_code, 61.0);
        assert_eq!(records[0].wind_speed, 13.0);
        assert_eq!(records[0].wind_direction, 185.0);
        assert_eq!(records[0].wind_gusts, 20.0);
        assert_eq!(records[1].wind_gusts, 8.0);
    }

    #[test]
    fn timezone_offset_is_stripped_to_local_wall_time() {
        let mut response = response(2, START + 3600);
        response.utc_offset_seconds = 3600;

        let records = hourly_records(&response).unwrap();
        assert_eq!(
            records[0].forecast_date_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-01-01 01:00:00"
        );
    }

    #[test]
    fn misaligned_arrays_are_rejected() {
        let mut response = response(24, START + 3600);
        response.hourly.rain = vec![0.0; 23];

        assert!(hourly_records(&response).is_err());
    }

    #[test]
    fn missing_current_observation_is_rejected() {
        let mut response = response(24, START + 3600);
        response.current = None;

        assert!(hourly_records(&response).is_err());
    }

    #[test]
    fn single_instant_axis_is_rejected() {
        let mut response = response(24, START + 3600);
        response.hourly.time = vec![START];

        assert!(hourly_records(&response).is_err());
    }

    #[test]
    fn locale_row_formats_coordinates() {
        let response = response(2, START + 3600);
        let locale = locale_row(&response);

        assert_eq!(locale.coordinates, "51.5°N 0.625°E");
        assert_eq!(locale.elevation, "22");
        assert_eq!(locale.timezone, "Europe/London");
        assert_eq!(locale.timezone_offset, "0");
    }
}
