use std::fmt;
use std::fmt::Formatter;
use chrono::NaiveDateTime;

/// Format used whenever a date time is persisted or printed,
/// second precision and lexicographically sortable
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Metadata describing the location the forecast covers, one current row only
pub struct Locale {
    pub coordinates: String,
    pub elevation: String,
    pub timezone: String,
    pub timezone_offset: String,
}

/// One hour of forecast or observation data, ready for persisting
#[derive(Clone, PartialEq)]
pub struct ForecastRecord {
    pub forecast_date_time: NaiveDateTime,
    pub forecast_day_night: i64,
    pub snapshot_date_time: NaiveDateTime,
    pub temperature: f64,
    pub rainfall: f64,
    pub snowfall: f64,
    pub weather_code: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub wind_gusts: f64,
    pub observed: bool,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for ForecastRecord {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {} {:>5.1} {:>6.2} {:>5.2} {:>4} {:>5.1} {:>5.1} {:>5.1} {} {}",
               self.forecast_date_time.format(DATE_TIME_FORMAT),
               if self.forecast_day_night == 1 { "day  " } else { "night" },
               self.temperature,
               self.rainfall,
               self.snowfall,
               self.weather_code,
               self.wind_speed,
               self.wind_direction,
               self.wind_gusts,
               self.snapshot_date_time.format(DATE_TIME_FORMAT),
               if self.observed { "observed" } else { "forecast" })
    }
}
