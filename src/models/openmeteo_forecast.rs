use serde::Deserialize;

#[derive(Deserialize)]
pub struct CurrentWeather {
    pub time: i64,
    pub interval: i64,
    pub temperature_2m: f64,
}

#[derive(Deserialize)]
pub struct HourlyValues {
    pub time: Vec<i64>,
    pub temperature_2m: Vec<f64>,
    pub rain: Vec<f64>,
    pub showers: Vec<f64>,
    pub snowfall: Vec<f64>,
    pub weather_code: Vec<f64>,
    pub wind_speed_10m: Vec<f64>,
    pub wind_direction_10m: Vec<f64>,
    pub wind_gusts_10m: Vec<f64>,
    pub is_day: Vec<i64>,
}

#[derive(Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub timezone: String,
    pub utc_offset_seconds: i64,
    pub current: Option<CurrentWeather>,
    pub hourly: HourlyValues,
}
