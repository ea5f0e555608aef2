use std::time::Duration;
use ureq::Agent;
use crate::config::ForecastParameters;
use crate::manager_openmeteo::errors::TransportError;
use crate::models::openmeteo_forecast::ForecastResponse;
use crate::retry;

pub mod errors;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// The hourly variables requested from the provider. The order matters since
/// the response arrays are addressed by the same order.
pub const HOURLY_VARIABLES: [&str; 9] = [
    "temperature_2m",
    "rain",
    "showers",
    "snowfall",
    "weather_code",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
    "is_day",
];

/// Struct for managing weather forecasts produced by Open-Meteo
pub struct OpenMeteo {
    agent: Agent,
    lat: f64,
    long: f64,
    params: ForecastParameters,
}

impl OpenMeteo {
    /// Returns an OpenMeteo struct ready for fetching weather forecasts
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude for the point to get forecasts for
    /// * 'long' - longitude for the point to get forecasts for
    /// * 'params' - forecast parameters from the configuration
    pub fn new(lat: f64, long: f64, params: &ForecastParameters) -> OpenMeteo {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        let agent = config.into();

        Self { agent, lat, long, params: params.clone() }
    }

    /// Retrieves a forecast document from Open-Meteo covering the configured
    /// past and future days, one hour resolution.
    ///
    /// Timestamps are requested as unix time so the time axis can be rebuilt
    /// without parsing provider local date strings. Retries with backoff are
    /// handled here, a request that still fails after the retry budget is
    /// exhausted surfaces as a TransportError.
    pub fn get_forecast(&self) -> Result<ForecastResponse, TransportError> {
        let url = format!(
            "{}?latitude={}&longitude={}&current=temperature_2m&hourly={}\
             &wind_speed_unit={}&timezone={}&past_days={}&forecast_days={}\
             &models={}&timeformat=unixtime",
            FORECAST_URL, self.lat, self.long, HOURLY_VARIABLES.join(","),
            self.params.wind_speed_unit, self.params.timezone,
            self.params.past_days, self.params.forecast_days, self.params.model);

        let json = retry!(|| self.fetch_document(&url))?;

        let response: ForecastResponse = serde_json::from_str(&json)?;

        Ok(response)
    }

    fn fetch_document(&self, url: &str) -> Result<String, TransportError> {
        let json = self.agent
            .get(url)
            .call()?
            .body_mut()
            .read_to_string()?;

        Ok(json)
    }
}
