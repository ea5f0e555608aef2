pub mod forecast;
pub mod openmeteo_forecast;
