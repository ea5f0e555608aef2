use std::fmt;
use std::fmt::Formatter;
use crate::db::SchemaError;
use crate::manager_openmeteo::errors::TransportError;
use crate::transform::DataShapeError;

pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError(e.to_string())
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError(e.to_string())
    }
}

pub struct PopulateError(pub String);

impl fmt::Display for PopulateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "PopulateError: {}", self.0)
    }
}
impl From<TransportError> for PopulateError {
    fn from(e: TransportError) -> Self {
        PopulateError(e.to_string())
    }
}
impl From<SchemaError> for PopulateError {
    fn from(e: SchemaError) -> Self {
        PopulateError(e.to_string())
    }
}
impl From<DataShapeError> for PopulateError {
    fn from(e: DataShapeError) -> Self {
        PopulateError(e.to_string())
    }
}
