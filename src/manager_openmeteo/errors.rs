use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in communication with the Open-Meteo API: {0}")]
pub struct TransportError(pub String);
impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> TransportError {
        TransportError(format!("json document error: {}", e.to_string()))
    }
}
impl From<ureq::Error> for TransportError {
    fn from(e: ureq::Error) -> TransportError {
        TransportError(format!("http request error: {}", e.to_string()))
    }
}
