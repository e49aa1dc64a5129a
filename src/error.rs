use thiserror::Error;

#[derive(Error, Debug)]
pub enum LapseError {
    #[error("Expected a date formatted as YYYYMMDD, got '{0}'")]
    InvalidDate(String),
    #[error("Not a valid YYYYMMDDHHMMSS timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Local midnight does not exist on {0} in the configured timezone")]
    MissingMidnight(String),
    #[error("Expected one sunrise and one sunset in the window, found {events} event(s)")]
    NoSunriseSunset { events: usize },
    #[error("No captures recorded for hour {hour}")]
    NoCaptures { hour: String },
    #[error("Availability hour key '{0}' is not a two-digit hour")]
    InvalidHourKey(String),
    #[error("Timestamp {timestamp} is filed under hour {hour}")]
    HourMismatch { hour: String, timestamp: String },
}
