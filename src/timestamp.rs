//! The archive's `YYYYMMDDHHMMSS` timestamp form.
use crate::error::LapseError;
use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

const FORMAT: &str = "%Y%m%d%H%M%S";

/// A UTC instant stored as the 14-digit integer the slider archive uses.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u64")]
pub struct Timestamp(u64);

impl Timestamp {
    /// Sub-second precision is dropped; years outside 0..=9999 do not fit the form.
    pub fn from_datetime(instant: &DateTime<Utc>) -> Result<Self, LapseError> {
        let year = u64::try_from(instant.year())
            .ok()
            .filter(|y| *y <= 9999)
            .ok_or_else(|| LapseError::InvalidTimestamp(instant.to_rfc3339()))?;
        let value = year * 10_000_000_000
            + instant.month() as u64 * 100_000_000
            + instant.day() as u64 * 1_000_000
            + instant.hour() as u64 * 10_000
            + instant.minute() as u64 * 100
            + instant.second() as u64;
        Ok(Self(value))
    }

    pub fn value(self: &Self) -> u64 {
        self.0
    }

    pub fn hour(self: &Self) -> u32 {
        ((self.0 / 10_000) % 100) as u32
    }

    pub fn minute(self: &Self) -> u32 {
        ((self.0 / 100) % 100) as u32
    }

    /// The `YYYYMMDD` day the archive files this timestamp under.
    pub fn date(self: &Self) -> String {
        format!("{:08}", self.0 / 1_000_000)
    }

    pub fn hour_key(self: &Self) -> String {
        format!("{:02}", self.hour())
    }

    pub fn to_datetime(self: &Self) -> DateTime<Utc> {
        // Always valid: every constructor checks the value.
        NaiveDateTime::parse_from_str(&self.to_string(), FORMAT)
            .map(|naive| naive.and_utc())
            .unwrap_or_default()
    }
}

impl TryFrom<u64> for Timestamp {
    type Error = LapseError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        format!("{value:014}").parse()
    }
}

impl FromStr for Timestamp {
    type Err = LapseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LapseError::InvalidTimestamp(s.to_owned());
        if s.len() != 14 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        NaiveDateTime::parse_from_str(s, FORMAT).map_err(|_| invalid())?;
        let value = s.parse::<u64>().map_err(|_| invalid())?;
        Ok(Self(value))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:014}", self.0)
    }
}
