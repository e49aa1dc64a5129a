//! Capture listings from the slider image archive.
use crate::conf::ArchiveConfig;
use crate::error::LapseError;
use crate::timestamp::Timestamp;
use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, info};
use url::Url;

#[derive(Deserialize, Debug)]
struct ByHour {
    timestamps_int: BTreeMap<String, Vec<Timestamp>>,
}

/// Captures recorded on one day, keyed by two-digit UTC hour.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvailabilityMap {
    hours: BTreeMap<String, Vec<Timestamp>>,
}

impl AvailabilityMap {
    pub fn new(hours: BTreeMap<String, Vec<Timestamp>>) -> Result<Self, LapseError> {
        for (hour, captures) in hours.iter() {
            let valid = hour.len() == 2
                && hour.bytes().all(|b| b.is_ascii_digit())
                && hour.parse::<u32>().map_or(false, |h| h < 24);
            if !valid {
                return Err(LapseError::InvalidHourKey(hour.to_owned()));
            }
            if let Some(stray) = captures.iter().find(|ts| &ts.hour_key() != hour) {
                return Err(LapseError::HourMismatch {
                    hour: hour.to_owned(),
                    timestamp: stray.to_string(),
                });
            }
        }
        Ok(Self { hours })
    }

    /// Decodes an archive `*_by_hour.json` body.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let by_hour: ByHour = serde_json::from_slice(body)?;
        let map = Self::new(by_hour.timestamps_int)?;
        info!("{} hours with recorded photos", map.hours.len());
        Ok(map)
    }

    pub fn captures(self: &Self, hour: &str) -> Option<&[Timestamp]> {
        self.hours.get(hour).map(|v| v.as_slice())
    }

    pub fn len(self: &Self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(self: &Self) -> bool {
        self.hours.is_empty()
    }
}

pub struct Archive {
    client: reqwest::Client,
    base: Url,
    satellite: String,
}

impl Archive {
    pub fn new(client: reqwest::Client, config: &ArchiveConfig) -> Result<Self> {
        let base = Url::parse(&config.base)?;
        Ok(Self {
            client,
            base,
            satellite: config.satellite.clone(),
        })
    }

    pub fn from_config(config: &ArchiveConfig) -> Result<Self> {
        Self::new(reqwest::Client::new(), config)
    }

    /// `<base>/<satellite>/<section>/<product>/<date>_by_hour.json`
    pub fn listing_url(self: &Self, date: &str, section: &str, product: &str) -> Result<Url> {
        let path = format!("{}/{section}/{product}/{date}_by_hour.json", self.satellite);
        let url = self.base.join(&path)?;
        Ok(url)
    }

    pub async fn fetch_availability(
        self: &Self,
        date: &str,
        section: &str,
        product: &str,
    ) -> Result<AvailabilityMap> {
        let url = self.listing_url(date, section, product)?;
        debug!("requesting {url}");
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        AvailabilityMap::from_json(&body)
    }
}
