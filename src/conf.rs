//! Built-in configuration: observer location, archive selectors and viewer options.
use crate::slider::SliderOptions;
use anyhow::Result;
use chrono_tz::Tz;
use serde::Deserialize;
use toml;

/// Observer position. Longitude is positive east.
#[derive(Deserialize, Clone, Debug)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Tz,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ArchiveConfig {
    pub base: String,
    pub satellite: String,
    pub section: String,
    pub product: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct LapseConfig {
    pub location: Location,
    pub archive: ArchiveConfig,
    pub viewer: SliderOptions,
}

impl LapseConfig {
    pub fn from_template(table: &toml::Table) -> Result<Self> {
        let config: Self = toml::from_str(&table.to_string())?;
        Ok(config)
    }

    pub fn builtin() -> Result<Self> {
        Self::from_template(&default_config_toml())
    }
}

pub fn default_config_toml() -> toml::Table {
    toml::toml! {
        // Coordinates taken from a map pin
        [location]
        latitude = 30.2950
        longitude = -97.5559
        timezone = "US/Central"

        [archive]
        base = "https://rammb-slider.cira.colostate.edu/data/json/"
        satellite = "goes-16"
        section = "conus"
        product = "geocolor"

        [viewer]
        base = "https://rammb-slider.cira.colostate.edu/?"
        satellite = "goes-16"
        zoom = 3
        angle = 0
        image_count = 12
        timestep = 1
        speed = 90
        motion = "loop"
        border_color = "white"
        lat = 0
        layer_opacity = 1
        layer_hidden = false
        pause = false
        slider = -1
        hide_controls = false
        mouse_draw = false
        follow_feature = false
        follow_hide = false
        slider_id = "rammb-slider"
        section = "conus"
        band = "band_02"
        x = 2743.14697265625
        y = 4909.352783203125
    }
}
