//! Time-lapse viewer URL options and assembly.
//!
//! The viewer reads its whole state from the query string. Keys that carry
//! bracket syntax are written pre-encoded and values are never escaped, so
//! every value must already be safe to place in a URL.
use crate::timestamp::Timestamp;
use serde::Deserialize;
use std::fmt;

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Motion {
    Loop,
    Rock,
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loop => write!(f, "loop"),
            Self::Rock => write!(f, "rock"),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SliderOptions {
    pub base: String,
    pub satellite: String,
    pub zoom: u8,
    pub angle: i32,
    pub image_count: u32,
    pub timestep: u32,
    #[serde(default)]
    pub start: Option<Timestamp>,
    #[serde(default)]
    pub end: Option<Timestamp>,
    pub speed: u32,
    pub motion: Motion,
    pub border_color: String,
    pub lat: f64,
    pub layer_opacity: f64,
    pub layer_hidden: bool,
    pub pause: bool,
    pub slider: i32,
    pub hide_controls: bool,
    pub mouse_draw: bool,
    pub follow_feature: bool,
    pub follow_hide: bool,
    pub slider_id: String,
    pub section: String,
    pub band: String,
    pub x: f64,
    pub y: f64,
}

fn flag(value: bool) -> String {
    let flag = if value { "1" } else { "0" };
    flag.to_string()
}

impl SliderOptions {
    /// A copy of these options playing from `start` to `end`.
    pub fn with_window(self: &Self, start: Timestamp, end: Timestamp) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..self.clone()
        }
    }

    /// Query pairs in the order the viewer documents them.
    pub fn params(self: &Self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("sat", self.satellite.clone()),
            ("z", self.zoom.to_string()),
            ("angle", self.angle.to_string()),
            ("im", self.image_count.to_string()),
            ("ts", self.timestep.to_string()),
        ];
        if let Some(start) = self.start {
            params.push(("st", start.to_string()));
        }
        if let Some(end) = self.end {
            params.push(("et", end.to_string()));
        }
        params.extend([
            ("speed", self.speed.to_string()),
            ("motion", self.motion.to_string()),
            ("maps%5Bborders%5D", self.border_color.clone()),
            ("lat", self.lat.to_string()),
            ("opacity%5B0%5D", self.layer_opacity.to_string()),
            ("hidden%5B0%5D", flag(self.layer_hidden)),
            ("pause", flag(self.pause)),
            ("slider", self.slider.to_string()),
            ("hide_controls", flag(self.hide_controls)),
            ("mouse_draw", flag(self.mouse_draw)),
            ("follow_feature", flag(self.follow_feature)),
            ("follow_hide", flag(self.follow_hide)),
            ("s", self.slider_id.clone()),
            ("sec", self.section.clone()),
            ("p%5B0%5D", self.band.clone()),
            ("x", self.x.to_string()),
            ("y", self.y.to_string()),
        ]);
        params
    }

    pub fn url(self: &Self) -> String {
        assemble(&self.base, &self.params())
    }
}

/// Renders `base` followed by `key=value` pairs joined with `&`.
pub fn assemble<K: AsRef<str>, V: AsRef<str>>(base: &str, params: &[(K, V)]) -> String {
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key.as_ref(), value.as_ref()))
        .collect::<Vec<_>>()
        .join("&");
    format!("{base}{query}")
}
