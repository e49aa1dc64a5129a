//! Sun altitude and day/twilight classification.
//!
//! Solar position follows the NOAA solar calculator spreadsheets
//! (<https://gml.noaa.gov/grad/solcalc/calcdetails.html>): Julian century,
//! equation of time and declination give the hour angle and from it the
//! sun's altitude above the observer's horizon. Refraction is folded into
//! the -0.8333° sunrise horizon rather than applied to the altitude.

use crate::conf::Location;
use chrono::{DateTime, Duration, Timelike, Utc};
use std::fmt;

/// Altitude of the sun's centre at apparent sunrise and sunset.
pub const SUNRISE_ALTITUDE: f64 = -0.8333;

const SEARCH_STEP_SECONDS: i64 = 300;
const SEARCH_EPSILON_SECONDS: i64 = 1;

fn julian_century(instant: &DateTime<Utc>) -> f64 {
    let seconds = instant.timestamp() as f64 + instant.timestamp_subsec_nanos() as f64 * 1e-9;
    let jd = seconds / 86400.0 + 2440587.5;
    (jd - 2451545.0) / 36525.0
}

/// Solar declination (degrees) and equation of time (minutes).
fn declination_and_eqtime(t: f64) -> (f64, f64) {
    let mean_long = (280.46646 + t * (36000.76983 + t * 0.0003032)).rem_euclid(360.0);
    let mean_anom = 357.52911 + t * (35999.05029 - 0.0001537 * t);
    let ecc = 0.016708634 - t * (0.000042037 + 0.0000001267 * t);

    let m = mean_anom.to_radians();
    let center = m.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
        + (2.0 * m).sin() * (0.019993 - 0.000101 * t)
        + (3.0 * m).sin() * 0.000289;

    let omega = (125.04 - 1934.136 * t).to_radians();
    let app_long = (mean_long + center - 0.00569 - 0.00478 * omega.sin()).to_radians();

    let mean_obliq = 23.0 + (26.0 + (21.448 - t * (46.815 + t * (0.00059 - t * 0.001813))) / 60.0) / 60.0;
    let obliq = (mean_obliq + 0.00256 * omega.cos()).to_radians();

    let decl = (obliq.sin() * app_long.sin()).asin();

    let y = (obliq / 2.0).tan().powi(2);
    let l0 = mean_long.to_radians();
    let eqtime = 4.0
        * (y * (2.0 * l0).sin() - 2.0 * ecc * m.sin()
            + 4.0 * ecc * y * m.sin() * (2.0 * l0).cos()
            - 0.5 * y * y * (4.0 * l0).sin()
            - 1.25 * ecc * ecc * (2.0 * m).sin())
        .to_degrees();

    (decl.to_degrees(), eqtime)
}

/// Geometric altitude of the sun's centre in degrees.
pub fn solar_altitude(location: &Location, instant: &DateTime<Utc>) -> f64 {
    let (decl, eqtime) = declination_and_eqtime(julian_century(instant));

    let minutes = instant.num_seconds_from_midnight() as f64 / 60.0;
    let true_solar = minutes + eqtime + 4.0 * location.longitude;
    let hour_angle = (true_solar / 4.0 - 180.0).to_radians();

    let lat = location.latitude.to_radians();
    let decl = decl.to_radians();
    let cos_zenith = lat.sin() * decl.sin() + lat.cos() * decl.cos() * hour_angle.cos();
    90.0 - cos_zenith.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Phases of the day, darkest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Twilight {
    Night,
    Astronomical,
    Nautical,
    Civil,
    Day,
}

impl Twilight {
    pub fn from_altitude(altitude: f64) -> Self {
        if altitude >= SUNRISE_ALTITUDE {
            Self::Day
        } else if altitude >= -6.0 {
            Self::Civil
        } else if altitude >= -12.0 {
            Self::Nautical
        } else if altitude >= -18.0 {
            Self::Astronomical
        } else {
            Self::Night
        }
    }
}

impl fmt::Display for Twilight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Night => "Night",
            Self::Astronomical => "Astronomical twilight",
            Self::Nautical => "Nautical twilight",
            Self::Civil => "Civil twilight",
            Self::Day => "Day",
        };
        write!(f, "{name}")
    }
}

/// Fine classifier over the five twilight phases.
pub fn dark_twilight_day(location: &Location) -> impl Fn(&DateTime<Utc>) -> Twilight + '_ {
    move |instant: &DateTime<Utc>| Twilight::from_altitude(solar_altitude(location, instant))
}

/// Coarse classifier: `true` while the sun is up.
pub fn sunrise_sunset(location: &Location) -> impl Fn(&DateTime<Utc>) -> bool + '_ {
    move |instant: &DateTime<Utc>| solar_altitude(location, instant) >= SUNRISE_ALTITUDE
}

/// Finds every instant in `[t0, t1]` where `f` changes value.
///
/// Each returned pair is the first instant (to within a second) carrying the
/// new value. Changes closer together than the sampling step are still found
/// because each changed interval is split until it is a second wide.
pub fn find_discrete<S, F>(t0: DateTime<Utc>, t1: DateTime<Utc>, f: F) -> Vec<(DateTime<Utc>, S)>
where
    S: Copy + PartialEq,
    F: Fn(&DateTime<Utc>) -> S,
{
    let mut events = vec![];
    if t1 <= t0 {
        return events;
    }
    let step = Duration::seconds(SEARCH_STEP_SECONDS);

    let mut a = t0;
    let mut fa = f(&a);
    while a < t1 {
        let b = std::cmp::min(a + step, t1);
        let fb = f(&b);
        if fa != fb {
            refine(&f, a, fa, b, fb, &mut events);
        }
        a = b;
        fa = fb;
    }
    events
}

fn refine<S, F>(
    f: &F,
    a: DateTime<Utc>,
    fa: S,
    b: DateTime<Utc>,
    fb: S,
    events: &mut Vec<(DateTime<Utc>, S)>,
) where
    S: Copy + PartialEq,
    F: Fn(&DateTime<Utc>) -> S,
{
    if (b - a).num_seconds() <= SEARCH_EPSILON_SECONDS {
        events.push((b, fb));
        return;
    }
    let mid = a + (b - a) / 2;
    let fm = f(&mid);
    if fa != fm {
        refine(f, a, fa, mid, fm, events);
    }
    if fm != fb {
        refine(f, mid, fm, b, fb, events);
    }
}
