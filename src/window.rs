//! Sunrise and sunset bounding one local calendar day.
use crate::conf::Location;
use crate::ephemeris::{dark_twilight_day, find_discrete, sunrise_sunset};
use crate::error::LapseError;
use crate::timestamp::Timestamp;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::info;

static DATE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8}$").expect("date pattern is valid"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateArg {
    Today,
    On(NaiveDate),
}

impl DateArg {
    /// The calendar day this argument names, in `location`'s timezone.
    pub fn resolve(self: &Self, location: &Location) -> NaiveDate {
        match self {
            Self::Today => Utc::now().with_timezone(&location.timezone).date_naive(),
            Self::On(date) => *date,
        }
    }
}

impl FromStr for DateArg {
    type Err = LapseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "today" {
            return Ok(Self::Today);
        }
        let invalid = || LapseError::InvalidDate(s.to_owned());
        if !DATE_DIGITS.is_match(s) {
            return Err(invalid());
        }
        let date = NaiveDate::parse_from_str(s, "%Y%m%d").map_err(|_| invalid())?;
        Ok(Self::On(date))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SunWindow {
    pub sunrise: Timestamp,
    pub sunset: Timestamp,
}

fn local_midnight(location: &Location, date: NaiveDate) -> Result<DateTime<Utc>> {
    let midnight = location
        .timezone
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .ok_or_else(|| LapseError::MissingMidnight(date.to_string()))?;
    Ok(midnight.with_timezone(&Utc))
}

/// UTC instants of local midnight on `date` and on the day after.
pub fn local_day(location: &Location, date: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let next = date
        .succ_opt()
        .ok_or_else(|| LapseError::InvalidDate(date.to_string()))?;
    Ok((local_midnight(location, date)?, local_midnight(location, next)?))
}

/// One line per twilight phase change in `[t0, t1]`, in local time.
///
/// Moving to a brighter phase reads "<phase> starts", moving to a darker one
/// reads "<previous phase> ends".
pub fn twilight_transitions(location: &Location, t0: DateTime<Utc>, t1: DateTime<Utc>) -> Vec<String> {
    let classify = dark_twilight_day(location);
    let mut previous = classify(&t0);
    let mut lines = vec![];
    for (instant, phase) in find_discrete(t0, t1, &classify) {
        let local = instant.with_timezone(&location.timezone).format("%Y-%m-%d %H:%M");
        if previous < phase {
            lines.push(format!("{local}  {phase} starts"));
        } else {
            lines.push(format!("{local}  {previous} ends"));
        }
        previous = phase;
    }
    lines
}

/// Sunrise and sunset on the given local day, as archive timestamps.
pub fn compute_window(location: &Location, date: &DateArg) -> Result<SunWindow> {
    let day = date.resolve(location);
    let (t0, t1) = local_day(location, day)?;

    for line in twilight_transitions(location, t0, t1) {
        info!("{line}");
    }

    let events = find_discrete(t0, t1, sunrise_sunset(location));
    let rise = events.iter().filter(|(_, up)| *up).collect::<Vec<_>>();
    let set = events.iter().filter(|(_, up)| !*up).collect::<Vec<_>>();
    let (sunrise, sunset) = match (rise.as_slice(), set.as_slice()) {
        ([(sunrise, _)], [(sunset, _)]) => (sunrise, sunset),
        _ => Err(LapseError::NoSunriseSunset {
            events: events.len(),
        })?,
    };

    let window = SunWindow {
        sunrise: Timestamp::from_datetime(sunrise)?,
        sunset: Timestamp::from_datetime(sunset)?,
    };
    info!("sunrise {} / sunset {} (UTC)", window.sunrise, window.sunset);
    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::LapseConfig;
    use chrono::Timelike;

    fn home() -> Location {
        LapseConfig::builtin().unwrap().location
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!("today".parse::<DateArg>().unwrap(), DateArg::Today);
        assert_eq!(
            "20210601".parse::<DateArg>().unwrap(),
            DateArg::On(NaiveDate::from_ymd_opt(2021, 6, 1).unwrap())
        );
        assert!("2021601".parse::<DateArg>().is_err());
        assert!("2021-06-01".parse::<DateArg>().is_err());
        assert!("20211345".parse::<DateArg>().is_err());
        // Non-ASCII digits are not a date.
        assert!("２０２１０６０１".parse::<DateArg>().is_err());
        assert!("2021٠٦٠١".parse::<DateArg>().is_err());
    }

    #[test]
    fn test_twilight_transitions_labels() {
        let location = home();
        let (t0, t1) = local_day(&location, NaiveDate::from_ymd_opt(2021, 6, 1).unwrap()).unwrap();
        let lines = twilight_transitions(&location, t0, t1);
        let labels = lines
            .iter()
            .map(|line| line.split_once("  ").unwrap().1)
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            vec![
                "Astronomical twilight starts",
                "Nautical twilight starts",
                "Civil twilight starts",
                "Day starts",
                "Day ends",
                "Civil twilight ends",
                "Nautical twilight ends",
                "Astronomical twilight ends",
            ]
        );
        // Local wall-clock time, dawn before dusk on the same local day.
        assert!(lines[0].starts_with("2021-06-01 0"));
        assert!(lines[3].starts_with("2021-06-01 06:"));
        assert!(lines[4].starts_with("2021-06-01 20:"));
        assert!(lines[7].starts_with("2021-06-01 2"));
    }

    #[test]
    fn test_twilight_transitions_polar_day() {
        let location = Location {
            latitude: 80.0,
            longitude: 15.0,
            timezone: chrono_tz::Europe::Oslo,
        };
        let (t0, t1) = local_day(&location, NaiveDate::from_ymd_opt(2021, 6, 21).unwrap()).unwrap();
        assert!(twilight_transitions(&location, t0, t1).is_empty());
    }

    #[test]
    fn test_local_day_bounds() {
        let date = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        let (t0, t1) = local_day(&home(), date).unwrap();
        // CDT is UTC-5
        assert_eq!(t0.to_rfc3339(), "2021-06-01T05:00:00+00:00");
        assert_eq!(t1.to_rfc3339(), "2021-06-02T05:00:00+00:00");
    }

    #[test]
    fn test_local_day_skipped_midnight() {
        // Chile springs forward from 00:00 straight to 01:00.
        let location = Location {
            latitude: -33.45,
            longitude: -70.67,
            timezone: chrono_tz::America::Santiago,
        };
        let date = NaiveDate::from_ymd_opt(2021, 9, 5).unwrap();
        let err = local_day(&location, date).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LapseError>(),
            Some(LapseError::MissingMidnight(day)) if day == "2021-09-05"
        ));
    }

    #[test]
    fn test_local_day_across_dst_change() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 14).unwrap();
        let (t0, t1) = local_day(&home(), date).unwrap();
        assert_eq!((t1 - t0).num_hours(), 23);
    }

    #[test]
    fn test_window_normal_day() {
        let location = home();
        let date = DateArg::On(NaiveDate::from_ymd_opt(2021, 6, 1).unwrap());
        let window = compute_window(&location, &date).unwrap();
        assert!(window.sunrise < window.sunset);

        let (t0, t1) = local_day(&location, NaiveDate::from_ymd_opt(2021, 6, 1).unwrap()).unwrap();
        let rise = window.sunrise.to_datetime();
        let set = window.sunset.to_datetime();
        assert!(t0 <= rise && rise < t1);
        assert!(t0 <= set && set < t1);

        let rise_local = rise.with_timezone(&location.timezone);
        let set_local = set.with_timezone(&location.timezone);
        assert_eq!(rise_local.hour(), 6);
        assert_eq!(set_local.hour(), 20);
        // Sunset falls on the next UTC day.
        assert_eq!(window.sunrise.date(), "20210601");
        assert_eq!(window.sunset.date(), "20210602");
    }

    #[test]
    fn test_window_polar_day() {
        let location = Location {
            latitude: 80.0,
            longitude: 15.0,
            timezone: chrono_tz::Europe::Oslo,
        };
        let date = DateArg::On(NaiveDate::from_ymd_opt(2021, 6, 21).unwrap());
        let err = compute_window(&location, &date).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LapseError>(),
            Some(LapseError::NoSunriseSunset { events: 0 })
        ));
    }

    #[test]
    fn test_window_today() {
        let location = home();
        let window = compute_window(&location, &DateArg::Today).unwrap();
        assert!(window.sunrise < window.sunset);
    }
}
