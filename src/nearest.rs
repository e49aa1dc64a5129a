use crate::availability::AvailabilityMap;
use crate::error::LapseError;
use crate::timestamp::Timestamp;
use tracing::{debug, info};

/// Picks the capture in `desired`'s hour whose minute is closest to its minute.
///
/// Only the minute is compared; on a tie the earlier entry in the listing wins.
/// Neighbouring hours are never consulted.
pub fn nearest(available: &AvailabilityMap, desired: Timestamp) -> Result<Timestamp, LapseError> {
    let hour = desired.hour_key();
    let candidates = available
        .captures(&hour)
        .filter(|c| !c.is_empty())
        .ok_or(LapseError::NoCaptures { hour })?;

    let wanted = desired.minute() as i64;
    let distance = |ts: &Timestamp| (wanted - ts.minute() as i64).abs();

    let mut best = candidates[0];
    for candidate in candidates.iter() {
        debug!(
            "desired minute: {wanted}, available minute: {}, current minute: {}",
            candidate.minute(),
            best.minute()
        );
        if distance(candidate) < distance(&best) {
            best = *candidate;
        }
    }

    info!("{best} is the closest capture to {desired}");
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn ts(value: u64) -> Timestamp {
        Timestamp::try_from(value).unwrap()
    }

    fn listing(hour: &str, values: &[u64]) -> AvailabilityMap {
        let mut hours = BTreeMap::new();
        hours.insert(hour.to_string(), values.iter().map(|v| ts(*v)).collect());
        AvailabilityMap::new(hours).unwrap()
    }

    #[test]
    fn test_nearest_by_minute() {
        let map = listing("12", &[20210601120000, 20210601121500, 20210601123000]);
        let chosen = nearest(&map, ts(20210601121100)).unwrap();
        assert_eq!(chosen, ts(20210601121500));
    }

    #[test]
    fn test_exact_minute() {
        let map = listing("12", &[20210601120000, 20210601121500, 20210601123000]);
        let chosen = nearest(&map, ts(20210601123000)).unwrap();
        assert_eq!(chosen, ts(20210601123000));
    }

    #[test]
    fn test_tie_keeps_first() {
        let map = listing("12", &[20210601122000, 20210601121000]);
        assert_eq!(nearest(&map, ts(20210601121500)).unwrap(), ts(20210601122000));

        let map = listing("12", &[20210601121000, 20210601122000]);
        assert_eq!(nearest(&map, ts(20210601121500)).unwrap(), ts(20210601121000));
    }

    #[test]
    fn test_seconds_ignored() {
        let map = listing("12", &[20210601121059, 20210601121001]);
        let chosen = nearest(&map, ts(20210601121030)).unwrap();
        assert_eq!(chosen, ts(20210601121059));
    }

    #[test]
    fn test_keeps_full_value_from_listing() {
        // Listing for a different day still answers by hour and minute only.
        let map = listing("12", &[20210602124517]);
        assert_eq!(nearest(&map, ts(20210601124000)).unwrap(), ts(20210602124517));
    }

    #[test]
    fn test_missing_hour() {
        let map = listing("12", &[20210601120000]);
        let err = nearest(&map, ts(20210601131100)).unwrap_err();
        assert!(matches!(err, LapseError::NoCaptures { ref hour } if hour == "13"));
    }

    #[test]
    fn test_empty_hour() {
        let map = listing("13", &[]);
        assert!(matches!(
            nearest(&map, ts(20210601131100)),
            Err(LapseError::NoCaptures { .. })
        ));
    }
}
