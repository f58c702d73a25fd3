use chrono::NaiveDateTime;
use model::trip::{BikeId, Trip, TripDuration};
use schemars::JsonSchema;
use serde::Serialize;
use utility::serde::date_time;

use crate::{
    counting::first_max_by_key,
    filter::{select, Criterion},
};

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LongestTrip {
    pub start_station_name: String,
    pub end_station_name: String,
    pub duration: TripDuration,
    pub duration_secs: u64,
    pub bike_id: BikeId,
    #[serde(serialize_with = "date_time::serialize_timestamp")]
    #[schemars(schema_with = "date_time::timestamp_schema")]
    pub start_time: NaiveDateTime,
}

impl From<&Trip> for LongestTrip {
    fn from(trip: &Trip) -> Self {
        Self {
            start_station_name: trip.start_station_name.clone(),
            end_station_name: trip.end_station_name.clone(),
            duration: trip.duration(),
            duration_secs: trip.duration_secs,
            bike_id: trip.bike_id,
            start_time: trip.start_time,
        }
    }
}

/// The trip with the longest recorded duration. Among equally long trips the
/// first one in table order wins.
pub fn longest_trip<'a, I>(trips: I) -> Option<LongestTrip>
where
    I: IntoIterator<Item = &'a Trip>,
{
    first_max_by_key(trips, |trip| trip.duration_secs).map(LongestTrip::from)
}

/// The longest trip that started at the station with exactly this name.
pub fn longest_trip_from<'a, I>(trips: I, station_name: &str) -> Option<LongestTrip>
where
    I: IntoIterator<Item = &'a Trip>,
{
    let from_station = select(trips, &[Criterion::StartStationName(station_name)]);
    log::debug!("{} trips started at {}", from_station.len(), station_name);
    longest_trip(from_station)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::trip;

    #[test]
    fn single_trip_is_decomposed() {
        let trips = vec![trip("2017-07-04 08:00:00", "Kendall T", "Central Sq", 3725, 1)];
        let longest = longest_trip_from(&trips, "Kendall T").unwrap();
        assert_eq!(
            longest.duration,
            TripDuration {
                hours: 1,
                minutes: 2,
                seconds: 5
            }
        );
        assert_eq!(longest.end_station_name, "Central Sq");
    }

    #[test]
    fn picks_the_maximum_of_the_station_only() {
        let trips = vec![
            trip("2017-07-04 08:00:00", "Kendall T", "Central Sq", 600, 1),
            trip("2017-07-04 09:00:00", "Harvard Sq", "Central Sq", 9000, 2),
            trip("2017-07-04 10:00:00", "Kendall T", "Harvard Sq", 1800, 3),
            trip("2017-07-04 11:00:00", "Kendall T", "Davis Sq", 1800, 4),
        ];
        let longest = longest_trip_from(&trips, "Kendall T").unwrap();
        assert_eq!(longest.duration_secs, 1800);
        // equal durations resolve to the first trip in table order
        assert_eq!(longest.bike_id, 3);
        assert_eq!(longest.end_station_name, "Harvard Sq");
    }

    #[test]
    fn unknown_station_has_no_data() {
        let trips = vec![trip("2017-07-04 08:00:00", "Kendall T", "Central Sq", 600, 1)];
        assert_eq!(longest_trip_from(&trips, "Nowhere"), None);
        assert_eq!(longest_trip(Vec::<&Trip>::new()), None);
    }
}
