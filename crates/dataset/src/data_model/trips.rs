use chrono::NaiveDateTime;
use model::trip::{BikeId, RiderClass, Trip};
use serde::Deserialize;
use utility::{id::Id, serde::date_time};

use super::IdString;

/// One row of the trip log. The log has no primary key; duplicate rows are kept.
/// Columns not listed here (coordinates, birth year, gender) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TripRecord {
    /// Trip duration in seconds.
    #[serde(rename = "tripduration")]
    pub trip_duration: u64,

    #[serde(rename = "starttime", deserialize_with = "date_time::deserialize_timestamp")]
    pub start_time: NaiveDateTime,

    #[serde(rename = "stoptime", deserialize_with = "date_time::deserialize_timestamp")]
    pub stop_time: NaiveDateTime,

    /// Foreign ID referencing `Number` of the station registry. Not guaranteed
    /// to resolve.
    #[serde(rename = "start station id")]
    pub start_station_id: IdString,

    #[serde(rename = "start station name")]
    pub start_station_name: String,

    /// Foreign ID referencing `Number` of the station registry. Not guaranteed
    /// to resolve.
    #[serde(rename = "end station id")]
    pub end_station_id: IdString,

    #[serde(rename = "end station name")]
    pub end_station_name: String,

    #[serde(rename = "bikeid")]
    pub bike_id: BikeId,

    /// `Subscriber` or `Customer`.
    #[serde(rename = "usertype")]
    pub user_type: String,
}

impl From<TripRecord> for Trip {
    fn from(record: TripRecord) -> Self {
        Trip {
            start_time: record.start_time,
            stop_time: record.stop_time,
            start_station_id: Id::new(record.start_station_id),
            start_station_name: record.start_station_name,
            end_station_id: Id::new(record.end_station_id),
            end_station_name: record.end_station_name,
            duration_secs: record.trip_duration,
            bike_id: record.bike_id,
            rider_class: RiderClass::from(record.user_type),
        }
    }
}
