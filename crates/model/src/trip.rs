use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use schemars::{gen::SchemaGenerator, schema::Schema, JsonSchema};
use serde::{Deserialize, Serialize};
use utility::{id::Id, serde::date_time};

use crate::{station::StationId, ExampleData};

pub type BikeId = i64;

/// One rental: a bike taken from one station and returned to another.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(serialize_with = "date_time::serialize_timestamp")]
    #[schemars(schema_with = "date_time::timestamp_schema")]
    pub start_time: NaiveDateTime,

    #[serde(serialize_with = "date_time::serialize_timestamp")]
    #[schemars(schema_with = "date_time::timestamp_schema")]
    pub stop_time: NaiveDateTime,

    pub start_station_id: StationId,
    pub start_station_name: String,
    pub end_station_id: StationId,
    pub end_station_name: String,

    /// Elapsed seconds as recorded in the trip log. Not cross-checked against
    /// `stop_time - start_time`.
    pub duration_secs: u64,

    pub bike_id: BikeId,
    pub rider_class: RiderClass,
}

impl Trip {
    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date()
    }

    pub fn duration(&self) -> TripDuration {
        TripDuration::from_secs(self.duration_secs)
    }
}

impl ExampleData for Trip {
    fn example_data() -> Self {
        Self {
            start_time: NaiveDate::from_ymd_opt(2017, 7, 4)
                .and_then(|date| date.and_hms_opt(8, 15, 0))
                .unwrap_or_default(),
            stop_time: NaiveDate::from_ymd_opt(2017, 7, 4)
                .and_then(|date| date.and_hms_opt(9, 17, 5))
                .unwrap_or_default(),
            start_station_id: Id::new("67".to_owned()),
            start_station_name: "MIT at Mass Ave / Amherst St".to_owned(),
            end_station_id: Id::new("179".to_owned()),
            end_station_name: "MIT Vassar St".to_owned(),
            duration_secs: 3725,
            bike_id: 1492,
            rider_class: RiderClass::Subscriber,
        }
    }
}

/// Rider class of a trip. The trip log only knows `Subscriber` and `Customer`
/// today, every other label is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiderClass {
    Subscriber,
    Customer,
    Other(String),
}

impl RiderClass {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Subscriber => "Subscriber",
            Self::Customer => "Customer",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for RiderClass {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Subscriber" => Self::Subscriber,
            "Customer" => Self::Customer,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for RiderClass {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<RiderClass> for String {
    fn from(value: RiderClass) -> Self {
        match value {
            RiderClass::Other(label) => label,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for RiderClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JsonSchema for RiderClass {
    fn schema_name() -> String {
        "RiderClass".to_owned()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}

/// Elapsed trip time split into whole hours, minutes and seconds. This is a
/// plain numeric split, not a wall clock time: 90000 seconds are 25 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TripDuration {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TripDuration {
    pub fn from_secs(total_seconds: u64) -> Self {
        Self {
            hours: total_seconds / 3600,
            minutes: (total_seconds % 3600) / 60,
            seconds: total_seconds % 60,
        }
    }
}

impl fmt::Display for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
