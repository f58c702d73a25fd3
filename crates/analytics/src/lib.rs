//! Queries behind the dashboard views. Every function is pure: it borrows the
//! loaded tables, never mutates them, and returns freshly built result values.
//!
//! Two outcomes are kept apart everywhere:
//! - invalid input is an `Err(QueryError)`,
//! - a query that matches nothing is `Ok(None)` (or `None`), never an error.

use std::{error::Error, fmt, result};

use model::trip::RiderClass;

pub mod filter;
pub mod last_seen;
pub mod longest_trip;
pub mod map;
pub mod ranking;
pub mod rider_class;
pub mod station_names;
pub mod top_n;
pub mod usage;

mod counting;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Date input that is not `YYYY-MM-DD`.
    InvalidDate(String),
    /// Bike id input that is not an integer.
    InvalidBikeId(String),
    /// Requested number of results that is not positive.
    InvalidCount(i64),
    /// Required free-text input left empty.
    MissingInput(&'static str),
    /// Rider class that does not occur in the trip log.
    UnknownRiderClass(RiderClass),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDate(input) => write!(
                f,
                "`{}` is not a valid date, please enter a date in the format YYYY-MM-DD.",
                input
            ),
            Self::InvalidBikeId(input) => write!(
                f,
                "`{}` is not a valid bike ID, please enter an integer.",
                input
            ),
            Self::InvalidCount(count) => write!(
                f,
                "the number of results must be at least 1, got {}.",
                count
            ),
            Self::MissingInput(field) => write!(f, "Please enter a {}.", field),
            Self::UnknownRiderClass(class) => {
                write!(f, "there are no trips by rider class `{}`.", class)
            }
        }
    }
}

impl Error for QueryError {}

pub type QueryResult<T> = result::Result<T, QueryError>;

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDateTime;
    use dataset::database::StationTable;
    use model::{
        station::Station,
        trip::{RiderClass, Trip},
    };
    use utility::{id::Id, serde::date_time};

    pub fn timestamp(value: &str) -> NaiveDateTime {
        date_time::parse_timestamp(value).unwrap()
    }

    /// A trip between two stations whose ids are their names lower-cased.
    pub fn trip(start_time: &str, from: &str, to: &str, duration_secs: u64, bike_id: i64) -> Trip {
        let start_time = timestamp(start_time);
        Trip {
            start_time,
            stop_time: start_time + chrono::Duration::seconds(duration_secs as i64),
            start_station_id: Id::new(from.to_lowercase()),
            start_station_name: from.to_owned(),
            end_station_id: Id::new(to.to_lowercase()),
            end_station_name: to.to_owned(),
            duration_secs,
            bike_id,
            rider_class: RiderClass::Subscriber,
        }
    }

    pub fn customer(trip: Trip) -> Trip {
        Trip {
            rider_class: RiderClass::Customer,
            ..trip
        }
    }

    pub fn station(id: &str, name: &str, total_docks: u32) -> Station {
        Station {
            id: Id::new(id.to_owned()),
            name: name.to_owned(),
            latitude: 42.36,
            longitude: -71.09,
            total_docks,
            district: None,
            public: None,
        }
    }

    pub fn stations(stations: Vec<Station>) -> StationTable {
        StationTable::from_rows(stations)
    }
}
