use chrono::NaiveDateTime;
use model::{
    station::StationId,
    trip::{BikeId, Trip},
};
use schemars::JsonSchema;
use serde::Serialize;
use utility::serde::date_time;

use crate::{
    counting::first_max_by_key,
    filter::{select, Criterion},
};

/// Which of the two trip timestamps ranks the trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampColumn {
    Start,
    Stop,
}

impl TimestampColumn {
    pub fn of(self, trip: &Trip) -> NaiveDateTime {
        match self {
            Self::Start => trip.start_time,
            Self::Stop => trip.stop_time,
        }
    }
}

/// The three "when did we last see this bike" questions.
///
/// | variant      | ranked by  | station filter        |
/// |--------------|------------|-----------------------|
/// | `Usage`      | stop time  | none                  |
/// | `StartedAt`  | start time | start station == name |
/// | `ArrivedAt`  | stop time  | end station == name   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastSeen<'a> {
    Usage,
    StartedAt(&'a str),
    ArrivedAt(&'a str),
}

impl<'a> LastSeen<'a> {
    pub fn ranked_by(&self) -> TimestampColumn {
        match self {
            Self::Usage | Self::ArrivedAt(_) => TimestampColumn::Stop,
            Self::StartedAt(_) => TimestampColumn::Start,
        }
    }

    fn station_criterion(&self) -> Option<Criterion<'a>> {
        match *self {
            Self::Usage => None,
            Self::StartedAt(name) => Some(Criterion::StartStationName(name)),
            Self::ArrivedAt(name) => Some(Criterion::EndStationName(name)),
        }
    }
}

/// The most recent trip of a bike, with its ranking timestamp split into a date
/// and a time of day for display.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sighting {
    pub bike_id: BikeId,
    #[serde(serialize_with = "date_time::serialize_timestamp")]
    #[schemars(schema_with = "date_time::timestamp_schema")]
    pub timestamp: NaiveDateTime,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM:SS`
    pub time: String,
    pub start_station_id: StationId,
    pub start_station_name: String,
    pub end_station_id: StationId,
    pub end_station_name: String,
}

impl Sighting {
    fn new(trip: &Trip, timestamp: NaiveDateTime) -> Self {
        Self {
            bike_id: trip.bike_id,
            timestamp,
            date: timestamp.format(date_time::DATE_FORMAT).to_string(),
            time: timestamp.format(date_time::TIME_FORMAT).to_string(),
            start_station_id: trip.start_station_id.clone(),
            start_station_name: trip.start_station_name.clone(),
            end_station_id: trip.end_station_id.clone(),
            end_station_name: trip.end_station_name.clone(),
        }
    }
}

/// Finds the latest trip of `bike_id` for the given variant. Among trips with
/// the same timestamp the first one in table order wins. `None` if the bike has
/// no matching trip.
pub fn last_seen<'a, I>(trips: I, bike_id: BikeId, variant: LastSeen) -> Option<Sighting>
where
    I: IntoIterator<Item = &'a Trip>,
{
    let mut criteria = vec![Criterion::BikeId(bike_id)];
    criteria.extend(variant.station_criterion());
    let candidates = select(trips, &criteria);
    log::debug!(
        "{} candidate trips for bike {} ({:?})",
        candidates.len(),
        bike_id,
        variant
    );

    let column = variant.ranked_by();
    first_max_by_key(candidates, |trip| column.of(trip))
        .map(|trip| Sighting::new(trip, column.of(trip)))
}
