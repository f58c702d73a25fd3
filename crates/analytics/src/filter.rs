use chrono::NaiveDate;
use model::trip::{BikeId, Trip};
use schemars::JsonSchema;
use serde::Serialize;
use utility::serde::date_time;

use crate::{counting::value_counts, QueryError, QueryResult};

/// Parses a calendar date in the `YYYY-MM-DD` format.
pub fn parse_date(input: &str) -> QueryResult<NaiveDate> {
    if input.trim().is_empty() {
        return Err(QueryError::MissingInput("date"));
    }
    date_time::parse_date(input).ok_or_else(|| QueryError::InvalidDate(input.to_owned()))
}

/// Parses a bike id. Surrounding whitespace is ignored, anything else that is not
/// an integer is rejected before any lookup happens.
pub fn parse_bike_id(input: &str) -> QueryResult<BikeId> {
    let input = input.trim();
    if input.is_empty() {
        return Err(QueryError::MissingInput("bike ID"));
    }
    input
        .parse::<BikeId>()
        .map_err(|_| QueryError::InvalidBikeId(input.to_owned()))
}

/// Rejects an empty station name. The name itself is returned untouched since
/// station names are matched exactly.
pub fn require_station_name(input: &str) -> QueryResult<&str> {
    if input.trim().is_empty() {
        Err(QueryError::MissingInput("station name"))
    } else {
        Ok(input)
    }
}

/// Equality condition on one trip column. Names match case-sensitively and
/// without trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion<'a> {
    StartStationName(&'a str),
    EndStationName(&'a str),
    BikeId(BikeId),
}

impl Criterion<'_> {
    pub fn matches(&self, trip: &Trip) -> bool {
        match self {
            Self::StartStationName(name) => trip.start_station_name == *name,
            Self::EndStationName(name) => trip.end_station_name == *name,
            Self::BikeId(bike_id) => trip.bike_id == *bike_id,
        }
    }
}

/// Trips matching every criterion, in table order.
pub fn select<'a, I>(trips: I, criteria: &[Criterion]) -> Vec<&'a Trip>
where
    I: IntoIterator<Item = &'a Trip>,
{
    trips
        .into_iter()
        .filter(|trip| criteria.iter().all(|criterion| criterion.matches(trip)))
        .collect()
}

/// Trips that started on the given calendar day, in table order.
pub fn trips_on_date<'a, I>(trips: I, date: NaiveDate) -> Vec<&'a Trip>
where
    I: IntoIterator<Item = &'a Trip>,
{
    trips
        .into_iter()
        .filter(|trip| trip.start_date() == date)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopularStation {
    #[serde(serialize_with = "date_time::serialize_date")]
    #[schemars(schema_with = "date_time::date_schema")]
    pub date: NaiveDate,
    pub station_name: String,
    /// Trips that started at `station_name` on `date`.
    pub trip_count: usize,
    /// All trips that started on `date`.
    pub trips_on_date: usize,
}

/// Most frequent start station among the trips started on `date`. Ties go to the
/// station seen first in the trip table. `None` if no trip started that day.
pub fn most_popular_start_station<'a, I>(trips: I, date: NaiveDate) -> Option<PopularStation>
where
    I: IntoIterator<Item = &'a Trip>,
{
    let on_date = trips_on_date(trips, date);
    log::debug!("{} trips started on {}", on_date.len(), date);
    let (station_name, trip_count) = value_counts(
        on_date
            .iter()
            .map(|trip| trip.start_station_name.as_str()),
    )
    .into_iter()
    .next()?;
    Some(PopularStation {
        date,
        station_name: station_name.to_owned(),
        trip_count,
        trips_on_date: on_date.len(),
    })
}
