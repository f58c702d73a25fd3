use std::borrow::Cow;

use model::trip::Trip;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    counting::value_counts, station_names::StationNameIndex, QueryError, QueryResult,
};

pub const DEFAULT_TOP_BIKES: i64 = 10;
pub const DEFAULT_TOP_STATIONS: i64 = 3;

/// Trip columns that can be counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TripColumn {
    BikeId,
    StartStationId,
    StartStationName,
    EndStationId,
    EndStationName,
    RiderClass,
}

impl TripColumn {
    pub fn value<'a>(&self, trip: &'a Trip) -> Cow<'a, str> {
        match self {
            Self::BikeId => Cow::Owned(trip.bike_id.to_string()),
            Self::StartStationId => Cow::Borrowed(trip.start_station_id.raw_ref::<str>()),
            Self::StartStationName => Cow::Borrowed(&trip.start_station_name),
            Self::EndStationId => Cow::Borrowed(trip.end_station_id.raw_ref::<str>()),
            Self::EndStationName => Cow::Borrowed(&trip.end_station_name),
            Self::RiderClass => Cow::Borrowed(trip.rider_class.as_str()),
        }
    }
}

/// Whether a station is looked at as the start or the end of trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StationRole {
    #[default]
    Start,
    End,
}

impl StationRole {
    pub fn id_column(self) -> TripColumn {
        match self {
            Self::Start => TripColumn::StartStationId,
            Self::End => TripColumn::EndStationId,
        }
    }

    pub fn name_column(self) -> TripColumn {
        match self {
            Self::Start => TripColumn::StartStationName,
            Self::End => TripColumn::EndStationName,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankedStation {
    pub id: String,
    /// Registry name, or `Unknown Station` if the id is not registered.
    pub name: String,
    pub count: usize,
}

/// Validates a requested number of results.
pub fn parse_count(n: i64) -> QueryResult<usize> {
    if n <= 0 {
        return Err(QueryError::InvalidCount(n));
    }
    usize::try_from(n).map_err(|_| QueryError::InvalidCount(n))
}

/// The `n` most frequent values of `column`, highest count first. Ties keep the
/// order in which the values first occur in the table. Asking for more values
/// than there are returns all of them.
pub fn top_n<'a, I>(trips: I, column: TripColumn, n: usize) -> Vec<ValueCount>
where
    I: IntoIterator<Item = &'a Trip>,
{
    value_counts(trips.into_iter().map(|trip| column.value(trip)))
        .into_iter()
        .take(n)
        .map(|(value, count)| ValueCount {
            value: value.into_owned(),
            count,
        })
        .collect()
}

/// Like `top_n` over station ids, with every id resolved to its registry name.
pub fn top_stations_by_id<'a, I>(
    trips: I,
    role: StationRole,
    n: usize,
    names: &StationNameIndex,
) -> Vec<RankedStation>
where
    I: IntoIterator<Item = &'a Trip>,
{
    top_n(trips, role.id_column(), n)
        .into_iter()
        .map(|ValueCount { value, count }| RankedStation {
            name: names.resolve(&value).to_owned(),
            id: value,
            count,
        })
        .collect()
}
