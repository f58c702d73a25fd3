use chrono::NaiveDate;
use itertools::Itertools;
use model::trip::Trip;
use schemars::JsonSchema;
use serde::Serialize;
use utility::serde::date_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyUsage {
    #[serde(serialize_with = "date_time::serialize_date")]
    #[schemars(schema_with = "date_time::date_schema")]
    pub date: NaiveDate,
    pub trip_count: usize,
}

/// Number of trips started per calendar day, oldest day first. Days without
/// trips are left out.
pub fn trips_per_day<'a, I>(trips: I) -> Vec<DailyUsage>
where
    I: IntoIterator<Item = &'a Trip>,
{
    trips
        .into_iter()
        .counts_by(Trip::start_date)
        .into_iter()
        .map(|(date, trip_count)| DailyUsage { date, trip_count })
        .sorted_by_key(|usage| usage.date)
        .collect()
}
