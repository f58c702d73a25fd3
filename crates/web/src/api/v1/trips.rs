use std::sync::Arc;

use analytics::{
    filter::{most_popular_start_station, parse_date, require_station_name, PopularStation},
    longest_trip::{longest_trip_from, LongestTrip},
    rider_class::{rider_class_counts, ClassCount},
    usage::{trips_per_day, DailyUsage},
};
use axum::{
    extract::{OriginalUri, Query, State},
    routing::{get, on},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use model::trip::{RiderClass, Trip};
use serde::Deserialize;

use super::StationQuery;
use crate::{
    common::{
        rejected, route_not_found, schema, self_path, HateoasResult, Outcome, QueryParams,
        VecResponse, METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/trips{}", format_args!($($arg)*))
    };
}

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<Trip>))
        .route("/popular-start-station", get(get_popular_start_station))
        .route("/longest", get(get_longest))
        .route("/per-day", get(get_per_day))
        .route("/rider-classes", get(get_rider_classes))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Deserialize)]
struct DateQuery {
    #[serde(default)]
    date: String,
}

async fn get_popular_start_station(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { dataset, .. }): State<WebState>,
    WithRejection(Query(params), _): QueryParams<DateQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<Outcome<PopularStation>> {
    let date = parse_date(&params.date).map_err(rejected(&original_uri))?;
    let popular = most_popular_start_station(dataset.trips.rows(), date);

    Ok(Outcome::found_or(popular, || format!("No trips found on {}.", date))
        .hateoas(base_url)
        .link("self", self_path(&original_uri))
        .link("per-day", resource!("/per-day"))
        .build()
        .json())
}

async fn get_longest(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { dataset, .. }): State<WebState>,
    WithRejection(Query(params), _): QueryParams<StationQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<Outcome<LongestTrip>> {
    let station = require_station_name(&params.station).map_err(rejected(&original_uri))?;
    let longest = longest_trip_from(dataset.trips.rows(), station);

    Ok(
        Outcome::found_or(longest, || format!("No trips found starting at {}.", station))
            .hateoas(base_url)
            .link("self", self_path(&original_uri))
            .build()
            .json(),
    )
}

/// Trips per day, for the usage-over-time chart.
async fn get_per_day(
    State(WebState { dataset, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> Json<hateoas::Response<VecResponse<DailyUsage>>> {
    VecResponse::new(trips_per_day(dataset.trips.rows()))
        .hateoas(base_url)
        .link("self", resource!("/per-day"))
        .build()
        .json()
}

fn shown() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct RiderClassQuery {
    #[serde(default = "shown")]
    subscribers: bool,
    #[serde(default = "shown")]
    customers: bool,
}

async fn get_rider_classes(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { dataset, .. }): State<WebState>,
    WithRejection(Query(params), _): QueryParams<RiderClassQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<ClassCount>> {
    let classes = [
        (params.subscribers, RiderClass::Subscriber),
        (params.customers, RiderClass::Customer),
    ]
    .into_iter()
    .filter_map(|(shown, class)| shown.then_some(class))
    .collect::<Vec<_>>();
    let counts = rider_class_counts(dataset.trips.rows())
        .visible(&classes)
        .map_err(rejected(&original_uri))?;

    Ok(VecResponse::new(counts)
        .hateoas(base_url)
        .debug_info("totalTrips", dataset.trips.len())
        .link("self", self_path(&original_uri))
        .build()
        .json())
}
