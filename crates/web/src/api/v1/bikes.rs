use std::sync::Arc;

use analytics::{
    filter::{parse_bike_id, require_station_name},
    last_seen::{last_seen, LastSeen, Sighting},
    map::{last_location, BikeLocation},
    top_n::{parse_count, top_n, TripColumn, ValueCount, DEFAULT_TOP_BIKES},
};
use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::Uri,
    routing::{get, on},
    Extension, Router,
};
use axum_extra::extract::WithRejection;
use model::trip::BikeId;
use serde::Deserialize;
use utility::let_also::LetAlso;

use super::StationQuery;
use crate::{
    common::{
        rejected, route_not_found, self_path, HateoasResult, Outcome, QueryParams, VecResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/bikes{}", format_args!($($arg)*))
    };
}

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/top", get(get_top))
        .route("/:id/last-usage", get(get_last_usage))
        .route("/:id/last-start", get(get_last_start))
        .route("/:id/last-arrival", get(get_last_arrival))
        .route("/:id/last-location", get(get_last_location))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Deserialize)]
struct TopQuery {
    n: Option<i64>,
}

async fn get_top(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { dataset, .. }): State<WebState>,
    WithRejection(Query(params), _): QueryParams<TopQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<ValueCount>>> {
    let n = parse_count(params.n.unwrap_or(DEFAULT_TOP_BIKES))
        .map_err(rejected(&original_uri))?;

    Ok(top_n(dataset.trips.rows(), TripColumn::BikeId, n)
        .into_iter()
        .map(|bike| bike_count_hateoas(bike, base_url.clone()))
        .collect::<Vec<_>>()
        .let_owned(VecResponse::new)
        .hateoas(base_url)
        .link("self", self_path(&original_uri))
        .build()
        .json())
}

async fn get_last_usage(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { dataset, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<Outcome<Sighting>> {
    let bike_id = parse_bike_id(&id).map_err(rejected(&original_uri))?;
    let sighting = last_seen(dataset.trips.rows(), bike_id, LastSeen::Usage);

    Ok(bike_hateoas(
        Outcome::found_or(sighting, || format!("No trips found for bike {}.", bike_id)),
        bike_id,
        &original_uri,
        base_url,
    )
    .json())
}

async fn get_last_start(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { dataset, .. }): State<WebState>,
    WithRejection(Query(params), _): QueryParams<StationQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<Outcome<Sighting>> {
    let bike_id = parse_bike_id(&id).map_err(rejected(&original_uri))?;
    let station = require_station_name(&params.station).map_err(rejected(&original_uri))?;
    let sighting = last_seen(dataset.trips.rows(), bike_id, LastSeen::StartedAt(station));

    Ok(bike_hateoas(
        Outcome::found_or(sighting, || {
            format!("Bike {} never started a trip at {}.", bike_id, station)
        }),
        bike_id,
        &original_uri,
        base_url,
    )
    .json())
}

async fn get_last_arrival(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { dataset, .. }): State<WebState>,
    WithRejection(Query(params), _): QueryParams<StationQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<Outcome<Sighting>> {
    let bike_id = parse_bike_id(&id).map_err(rejected(&original_uri))?;
    let station = require_station_name(&params.station).map_err(rejected(&original_uri))?;
    let sighting = last_seen(dataset.trips.rows(), bike_id, LastSeen::ArrivedAt(station));

    Ok(bike_hateoas(
        Outcome::found_or(sighting, || {
            format!("Bike {} never ended a trip at {}.", bike_id, station)
        }),
        bike_id,
        &original_uri,
        base_url,
    )
    .json())
}

async fn get_last_location(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { dataset, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<Outcome<BikeLocation>> {
    let bike_id = parse_bike_id(&id).map_err(rejected(&original_uri))?;
    let location = last_location(dataset.trips.rows(), bike_id, &dataset.stations);

    Ok(bike_hateoas(
        Outcome::found_or(location, || format!("No trips found for bike {}.", bike_id)),
        bike_id,
        &original_uri,
        base_url,
    )
    .json())
}

fn bike_count_hateoas(
    bike: ValueCount,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<ValueCount> {
    let bike_id = bike.value.clone();
    hateoas::Response::builder(bike, base_url)
        .link("last-usage", resource!("/{}/last-usage", bike_id))
        .link("last-location", resource!("/{}/last-location", bike_id))
        .build()
}

fn bike_hateoas<T>(
    outcome: Outcome<T>,
    bike_id: BikeId,
    original_uri: &Uri,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<Outcome<T>> {
    outcome
        .hateoas(base_url)
        .link("self", self_path(original_uri))
        .link("last-usage", resource!("/{}/last-usage", bike_id))
        .link("last-location", resource!("/{}/last-location", bike_id))
        .build()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::api::tests::get;

    #[tokio::test]
    async fn top_bikes_link_to_their_history() {
        let (status, body) = get("/api/v1/bikes/top").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalItems"], 2);
        assert_eq!(body["data"][0]["value"], "1492");
        assert_eq!(body["data"][0]["count"], 3);
        assert_eq!(
            body["data"][0]["links"][0]["href"],
            "http://localhost/api/v1/bikes/1492/last-usage"
        );
    }

    #[tokio::test]
    async fn non_integer_bike_id_is_rejected() {
        let (status, body) = get("/api/v1/bikes/abc/last-usage").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "`abc` is not a valid bike ID, please enter an integer."
        );
        assert_eq!(body["requestedUri"], "/api/v1/bikes/abc/last-usage");
    }

    #[tokio::test]
    async fn non_integer_count_is_a_json_error() {
        let (status, body) = get("/api/v1/bikes/top?n=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid query parameters."));
    }

    #[tokio::test]
    async fn last_usage_is_the_latest_stop() {
        let (status, body) = get("/api/v1/bikes/1492/last-usage").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "found");
        assert_eq!(body["result"]["date"], "2017-07-05");
        assert_eq!(body["result"]["time"], "07:02:00");
        assert_eq!(body["result"]["endStationName"], "MIT at Mass Ave / Amherst St");
    }

    #[tokio::test]
    async fn unknown_bike_has_no_data() {
        let (status, body) = get("/api/v1/bikes/5/last-usage").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "noData");
        assert_eq!(body["message"], "No trips found for bike 5.");
    }

    #[tokio::test]
    async fn last_start_and_arrival_at_station() {
        let (_, body) = get("/api/v1/bikes/1492/last-start?station=MIT%20Vassar%20St").await;
        assert_eq!(body["result"]["time"], "10:00:00");

        let (_, body) = get("/api/v1/bikes/1492/last-arrival?station=MIT%20Vassar%20St").await;
        assert_eq!(body["result"]["time"], "09:17:05");

        let (status, _) = get("/api/v1/bikes/1492/last-start").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = get("/api/v1/bikes/7/last-arrival?station=MIT%20Vassar%20St").await;
        assert_eq!(body["outcome"], "noData");
    }

    #[tokio::test]
    async fn last_location_resolves_the_registry() {
        let (_, body) = get("/api/v1/bikes/1492/last-location").await;
        assert_eq!(body["result"]["stationName"], "MIT at Mass Ave / Amherst St");
        assert_eq!(body["result"]["location"]["lat"], 42.3581);

        let (_, body) = get("/api/v1/bikes/7/last-location").await;
        assert_eq!(body["result"]["stationId"], "999");
        assert_eq!(body["result"]["stationName"], "Gone Station");
        assert!(body["result"].get("location").is_none());
    }
}
