use std::sync::Arc;

use analytics::{
    map::{map_points, MapPoint, MapSelection},
    ranking::rank_by_capacity,
    top_n::{
        parse_count, top_n, top_stations_by_id, RankedStation, StationRole, ValueCount,
        DEFAULT_TOP_STATIONS,
    },
};
use axum::{
    extract::{OriginalUri, Query, State},
    routing::{get, on},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use model::station::Station;
use serde::{Deserialize, Serialize};
use utility::let_also::LetAlso;

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
        crate::api::v1::resource!("/stations{}", format_args!($($arg)*))
    };
}

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(get_ranking))
        .route("/schema", get(schema::<Station>))
        .route("/top", get(get_top))
        .route("/map", get(get_map))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// Registered stations, largest first.
async fn get_ranking(
    State(WebState { dataset, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> Json<hateoas::Response<VecResponse<Station>>> {
    rank_by_capacity(&dataset.stations)
        .into_iter()
        .cloned()
        .collect::<Vec<_>>()
        .let_owned(VecResponse::new)
        .hateoas(base_url)
        .link("self", resource!(""))
        .link("schema", resource!("/schema"))
        .link("top", resource!("/top"))
        .link("map", resource!("/map"))
        .build()
        .json()
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum RankBy {
    #[default]
    Name,
    Id,
}

#[derive(Debug, Deserialize)]
struct TopQuery {
    n: Option<i64>,
    #[serde(default)]
    role: StationRole,
    #[serde(default)]
    by: RankBy,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TopStation {
    /// Only when ranked by id.
    id: Option<String>,
    name: String,
    count: usize,
}

impl From<ValueCount> for TopStation {
    fn from(ValueCount { value, count }: ValueCount) -> Self {
        Self {
            id: None,
            name: value,
            count,
        }
    }
}

impl From<RankedStation> for TopStation {
    fn from(RankedStation { id, name, count }: RankedStation) -> Self {
        Self {
            id: Some(id),
            name,
            count,
        }
    }
}

async fn get_top(
    OriginalUri(original_uri): OriginalUri,
    State(WebState {
        dataset,
        station_names,
    }): State<WebState>,
    WithRejection(Query(params), _): QueryParams<TopQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<TopStation>> {
    let n = parse_count(params.n.unwrap_or(DEFAULT_TOP_STATIONS))
        .map_err(rejected(&original_uri))?;
    let trips = dataset.trips.rows();
    let top = match params.by {
        RankBy::Name => top_n(trips, params.role.name_column(), n)
            .into_iter()
            .map(TopStation::from)
            .collect::<Vec<_>>(),
        RankBy::Id => top_stations_by_id(trips, params.role, n, &station_names)
            .into_iter()
            .map(TopStation::from)
            .collect::<Vec<_>>(),
    };

    Ok(VecResponse::new(top)
        .hateoas(base_url)
        .link("self", self_path(&original_uri))
        .link("stations", resource!(""))
        .build()
        .json())
}

#[derive(Debug, Deserialize)]
struct MapQuery {
    station: Option<String>,
}

async fn get_map(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { dataset, .. }): State<WebState>,
    WithRejection(Query(params), _): QueryParams<MapQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> Json<hateoas::Response<Outcome<VecResponse<MapPoint>>>> {
    let selection = MapSelection::parse(params.station.as_deref());
    let points = map_points(&dataset.stations, selection).map(VecResponse::new);

    Outcome::found_or(points, || match selection {
        MapSelection::Station(name) => format!("There is no station named {}.", name),
        MapSelection::All => "There are no stations.".to_owned(),
    })
    .hateoas(base_url)
    .link("self", self_path(&original_uri))
    .link("stations", resource!(""))
    .build()
    .json()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::api::tests::get;

    #[tokio::test]
    async fn ranking_is_largest_first() {
        let (status, body) = get("/api/v1/stations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalItems"], 3);
        // 67 and 179 both have 27 docks and keep registry order
        let ids = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|station| station["id"].as_str().unwrap().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["67", "179", "A32019"]);
        assert_eq!(body["links"][0]["rel"], "self");
        assert_eq!(
            body["links"][0]["href"],
            "http://localhost/api/v1/stations"
        );
    }

    #[tokio::test]
    async fn top_start_stations_by_name() {
        let (status, body) = get("/api/v1/stations/top?n=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalItems"], 1);
        assert_eq!(body["data"][0]["name"], "MIT at Mass Ave / Amherst St");
        assert_eq!(body["data"][0]["count"], 2);
        assert!(body["data"][0].get("id").is_none());
    }

    #[tokio::test]
    async fn top_end_stations_by_id_resolve_names() {
        let (status, body) = get("/api/v1/stations/top?n=10&role=end&by=id").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalItems"], 3);
        assert_eq!(body["data"][0]["id"], "67");
        assert_eq!(body["data"][0]["count"], 2);
        assert_eq!(body["data"][1]["name"], "MIT Vassar St");
        assert_eq!(body["data"][2]["id"], "999");
        assert_eq!(body["data"][2]["name"], "Unknown Station");
    }

    #[tokio::test]
    async fn non_positive_count_is_rejected() {
        let (status, body) = get("/api/v1/stations/top?n=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["requestedUri"], "/api/v1/stations/top");
        assert_eq!(
            body["message"],
            "the number of results must be at least 1, got 0."
        );
    }

    #[tokio::test]
    async fn empty_count_is_a_json_error() {
        let (status, body) = get("/api/v1/stations/top?n=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());

        let (status, _) = get("/api/v1/stations/top?role=middle").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn map_selects_all_or_one_station() {
        let (_, body) = get("/api/v1/stations/map").await;
        assert_eq!(body["outcome"], "found");
        assert_eq!(body["result"]["totalItems"], 3);

        let (_, body) = get("/api/v1/stations/map?station=All%20Stations").await;
        assert_eq!(body["result"]["totalItems"], 3);

        let (_, body) = get("/api/v1/stations/map?station=MIT%20Vassar%20St").await;
        assert_eq!(body["result"]["totalItems"], 1);
        assert_eq!(body["result"]["data"][0]["id"], "179");
        assert_eq!(body["result"]["data"][0]["lat"], 42.355601);
    }

    #[tokio::test]
    async fn map_of_unknown_station_has_no_data() {
        let (status, body) = get("/api/v1/stations/map?station=Nowhere").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "noData");
        assert_eq!(body["message"], "There is no station named Nowhere.");
    }

    #[tokio::test]
    async fn schema_describes_stations() {
        let (status, body) = get("/api/v1/stations/schema").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Station");
    }
}
