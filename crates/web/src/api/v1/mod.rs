use axum::{routing::on, Router};
use serde::Deserialize;

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    WebState,
};

mod bikes;
mod stations;
mod trips;

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::resource!("/v1{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .nest_service("/stations", stations::routes(state.clone()))
        .nest_service("/trips", trips::routes(state.clone()))
        .nest_service("/bikes", bikes::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// `?station=<name>`; a missing name is rejected by the handler.
#[derive(Debug, Deserialize)]
pub(crate) struct StationQuery {
    #[serde(default)]
    station: String,
}
