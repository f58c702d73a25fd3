pub use crate::common::RouteResult;

use std::{env, sync::Arc};

use analytics::station_names::StationNameIndex;
use axum::{extract::FromRef, routing::on, Router};
use dataset::Dataset;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::common::{route_not_found, METHOD_FILTER_ALL};

pub mod api;
pub mod common;
pub mod hateoas;
pub mod middleware;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Clone, FromRef)]
pub struct WebState {
    pub dataset: Arc<Dataset>,
    pub station_names: Arc<StationNameIndex>,
}

impl WebState {
    pub fn new(dataset: Dataset) -> Self {
        let station_names = StationNameIndex::new(&dataset.stations);
        log::debug!("indexed {} station names", station_names.len());
        Self {
            dataset: Arc::new(dataset),
            station_names: Arc::new(station_names),
        }
    }
}

/// `BIKESHARE_BIND_ADDRESS`, or `0.0.0.0:8080` if unset.
pub fn bind_address_from_env() -> String {
    env::var("BIKESHARE_BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned())
}

pub fn routes(state: WebState) -> Router {
    Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

pub async fn start_web_server(state: WebState, bind_address: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_address).await?;
    log::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, routes(state).into_make_service()).await?;

    Ok(())
}
