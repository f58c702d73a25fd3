use std::sync::Arc;

use analytics::QueryError;
use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Query, Request},
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    routing::MethodFilter,
    Json,
};
use axum_extra::extract::WithRejection;
use model::ExampleData;
use schemars::{schema_for, schema_for_value, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::{hateoas, middleware::base_url::BaseUrl};

pub type RouteResult<O> = Result<O, RouteErrorResponse>;
pub type HateoasResult<O> = RouteResult<Json<hateoas::Response<O>>>;

/// Query string extractor that answers malformed parameters with a JSON
/// `RouteErrorResponse` instead of axum's plain text rejection.
pub(crate) type QueryParams<T> = WithRejection<Query<T>, RouteErrorResponse>;

/// A `MethodFilter` that matches all http methods.
pub(crate) const METHOD_FILTER_ALL: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VecResponse<T> {
    pub total_items: usize,
    pub data: Vec<T>,
}

impl<T> VecResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            total_items: data.len(),
            data,
        }
    }

    pub fn hateoas(self, base_url: Arc<BaseUrl>) -> hateoas::ResponseBuilder<Self> {
        hateoas::Response::builder(self, base_url)
    }
}

/// Result of a query that may legitimately match nothing. A query without a
/// match is not an error, so it is answered with `200 OK` and a `noData`
/// outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Outcome<T> {
    Found { result: T },
    NoData { message: String },
}

impl<T> Outcome<T> {
    pub fn found_or<F>(value: Option<T>, no_data_message: F) -> Self
    where
        F: FnOnce() -> String,
    {
        match value {
            Some(result) => Self::Found { result },
            None => Self::NoData {
                message: no_data_message(),
            },
        }
    }

    pub fn hateoas(self, base_url: Arc<BaseUrl>) -> hateoas::ResponseBuilder<Self> {
        hateoas::Response::builder(self, base_url)
    }
}

// - Services returning commonly used responses -

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SchemaParams {
    #[serde(default)]
    example_data: bool,
}

pub(crate) async fn schema<T: ExampleData + JsonSchema + Serialize>(
    WithRejection(Query(params), _): QueryParams<SchemaParams>,
) -> impl IntoResponse {
    if params.example_data {
        Json(schema_for_value!(T::example_data()))
    } else {
        Json(schema_for!(T))
    }
}

pub(crate) async fn route_not_found(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    RouteErrorResponse::not_found(req.method(), original_uri.path())
}

// - Commonly used responses -

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteErrorResponse {
    #[serde(skip)]
    pub status_code: StatusCode,

    pub http_method: Option<String>,

    pub requested_uri: Option<String>,

    pub message: Option<String>,
}

impl RouteErrorResponse {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            http_method: None,
            requested_uri: None,
            message: None,
        }
    }

    pub fn not_found(method: &Method, uri: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND)
            .with_method(method)
            .with_uri(uri)
            .with_default_message()
    }

    pub fn with_method(mut self, method: &Method) -> Self {
        self.http_method = Some(method.to_string());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.requested_uri = Some(uri.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_default_message(self) -> Self {
        let message = self
            .status_code
            .canonical_reason()
            .unwrap_or("Something went wrong.");
        self.with_message(message)
    }
}

/// Maps a rejected query input to a `400 Bad Request` for the given request.
pub(crate) fn rejected(original_uri: &Uri) -> impl FnOnce(QueryError) -> RouteErrorResponse + '_ {
    move |why| {
        RouteErrorResponse::from(why)
            .with_method(&Method::GET)
            .with_uri(original_uri.path())
    }
}

/// Path and query of the request, for `self` links.
pub(crate) fn self_path(original_uri: &Uri) -> String {
    original_uri
        .path_and_query()
        .map(|path_and_query| path_and_query.as_str())
        .unwrap_or_else(|| original_uri.path())
        .to_owned()
}

/// Invalid user input. The message is meant to be shown to the user as is.
impl From<QueryError> for RouteErrorResponse {
    fn from(value: QueryError) -> Self {
        log::debug!("rejecting request: {}", value);
        Self::new(StatusCode::BAD_REQUEST).with_message(value.to_string())
    }
}

impl From<QueryRejection> for RouteErrorResponse {
    fn from(value: QueryRejection) -> Self {
        log::debug!("rejecting query string: {}", value.body_text());
        Self::new(value.status())
            .with_message(format!("Invalid query parameters. {}", value.body_text()))
    }
}

impl IntoResponse for RouteErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status_code, Json(self)).into_response()
    }
}
