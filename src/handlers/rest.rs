//! The request router: one dispatch on the HTTP method with five terminal branches.

use crate::actions::dispatch;
use crate::error::AppError;
use crate::extractors::Cookies;
use crate::path::PathSegments;
use crate::response::Reply;
use crate::service::{ListOptions, Operation, Payload, QueryRequest, QueryService};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, OriginalUri, State},
    http::Method,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use tracing::Instrument;
use uuid::Uuid;

/// Everything the router needs from one request, read once at the edge.
#[derive(Clone, Debug)]
pub struct RestRequest {
    pub method: Method,
    pub segments: PathSegments,
    pub query: HashMap<String, String>,
    pub body: Bytes,
    pub cookies: Cookies,
}

/// Query-string pairs; a repeated key keeps its last value.
pub fn parse_query(raw: Option<&str>) -> HashMap<String, String> {
    raw.and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
        .unwrap_or_default()
        .into_iter()
        .collect()
}

/// Credential gate first, then POST/GET/PUT/DELETE to generic CRUD and OPTIONS to actions.
pub async fn route(state: &AppState, request: RestRequest) -> Result<Reply, AppError> {
    request.cookies.authorize(state.config.api_login.as_ref())?;

    let operation = match request.method {
        Method::POST => Operation::Create,
        Method::GET => Operation::Read,
        Method::PUT => Operation::Update,
        Method::DELETE => Operation::Delete,
        Method::OPTIONS => {
            return dispatch(state, request.segments, request.query)
                .await
                .map(Reply::Value)
        }
        other => return Err(AppError::not_found(format!("method {}", other))),
    };

    let payload = match operation {
        Operation::Create | Operation::Update => Payload::from_form(&request.body),
        Operation::Read | Operation::Delete => Payload::default(),
    };
    let options = ListOptions::from_query(&request.query);
    let query_request = QueryRequest::from_segments(operation, &request.segments, options, payload);
    QueryService::new(state.executor.as_ref(), state.catalog.as_ref())
        .run(&query_request)
        .await
}

/// Fallback handler for every path not claimed by the ambient routes.
/// The only place a result becomes a response.
pub async fn handle(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    cookies: Cookies,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("request", %request_id, %method, path = %uri.path());
    let raw_path = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");
    let segments = PathSegments::parse(raw_path, &state.config.base_uri);
    let query = parse_query(uri.query());
    async move {
        let body = match body {
            Ok(body) => body,
            Err(rejection) => return AppError::from(rejection).into_response(),
        };
        let request = RestRequest {
            method,
            segments,
            query,
            body,
            cookies,
        };
        match route(&state, request).await {
            Ok(reply) => reply.into_response(),
            Err(e) => e.into_response(),
        }
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_last_value_wins() {
        let q = parse_query(Some("limit=5&order_by=title&limit=10"));
        assert_eq!(q.get("limit").map(String::as_str), Some("10"));
        assert_eq!(q.get("order_by").map(String::as_str), Some("title"));
        assert!(parse_query(None).is_empty());
    }
}
