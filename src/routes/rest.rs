//! Generic REST surface: every path goes through the path parser, not axum patterns.

use crate::handlers::handle;
use crate::state::AppState;
use axum::Router;

pub fn rest_routes(state: AppState) -> Router {
    Router::new().fallback(handle).with_state(state)
}
