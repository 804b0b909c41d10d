//! Success payloads. Only the outermost handler turns a `Reply` into a response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::sql::Row;

/// Result of one terminal branch of the router.
#[derive(Debug)]
pub enum Reply {
    /// A single row, serialized as a bare object.
    Row(Row),
    /// A set of rows, serialized as a bare array.
    Rows(Vec<Row>),
    /// Whatever an action handler returned.
    Value(Value),
    /// `{"success":{"message":"Success","code":200}}`
    Success,
}

#[derive(Serialize)]
pub struct SuccessBody {
    pub success: SuccessDetail,
}

#[derive(Serialize)]
pub struct SuccessDetail {
    pub message: &'static str,
    pub code: u16,
}

pub fn success_body() -> SuccessBody {
    SuccessBody {
        success: SuccessDetail {
            message: "Success",
            code: 200,
        },
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Row(row) => (StatusCode::OK, Json(row)).into_response(),
            Reply::Rows(rows) => (StatusCode::OK, Json(rows)).into_response(),
            Reply::Value(v) => (StatusCode::OK, Json(v)).into_response(),
            Reply::Success => (StatusCode::OK, Json(success_body())).into_response(),
        }
    }
}
