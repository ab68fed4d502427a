use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::pagination::PaginationMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Error,
}

/// Envelope shared by every endpoint: `{status, msg_code, data?, _meta?}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: Status,
    pub msg_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, msg_code: &str) -> Self {
        Self {
            status: Status::Ok,
            msg_code: msg_code.to_string(),
            data: Some(data),
            meta: None,
        }
    }

    pub fn paginated(data: T, meta: PaginationMeta, msg_code: &str) -> Self {
        Self {
            status: Status::Ok,
            msg_code: msg_code.to_string(),
            data: Some(data),
            meta: Some(meta),
        }
    }

    pub fn error(msg_code: &str, data: Option<T>) -> Self {
        Self {
            status: Status::Error,
            msg_code: msg_code.to_string(),
            data,
            meta: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload, e.g. after a delete.
    pub fn empty(msg_code: &str) -> Self {
        Self {
            status: Status::Ok,
            msg_code: msg_code.to_string(),
            data: None,
            meta: None,
        }
    }
}

pub struct ApiSuccess<T>(pub T, pub StatusCode);

impl<T> IntoResponse for ApiSuccess<ApiResponse<T>>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let (response, status) = (self.0, self.1);
        (status, Json(response)).into_response()
    }
}
