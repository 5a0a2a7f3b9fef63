//! Error responses.
//!
//! # Design Decisions
//! - Every [`PortalError`] maps to one status code
//! - Body is JSON `{ "error": .., "fields": .. }`; `fields` only for validation

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::{FieldErrors, PortalError};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl PortalError {
    pub fn status(&self) -> StatusCode {
        match self {
            PortalError::WalletUnavailable | PortalError::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
            PortalError::ConnectFailed | PortalError::TransactionFailed(_) | PortalError::Source(_) => {
                StatusCode::BAD_GATEWAY
            }
            PortalError::Validation(_) | PortalError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PortalError::NotConnected(_) => StatusCode::UNAUTHORIZED,
            PortalError::Forbidden(_) => StatusCode::FORBIDDEN,
            PortalError::NotFound(_) => StatusCode::NOT_FOUND,
            PortalError::Busy => StatusCode::CONFLICT,
            PortalError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            PortalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();
        let fields = match self {
            PortalError::Validation(fields) => Some(fields),
            _ => None,
        };
        (status, Json(ErrorBody { error, fields })).into_response()
    }
}
