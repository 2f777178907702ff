//! Response mapping for proxy failures.
//!
//! # Responsibilities
//! - Map upstream errors to appropriate HTTP status codes
//! - Keep error bodies short plain text; details go to the log
//!
//! # Design Decisions
//! - Connection failures and unbuildable targets result in 502 Bad Gateway
//! - Upstream timeouts result in 504 Gateway Timeout

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::proxy::ProxyError;

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Upstream(_) | ProxyError::InvalidTarget(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let reason = match &self {
            ProxyError::Timeout(_) => "Upstream timed out",
            _ => "Upstream request failed",
        };
        (self.status(), reason).into_response()
    }
}
