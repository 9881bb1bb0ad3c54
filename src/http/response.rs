//! Health result to HTTP response mapping.
//!
//! | Result           | Status                    | Body   |
//! |------------------|---------------------------|--------|
//! | `Up`             | 200 OK                    | `UP`   |
//! | `Down`           | 404 Not Found             | `DOWN` |
//! | `DownAfterDelay` | 400 Bad Request           | empty  |
//! | probe error      | 500 Internal Server Error | message |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::health::HealthResult;
use crate::probe::ProbeError;

impl IntoResponse for HealthResult {
    fn into_response(self) -> Response {
        match self {
            HealthResult::Up => (StatusCode::OK, "UP").into_response(),
            HealthResult::Down => (StatusCode::NOT_FOUND, "DOWN").into_response(),
            HealthResult::DownAfterDelay(_) => StatusCode::BAD_REQUEST.into_response(),
        }
    }
}

impl IntoResponse for ProbeError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "Health probe failed").into_response()
    }
}
