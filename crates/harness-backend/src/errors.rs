use crate::api::errors::ApiError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// returned if no port is available.
    /// used specifically when searching for ports
    #[error("could not find an available port")]
    AvailablePort,

    /// returned if a given port is in use and the search option is not used
    #[error("port {0} is currently in use")]
    PortInUse(u16),

    /// returned if the dev server could not bind its listener
    #[error("could not start the dev server\nCaused by: {0}")]
    StartServer(io::Error),

    /// returned if the dev server stopped with an IO error
    #[error("the dev server stopped unexpectedly\nCaused by: {0}")]
    ServeError(io::Error),

    /// returned if a request could not be forwarded to the API
    #[error(transparent)]
    Forward(#[from] ApiError),
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Forward(ApiError::ConnectionError | ApiError::RequestError(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::warn!(error = %self, "could not forward a request");

        let body = json!({ "errors": [{ "message": self.to_string() }] });

        (status, Json(body)).into_response()
    }
}
