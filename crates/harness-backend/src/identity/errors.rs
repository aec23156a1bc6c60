use crate::api::errors::ApiError;
use common::errors::CommonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisioningError {
    /// returned if the identity provider rejected a request, e.g. throttling or an invalid app client
    #[error("{operation} was rejected with {kind}: {message}")]
    Rejected {
        operation: &'static str,
        kind: String,
        message: String,
    },

    /// returned if the identity provider asked for a challenge the harness cannot answer
    #[error("sign in requires the unsupported challenge {0}")]
    ChallengeRequired(String),

    /// returned if a request could not be completed (due to connection issues)
    #[error("could not reach the identity provider")]
    ConnectionError,

    /// returned if a request could not be completed
    #[error("could not complete a request to the identity provider: {0}")]
    RequestError(String),

    /// returned if a response of the identity provider could not be understood
    #[error("{operation} returned a malformed response: {reason}")]
    MalformedResponse { operation: &'static str, reason: String },

    /// returned if a user pool operation is run by a provisioner built without an app client
    #[error("{0} needs an app client")]
    MissingAppClient(&'static str),

    /// wraps a [`CommonError`]
    #[error(transparent)]
    Configuration(#[from] CommonError),

    /// wraps an [`ApiError`] raised while building the client of a login
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ProvisioningError {
    /// the exception name reported by the identity provider, if it rejected the request
    pub fn rejection_kind(&self) -> Option<&str> {
        match self {
            Self::Rejected { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProvisioningError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() {
            ProvisioningError::ConnectionError
        } else {
            ProvisioningError::RequestError(error.to_string())
        }
    }
}
