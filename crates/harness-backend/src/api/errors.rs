use common::errors::CommonError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// returned if the backend answered with GraphQL errors, messages are kept verbatim
    #[error("the API returned errors: {}", .0.join("; "))]
    Graphql(Vec<String>),

    /// returned if a response carried neither data nor errors
    #[error("the API returned an empty response")]
    EmptyResponse,

    /// returned if a request could not be completed (due to connection issues)
    #[error("could not complete a request")]
    ConnectionError,

    /// returned if a request could not be completed
    #[error("could not complete a request: {0}")]
    RequestError(String),

    /// returned if the backend answered with an error status and no GraphQL body
    #[error("the API responded with {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    /// returned if the GraphQL endpoint is not a usable https url
    #[error("invalid API endpoint '{0}'")]
    InvalidEndpoint(String),

    /// returned if an operation could not be serialized
    #[error("could not serialize the operation\nCaused by: {0}")]
    Serialize(serde_json::Error),

    /// returned if a response body could not be deserialized
    #[error("could not decode the API response\nCaused by: {0}")]
    Decode(serde_json::Error),

    /// returned if the object storage rejected an upload
    #[error("the upload was rejected with {status}")]
    Upload { status: StatusCode },

    /// returned if the realtime endpoint violated the subscription protocol
    #[error("realtime subscription failed: {0}")]
    Realtime(String),

    /// returned if the realtime connection closed while a subscription was waiting for it
    #[error("the realtime connection was closed")]
    RealtimeClosed,

    /// returned if the password encryption key is not a PEM encoded RSA public key
    #[error("invalid password encryption key\nCaused by: {0}")]
    InvalidPublicKey(String),

    /// returned if a password could not be encrypted
    #[error("could not encrypt the password\nCaused by: {0}")]
    Encryption(String),

    /// wraps a [`CommonError`]
    #[error(transparent)]
    Configuration(#[from] CommonError),
}

impl ApiError {
    /// the GraphQL error messages, empty for transport level errors
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Graphql(messages) => messages,
            _ => &[],
        }
    }

    /// whether any GraphQL error message contains `pattern`
    pub fn message_contains(&self, pattern: &str) -> bool {
        self.messages().iter().any(|message| message.contains(pattern))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() {
            ApiError::ConnectionError
        } else {
            ApiError::RequestError(error.to_string())
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ApiError {
    fn from(error: tokio_tungstenite::tungstenite::Error) -> Self {
        ApiError::Realtime(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_messages_are_matched_by_substring() {
        let error = ApiError::Graphql(vec![
            "ClientError: User `abc` is not ACTIVE".to_owned(),
            "ClientError: Cannot follow yourself".to_owned(),
        ]);

        assert!(error.message_contains("not ACTIVE"));
        assert!(error.message_contains("Cannot follow"));
        assert!(!error.message_contains("not authorized"));
        assert!(!ApiError::ConnectionError.message_contains(""));
    }
}
