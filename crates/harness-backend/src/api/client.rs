use super::{
    consts::{APPSYNC_SERVICE, CONNECT_TIMEOUT, JSON_CONTENT_TYPE, REQUEST_TIMEOUT, USER_AGENT},
    errors::ApiError,
    signing::{host_of, AwsCredentials, SigV4Signer},
};
use cynic::{GraphQlResponse, Operation};
use reqwest::{header, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use std::{collections::BTreeMap, sync::Arc};
use url::Url;

/// how requests of a client are authorized
#[derive(Debug)]
pub enum AuthMode {
    /// every request is signed with identity pool credentials
    Iam { credentials: AwsCredentials, region: String },
    /// every request carries the token in the `Authorization` header
    Bearer(SecretString),
}

/// a GraphQL client bound to the backend endpoint and one identity
///
/// responses are never cached, every call performs a fresh request.
/// cloning is cheap and clones share the underlying connection pool
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    endpoint: Url,
    auth: AuthMode,
    http: reqwest::Client,
}

/// the status and body of a forwarded request
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiClient {
    pub fn new(endpoint: &str, auth: AuthMode) -> Result<Self, ApiError> {
        let endpoint = Url::parse(endpoint).map_err(|_| ApiError::InvalidEndpoint(endpoint.to_owned()))?;
        if endpoint.host_str().is_none() || !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ApiError::InvalidEndpoint(endpoint.to_string()));
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(Inner { endpoint, auth, http }),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    pub fn auth(&self) -> &AuthMode {
        &self.inner.auth
    }

    /// the identity pool credentials of IAM authorized clients
    pub fn credentials(&self) -> Option<&AwsCredentials> {
        match &self.inner.auth {
            AuthMode::Iam { credentials, .. } => Some(credentials),
            AuthMode::Bearer(_) => None,
        }
    }

    /// runs a query or mutation, returning its data
    ///
    /// GraphQL errors are returned as [`ApiError::Graphql`] with the messages unchanged, even when
    /// the response also carries partial data
    pub async fn run<ResponseData, Variables>(
        &self,
        operation: Operation<ResponseData, Variables>,
    ) -> Result<ResponseData, ApiError>
    where
        ResponseData: DeserializeOwned + 'static,
        Variables: Serialize,
    {
        let operation_name = operation.operation_name.clone().unwrap_or_default();
        let body = serde_json::to_vec(&operation).map_err(ApiError::Serialize)?;

        tracing::debug!(operation = %operation_name, "running GraphQL operation");

        let RawResponse { status, body } = self.send(body).await?;

        let response: GraphQlResponse<ResponseData> = match serde_json::from_str(&body) {
            Ok(response) => response,
            Err(_) if !status.is_success() => return Err(ApiError::HttpStatus { status, body }),
            Err(error) => return Err(ApiError::Decode(error)),
        };

        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|error| error.message).collect();
            tracing::debug!(operation = %operation_name, ?messages, "GraphQL operation failed");
            return Err(ApiError::Graphql(messages));
        }

        response.data.ok_or(ApiError::EmptyResponse)
    }

    /// forwards an arbitrary GraphQL request body, authorized like every other request
    pub async fn run_raw(&self, body: Vec<u8>) -> Result<RawResponse, ApiError> {
        self.send(body).await
    }

    async fn send(&self, body: Vec<u8>) -> Result<RawResponse, ApiError> {
        let inner = &self.inner;
        let mut request = inner
            .http
            .post(inner.endpoint.clone())
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE);

        match &inner.auth {
            AuthMode::Iam { credentials, region } => {
                let signer = SigV4Signer::new(credentials, region, APPSYNC_SERVICE);
                let headers = signer.sign(
                    "POST",
                    &inner.endpoint,
                    &[(header::CONTENT_TYPE.as_str(), JSON_CONTENT_TYPE)],
                    &body,
                );
                for (name, value) in headers.into_iter().filter(|(name, _)| name != "host") {
                    request = request.header(name, value);
                }
            }
            AuthMode::Bearer(token) => {
                request = request.header(header::AUTHORIZATION, token.expose_secret().as_str());
            }
        }

        let response = request.body(body).send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }

    /// the headers authorizing a realtime request against `path` with the given body
    ///
    /// the realtime endpoint expects them base64 encoded in the connection url and in the
    /// extensions of every subscription start message
    pub fn authorization_headers(&self, path: &str, body: &str) -> Result<BTreeMap<String, String>, ApiError> {
        let inner = &self.inner;
        let host = host_of(&inner.endpoint);

        match &inner.auth {
            AuthMode::Iam { credentials, region } => {
                let mut url = inner.endpoint.clone();
                url.set_path(path);
                url.set_query(None);

                let signer = SigV4Signer::new(credentials, region, APPSYNC_SERVICE);
                Ok(signer.sign(
                    "POST",
                    &url,
                    &[
                        ("accept", "application/json, text/javascript"),
                        ("content-encoding", "amz-1.0"),
                        ("content-type", "application/json; charset=UTF-8"),
                    ],
                    body.as_bytes(),
                ))
            }
            AuthMode::Bearer(token) => Ok(BTreeMap::from([
                ("host".to_owned(), host),
                ("Authorization".to_owned(), token.expose_secret().clone()),
            ])),
        }
    }
}
