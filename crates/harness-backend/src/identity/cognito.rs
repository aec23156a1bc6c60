use super::{
    errors::ProvisioningError,
    types::{
        AttributeType, CodeDeliveryDetails, CognitoTokens, CognitoUser, ConfirmForgotPasswordRequest, EmptyResponse,
        ErrorBody, ForgotPasswordRequest, ForgotPasswordResponse, GetCredentialsForIdentityRequest,
        GetCredentialsForIdentityResponse, GetIdRequest, GetIdResponse, GetUserRequest, GetUserResponse,
        InitiateAuthRequest, InitiateAuthResponse, SignUpRequest, SignUpResponse,
    },
};
use crate::api::signing::AwsCredentials;
use chrono::DateTime;
use reqwest::header;
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use std::{collections::BTreeMap, time::Duration};
use url::Url;

const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const TARGET_HEADER: &str = "X-Amz-Target";
const USER_POOL_SERVICE: &str = "AWSCognitoIdentityProviderService";
const IDENTITY_POOL_SERVICE: &str = "AWSCognitoIdentityService";
const PASSWORD_AUTH_FLOW: &str = "USER_PASSWORD_AUTH";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// a client of the identity provider's user pool and identity pool APIs
///
/// every call is a single unauthenticated JSON request, nothing is retried
#[derive(Debug, Clone)]
pub struct CognitoClient {
    http: reqwest::Client,
    user_pool_endpoint: Url,
    identity_pool_endpoint: Url,
}

impl CognitoClient {
    /// targets the regional endpoints of the provider
    pub fn new(region: &str) -> Result<Self, ProvisioningError> {
        let endpoint = |service: &str| {
            Url::parse(&format!("https://{service}.{region}.amazonaws.com/")).map_err(|error| {
                ProvisioningError::RequestError(format!("invalid region '{region}': {error}"))
            })
        };
        Self::with_endpoints(endpoint("cognito-idp")?, endpoint("cognito-identity")?)
    }

    /// targets explicit endpoints, e.g. a local mock
    pub fn with_endpoints(user_pool_endpoint: Url, identity_pool_endpoint: Url) -> Result<Self, ProvisioningError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            user_pool_endpoint,
            identity_pool_endpoint,
        })
    }

    /// creates an account, returning the subject id of the new user
    pub async fn sign_up(
        &self,
        client_id: &str,
        username: &str,
        password: &SecretString,
        attributes: &[(&str, &str)],
        client_metadata: &[(&str, &str)],
    ) -> Result<String, ProvisioningError> {
        let request = SignUpRequest {
            client_id,
            username,
            password: password.expose_secret(),
            user_attributes: attributes
                .iter()
                .map(|(name, value)| AttributeType {
                    name: (*name).to_owned(),
                    value: (*value).to_owned(),
                })
                .collect(),
            client_metadata: client_metadata.iter().copied().collect(),
        };

        let response: SignUpResponse = self.user_pool_call("SignUp", &request).await?;
        tracing::debug!(%username, confirmed = response.user_confirmed, "signed up");

        Ok(response.user_sub)
    }

    /// signs in with a username and password
    pub async fn initiate_auth(
        &self,
        client_id: &str,
        username: &str,
        password: &SecretString,
    ) -> Result<CognitoTokens, ProvisioningError> {
        let request = InitiateAuthRequest {
            auth_flow: PASSWORD_AUTH_FLOW,
            client_id,
            auth_parameters: BTreeMap::from([("USERNAME", username), ("PASSWORD", password.expose_secret().as_str())]),
        };

        let response: InitiateAuthResponse = self.user_pool_call("InitiateAuth", &request).await?;

        let Some(result) = response.authentication_result else {
            return Err(match response.challenge_name {
                Some(challenge) => ProvisioningError::ChallengeRequired(challenge),
                None => ProvisioningError::MalformedResponse {
                    operation: "InitiateAuth",
                    reason: "no authentication result".to_owned(),
                },
            });
        };

        tracing::debug!(%username, "signed in");

        Ok(CognitoTokens {
            access_token: SecretString::new(result.access_token),
            id_token: SecretString::new(result.id_token),
            refresh_token: result.refresh_token.map(SecretString::new),
            expires_in: result.expires_in,
        })
    }

    /// sends a verification code to the account's contact
    pub async fn forgot_password(
        &self,
        client_id: &str,
        username: &str,
    ) -> Result<CodeDeliveryDetails, ProvisioningError> {
        let request = ForgotPasswordRequest { client_id, username };
        let response: ForgotPasswordResponse = self.user_pool_call("ForgotPassword", &request).await?;
        Ok(response.code_delivery_details)
    }

    /// sets a new password using the code sent by [`CognitoClient::forgot_password`]
    pub async fn confirm_forgot_password(
        &self,
        client_id: &str,
        username: &str,
        confirmation_code: &str,
        new_password: &SecretString,
    ) -> Result<(), ProvisioningError> {
        let request = ConfirmForgotPasswordRequest {
            client_id,
            username,
            confirmation_code,
            password: new_password.expose_secret(),
        };
        let _: EmptyResponse = self.user_pool_call("ConfirmForgotPassword", &request).await?;
        Ok(())
    }

    pub async fn get_user(&self, access_token: &SecretString) -> Result<CognitoUser, ProvisioningError> {
        let request = GetUserRequest {
            access_token: access_token.expose_secret(),
        };
        let response: GetUserResponse = self.user_pool_call("GetUser", &request).await?;

        Ok(CognitoUser {
            username: response.username,
            attributes: response
                .user_attributes
                .into_iter()
                .map(|attribute| (attribute.name, attribute.value))
                .collect(),
        })
    }

    /// returns the identity id for the given logins, an unauthenticated identity for none
    pub async fn get_id(
        &self,
        identity_pool_id: &str,
        logins: &BTreeMap<String, String>,
    ) -> Result<String, ProvisioningError> {
        let request = GetIdRequest {
            identity_pool_id,
            logins,
        };
        let response: GetIdResponse = self.identity_pool_call("GetId", &request).await?;
        Ok(response.identity_id)
    }

    pub async fn get_credentials_for_identity(
        &self,
        identity_id: &str,
        logins: &BTreeMap<String, String>,
    ) -> Result<AwsCredentials, ProvisioningError> {
        let request = GetCredentialsForIdentityRequest { identity_id, logins };
        let response: GetCredentialsForIdentityResponse =
            self.identity_pool_call("GetCredentialsForIdentity", &request).await?;

        let credentials = response.credentials;
        Ok(AwsCredentials {
            access_key_id: credentials.access_key_id,
            secret_access_key: SecretString::new(credentials.secret_key),
            session_token: credentials.session_token.map(SecretString::new),
            // whole seconds, the fraction is always zero
            expiration: credentials
                .expiration
                .and_then(|seconds| DateTime::from_timestamp(seconds as i64, 0)),
        })
    }

    async fn user_pool_call<Request: Serialize, Response: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: &Request,
    ) -> Result<Response, ProvisioningError> {
        self.call(&self.user_pool_endpoint, USER_POOL_SERVICE, operation, request)
            .await
    }

    async fn identity_pool_call<Request: Serialize, Response: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: &Request,
    ) -> Result<Response, ProvisioningError> {
        self.call(&self.identity_pool_endpoint, IDENTITY_POOL_SERVICE, operation, request)
            .await
    }

    async fn call<Request: Serialize, Response: DeserializeOwned>(
        &self,
        endpoint: &Url,
        service: &str,
        operation: &'static str,
        request: &Request,
    ) -> Result<Response, ProvisioningError> {
        let body = serde_json::to_vec(request).map_err(|error| ProvisioningError::MalformedResponse {
            operation,
            reason: error.to_string(),
        })?;

        let response = self
            .http
            .post(endpoint.clone())
            .header(header::CONTENT_TYPE, AMZ_JSON_CONTENT_TYPE)
            .header(TARGET_HEADER, format!("{service}.{operation}"))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let error: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
            let kind = match error.short_kind() {
                "" => status.to_string(),
                kind => kind.to_owned(),
            };
            tracing::debug!(operation, %kind, "identity provider rejected the request");
            return Err(ProvisioningError::Rejected {
                operation,
                kind,
                message: error.message,
            });
        }

        serde_json::from_str(&body).map_err(|error| ProvisioningError::MalformedResponse {
            operation,
            reason: error.to_string(),
        })
    }
}
