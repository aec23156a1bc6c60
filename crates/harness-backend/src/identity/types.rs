//! Request and response bodies of the identity provider's JSON protocol.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// the tokens returned by a successful password sign in
#[derive(Debug)]
pub struct CognitoTokens {
    pub access_token: SecretString,
    pub id_token: SecretString,
    pub refresh_token: Option<SecretString>,
    pub expires_in: u64,
}

/// where a verification code was sent
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CodeDeliveryDetails {
    pub destination: Option<String>,
    pub delivery_medium: Option<String>,
    pub attribute_name: Option<String>,
}

/// an account of the user pool as returned by `GetUser`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CognitoUser {
    pub username: String,
    pub attributes: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AttributeType {
    pub name: String,
    pub value: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SignUpRequest<'a> {
    pub client_id: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub user_attributes: Vec<AttributeType>,
    pub client_metadata: BTreeMap<&'a str, &'a str>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SignUpResponse {
    pub user_confirmed: bool,
    pub user_sub: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct InitiateAuthRequest<'a> {
    pub auth_flow: &'a str,
    pub client_id: &'a str,
    pub auth_parameters: BTreeMap<&'a str, &'a str>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct InitiateAuthResponse {
    pub authentication_result: Option<AuthenticationResult>,
    pub challenge_name: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AuthenticationResult {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ForgotPasswordRequest<'a> {
    pub client_id: &'a str,
    pub username: &'a str,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ForgotPasswordResponse {
    #[serde(default)]
    pub code_delivery_details: CodeDeliveryDetails,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ConfirmForgotPasswordRequest<'a> {
    pub client_id: &'a str,
    pub username: &'a str,
    pub confirmation_code: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize, Debug)]
pub(crate) struct EmptyResponse {}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct GetUserRequest<'a> {
    pub access_token: &'a str,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct GetUserResponse {
    pub username: String,
    #[serde(default)]
    pub user_attributes: Vec<AttributeType>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct GetIdRequest<'a> {
    pub identity_pool_id: &'a str,
    #[serde(skip_serializing_if = "no_logins")]
    pub logins: &'a BTreeMap<String, String>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn no_logins(logins: &&BTreeMap<String, String>) -> bool {
    logins.is_empty()
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct GetIdResponse {
    pub identity_id: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct GetCredentialsForIdentityRequest<'a> {
    pub identity_id: &'a str,
    #[serde(skip_serializing_if = "no_logins")]
    pub logins: &'a BTreeMap<String, String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct GetCredentialsForIdentityResponse {
    pub credentials: IdentityCredentials,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct IdentityCredentials {
    pub access_key_id: String,
    pub secret_key: String,
    pub session_token: Option<String>,
    /// seconds since the epoch
    pub expiration: Option<f64>,
}

/// the error body of a rejected request
#[derive(Deserialize, Debug, Default)]
pub(crate) struct ErrorBody {
    #[serde(rename = "__type", default)]
    pub kind: String,
    #[serde(alias = "Message", default)]
    pub message: String,
}

impl ErrorBody {
    /// the exception name without its namespace, e.g. `UsernameExistsException`
    pub fn short_kind(&self) -> &str {
        self.kind.rsplit('#').next().unwrap_or_default()
    }
}
