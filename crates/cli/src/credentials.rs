use crate::{
    auth_source::obtain_login,
    cli_input::{AuthSourceKind, CredentialsCommand},
    errors::CliError,
    output::report,
};
use backend::{api::signing::AwsCredentials, identity::types::CognitoTokens, login::Login};
use chrono::{DateTime, Utc};
use common::environment::Environment;
use secrecy::ExposeSecret;
use serde::Serialize;
use std::fs;

/// everything needed to act as an identity from another tool
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CredentialBundle {
    auth_source: &'static str,
    user_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    graphql_url: String,
    region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<TokenBundle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    credentials: Option<AwsCredentialsBundle>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TokenBundle {
    access_token: String,
    id_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    expires_in: u64,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AwsCredentialsBundle {
    access_key_id: String,
    secret_access_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiration: Option<DateTime<Utc>>,
}

impl CredentialBundle {
    pub fn from_login(kind: AuthSourceKind, login: &Login, region: &str) -> Self {
        Self {
            auth_source: kind.name(),
            user_id: login.user_id().to_owned(),
            username: login.username(),
            password: login.password().map(|password| password.expose_secret().clone()),
            graphql_url: login.client().endpoint().to_string(),
            region: region.to_owned(),
            tokens: login.tokens().map(TokenBundle::from),
            credentials: login.credentials().map(AwsCredentialsBundle::from),
        }
    }
}

impl From<&CognitoTokens> for TokenBundle {
    fn from(tokens: &CognitoTokens) -> Self {
        Self {
            access_token: tokens.access_token.expose_secret().clone(),
            id_token: tokens.id_token.expose_secret().clone(),
            refresh_token: tokens
                .refresh_token
                .as_ref()
                .map(|token| token.expose_secret().clone()),
            expires_in: tokens.expires_in,
        }
    }
}

impl From<&AwsCredentials> for AwsCredentialsBundle {
    fn from(credentials: &AwsCredentials) -> Self {
        Self {
            access_key_id: credentials.access_key_id.clone(),
            secret_access_key: credentials.secret_access_key.expose_secret().clone(),
            session_token: credentials
                .session_token
                .as_ref()
                .map(|token| token.expose_secret().clone()),
            expiration: credentials.expiration,
        }
    }
}

#[tokio::main]
pub async fn credentials(command: CredentialsCommand) -> Result<(), CliError> {
    let environment = Environment::get();
    let (kind, login) = obtain_login(command.auth, environment).await?;

    let region = environment.region().map_err(CliError::CommonError)?;
    let bundle = CredentialBundle::from_login(kind, &login, region);
    let json = serde_json::to_string_pretty(&bundle).map_err(CliError::SerializeCredentials)?;

    match command.output {
        Some(path) => {
            fs::write(&path, format!("{json}\n")).map_err(|source| CliError::WriteCredentials {
                path: path.clone(),
                source,
            })?;
            report::credentials_written(&path);
        }
        None => println!("{json}"),
    }

    Ok(())
}
