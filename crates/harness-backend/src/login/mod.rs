//! Test identities and the pool sharing them between the tests of a file.

pub mod backend;
pub mod cache;
pub mod provisioner;

use crate::{
    api::{client::ApiClient, errors::ApiError, signing::AwsCredentials},
    identity::{errors::ProvisioningError, types::CognitoTokens},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub use backend::AppSyncLoginBackend;
pub use cache::{LoginCache, LoginCacheError};
pub use provisioner::CognitoProvisioner;

/// an authenticated or anonymous identity with a client bound to it
///
/// clean or dirty is not a property of the login, the [`LoginCache`] tracks it
#[derive(Debug)]
pub struct Login {
    user_id: String,
    default_username: String,
    username: Mutex<String>,
    password: Mutex<Option<SecretString>>,
    client: ApiClient,
    tokens: Option<CognitoTokens>,
    credentials: Option<AwsCredentials>,
}

impl Login {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, client: ApiClient) -> Self {
        let username = username.into();
        Self {
            user_id: user_id.into(),
            default_username: username.clone(),
            username: Mutex::new(username),
            password: Mutex::new(None),
            client,
            tokens: None,
            credentials: None,
        }
    }

    #[must_use]
    pub fn with_password(self, password: SecretString) -> Self {
        *lock(&self.password) = Some(password);
        self
    }

    #[must_use]
    pub fn with_tokens(mut self, tokens: CognitoTokens) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// credentials kept next to a client that does not sign with them
    #[must_use]
    pub fn with_credentials(mut self, credentials: AwsCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// the identity id, equal to the backend's `userId`
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// the username the login was provisioned with and is reset to
    pub fn default_username(&self) -> &str {
        &self.default_username
    }

    pub fn username(&self) -> String {
        lock(&self.username).clone()
    }

    /// records a username change made through the API
    pub fn set_username(&self, username: impl Into<String>) {
        *lock(&self.username) = username.into();
    }

    pub fn password(&self) -> Option<SecretString> {
        lock(&self.password)
            .as_ref()
            .map(|password| SecretString::new(password.expose_secret().clone()))
    }

    /// records a password change made through the API
    pub fn set_password(&self, password: SecretString) {
        *lock(&self.password) = Some(password);
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn tokens(&self) -> Option<&CognitoTokens> {
        self.tokens.as_ref()
    }

    /// the identity pool credentials of the login, whether or not its client signs with them
    pub fn credentials(&self) -> Option<&AwsCredentials> {
        self.credentials.as_ref().or_else(|| self.client.credentials())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // values are only ever replaced whole, poisoning is ignored
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// provisions, resets and deletes the logins of a [`LoginCache`]
#[async_trait]
pub trait LoginBackend: Send + Sync {
    /// creates a brand new login
    async fn provision(&self) -> Result<Login, ProvisioningError>;

    /// returns the backend user of the login to its defaults, username included
    async fn reset(&self, login: &Login) -> Result<(), ApiError>;

    /// deletes the backend user of the login
    async fn delete(&self, login: &Login) -> Result<(), ApiError>;
}
