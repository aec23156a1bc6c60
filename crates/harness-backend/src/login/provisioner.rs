use super::Login;
use crate::{
    api::{
        client::{ApiClient, AuthMode},
        signing::AwsCredentials,
    },
    identity::{
        analytics::{AnalyticsClient, AuthEvent},
        cognito::CognitoClient,
        errors::ProvisioningError,
        types::CodeDeliveryDetails,
    },
};
use common::{consts::TEST_ACCOUNT_MARKER, environment::Environment, types::FederatedProvider};
use rand::{distributions::Alphanumeric, seq::SliceRandom, Rng};
use secrecy::{ExposeSecret, SecretString};
use std::collections::BTreeMap;

const USERNAME_PREFIX: &str = "test-";
const USERNAME_SUFFIX_LENGTH: usize = 12;
const PASSWORD_LENGTH: usize = 16;
const PASSWORD_SYMBOLS: &[u8] = b"!#$%&*+-=?@^_";

/// creates identities with the identity provider and binds API clients to them
#[derive(Debug)]
pub struct CognitoProvisioner {
    cognito: CognitoClient,
    analytics: Option<AnalyticsClient>,
    client_id: Option<String>,
    user_pool_id: String,
    identity_pool_id: String,
    graphql_url: String,
    region: String,
}

impl CognitoProvisioner {
    /// uses the testing app client, which confirms sign ups without verification
    pub fn for_tests(environment: &Environment) -> Result<Self, ProvisioningError> {
        Self::new(environment, Some(environment.testing_client_id()?))
    }

    /// uses the app client of the frontend, for signing in to existing accounts
    pub fn for_scripts(environment: &Environment) -> Result<Self, ProvisioningError> {
        Self::new(environment, Some(environment.frontend_client_id()?))
    }

    /// without an app client, for anonymous and federated identities only
    pub fn for_identities(environment: &Environment) -> Result<Self, ProvisioningError> {
        Self::new(environment, None)
    }

    fn new(environment: &Environment, client_id: Option<&str>) -> Result<Self, ProvisioningError> {
        let region = environment.region()?;

        Ok(Self {
            cognito: CognitoClient::new(region)?,
            analytics: AnalyticsClient::from_environment(environment)?,
            client_id: client_id.map(str::to_owned),
            user_pool_id: environment.user_pool_id()?.to_owned(),
            identity_pool_id: environment.identity_pool_id()?.to_owned(),
            graphql_url: environment.graphql_url()?.to_owned(),
            region: region.to_owned(),
        })
    }

    #[must_use]
    pub fn with_cognito(mut self, cognito: CognitoClient) -> Self {
        self.cognito = cognito;
        self
    }

    #[must_use]
    pub fn with_analytics(mut self, analytics: Option<AnalyticsClient>) -> Self {
        self.analytics = analytics;
        self
    }

    /// signs up a fresh, tagged test account and signs in to it
    pub async fn get_app_sync_login(&self) -> Result<Login, ProvisioningError> {
        let username = generate_username();
        let password = generate_password();

        self.cognito
            .sign_up(
                self.client_id("SignUp")?,
                &username,
                &password,
                &[("family_name", TEST_ACCOUNT_MARKER)],
                &[("autoConfirmUser", "true")],
            )
            .await?;

        self.password_login(username, password, AuthEvent::SignUp).await
    }

    /// signs in to an existing account
    pub async fn sign_in(&self, username: &str, password: SecretString) -> Result<Login, ProvisioningError> {
        self.password_login(username.to_owned(), password, AuthEvent::SignIn)
            .await
    }

    async fn password_login(
        &self,
        username: String,
        password: SecretString,
        event: AuthEvent,
    ) -> Result<Login, ProvisioningError> {
        let tokens = self
            .cognito
            .initiate_auth(self.client_id("InitiateAuth")?, &username, &password)
            .await?;

        let logins = BTreeMap::from([(self.user_pool_login_key(), tokens.id_token.expose_secret().clone())]);
        let (identity_id, credentials) = self.exchange(&logins).await?;
        self.record(&credentials, &identity_id, event).await;

        let client = ApiClient::new(
            &self.graphql_url,
            AuthMode::Iam {
                credentials,
                region: self.region.clone(),
            },
        )?;

        tracing::debug!(%identity_id, %username, "provisioned login");

        Ok(Login::new(identity_id, username, client)
            .with_password(password)
            .with_tokens(tokens))
    }

    /// mints an unauthenticated identity, its username is assigned by the backend
    pub async fn get_anonymous_app_sync_login(&self) -> Result<Login, ProvisioningError> {
        let (identity_id, credentials) = self.exchange(&BTreeMap::new()).await?;

        let client = ApiClient::new(
            &self.graphql_url,
            AuthMode::Iam {
                credentials,
                region: self.region.clone(),
            },
        )?;

        tracing::debug!(%identity_id, "provisioned anonymous login");

        Ok(Login::new(identity_id, String::new(), client))
    }

    /// exchanges a social provider's id token for an identity, the client forwards the token
    pub async fn get_federated_app_sync_login(
        &self,
        provider: FederatedProvider,
        token: SecretString,
    ) -> Result<Login, ProvisioningError> {
        let logins = BTreeMap::from([(provider.login_key().to_owned(), token.expose_secret().clone())]);
        let (identity_id, credentials) = self.exchange(&logins).await?;

        let client = ApiClient::new(&self.graphql_url, AuthMode::Bearer(token))?;

        tracing::debug!(%identity_id, %provider, "provisioned federated login");

        Ok(Login::new(identity_id, String::new(), client).with_credentials(credentials))
    }

    pub async fn forgot_password(&self, username: &str) -> Result<CodeDeliveryDetails, ProvisioningError> {
        self.cognito
            .forgot_password(self.client_id("ForgotPassword")?, username)
            .await
    }

    pub async fn confirm_forgot_password(
        &self,
        username: &str,
        confirmation_code: &str,
        new_password: &SecretString,
    ) -> Result<(), ProvisioningError> {
        let client_id = self.client_id("ConfirmForgotPassword")?;
        self.cognito
            .confirm_forgot_password(client_id, username, confirmation_code, new_password)
            .await
    }

    async fn exchange(
        &self,
        logins: &BTreeMap<String, String>,
    ) -> Result<(String, AwsCredentials), ProvisioningError> {
        let identity_id = self.cognito.get_id(&self.identity_pool_id, logins).await?;
        let credentials = self.cognito.get_credentials_for_identity(&identity_id, logins).await?;
        Ok((identity_id, credentials))
    }

    async fn record(&self, credentials: &AwsCredentials, identity_id: &str, event: AuthEvent) {
        let Some(analytics) = &self.analytics else {
            return;
        };
        if let Err(error) = analytics.record_event(credentials, identity_id, event).await {
            tracing::warn!(%error, %event, "could not record the analytics event");
        }
    }

    fn client_id(&self, operation: &'static str) -> Result<&str, ProvisioningError> {
        self.client_id
            .as_deref()
            .ok_or(ProvisioningError::MissingAppClient(operation))
    }

    /// the identity pool login key of the user pool's id tokens
    fn user_pool_login_key(&self) -> String {
        format!("cognito-idp.{}.amazonaws.com/{}", self.region, self.user_pool_id)
    }
}

/// `test-` followed by 12 lowercase alphanumerics
pub(crate) fn generate_username() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(USERNAME_SUFFIX_LENGTH)
        .map(|byte| char::from(byte).to_ascii_lowercase())
        .collect();
    format!("{USERNAME_PREFIX}{suffix}")
}

/// 16 random characters covering every class a password policy may require
pub(crate) fn generate_password() -> SecretString {
    let mut rng = rand::thread_rng();
    let pick = |rng: &mut rand::rngs::ThreadRng, from: &[u8]| from.choose(rng).copied().map_or('x', char::from);

    let mut characters = vec![
        pick(&mut rng, b"ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
        pick(&mut rng, b"abcdefghijklmnopqrstuvwxyz"),
        pick(&mut rng, b"0123456789"),
        pick(&mut rng, PASSWORD_SYMBOLS),
    ];
    characters.extend(
        (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(PASSWORD_LENGTH - characters.len())
            .map(char::from),
    );
    characters.shuffle(&mut rng);

    SecretString::new(characters.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::consts::{GRAPHQL_URL_VAR, IDENTITY_POOL_ID_VAR, TESTING_CLIENT_ID_VAR, USER_POOL_ID_VAR};
    use serde_json::json;
    use url::Url;
    use wiremock::{
        matchers::{body_partial_json, header, method},
        Mock, MockServer, ResponseTemplate,
    };

    const IDENTITY_ID: &str = "us-east-1:7a1e-identity";

    fn environment() -> Environment {
        Environment::from_vars([
            (USER_POOL_ID_VAR, "us-east-1_Pool"),
            (IDENTITY_POOL_ID_VAR, "us-east-1:0000-identity-pool"),
            (TESTING_CLIENT_ID_VAR, "testing-client"),
            (GRAPHQL_URL_VAR, "https://abc.appsync-api.us-east-1.amazonaws.com/graphql"),
        ])
    }

    fn target(operation: &str) -> wiremock::matchers::HeaderExactMatcher {
        header("x-amz-target", operation)
    }

    async fn mock_identity_pool(server: &MockServer) {
        Mock::given(method("POST"))
            .and(target("AWSCognitoIdentityService.GetId"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "IdentityId": IDENTITY_ID })))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(target("AWSCognitoIdentityService.GetCredentialsForIdentity"))
            .and(body_partial_json(json!({ "IdentityId": IDENTITY_ID })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "IdentityId": IDENTITY_ID,
                "Credentials": { "AccessKeyId": "ASIA", "SecretKey": "secret", "SessionToken": "session" }
            })))
            .mount(server)
            .await;
    }

    async fn provisioner(server: &MockServer) -> CognitoProvisioner {
        let url = Url::parse(&server.uri()).unwrap();
        CognitoProvisioner::for_tests(&environment())
            .unwrap()
            .with_cognito(CognitoClient::with_endpoints(url.clone(), url).unwrap())
    }

    #[tokio::test]
    async fn password_logins_are_tagged_and_exchanged_for_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(target("AWSCognitoIdentityProviderService.SignUp"))
            .and(body_partial_json(json!({
                "UserAttributes": [{ "Name": "family_name", "Value": TEST_ACCOUNT_MARKER }],
                "ClientMetadata": { "autoConfirmUser": "true" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "UserConfirmed": true, "UserSub": "sub" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(target("AWSCognitoIdentityProviderService.InitiateAuth"))
            .and(body_partial_json(json!({ "AuthFlow": "USER_PASSWORD_AUTH", "ClientId": "testing-client" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "AuthenticationResult": {
                    "AccessToken": "access",
                    "IdToken": "id-token",
                    "RefreshToken": "refresh",
                    "ExpiresIn": 3600,
                    "TokenType": "Bearer"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;
        mock_identity_pool(&server).await;

        let login = provisioner(&server).await.get_app_sync_login().await.unwrap();

        assert_eq!(login.user_id(), IDENTITY_ID);
        assert!(login.username().starts_with("test-"));
        assert_eq!(login.default_username(), login.username());
        assert!(login.password().is_some());
        assert_eq!(login.credentials().unwrap().access_key_id, "ASIA");

        let requests = server.received_requests().await.unwrap();
        let get_id = requests
            .iter()
            .find(|request| request.headers.get("x-amz-target").unwrap() == "AWSCognitoIdentityService.GetId")
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&get_id.body).unwrap();
        assert_eq!(
            body["Logins"]["cognito-idp.us-east-1.amazonaws.com/us-east-1_Pool"],
            "id-token"
        );
    }

    #[tokio::test]
    async fn rejected_sign_ups_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(target("AWSCognitoIdentityProviderService.SignUp"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "TooManyRequestsException",
                "message": "Rate exceeded"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let error = provisioner(&server).await.get_app_sync_login().await.unwrap_err();

        assert_eq!(error.rejection_kind(), Some("TooManyRequestsException"));
    }

    #[tokio::test]
    async fn anonymous_logins_have_no_password() {
        let server = MockServer::start().await;
        mock_identity_pool(&server).await;

        let login = provisioner(&server).await.get_anonymous_app_sync_login().await.unwrap();

        assert_eq!(login.user_id(), IDENTITY_ID);
        assert!(login.password().is_none());
        assert!(login.client().credentials().is_some());
    }

    #[tokio::test]
    async fn federated_logins_forward_the_provider_token() {
        let server = MockServer::start().await;
        mock_identity_pool(&server).await;

        let login = provisioner(&server)
            .await
            .get_federated_app_sync_login(FederatedProvider::Google, SecretString::new("google-token".to_owned()))
            .await
            .unwrap();

        assert!(matches!(login.client().auth(), AuthMode::Bearer(token) if token.expose_secret() == "google-token"));
        assert!(login.credentials().is_some());
    }

    #[test]
    fn missing_configuration_is_reported_before_any_request() {
        let environment = Environment::from_vars([(USER_POOL_ID_VAR, "us-east-1_Pool")]);

        assert!(matches!(
            CognitoProvisioner::for_tests(&environment),
            Err(ProvisioningError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn identities_need_no_app_client() {
        let server = MockServer::start().await;
        mock_identity_pool(&server).await;

        let environment = Environment::from_vars([
            (USER_POOL_ID_VAR, "us-east-1_Pool"),
            (IDENTITY_POOL_ID_VAR, "us-east-1:0000-identity-pool"),
            (GRAPHQL_URL_VAR, "https://abc.appsync-api.us-east-1.amazonaws.com/graphql"),
        ]);
        let url = Url::parse(&server.uri()).unwrap();
        let provisioner = CognitoProvisioner::for_identities(&environment)
            .unwrap()
            .with_cognito(CognitoClient::with_endpoints(url.clone(), url).unwrap());

        let login = provisioner
            .get_federated_app_sync_login(FederatedProvider::Apple, SecretString::new("apple-token".to_owned()))
            .await
            .unwrap();
        assert_eq!(login.user_id(), IDENTITY_ID);

        let error = provisioner
            .sign_in("alice", SecretString::new("password".to_owned()))
            .await
            .unwrap_err();
        assert!(matches!(error, ProvisioningError::MissingAppClient("InitiateAuth")));
    }

    #[test]
    fn generated_credentials_follow_the_account_format() {
        let username = generate_username();
        assert_eq!(username.len(), 17);
        assert!(username[5..].chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));

        let password = generate_password();
        let password = password.expose_secret();
        assert_eq!(password.chars().count(), 16);
        assert!(password.chars().any(|c| c.is_ascii_uppercase()));
        assert!(password.chars().any(|c| c.is_ascii_digit()));
    }
}
