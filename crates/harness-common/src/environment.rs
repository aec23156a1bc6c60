use crate::{
    consts::{
        ANALYTICS_APPLICATION_ID_VAR, FRONTEND_CLIENT_ID_VAR, GRAPHQL_URL_VAR, IDENTITY_POOL_ID_VAR,
        PASSWORD_PUBLIC_KEY_VAR, TESTING_CLIENT_ID_VAR, USER_POOL_ID_VAR,
    },
    errors::CommonError,
};
use std::{collections::HashMap, env, sync::OnceLock};

/// a snapshot of the harness configuration
///
/// every value is optional at load time and required when used: accessors return
/// [`CommonError::MissingEnvironmentVariable`] for values that were not set, so components
/// validate what they need in their constructors, before any network call
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// the identity provider user pool, e.g. `us-east-1_AbCdEf`
    pub user_pool_id: Option<String>,
    /// the identity pool exchanging provider tokens for API credentials, e.g. `us-east-1:<uuid>`
    pub identity_pool_id: Option<String>,
    /// the app client used by tests, allowed to auto-confirm sign ups
    pub testing_client_id: Option<String>,
    /// the app client used by the interactive scripts
    pub frontend_client_id: Option<String>,
    /// the GraphQL endpoint of the backend
    pub graphql_url: Option<String>,
    /// the analytics application receiving auth events, analytics is disabled when absent
    pub analytics_application_id: Option<String>,
    /// the PEM encoded public key used to encrypt passwords before submission
    pub password_public_key: Option<String>,
}

/// static singleton for the environment struct
static ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

impl Environment {
    /// reads the configuration from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// builds the configuration from an explicit set of variables
    #[must_use]
    pub fn from_vars<'a>(vars: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let vars: HashMap<&str, &str> = vars.into_iter().collect();
        Self::from_lookup(|name| vars.get(name).map(|value| (*value).to_owned()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            user_pool_id: read(USER_POOL_ID_VAR),
            identity_pool_id: read(IDENTITY_POOL_ID_VAR),
            testing_client_id: read(TESTING_CLIENT_ID_VAR),
            frontend_client_id: read(FRONTEND_CLIENT_ID_VAR),
            graphql_url: read(GRAPHQL_URL_VAR),
            analytics_application_id: read(ANALYTICS_APPLICATION_ID_VAR),
            // keys pasted into a single line environment variable keep literal `\n`s
            password_public_key: read(PASSWORD_PUBLIC_KEY_VAR).map(|key| key.replace("\\n", "\n")),
        }
    }

    /// initializes the static Environment instance from the process environment
    ///
    /// returns the already initialized instance if called twice
    pub fn try_init() -> &'static Self {
        ENVIRONMENT.get_or_init(Self::from_env)
    }

    /// returns a reference to the static Environment instance
    ///
    /// # Panics
    ///
    /// panics if the Environment object was not previously initialized using `Environment::try_init()`
    #[must_use]
    pub fn get() -> &'static Self {
        match ENVIRONMENT.get() {
            Some(environment) => environment,
            // must be initialized in `main`
            #[allow(clippy::panic)]
            None => panic!("the environment object is uninitialized"),
        }
    }

    pub fn user_pool_id(&self) -> Result<&str, CommonError> {
        required(self.user_pool_id.as_deref(), USER_POOL_ID_VAR)
    }

    pub fn identity_pool_id(&self) -> Result<&str, CommonError> {
        required(self.identity_pool_id.as_deref(), IDENTITY_POOL_ID_VAR)
    }

    pub fn testing_client_id(&self) -> Result<&str, CommonError> {
        required(self.testing_client_id.as_deref(), TESTING_CLIENT_ID_VAR)
    }

    pub fn frontend_client_id(&self) -> Result<&str, CommonError> {
        required(self.frontend_client_id.as_deref(), FRONTEND_CLIENT_ID_VAR)
    }

    pub fn graphql_url(&self) -> Result<&str, CommonError> {
        required(self.graphql_url.as_deref(), GRAPHQL_URL_VAR)
    }

    pub fn password_public_key(&self) -> Result<&str, CommonError> {
        required(self.password_public_key.as_deref(), PASSWORD_PUBLIC_KEY_VAR)
    }

    /// optional, analytics events are skipped when unset
    pub fn analytics_application_id(&self) -> Option<&str> {
        self.analytics_application_id.as_deref()
    }

    /// the region hosting the identity provider, taken from the user pool id prefix
    pub fn region(&self) -> Result<&str, CommonError> {
        region_of(self.user_pool_id()?, '_')
    }
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, CommonError> {
    value.ok_or(CommonError::MissingEnvironmentVariable(name))
}

/// extracts the region prefix of a pool id (`us-east-1_AbCdEf`, `us-east-1:<uuid>`)
pub fn region_of(pool_id: &str, separator: char) -> Result<&str, CommonError> {
    pool_id
        .split_once(separator)
        .map(|(region, _)| region)
        .filter(|region| !region.is_empty())
        .ok_or_else(|| CommonError::MissingRegion(pool_id.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn missing_variables_are_reported_by_name() {
        let environment = Environment::from_vars([(USER_POOL_ID_VAR, "us-east-1_AbCdEf")]);

        assert_eq!(environment.user_pool_id().unwrap(), "us-east-1_AbCdEf");
        assert!(matches!(
            environment.graphql_url(),
            Err(CommonError::MissingEnvironmentVariable(GRAPHQL_URL_VAR))
        ));
        assert_eq!(environment.analytics_application_id(), None);
    }

    #[test]
    fn blank_variables_count_as_missing() {
        let environment = Environment::from_vars([(TESTING_CLIENT_ID_VAR, "  ")]);

        assert!(environment.testing_client_id.is_none());
    }

    #[test]
    fn escaped_newlines_in_public_key_are_restored() {
        let environment = Environment::from_vars([(PASSWORD_PUBLIC_KEY_VAR, "-----BEGIN-----\\nabc\\n-----END-----")]);

        assert_eq!(
            environment.password_public_key().unwrap(),
            "-----BEGIN-----\nabc\n-----END-----"
        );
    }

    #[rstest]
    #[case("us-east-1_AbCdEf", '_', "us-east-1")]
    #[case("eu-west-2:0a1b2c3d-0000-1111-2222-333344445555", ':', "eu-west-2")]
    fn region_is_the_pool_id_prefix(#[case] pool_id: &str, #[case] separator: char, #[case] region: &str) {
        assert_eq!(region_of(pool_id, separator).unwrap(), region);
    }

    #[test]
    fn pool_id_without_region_is_rejected() {
        assert!(matches!(region_of("AbCdEf", '_'), Err(CommonError::MissingRegion(_))));
    }
}
