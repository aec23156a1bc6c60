pub const USER_POOL_ID_VAR: &str = "COGNITO_USER_POOL_ID";
pub const IDENTITY_POOL_ID_VAR: &str = "COGNITO_IDENTITY_POOL_ID";
pub const TESTING_CLIENT_ID_VAR: &str = "COGNITO_TESTING_CLIENT_ID";
pub const FRONTEND_CLIENT_ID_VAR: &str = "COGNITO_FRONTEND_CLIENT_ID";
pub const GRAPHQL_URL_VAR: &str = "APPSYNC_GRAPHQL_URL";
pub const ANALYTICS_APPLICATION_ID_VAR: &str = "PINPOINT_APPLICATION_ID";
pub const PASSWORD_PUBLIC_KEY_VAR: &str = "PASSWORD_ENCRYPTION_PUBLIC_KEY";

/// every variable read by [`crate::environment::Environment::from_env`]
pub const ENVIRONMENT_VARIABLES: [&str; 7] = [
    USER_POOL_ID_VAR,
    IDENTITY_POOL_ID_VAR,
    TESTING_CLIENT_ID_VAR,
    FRONTEND_CLIENT_ID_VAR,
    GRAPHQL_URL_VAR,
    ANALYTICS_APPLICATION_ID_VAR,
    PASSWORD_PUBLIC_KEY_VAR,
];

/// the value of the `family_name` attribute set on every account created by the harness,
/// used to find and clean up test accounts in bulk
pub const TEST_ACCOUNT_MARKER: &str = "SERVICE-INTEGRATION-TEST-USER";

pub const LOCALHOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4000;
pub const MAX_PORT: u16 = u16::MAX;

pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const TRACE_LOG_FILTER: &str = "info,social_harness_backend=trace,social_auth=trace";
