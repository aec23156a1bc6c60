use std::time::Duration;

pub const APPSYNC_SERVICE: &str = "appsync";
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const USER_AGENT: &str = concat!("social-harness/", env!("CARGO_PKG_VERSION"));

pub const REALTIME_PROTOCOL: &str = "graphql-ws";
pub const REALTIME_CONNECT_PATH: &str = "/graphql/connect";
/// the base64 encoding of `{}`, the empty connection payload
pub const REALTIME_EMPTY_PAYLOAD: &str = "e30=";
pub const REALTIME_ACK_TIMEOUT: Duration = Duration::from_secs(15);
