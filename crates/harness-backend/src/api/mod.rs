pub mod client;
pub mod consts;
pub mod errors;
pub mod graphql;
pub mod password;
pub mod realtime;
pub mod signing;
pub mod upload;
