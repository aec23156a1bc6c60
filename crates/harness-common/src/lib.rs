/*!
The common crate provides configuration and shared types for the social API test harness
*/

#![forbid(unsafe_code)]

pub mod consts;
pub mod environment;
pub mod errors;
pub mod types;
pub mod utils;
