pub mod analytics;
pub mod cognito;
pub mod errors;
pub mod types;
