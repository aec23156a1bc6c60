use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommonError {
    /// returned if a required environment variable is not set or is empty
    #[error("the environment variable '{0}' is required but was not set")]
    MissingEnvironmentVariable(&'static str),
    /// returned if an environment variable is set but cannot be interpreted
    #[error("the environment variable '{name}' is invalid: {reason}")]
    InvalidEnvironmentVariable { name: &'static str, reason: String },
    /// returned if a pool id does not carry a region prefix
    #[error("could not determine the region from '{0}'")]
    MissingRegion(String),
}
