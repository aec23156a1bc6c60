use backend::{api::errors::ApiError, errors::BackendError, identity::errors::ProvisioningError};
use common::errors::CommonError;
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    /// wraps an error originating in the common crate
    #[error(transparent)]
    CommonError(CommonError),
    /// wraps an identity provider error
    #[error(transparent)]
    ProvisioningError(ProvisioningError),
    /// wraps an error originating in the backend crate api module
    #[error(transparent)]
    BackendApiError(ApiError),
    /// wraps a dev server error
    #[error(transparent)]
    BackendError(BackendError),
    /// returned if an interactive prompt fails due to the input device not being a TTY
    #[error("could not show an interactive prompt due to the input device not being a TTY")]
    PromptNotTTY,
    /// returned if an IO error is encountered when trying to display an interactive prompt
    #[error("encountered an IO error while showing an interactive prompt\nCaused by: {0}")]
    PromptIoError(io::Error),
    /// returned if an interactive prompt was cancelled by the user
    #[error("the prompt was cancelled")]
    PromptCancelled,
    /// returned if an interactive prompt could not be shown for any other reason
    #[error("could not show an interactive prompt: {0}")]
    PromptError(String),
    /// returned if a required value was entered empty
    #[error("the {0} cannot be empty")]
    EmptyInput(&'static str),
    /// returned if the credential bundle could not be serialized
    #[error("could not serialize the credentials\nCaused by: {0}")]
    SerializeCredentials(serde_json::Error),
    /// returned if the credential bundle could not be written to the requested file
    #[error("could not write the credentials to '{}'\nCaused by: {source}", path.display())]
    WriteCredentials { path: PathBuf, source: io::Error },
}

impl From<ProvisioningError> for CliError {
    fn from(error: ProvisioningError) -> Self {
        match error {
            ProvisioningError::Configuration(error) => Self::CommonError(error),
            error => Self::ProvisioningError(error),
        }
    }
}

impl CliError {
    /// returns the appropriate hint for a [`CliError`]
    pub fn to_hint(&self) -> Option<String> {
        match self {
            Self::CommonError(CommonError::MissingEnvironmentVariable(name)) => {
                Some(format!("export '{name}' with the value of your deployment before running social-auth"))
            }
            Self::CommonError(CommonError::MissingRegion(_)) => {
                Some("user pool ids look like 'us-east-1_AbCdEf', check COGNITO_USER_POOL_ID".to_owned())
            }
            Self::ProvisioningError(error) => match error.rejection_kind() {
                Some("NotAuthorizedException") => Some("check the username and password".to_owned()),
                Some("UserNotFoundException") => {
                    Some("no account has this username, try the 'sign-up' source to create one".to_owned())
                }
                Some("CodeMismatchException" | "ExpiredCodeException") => {
                    Some("run 'social-auth forgot-password' again to receive a new code".to_owned())
                }
                Some("InvalidPasswordException") => {
                    Some("passwords need upper and lower case letters, numbers and symbols".to_owned())
                }
                Some("TooManyRequestsException" | "LimitExceededException") => {
                    Some("the identity provider is throttling requests, wait a moment and try again".to_owned())
                }
                _ if matches!(error, ProvisioningError::ConnectionError) => {
                    Some("check your network connection".to_owned())
                }
                _ => None,
            },
            Self::BackendApiError(ApiError::ConnectionError) => Some("check your network connection".to_owned()),
            Self::BackendError(BackendError::AvailablePort) => {
                Some("try supplying a larger port range to search by supplying a lower --port number".to_owned())
            }
            Self::BackendError(BackendError::PortInUse(_)) => {
                Some("try using a different --port number or supplying the --search flag".to_owned())
            }
            Self::PromptNotTTY => {
                Some("pass the --source argument and the values it needs to run without prompts".to_owned())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::consts::GRAPHQL_URL_VAR;

    #[test]
    fn configuration_errors_of_the_provisioner_are_unwrapped() {
        let error = CliError::from(ProvisioningError::Configuration(CommonError::MissingEnvironmentVariable(
            GRAPHQL_URL_VAR,
        )));

        assert!(matches!(
            error,
            CliError::CommonError(CommonError::MissingEnvironmentVariable(GRAPHQL_URL_VAR))
        ));
        assert_eq!(
            error.to_hint().unwrap(),
            "export 'APPSYNC_GRAPHQL_URL' with the value of your deployment before running social-auth"
        );
    }

    #[test]
    fn rejections_are_hinted_by_kind() {
        let error = CliError::from(ProvisioningError::Rejected {
            operation: "ConfirmForgotPassword",
            kind: "CodeMismatchException".to_owned(),
            message: "Invalid verification code provided, please try again.".to_owned(),
        });

        assert_eq!(
            error.to_hint().unwrap(),
            "run 'social-auth forgot-password' again to receive a new code"
        );
    }

    #[test]
    fn unknown_rejections_have_no_hint() {
        let error = CliError::from(ProvisioningError::Rejected {
            operation: "InitiateAuth",
            kind: "InternalErrorException".to_owned(),
            message: "something broke".to_owned(),
        });

        assert_eq!(error.to_hint(), None);
    }
}
