use crate::{
    cli_input::{AuthArguments, AuthSourceKind},
    errors::CliError,
    prompts::{self, handle_inquire_error},
};
use backend::login::{CognitoProvisioner, Login};
use clap::ValueEnum;
use common::{environment::Environment, types::FederatedProvider};
use inquire::Select;
use secrecy::SecretString;

/// a fully specified way of obtaining an identity, each variant carrying only what it needs
#[derive(Debug)]
pub enum AuthSource {
    SignUp,
    Password { username: String, password: SecretString },
    Anonymous,
    Google { token: SecretString },
    Apple { token: SecretString },
}

impl AuthSource {
    /// completes the chosen source from the arguments, prompting for the fields that are missing
    pub fn resolve(kind: AuthSourceKind, arguments: AuthArguments) -> Result<Self, CliError> {
        let source = match kind {
            AuthSourceKind::SignUp => Self::SignUp,
            AuthSourceKind::Anonymous => Self::Anonymous,
            AuthSourceKind::Password => Self::Password {
                username: match arguments.username {
                    Some(username) => prompts::non_empty(username, "username")?,
                    None => prompts::text("Username:", "username")?,
                },
                password: match arguments.password {
                    Some(password) => prompts::non_blank_secret(password, "password")?,
                    None => prompts::secret("Password:", "password")?,
                },
            },
            AuthSourceKind::Google => Self::Google {
                token: provider_token(arguments.token, FederatedProvider::Google)?,
            },
            AuthSourceKind::Apple => Self::Apple {
                token: provider_token(arguments.token, FederatedProvider::Apple)?,
            },
        };

        Ok(source)
    }

    pub fn kind(&self) -> AuthSourceKind {
        match self {
            Self::SignUp => AuthSourceKind::SignUp,
            Self::Password { .. } => AuthSourceKind::Password,
            Self::Anonymous => AuthSourceKind::Anonymous,
            Self::Google { .. } => AuthSourceKind::Google,
            Self::Apple { .. } => AuthSourceKind::Apple,
        }
    }

    pub async fn login(self, provisioner: &CognitoProvisioner) -> Result<Login, CliError> {
        tracing::debug!(source = %self.kind(), "obtaining an identity");

        let login = match self {
            Self::SignUp => provisioner.get_app_sync_login().await?,
            Self::Password { username, password } => provisioner.sign_in(&username, password).await?,
            Self::Anonymous => provisioner.get_anonymous_app_sync_login().await?,
            Self::Google { token } => {
                provisioner
                    .get_federated_app_sync_login(FederatedProvider::Google, token)
                    .await?
            }
            Self::Apple { token } => {
                provisioner
                    .get_federated_app_sync_login(FederatedProvider::Apple, token)
                    .await?
            }
        };

        Ok(login)
    }
}

/// the source given on the command line, or the one picked interactively
pub fn select_kind(source: Option<AuthSourceKind>) -> Result<AuthSourceKind, CliError> {
    match source {
        Some(kind) => Ok(kind),
        None => Select::new("How should the identity be obtained?", AuthSourceKind::value_variants().to_vec())
            .prompt()
            .map_err(handle_inquire_error),
    }
}

/// the provisioner for a source, sign ups go through the auto-confirming testing app client
pub fn provisioner(kind: AuthSourceKind, environment: &Environment) -> Result<CognitoProvisioner, CliError> {
    let provisioner = if kind.uses_testing_client() {
        CognitoProvisioner::for_tests(environment)?
    } else if kind.uses_user_pool() {
        CognitoProvisioner::for_scripts(environment)?
    } else {
        CognitoProvisioner::for_identities(environment)?
    };

    Ok(provisioner)
}

/// selects and completes a source, validating its configuration before prompting for its fields
pub async fn obtain_login(
    arguments: AuthArguments,
    environment: &Environment,
) -> Result<(AuthSourceKind, Login), CliError> {
    let kind = select_kind(arguments.source)?;
    let provisioner = provisioner(kind, environment)?;
    let login = AuthSource::resolve(kind, arguments)?.login(&provisioner).await?;

    Ok((kind, login))
}

fn provider_token(token: Option<String>, provider: FederatedProvider) -> Result<SecretString, CliError> {
    match token {
        Some(token) => prompts::non_blank_secret(token, "token"),
        None => prompts::secret(&format!("The {provider} id token:"), "token"),
    }
}
