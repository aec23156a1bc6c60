use clap::{Parser, ValueEnum};
use common::consts::{DEFAULT_PORT, TRACE_LOG_FILTER};
use std::path::PathBuf;

/// How the identity behind a set of credentials is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, strum::Display)]
#[clap(rename_all = "kebab-case")]
pub enum AuthSourceKind {
    /// Sign up a fresh test account
    #[strum(serialize = "sign up a new test account")]
    SignUp,
    /// Sign in to an existing account with a username and password
    #[strum(serialize = "sign in with a username and password")]
    Password,
    /// Use an unauthenticated identity
    #[strum(serialize = "anonymous")]
    Anonymous,
    /// Sign in with a Google id token
    #[strum(serialize = "google id token")]
    Google,
    /// Sign in with an Apple id token
    #[strum(serialize = "apple id token")]
    Apple,
}

impl AuthSourceKind {
    /// the name accepted by `--source`
    pub fn name(self) -> &'static str {
        match self {
            Self::SignUp => "sign-up",
            Self::Password => "password",
            Self::Anonymous => "anonymous",
            Self::Google => "google",
            Self::Apple => "apple",
        }
    }

    /// whether the source signs up through the auto-confirming testing app client
    pub fn uses_testing_client(self) -> bool {
        matches!(self, Self::SignUp)
    }

    /// whether the source signs in to the user pool, which needs an app client
    pub fn uses_user_pool(self) -> bool {
        matches!(self, Self::SignUp | Self::Password)
    }
}

/// Arguments selecting the identity, prompted for when missing
#[derive(Debug, Default, clap::Args)]
pub struct AuthArguments {
    /// How to obtain the identity, prompted for if omitted
    #[arg(short, long)]
    pub source: Option<AuthSourceKind>,
    /// The username to sign in with, for the 'password' source
    #[arg(short, long)]
    pub username: Option<String>,
    /// The password to sign in with, for the 'password' source
    #[arg(long, env = "SOCIAL_AUTH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// The id token of the social provider, for the 'google' and 'apple' sources
    #[arg(long, env = "SOCIAL_AUTH_PROVIDER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Print a credential bundle for an identity
#[derive(Debug, Parser)]
pub struct CredentialsCommand {
    #[command(flatten)]
    pub auth: AuthArguments,
    /// Write the bundle to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Reset the password of an existing account
#[derive(Debug, Parser)]
pub struct ForgotPasswordCommand {
    /// The account to reset, prompted for if omitted
    #[arg(short, long)]
    pub username: Option<String>,
}

/// Serve the API locally through the credentials of an identity
#[derive(Debug, Parser)]
pub struct DevCommand {
    #[command(flatten)]
    pub auth: AuthArguments,
    /// Use a specific port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// If a given port is unavailable, search for another
    #[arg(long)]
    pub search: bool,
}

#[derive(Debug, Parser, strum::AsRefStr, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SubCommand {
    /// Print a credential bundle for a new or existing identity
    Credentials(CredentialsCommand),
    /// Reset the password of an existing account with a verification code
    ForgotPassword(ForgotPasswordCommand),
    /// Serve a GraphiQL playground and an endpoint forwarding requests with the identity's credentials
    Dev(DevCommand),
}

impl SubCommand {
    /// the auth source selected on the command line, if the subcommand takes one
    pub fn auth_source(&self) -> Option<AuthSourceKind> {
        match self {
            Self::Credentials(command) => command.auth.source,
            Self::Dev(command) => command.auth.source,
            Self::ForgotPassword(_) => None,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "social-auth", version)]
/// Helper scripts for the social API test harness
pub struct Args {
    /// Set the tracing level
    #[arg(short, long, default_value_t = 0)]
    pub trace: u16,
    #[command(subcommand)]
    pub command: SubCommand,
}

impl Args {
    /// the filter forced by `--trace`, `RUST_LOG` applies otherwise
    pub fn log_filter(&self) -> Option<&str> {
        (self.trace >= 1).then_some(TRACE_LOG_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn arguments_are_consistent() {
        Args::command().debug_assert();
    }

    #[rstest]
    #[case("sign-up", AuthSourceKind::SignUp)]
    #[case("password", AuthSourceKind::Password)]
    #[case("anonymous", AuthSourceKind::Anonymous)]
    #[case("google", AuthSourceKind::Google)]
    #[case("apple", AuthSourceKind::Apple)]
    fn sources_are_selected_by_name(#[case] name: &str, #[case] kind: AuthSourceKind) {
        let args = Args::try_parse_from(["social-auth", "credentials", "--source", name]).unwrap();

        assert_eq!(args.command.auth_source(), Some(kind));
        assert_eq!(kind.name(), name);
    }

    #[test]
    fn dev_defaults_to_the_default_port() {
        let args = Args::try_parse_from(["social-auth", "dev"]).unwrap();

        let SubCommand::Dev(command) = args.command else {
            unreachable!("parsed a different subcommand");
        };

        assert_eq!(command.port, DEFAULT_PORT);
        assert!(!command.search);
        assert_eq!(command.auth.source, None);
    }

    #[test]
    fn trace_flag_selects_the_trace_filter() {
        let args = Args::try_parse_from(["social-auth", "--trace", "1", "forgot-password"]).unwrap();

        assert_eq!(args.log_filter(), Some(TRACE_LOG_FILTER));
        assert_eq!(args.command.as_ref(), "forgot-password");
    }
}
