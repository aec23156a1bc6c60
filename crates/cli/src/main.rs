#![cfg_attr(test, allow(unused_crate_dependencies))]
#![forbid(unsafe_code)]

mod auth_source;
mod cli_input;
mod credentials;
mod dev;
mod errors;
mod forgot_password;
mod output;
mod prompts;

use crate::{
    cli_input::{Args, SubCommand},
    credentials::credentials,
    dev::dev,
    forgot_password::forgot_password,
};
use clap::Parser;
use common::{consts::DEFAULT_LOG_FILTER, environment::Environment, errors::CommonError};
use errors::CliError;
use output::report;
use std::{io, process};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let args = Args::parse();

    let exit_code = match try_main(args) {
        Ok(()) => 0,
        Err(CliError::PromptCancelled) => {
            report::goodbye();
            1
        }
        Err(error) => {
            report::error(&error);
            1
        }
    };

    process::exit(exit_code);
}

fn try_main(args: Args) -> Result<(), CliError> {
    let filter = match args.log_filter() {
        Some(argument_filter) => EnvFilter::builder().parse_lossy(argument_filter),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };

    // stdout carries the credential bundle
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    tracing::trace!("subcommand: {}", args.command);

    let environment = Environment::try_init();
    validate_environment(environment, &args.command).map_err(CliError::CommonError)?;

    match args.command {
        SubCommand::Credentials(command) => credentials(command),
        SubCommand::ForgotPassword(command) => forgot_password(command),
        SubCommand::Dev(command) => dev(command),
    }
}

/// checks the variables a subcommand needs before anything is prompted for or requested
fn validate_environment(environment: &Environment, command: &SubCommand) -> Result<(), CommonError> {
    environment.region()?;
    environment.identity_pool_id()?;
    environment.graphql_url()?;

    let client_id = match command.auth_source() {
        Some(kind) if kind.uses_testing_client() => environment.testing_client_id(),
        Some(kind) if kind.uses_user_pool() => environment.frontend_client_id(),
        Some(_) => return Ok(()),
        None if matches!(command, SubCommand::ForgotPassword(_)) => environment.frontend_client_id(),
        // checked once the source is selected
        None => return Ok(()),
    };

    client_id.map(|_| ())
}
