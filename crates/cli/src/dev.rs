use crate::{auth_source::obtain_login, cli_input::DevCommand, errors::CliError, output::report};
use backend::dev::DevServer;
use common::environment::Environment;

/// serves the API locally, forwarding every request with the credentials of the chosen identity
#[tokio::main]
pub async fn dev(command: DevCommand) -> Result<(), CliError> {
    let (_, login) = obtain_login(command.auth, Environment::get()).await?;

    let server = DevServer::bind(login.client().clone(), command.port, command.search)
        .await
        .map_err(CliError::BackendError)?;
    let port = server.port().map_err(CliError::BackendError)?;

    report::start_server(port, command.port, &login.username());

    server.serve().await.map_err(CliError::BackendError)?;

    report::goodbye();

    Ok(())
}
