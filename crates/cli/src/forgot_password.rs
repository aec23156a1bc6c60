use crate::{cli_input::ForgotPasswordCommand, errors::CliError, output::report, prompts};
use backend::login::CognitoProvisioner;
use common::environment::Environment;

/// sends a verification code to the account and sets the new password it unlocks
#[tokio::main]
pub async fn forgot_password(command: ForgotPasswordCommand) -> Result<(), CliError> {
    let provisioner = CognitoProvisioner::for_scripts(Environment::get())?;

    let username = match command.username {
        Some(username) => prompts::non_empty(username, "username")?,
        None => prompts::text("Username:", "username")?,
    };

    let delivery = provisioner.forgot_password(&username).await?;
    report::code_sent(&delivery);

    let code = prompts::text("Verification code:", "verification code")?;
    let password = prompts::new_secret("New password:", "password")?;

    provisioner
        .confirm_forgot_password(&username, &code, &password)
        .await?;

    report::password_reset(&username);

    Ok(())
}
