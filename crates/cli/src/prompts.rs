use crate::errors::CliError;
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use secrecy::SecretString;

pub fn handle_inquire_error(error: InquireError) -> CliError {
    match error {
        InquireError::NotTTY => CliError::PromptNotTTY,
        InquireError::IO(error) => CliError::PromptIoError(error),
        InquireError::OperationCanceled | InquireError::OperationInterrupted => CliError::PromptCancelled,
        InquireError::InvalidConfiguration(message) => CliError::PromptError(message),
        InquireError::Custom(error) => CliError::PromptError(error.to_string()),
    }
}

/// prompts for a value that must not be blank
pub fn text(message: &str, name: &'static str) -> Result<String, CliError> {
    let value = Text::new(message).prompt().map_err(handle_inquire_error)?;
    non_empty(value, name)
}

/// prompts for a secret without echoing it
pub fn secret(message: &str, name: &'static str) -> Result<SecretString, CliError> {
    let value = Password::new(message)
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .map_err(handle_inquire_error)?;
    non_blank_secret(value, name)
}

/// prompts for a new secret, asking for it twice
pub fn new_secret(message: &str, name: &'static str) -> Result<SecretString, CliError> {
    let value = Password::new(message)
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_custom_confirmation_message("Confirm the new password:")
        .with_custom_confirmation_error_message("The passwords don't match.")
        .prompt()
        .map_err(handle_inquire_error)?;
    non_blank_secret(value, name)
}

pub(crate) fn non_empty(value: String, name: &'static str) -> Result<String, CliError> {
    let value = value.trim().to_owned();
    if value.is_empty() {
        Err(CliError::EmptyInput(name))
    } else {
        Ok(value)
    }
}

/// rejects a blank secret, keeping surrounding whitespace as part of it
pub(crate) fn non_blank_secret(value: String, name: &'static str) -> Result<SecretString, CliError> {
    if value.trim().is_empty() {
        Err(CliError::EmptyInput(name))
    } else {
        Ok(SecretString::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn blank_input_is_rejected_by_name() {
        assert!(matches!(non_empty("  ".to_owned(), "username"), Err(CliError::EmptyInput("username"))));
        assert_eq!(non_empty(" alice ".to_owned(), "username").unwrap(), "alice");
    }

    #[test]
    fn secrets_keep_their_whitespace() {
        assert!(matches!(
            non_blank_secret(" \t".to_owned(), "password"),
            Err(CliError::EmptyInput("password"))
        ));
        assert_eq!(
            non_blank_secret(" pass word ".to_owned(), "password")
                .unwrap()
                .expose_secret(),
            " pass word "
        );
    }

    #[test]
    fn cancelled_prompts_are_reported_as_cancelled() {
        assert!(matches!(
            handle_inquire_error(InquireError::OperationInterrupted),
            CliError::PromptCancelled
        ));
        assert!(matches!(handle_inquire_error(InquireError::NotTTY), CliError::PromptNotTTY));
    }
}
