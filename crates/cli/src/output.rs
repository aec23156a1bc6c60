pub mod report {
    use crate::errors::CliError;
    use backend::identity::types::CodeDeliveryDetails;
    use colored::Colorize;
    use common::consts::LOCALHOST;
    use std::path::Path;

    /// reports to stdout that the dev server has started
    pub fn start_server(port: u16, start_port: u16, username: &str) {
        if port != start_port {
            println!(
                "port {} is unavailable, started on the closest available port",
                start_port.to_string().bright_blue()
            );
        }
        println!("📡 listening on port {}\n", port.to_string().bright_blue());
        println!("- playground: {}", format!("http://{LOCALHOST}:{port}").bright_blue());
        println!("- endpoint:   {}", format!("http://{LOCALHOST}:{port}/graphql").bright_blue());
        if !username.is_empty() {
            println!("- signed in:  {}", username.bright_blue());
        }
        println!();
    }

    pub fn credentials_written(path: &Path) {
        eprintln!("✨ wrote the credentials to {}", path.display().to_string().bright_blue());
    }

    pub fn code_sent(delivery: &CodeDeliveryDetails) {
        match (&delivery.destination, &delivery.delivery_medium) {
            (Some(destination), Some(medium)) => eprintln!(
                "📨 a verification code was sent by {} to {}",
                medium.to_lowercase(),
                destination.bright_blue()
            ),
            (Some(destination), None) => {
                eprintln!("📨 a verification code was sent to {}", destination.bright_blue());
            }
            _ => eprintln!("📨 a verification code was sent"),
        }
    }

    pub fn password_reset(username: &str) {
        eprintln!("✨ the password of {} was reset", username.bright_blue());
    }

    /// reports an error to stderr
    pub fn error(error: &CliError) {
        eprintln!("{}", format!("error: {error}").bright_red());
        if let Some(hint) = error.to_hint() {
            eprintln!("{}", format!("hint: {hint}").bright_blue());
        }
    }

    pub fn goodbye() {
        eprintln!("{}", "\n👋 see you next time!".bright_blue());
    }
}
