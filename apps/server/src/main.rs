use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use registrar_backend_api::{build_router, AppState};
use registrar_config::load as load_config;
use registrar_runtime::{telemetry, BackendServices};
use registrar_users::{RegistrationSettings, SettingsProvider};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "registrar")]
#[command(about = "Registrar self-service registration backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Inspect or change the registration settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
    /// List registered users
    DumpUsers {
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    /// List roles available as default role
    Roles,
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the current settings as JSON
    Show,
    /// Update one or more settings
    Set(SettingsUpdate),
}

#[derive(Args, Debug, Default, PartialEq)]
struct SettingsUpdate {
    #[arg(long)]
    allow_register: Option<bool>,
    #[arg(long)]
    email_confirmation: Option<bool>,
    /// Role type assigned to new users
    #[arg(long)]
    default_role: Option<String>,
    /// Redirect target after confirmation; an empty value clears it
    #[arg(long)]
    redirection: Option<String>,
}

impl SettingsUpdate {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(self, mut settings: RegistrationSettings) -> RegistrationSettings {
        if let Some(allow_register) = self.allow_register {
            settings.allow_register = allow_register;
        }
        if let Some(email_confirmation) = self.email_confirmation {
            settings.email_confirmation = email_confirmation;
        }
        if let Some(default_role) = self.default_role {
            settings.default_role = default_role;
        }
        if let Some(redirection) = self.redirection {
            settings.email_confirmation_redirection =
                Some(redirection).filter(|target| !target.trim().is_empty());
        }
        settings
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing().context("failed to initialise tracing")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::Settings { action } => run_settings(action).await,
        Commands::DumpUsers { limit } => dump_users(limit).await,
        Commands::Roles => list_roles().await,
    }
}

async fn initialise() -> anyhow::Result<(registrar_config::AppConfig, BackendServices)> {
    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    Ok((config, services))
}

async fn run_server() -> anyhow::Result<()> {
    info!("starting Registrar backend");

    let (config, services) = initialise().await?;
    let state = AppState::new(services.registration.clone(), services.confirmation.clone());
    let app = build_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(registrar_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn run_settings(action: SettingsCommand) -> anyhow::Result<()> {
    let (_, services) = initialise().await?;

    let current = services
        .settings
        .registration_settings()
        .await
        .context("failed to read registration settings")?;

    let settings = match action {
        SettingsCommand::Show => current,
        SettingsCommand::Set(update) => {
            if update.is_empty() {
                bail!("nothing to update, pass at least one option");
            }

            let updated = update.apply(current);
            if services
                .roles
                .find_by_type(&updated.default_role)
                .await
                .context("failed to look up default role")?
                .is_none()
            {
                bail!("role type '{}' does not exist", updated.default_role);
            }

            services
                .settings
                .save(&updated)
                .await
                .context("failed to save registration settings")?;
            info!("registration settings updated");
            updated
        }
    };

    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

async fn dump_users(limit: u32) -> anyhow::Result<()> {
    let (_, services) = initialise().await?;

    let users = services
        .users
        .list(limit)
        .await
        .context("failed to fetch users")?;

    println!("=== USERS ===");
    if users.is_empty() {
        println!("No users found in database");
        return Ok(());
    }

    println!("Found {} users:", users.len());
    println!(
        "{:<5} {:<35} {:<8} {:<6} {:<10} {:<8} {:<25}",
        "ID", "Email", "Provider", "Role", "Confirmed", "Blocked", "Created At"
    );
    println!("{}", "-".repeat(100));

    for user in users {
        println!(
            "{:<5} {:<35} {:<8} {:<6} {:<10} {:<8} {:<25}",
            user.id,
            user.email,
            user.provider,
            user.role,
            user.confirmed,
            user.blocked,
            user.created_at.to_rfc3339()
        );
    }

    Ok(())
}

async fn list_roles() -> anyhow::Result<()> {
    let (_, services) = initialise().await?;

    let roles = services.roles.list().await.context("failed to fetch roles")?;

    println!("{:<5} {:<20} {:<20} {}", "ID", "Type", "Name", "Description");
    println!("{}", "-".repeat(70));
    for role in roles {
        println!(
            "{:<5} {:<20} {:<20} {}",
            role.id,
            role.role_type,
            role.name,
            role.description.as_deref().unwrap_or("")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["registrar"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn settings_set_parses_flags() {
        let cli = Cli::try_parse_from([
            "registrar",
            "settings",
            "set",
            "--allow-register",
            "false",
            "--default-role",
            "public",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Settings {
                action: SettingsCommand::Set(update),
            }) => {
                assert_eq!(update.allow_register, Some(false));
                assert_eq!(update.default_role.as_deref(), Some("public"));
                assert_eq!(update.email_confirmation, None);
            }
            _ => panic!("expected settings set"),
        }
    }

    #[test]
    fn update_only_touches_given_fields() {
        let update = SettingsUpdate {
            email_confirmation: Some(true),
            redirection: Some("https://app.example.com".into()),
            ..SettingsUpdate::default()
        };

        let settings = update.apply(RegistrationSettings::default());
        assert!(settings.allow_register);
        assert!(settings.email_confirmation);
        assert_eq!(settings.default_role, "authenticated");
        assert_eq!(
            settings.email_confirmation_redirection.as_deref(),
            Some("https://app.example.com")
        );
    }

    #[test]
    fn empty_redirection_clears_it() {
        let current = RegistrationSettings {
            email_confirmation_redirection: Some("https://old.example.com".into()),
            ..RegistrationSettings::default()
        };
        let update = SettingsUpdate {
            redirection: Some(String::new()),
            ..SettingsUpdate::default()
        };

        assert_eq!(update.apply(current).email_confirmation_redirection, None);
        assert!(SettingsUpdate::default().is_empty());
    }
}
