use std::sync::Arc;

use anyhow::{Context, Result};
use registrar_auth::JwtIssuer;
use registrar_config::{AppConfig, MailConfig};
use registrar_database::{
    initialize_database, Pool, RoleRepository, SettingsRepository, UserRepository,
};
use registrar_users::{
    ConfirmationService, EmailConfirmationNotifier, LogTransport, MailTransport,
    PluginStoreSettings, RegistrationService, WebhookTransport,
};
use tracing::{info, warn};

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::DEBUG)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Everything the HTTP layer and the CLI need, wired from one config.
#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: Pool,
    pub users: UserRepository,
    pub roles: RoleRepository,
    pub settings: PluginStoreSettings,
    pub registration: Arc<RegistrationService>,
    pub confirmation: Arc<ConfirmationService>,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        for setting in config.insecure_defaults() {
            warn!(setting, "using the published default value, override it in production");
        }

        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to initialise database")?;

        let users = UserRepository::new(db_pool.clone());
        let roles = RoleRepository::new(db_pool.clone());
        let settings = PluginStoreSettings::new(SettingsRepository::new(db_pool.clone()));

        let notifier = Arc::new(EmailConfirmationNotifier::new(
            Arc::new(users.clone()),
            mail_transport(&config.mail),
            &config.mail,
        ));

        let registration = Arc::new(RegistrationService::new(
            Arc::new(settings.clone()),
            Arc::new(users.clone()),
            Arc::new(roles.clone()),
            Arc::new(JwtIssuer::from_config(&config.auth)),
            notifier.clone(),
        ));
        let confirmation = Arc::new(ConfirmationService::new(
            Arc::new(settings.clone()),
            Arc::new(users.clone()),
            notifier,
        ));

        info!(database = %config.database.url, "registration services ready");

        Ok(Self {
            db_pool,
            users,
            roles,
            settings,
            registration,
            confirmation,
        })
    }
}

/// Webhook delivery when a URL is configured, the log otherwise
pub fn mail_transport(config: &MailConfig) -> Arc<dyn MailTransport> {
    match config.webhook_url.as_deref().filter(|url| !url.trim().is_empty()) {
        Some(url) => {
            info!(%url, "confirmation mail goes to webhook");
            Arc::new(WebhookTransport::new(url))
        }
        None => {
            info!("no mail webhook configured, confirmation mail is only logged");
            Arc::new(LogTransport)
        }
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
