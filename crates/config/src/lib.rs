use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "registrar.toml",
    "config/registrar.toml",
    "crates/config/registrar.toml",
    "../registrar.toml",
    "../config/registrar.toml",
];

/// Placeholder signing secret used when `ADMIN_JWT_SECRET` is not provided.
pub const DEFAULT_JWT_SECRET: &str = "someSecretKey";

/// Placeholder salt used when `API_TOKEN_SALT` is not provided.
pub const DEFAULT_API_TOKEN_SALT: &str = "xQDmHG/zJUOinU2bhk1iqw==";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub api_token: ApiTokenConfig,
    #[serde(default)]
    pub mail: MailConfig,
}

impl AppConfig {
    /// Names of the secrets that are still set to their published placeholder values.
    ///
    /// ```
    /// use registrar_config::AppConfig;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.insecure_defaults(), vec!["auth.jwt_secret", "api_token.salt"]);
    /// ```
    pub fn insecure_defaults(&self) -> Vec<&'static str> {
        let mut insecure = Vec::new();
        if self.auth.jwt_secret == DEFAULT_JWT_SECRET {
            insecure.push("auth.jwt_secret");
        }
        if self.api_token.salt == DEFAULT_API_TOKEN_SALT {
            insecure.push("api_token.salt");
        }
        insecure
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 1337,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://registrar.db".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "AuthConfig::default_jwt_ttl")]
    pub jwt_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Self::default_jwt_secret(),
            jwt_ttl_seconds: Self::default_jwt_ttl(),
        }
    }
}

impl AuthConfig {
    fn default_jwt_secret() -> String {
        DEFAULT_JWT_SECRET.to_string()
    }

    // 30 days
    const fn default_jwt_ttl() -> u64 {
        2_592_000
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTokenConfig {
    #[serde(default = "ApiTokenConfig::default_salt")]
    pub salt: String,
}

impl ApiTokenConfig {
    fn default_salt() -> String {
        DEFAULT_API_TOKEN_SALT.to_string()
    }
}

impl Default for ApiTokenConfig {
    fn default() -> Self {
        Self {
            salt: Self::default_salt(),
        }
    }
}

/// Outgoing mail settings for confirmation emails.
///
/// ```
/// use registrar_config::MailConfig;
///
/// let mail = MailConfig::default();
/// assert_eq!(mail.public_url, "http://127.0.0.1:1337");
/// assert!(mail.webhook_url.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "MailConfig::default_sender")]
    pub sender: String,
    #[serde(default = "MailConfig::default_public_url")]
    pub public_url: String,
    #[serde(default)]
    pub webhook_url: Option<String>,
}

impl MailConfig {
    fn default_sender() -> String {
        "no-reply@registrar.local".to_string()
    }

    fn default_public_url() -> String {
        "http://127.0.0.1:1337".to_string()
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            sender: Self::default_sender(),
            public_url: Self::default_public_url(),
            webhook_url: None,
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use registrar_config::load;
///
/// std::env::remove_var("REGISTRAR_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let db_max = i64::from(defaults.database.max_connections);
    let jwt_ttl = i64::try_from(defaults.auth.jwt_ttl_seconds).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default("database.max_connections", db_max)?
        .set_default("auth.jwt_secret", defaults.auth.jwt_secret.clone())?
        .set_default("auth.jwt_ttl_seconds", jwt_ttl)?
        .set_default("api_token.salt", defaults.api_token.salt.clone())?
        .set_default("mail.sender", defaults.mail.sender.clone())?
        .set_default("mail.public_url", defaults.mail.public_url.clone())?;

    let environment_overrides = config::Environment::with_prefix("REGISTRAR").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("REGISTRAR_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via REGISTRAR_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder
        .add_source(environment_overrides)
        .set_override_option("auth.jwt_secret", std::env::var("ADMIN_JWT_SECRET").ok())?
        .set_override_option("api_token.salt", std::env::var("API_TOKEN_SALT").ok())?
        .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?;

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.auth.jwt_ttl_seconds > i64::MAX as u64 {
        config.auth.jwt_ttl_seconds = i64::MAX as u64;
    }

    debug!(
        address = %config.http.address,
        port = config.http.port,
        database = %config.database.url,
        "loaded backend configuration"
    );
    Ok(config)
}
