//! Storage seams used by the services, with adapters for the SQLite
//! repositories.

use async_trait::async_trait;
use registrar_database::{DatabaseResult, NewUser, RoleRecord, UserRecord};

use crate::entities::RegistrationSettings;

pub mod role_store;
pub mod settings_provider;
pub mod user_store;

pub use settings_provider::PluginStoreSettings;

/// Read access to the registration settings. Fetched on every request.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    async fn registration_settings(&self) -> DatabaseResult<RegistrationSettings>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Lookup by already-normalized email
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<UserRecord>>;
    async fn find_by_confirmation_token(&self, token: &str)
        -> DatabaseResult<Option<UserRecord>>;
    async fn create(&self, user: &NewUser) -> DatabaseResult<UserRecord>;
    async fn set_confirmation_token(&self, user_id: i64, token: Option<&str>)
        -> DatabaseResult<()>;
    async fn mark_confirmed(&self, user_id: i64) -> DatabaseResult<UserRecord>;
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn find_by_type(&self, role_type: &str) -> DatabaseResult<Option<RoleRecord>>;
}
