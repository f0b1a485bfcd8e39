//! Registration settings backed by the plugin store.

use async_trait::async_trait;
use registrar_database::{DatabaseResult, SettingsRepository};
use tracing::warn;

use super::SettingsProvider;
use crate::entities::{RegistrationSettings, SETTINGS_KEY};

/// Reads [`RegistrationSettings`] from the `advanced` plugin-store document
#[derive(Clone)]
pub struct PluginStoreSettings {
    repository: SettingsRepository,
}

impl PluginStoreSettings {
    pub fn new(repository: SettingsRepository) -> Self {
        Self { repository }
    }

    pub async fn save(&self, settings: &RegistrationSettings) -> DatabaseResult<()> {
        self.repository.set(SETTINGS_KEY, settings).await
    }
}

#[async_trait]
impl SettingsProvider for PluginStoreSettings {
    async fn registration_settings(&self) -> DatabaseResult<RegistrationSettings> {
        match self.repository.get(SETTINGS_KEY).await? {
            Some(settings) => Ok(settings),
            None => {
                warn!(key = SETTINGS_KEY, "registration settings missing, using defaults");
                Ok(RegistrationSettings::default())
            }
        }
    }
}
