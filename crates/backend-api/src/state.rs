use std::sync::Arc;

use registrar_users::{ConfirmationService, RegistrationService};

#[derive(Clone)]
pub struct AppState {
    registration: Arc<RegistrationService>,
    confirmation: Arc<ConfirmationService>,
}

impl AppState {
    pub fn new(
        registration: Arc<RegistrationService>,
        confirmation: Arc<ConfirmationService>,
    ) -> Self {
        Self {
            registration,
            confirmation,
        }
    }

    pub fn registration(&self) -> &RegistrationService {
        &self.registration
    }

    pub fn confirmation(&self) -> &ConfirmationService {
        &self.confirmation
    }
}
