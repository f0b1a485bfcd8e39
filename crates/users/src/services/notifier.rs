//! Confirmation email delivery.

use std::sync::Arc;

use async_trait::async_trait;
use registrar_auth::generate_confirmation_token;
use registrar_config::MailConfig;
use tracing::info;

use super::mailer::{MailTransport, OutgoingMail};
use crate::entities::SanitizedUser;
use crate::repositories::UserStore;
use crate::types::NotifierError;

const CONFIRMATION_SUBJECT: &str = "Account confirmation";

#[async_trait]
pub trait ConfirmationNotifier: Send + Sync {
    async fn send_confirmation_email(&self, user: &SanitizedUser) -> Result<(), NotifierError>;
}

/// Stores a fresh confirmation token on the user and mails them a link
/// that redeems it.
pub struct EmailConfirmationNotifier {
    users: Arc<dyn UserStore>,
    transport: Arc<dyn MailTransport>,
    sender: String,
    public_url: String,
}

impl EmailConfirmationNotifier {
    pub fn new(
        users: Arc<dyn UserStore>,
        transport: Arc<dyn MailTransport>,
        config: &MailConfig,
    ) -> Self {
        Self {
            users,
            transport,
            sender: config.sender.clone(),
            public_url: config.public_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn confirmation_link(&self, token: &str) -> String {
        format!("{}/auth/email-confirmation?confirmation={token}", self.public_url)
    }
}

#[async_trait]
impl ConfirmationNotifier for EmailConfirmationNotifier {
    async fn send_confirmation_email(&self, user: &SanitizedUser) -> Result<(), NotifierError> {
        let token = generate_confirmation_token();
        self.users
            .set_confirmation_token(user.id, Some(&token))
            .await?;

        let link = self.confirmation_link(&token);
        let mail = OutgoingMail {
            to: user.email.clone(),
            from: self.sender.clone(),
            subject: CONFIRMATION_SUBJECT.to_string(),
            text: format!(
                "Thank you for registering!\n\nYou have to confirm your email address. Please click on the link below.\n\n{link}\n"
            ),
        };

        self.transport.send(&mail).await?;
        info!(user_id = user.id, "confirmation email sent");
        Ok(())
    }
}
