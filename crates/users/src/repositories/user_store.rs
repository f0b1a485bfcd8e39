//! `UserStore` over the user repository.

use async_trait::async_trait;
use registrar_database::{DatabaseResult, NewUser, UserRecord, UserRepository};

use super::UserStore;

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<UserRecord>> {
        UserRepository::find_by_email(self, email).await
    }

    async fn find_by_confirmation_token(
        &self,
        token: &str,
    ) -> DatabaseResult<Option<UserRecord>> {
        UserRepository::find_by_confirmation_token(self, token).await
    }

    async fn create(&self, user: &NewUser) -> DatabaseResult<UserRecord> {
        UserRepository::create(self, user).await
    }

    async fn set_confirmation_token(
        &self,
        user_id: i64,
        token: Option<&str>,
    ) -> DatabaseResult<()> {
        UserRepository::set_confirmation_token(self, user_id, token).await
    }

    async fn mark_confirmed(&self, user_id: i64) -> DatabaseResult<UserRecord> {
        UserRepository::mark_confirmed(self, user_id).await
    }
}
