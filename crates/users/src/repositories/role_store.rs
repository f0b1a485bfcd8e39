//! `RoleStore` over the role repository.

use async_trait::async_trait;
use registrar_database::{DatabaseResult, RoleRecord, RoleRepository};

use super::RoleStore;

#[async_trait]
impl RoleStore for RoleRepository {
    async fn find_by_type(&self, role_type: &str) -> DatabaseResult<Option<RoleRecord>> {
        RoleRepository::find_by_type(self, role_type).await
    }
}
