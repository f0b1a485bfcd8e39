//! In-memory collaborators for exercising the services without a database

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use registrar_database::{DatabaseError, DatabaseResult, NewUser, RoleRecord, UserRecord};
use tokio::sync::RwLock;

use super::notifier::ConfirmationNotifier;
use crate::entities::{RegistrationSettings, SanitizedUser};
use crate::repositories::{RoleStore, SettingsProvider, UserStore};
use crate::types::{MailError, NotifierError};

pub struct MockSettings {
    settings: RwLock<RegistrationSettings>,
}

impl MockSettings {
    pub fn new(settings: RegistrationSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl SettingsProvider for MockSettings {
    async fn registration_settings(&self) -> DatabaseResult<RegistrationSettings> {
        Ok(self.settings.read().await.clone())
    }
}

/// Mock user store. Emails are matched case-insensitively like the real
/// column collation.
#[derive(Default)]
pub struct MockUserStore {
    users: RwLock<HashMap<i64, UserRecord>>,
    next_id: RwLock<i64>,
    pub lookups: AtomicUsize,
    pub creates: AtomicUsize,
    /// `find_by_email` misses, as if another request inserted concurrently
    stale_lookups: AtomicBool,
    failing_creates: AtomicBool,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stale_lookups(self) -> Self {
        self.stale_lookups.store(true, Ordering::SeqCst);
        self
    }

    pub fn with_failing_creates(self) -> Self {
        self.failing_creates.store(true, Ordering::SeqCst);
        self
    }

    pub async fn all(&self) -> Vec<UserRecord> {
        let mut users: Vec<_> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|user| user.id);
        users
    }

    pub async fn get(&self, id: i64) -> Option<UserRecord> {
        self.users.read().await.get(&id).cloned()
    }

    pub async fn set_blocked(&self, id: i64, blocked: bool) {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.blocked = blocked;
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<UserRecord>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.stale_lookups.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_confirmation_token(
        &self,
        token: &str,
    ) -> DatabaseResult<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| user.confirmation_token.as_deref() == Some(token))
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> DatabaseResult<UserRecord> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.failing_creates.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError("disk I/O error".into()));
        }
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(DatabaseError::Duplicate("users.email".into()));
        }

        let mut next_id = self.next_id.write().await;
        *next_id += 1;
        let now = Utc::now();
        let record = UserRecord {
            id: *next_id,
            email: user.email.clone(),
            password: user.password_hash.clone(),
            provider: user.provider.clone(),
            role: user.role,
            confirmed: user.confirmed,
            blocked: false,
            confirmation_token: None,
            profile: user.profile.clone(),
            created_at: now,
            updated_at: now,
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn set_confirmation_token(
        &self,
        user_id: i64,
        token: Option<&str>,
    ) -> DatabaseResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("user {user_id}")))?;
        user.confirmation_token = token.map(str::to_string);
        Ok(())
    }

    async fn mark_confirmed(&self, user_id: i64) -> DatabaseResult<UserRecord> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("user {user_id}")))?;
        user.confirmed = true;
        user.confirmation_token = None;
        Ok(user.clone())
    }
}

pub struct MockRoleStore {
    roles: Vec<RoleRecord>,
    pub lookups: AtomicUsize,
}

impl MockRoleStore {
    pub fn new(roles: Vec<RoleRecord>) -> Self {
        Self {
            roles,
            lookups: AtomicUsize::new(0),
        }
    }

    /// `authenticated` with id 1, `public` with id 2
    pub fn seeded() -> Self {
        Self::new(vec![
            RoleRecord {
                id: 1,
                name: "Authenticated".into(),
                description: None,
                role_type: "authenticated".into(),
            },
            RoleRecord {
                id: 2,
                name: "Public".into(),
                description: None,
                role_type: "public".into(),
            },
        ])
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoleStore for MockRoleStore {
    async fn find_by_type(&self, role_type: &str) -> DatabaseResult<Option<RoleRecord>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .roles
            .iter()
            .find(|role| role.role_type == role_type)
            .cloned())
    }
}

/// Records every user it is asked to notify. Fails with `failure` when set.
pub struct MockNotifier {
    pub sent: RwLock<Vec<SanitizedUser>>,
    failure: Option<String>,
    store: Option<Arc<MockUserStore>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            sent: RwLock::new(Vec::new()),
            failure: None,
            store: None,
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            failure: Some(detail.to_string()),
            ..Self::new()
        }
    }

    /// Also stores a fixed confirmation token (`token-<id>`) on the user
    pub fn storing_tokens(store: Arc<MockUserStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::new()
        }
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

#[async_trait]
impl ConfirmationNotifier for MockNotifier {
    async fn send_confirmation_email(&self, user: &SanitizedUser) -> Result<(), NotifierError> {
        self.sent.write().await.push(user.clone());
        if let Some(detail) = &self.failure {
            return Err(NotifierError::Mail(MailError::Transport(detail.clone())));
        }
        if let Some(store) = &self.store {
            let token = format!("token-{}", user.id);
            store.set_confirmation_token(user.id, Some(&token)).await?;
        }
        Ok(())
    }
}
