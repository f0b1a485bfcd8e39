//! Database repository implementations

pub mod role_repository;
pub mod settings_repository;
pub mod user_repository;

pub use role_repository::RoleRepository;
pub use settings_repository::SettingsRepository;
pub use user_repository::UserRepository;
