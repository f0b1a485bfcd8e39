//! Domain entities for the database layer

pub mod role;
pub mod user;

pub use role::RoleRecord;
pub use user::{NewUser, UserRecord, LOCAL_PROVIDER};
