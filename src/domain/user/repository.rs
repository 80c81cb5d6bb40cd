use async_trait::async_trait;

use super::{User, UserChanges};
use crate::domain::DomainResult;

/// Persistence port for users. Every method is a single SQL statement.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Insert a row and return its server-assigned id.
    async fn create_user(&self, changes: UserChanges) -> DomainResult<i32>;

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>>;

    /// All rows ordered by id.
    async fn list_users(&self) -> DomainResult<Vec<User>>;

    /// Overwrite every writable column of row `id`. Returns rows affected.
    async fn replace_user(&self, id: i32, changes: UserChanges) -> DomainResult<u64>;

    /// Returns rows affected; zero is not an error.
    async fn delete_user(&self, id: i32) -> DomainResult<u64>;
}
