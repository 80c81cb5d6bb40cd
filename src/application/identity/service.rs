//! User management service: application-layer orchestration
//!
//! All user-related business logic lives here: email normalization, the
//! registration domain rule, and password hashing.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::application::ports::SharedPasswordHasher;
use crate::domain::{
    DomainError, DomainResult, EmailDomainPolicy, User, UserChanges, UserRepositoryInterface,
};

/// Plaintext user fields as received from a client.
#[derive(Debug, Clone)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// User service: orchestrates the user CRUD use-cases.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer. The hasher and email policy are
/// injected once at start-up.
pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    hasher: SharedPasswordHasher,
    email_policy: EmailDomainPolicy,
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(repo: Arc<R>, hasher: SharedPasswordHasher, email_policy: EmailDomainPolicy) -> Self {
        Self {
            repo,
            hasher,
            email_policy,
        }
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Register a new user. Only addresses on the accepted domain pass.
    pub async fn create_user(&self, input: UserInput) -> DomainResult<i32> {
        let email = EmailDomainPolicy::normalize(&input.email);
        self.email_policy.check(&email)?;

        let password_hash = self.hash_password(input.password).await?;
        let id = self
            .repo
            .create_user(UserChanges {
                name: input.name,
                email,
                password_hash,
            })
            .await?;

        metrics::counter!("users_created_total").increment(1);
        info!(user_id = id, "User created");
        Ok(id)
    }

    /// Overwrite name, email and password of user `id`.
    ///
    /// The registration domain rule is not applied here. A missing `id`
    /// is not an error; the returned row count is then zero.
    pub async fn update_user(&self, id: i32, input: UserInput) -> DomainResult<u64> {
        let email = EmailDomainPolicy::normalize(&input.email);
        let password_hash = self.hash_password(input.password).await?;

        let rows = self
            .repo
            .replace_user(
                id,
                UserChanges {
                    name: input.name,
                    email,
                    password_hash,
                },
            )
            .await?;

        metrics::counter!("users_updated_total").increment(rows);
        info!(user_id = id, rows, "User update applied");
        Ok(rows)
    }

    /// Delete user `id`. Deleting a missing user is not an error.
    pub async fn delete_user(&self, id: i32) -> DomainResult<u64> {
        let rows = self.repo.delete_user(id).await?;

        metrics::counter!("users_deleted_total").increment(rows);
        info!(user_id = id, rows, "User delete applied");
        Ok(rows)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_user(&self, id: i32) -> DomainResult<User> {
        self.repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            })
    }

    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.repo.list_users().await
    }

    // ── Helpers ─────────────────────────────────────────────────

    /// Runs on the blocking pool.
    async fn hash_password(&self, password: String) -> DomainResult<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::Hashing(format!("hashing task failed: {}", e)))?
    }
}
