use async_trait::async_trait;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use tracing::debug;

use crate::domain::{DomainError, DomainResult, User, UserChanges, UserRepositoryInterface};
use crate::infrastructure::database::entities::user;

/// SeaORM-backed user repository. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
    }
}

fn changes_to_active(changes: UserChanges) -> user::ActiveModel {
    user::ActiveModel {
        id: NotSet,
        name: Set(changes.name),
        email: Set(changes.email),
        password_hash: Set(changes.password_hash),
    }
}

fn db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
        _ => DomainError::Storage(e.to_string()),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, changes: UserChanges) -> DomainResult<i32> {
        let result = user::Entity::insert(changes_to_active(changes))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.last_insert_id)
    }

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn list_users(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn replace_user(&self, id: i32, changes: UserChanges) -> DomainResult<u64> {
        let result = user::Entity::update_many()
            .set(changes_to_active(changes))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        debug!(user_id = id, rows = result.rows_affected, "users row replaced");
        Ok(result.rows_affected)
    }

    async fn delete_user(&self, id: i32) -> DomainResult<u64> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        debug!(user_id = id, rows = result.rows_affected, "users row deleted");
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::{ensure_schema, init_database, DatabaseConfig};

    async fn repo() -> UserRepository {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        ensure_schema(&db).await.unwrap();
        UserRepository::new(db)
    }

    fn changes(name: &str, email: &str) -> UserChanges {
        UserChanges {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: format!("hash-of-{name}"),
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let repo = repo().await;
        let a = repo.create_user(changes("A", "a@gmail.com")).await.unwrap();
        let b = repo.create_user(changes("B", "b@gmail.com")).await.unwrap();
        assert!(b > a);

        let stored = repo.get_user_by_id(a).await.unwrap().unwrap();
        assert_eq!(stored.name, "A");
        assert_eq!(stored.email, "a@gmail.com");
        assert_eq!(stored.password_hash, "hash-of-A");
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let repo = repo().await;
        assert!(repo.get_user_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_returns_rows_in_id_order() {
        let repo = repo().await;
        for name in ["C", "A", "B"] {
            repo.create_user(changes(name, "x@gmail.com")).await.unwrap();
        }
        let names: Vec<String> = repo
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, ["C", "A", "B"]);
    }

    #[tokio::test]
    async fn replace_touches_only_target_row() {
        let repo = repo().await;
        let a = repo.create_user(changes("A", "a@gmail.com")).await.unwrap();
        let b = repo.create_user(changes("B", "b@gmail.com")).await.unwrap();

        let rows = repo
            .replace_user(a, changes("A2", "a2@example.com"))
            .await
            .unwrap();
        assert_eq!(rows, 1);

        let updated = repo.get_user_by_id(a).await.unwrap().unwrap();
        assert_eq!(updated.name, "A2");
        assert_eq!(updated.email, "a2@example.com");
        assert_eq!(updated.password_hash, "hash-of-A2");

        let untouched = repo.get_user_by_id(b).await.unwrap().unwrap();
        assert_eq!(untouched.name, "B");
    }

    #[tokio::test]
    async fn replace_missing_affects_nothing() {
        let repo = repo().await;
        let rows = repo.replace_user(42, changes("X", "x@gmail.com")).await.unwrap();
        assert_eq!(rows, 0);
        assert!(repo.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_reports_rows_affected() {
        let repo = repo().await;
        let a = repo.create_user(changes("A", "a@gmail.com")).await.unwrap();

        assert_eq!(repo.delete_user(a).await.unwrap(), 1);
        assert_eq!(repo.delete_user(a).await.unwrap(), 0);
        assert!(repo.get_user_by_id(a).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_table_is_a_storage_error() {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        let repo = UserRepository::new(db);
        assert!(matches!(
            repo.list_users().await,
            Err(DomainError::Storage(_))
        ));
    }
}
