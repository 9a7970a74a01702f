//! User repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;

use sanchi_core::{Email, UserId};

use super::RepositoryError;
use crate::models::User;

#[derive(sqlx::FromRow)]
struct UserAuthRow {
    #[sqlx(flatten)]
    user: User,
    password_hash: String,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new account with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists (the
    /// existing row is left untouched).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (name, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, email, created_at
            ",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(user)
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, name, email, created_at
            FROM users
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user's profile and password hash by email.
    ///
    /// Returns `None` if no account exists for the email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserAuthRow>(
            r"
            SELECT id, name, email, created_at, password_hash
            FROM users
            WHERE email = ?1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| (r.user, r.password_hash)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    #[tokio::test]
    async fn test_create_and_fetch() {
        let pool = memory_pool().await;
        let users = UserRepository::new(&pool);

        let email = Email::parse("priya@example.com").unwrap();
        let created = users.create("Priya", &email, "hash").await.unwrap();
        assert_eq!(created.name, "Priya");

        let fetched = users.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, email);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_and_keeps_original() {
        let pool = memory_pool().await;
        let users = UserRepository::new(&pool);

        let email = Email::parse("priya@example.com").unwrap();
        let original = users.create("Priya", &email, "hash-1").await.unwrap();

        let err = users.create("Imposter", &email, "hash-2").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        // The original row is untouched.
        let (user, hash) = users.get_password_hash(&email).await.unwrap().unwrap();
        assert_eq!(user.id, original.id);
        assert_eq!(user.name, "Priya");
        assert_eq!(hash, "hash-1");
    }

    #[tokio::test]
    async fn test_password_hash_missing_for_unknown_email() {
        let pool = memory_pool().await;
        let users = UserRepository::new(&pool);

        let email = Email::parse("nobody@example.com").unwrap();
        assert!(users.get_password_hash(&email).await.unwrap().is_none());
    }
}
