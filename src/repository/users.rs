//! Users repository for database operations

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::user::{Role, User},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: SqlitePool,
}

impl UsersRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found.", id)))
    }

    /// Get user by email (case-insensitive)
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(email) = LOWER(?)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check if an email is already registered
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER(?))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Insert a new user
    pub async fn create(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, created_at, avatar_color)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.created_at)
        .bind(&user.avatar_color)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List all users, newest first
    pub async fn list_all(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// List users holding the admin role
    pub async fn list_admins(&self) -> AppResult<Vec<User>> {
        let admins = sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = ?")
            .bind(Role::Admin)
            .fetch_all(&self.pool)
            .await?;

        Ok(admins)
    }

    /// Count registered users
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
