use crate::domain::error::DomainError;
use crate::domain::user::{NewUser, User};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{error, info};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn list_by_email(&self) -> Result<Vec<User>, DomainError>;
}

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, name)
            VALUES (?, ?, ?)
            RETURNING id, email, password AS password_hash, name
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .map(|db| db.is_unique_violation())
                == Some(true)
            {
                DomainError::EmailAlreadyExists
            } else {
                error!("failed to create user: {}", e);
                DomainError::Internal(format!("database error: {}", e))
            }
        })?;

        info!(user_id = created.id, email = %created.email, "user created");
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password AS password_hash, name
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find user by email {}: {}", email, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn list_by_email(&self) -> Result<Vec<User>, DomainError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password AS password_hash, name
            FROM users
            ORDER BY email ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while listing users: {}", e);
            DomainError::Internal(e.to_string())
        })
    }
}
